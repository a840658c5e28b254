use page_tree::element::factory;
use page_tree::{
    Direction, Document, DropPayload, EditError, ElementContent, ElementKind, SequentialIds,
};

fn create_test_document() -> Document {
    Document::default().with_id_generator(SequentialIds::new("drop"))
}

#[test]
fn test_factory_defaults() {
    let mut ids = SequentialIds::new("factory");
    let heading = factory::create(ElementKind::Heading, &mut ids);
    match &heading.content {
        ElementContent::Heading(h) => {
            assert_eq!(h.text, "Heading");
            assert_eq!(h.level, 2);
        }
        other => panic!("unexpected content {other:?}"),
    }

    let video = factory::create(ElementKind::Video, &mut ids);
    assert!(video.settings.controls);

    let section = factory::create(ElementKind::Section, &mut ids);
    assert_eq!(section.children, Some(vec![]));
    assert!(section.styles.contains_key("padding"));
}

#[test]
fn test_palette_drop_creates_element() {
    let mut doc = create_test_document();
    let section = doc
        .apply_drop(DropPayload::NewElement {
            element_type: "section".into(),
            parent: None,
        })
        .unwrap()
        .unwrap();
    let button = doc
        .apply_drop(DropPayload::NewElement {
            element_type: "button".into(),
            parent: Some(section.clone()),
        })
        .unwrap()
        .unwrap();

    assert_eq!(doc.tree().parent_of(&button), Some(&section));
    assert_eq!(doc.tree().kind_of(&button), Some(ElementKind::Button));
}

#[test]
fn test_reorder_drop_moves_element() {
    let mut doc = create_test_document();
    let first = doc.add_new(ElementKind::Section, None).unwrap();
    let second = doc.add_new(ElementKind::Section, None).unwrap();

    let created = doc
        .apply_drop(DropPayload::Reorder {
            id: second.clone(),
            direction: Direction::Up,
        })
        .unwrap();
    assert_eq!(created, None);

    let order: Vec<_> = doc.tree().roots().cloned().collect();
    assert_eq!(order, vec![second, first]);
}

#[test]
fn test_unknown_palette_type() {
    let mut doc = create_test_document();
    let err = doc
        .apply_drop(DropPayload::NewElement {
            element_type: "carousel".into(),
            parent: None,
        })
        .unwrap_err();
    assert_eq!(err, EditError::UnknownKind("carousel".into()));
    assert!(!doc.can_undo());
}
