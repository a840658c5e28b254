use page_tree::element::{self, factory};
use page_tree::{
    Element, ElementContent, ElementKind, ExportError, HtmlRenderer, SequentialIds, Settings,
};

/// A page that uses every known element type at least once.
fn every_kind_page() -> Vec<Element> {
    let mut ids = SequentialIds::new("basics");
    let mut leaf = |kind| factory::create(kind, &mut ids);

    let leaves: Vec<Element> = ElementKind::ALL
        .into_iter()
        .filter(|kind| !kind.is_container())
        .map(&mut leaf)
        .collect();
    let form = leaf(ElementKind::Form).with_children(vec![
        leaf(ElementKind::Input),
        leaf(ElementKind::Select),
        leaf(ElementKind::Checkbox),
    ]);

    let mut column_children = leaves;
    column_children.push(form);
    let column = leaf(ElementKind::Column).with_children(column_children);
    let row = leaf(ElementKind::Row).with_children(vec![column]);
    let section = leaf(ElementKind::Section)
        .with_style("background", "#fff")
        .with_children(vec![row]);
    let popup = leaf(ElementKind::Popup).with_settings(Settings {
        hidden: true,
        ..Settings::default()
    });

    vec![section, popup]
}

#[test]
fn test_every_kind_is_present() {
    let page = every_kind_page();
    let mut seen = Vec::new();
    for root in &page {
        root.walk(&mut |e| seen.extend(e.kind()));
    }
    for kind in ElementKind::ALL {
        assert!(seen.contains(&kind), "{kind} missing from fixture");
    }
}

#[test]
fn test_json_round_trip() {
    let page = every_kind_page();
    let json = element::to_json(&page).unwrap();
    let parsed = element::from_json(&json).unwrap();
    assert_eq!(parsed, page);
}

#[test]
fn test_html_export_covers_every_kind() {
    let page = every_kind_page();
    let html = HtmlRenderer::new().render(&page).unwrap();
    assert!(html.starts_with("<section"));
    assert!(html.contains("<hr"));
    assert!(html.contains("<select name=\"choice\">"));
    assert!(html.contains("class=\"popup\" role=\"dialog\""));
    assert!(html.contains(" hidden>"));
}

#[test]
fn test_export_refuses_unrecognized_type() {
    let json = r#"[
        {"id": "s", "type": "section", "children": [
            {"id": "m", "type": "marquee", "content": {"text": "hi"}}
        ]}
    ]"#;
    let page = element::from_json(json).unwrap();
    assert_eq!(page[0].children()[0].type_name(), "marquee");

    let err = HtmlRenderer::new().render(&page).unwrap_err();
    match err {
        ExportError::UnknownType { id, type_name } => {
            assert_eq!(id.as_str(), "m");
            assert_eq!(type_name, "marquee");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(element::to_json(&page).is_err());
}

#[test]
fn test_wire_shape() {
    let text = Element::new(
        "t1",
        ElementContent::Text(page_tree::element::TextContent::new("Hello")),
    )
    .with_style("color", "red")
    .with_settings(Settings::link("https://example.com"));

    let value = serde_json::to_value(&text).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "id": "t1",
            "type": "text",
            "content": { "text": "Hello" },
            "styles": { "color": "red" },
            "settings": { "link": "https://example.com" }
        })
    );
}

#[test]
fn test_unmodelled_content_keys_survive_round_trip() {
    let json = r#"[
        {"id": "s", "type": "section", "content": {"anchor": "top"}, "children": [
            {"id": "t", "type": "text",
             "content": {"text": "hi", "fontFamily": "Noto", "richText": {"b": true}}},
            {"id": "d", "type": "divider", "content": {"thickness": 2}}
        ]}
    ]"#;
    let page = element::from_json(json).unwrap();
    let exported: serde_json::Value =
        serde_json::from_str(&element::to_json(&page).unwrap()).unwrap();

    let section = &exported[0];
    assert_eq!(section["content"], serde_json::json!({ "anchor": "top" }));
    assert_eq!(
        section["children"][0]["content"],
        serde_json::json!({ "text": "hi", "fontFamily": "Noto", "richText": { "b": true } })
    );
    assert_eq!(
        section["children"][1]["content"],
        serde_json::json!({ "thickness": 2 })
    );
    assert_eq!(element::from_json(&element::to_json(&page).unwrap()).unwrap(), page);
}

#[test]
fn test_loaded_heading_level_is_clamped() {
    let json = r#"[
        {"id": "low", "type": "heading", "content": {"text": "x", "level": 0}},
        {"id": "high", "type": "heading", "content": {"text": "y", "level": 255}}
    ]"#;
    let page = element::from_json(json).unwrap();
    let levels: Vec<u8> = page
        .iter()
        .map(|e| match &e.content {
            ElementContent::Heading(h) => h.level,
            other => panic!("unexpected content {other:?}"),
        })
        .collect();
    assert_eq!(levels, vec![1, 6]);

    let html = HtmlRenderer::new().render(&page).unwrap();
    assert!(html.contains("<h1 data-id=\"low\">x</h1>"));
    assert!(html.contains("<h6 data-id=\"high\">y</h6>"));

    let exported: serde_json::Value =
        serde_json::from_str(&element::to_json(&page).unwrap()).unwrap();
    assert_eq!(exported[0]["content"]["level"], 1);
}
