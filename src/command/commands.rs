use super::{CommandContext, CommandResult, Direction};
use crate::element::{Element, ElementPatch};
use crate::error::EditError;
use crate::event::DocumentEvent;
use crate::id_generator::{ElementId, IdGenerator};
use crate::tree::Tree;

/// Outcome of a command that succeeded.
///
/// `event` is `None` when the command left the tree exactly as it was; such commands
/// do not produce an undo step.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<T> {
    pub value: T,
    pub event: Option<DocumentEvent>,
}

impl<T> Applied<T> {
    fn changed(value: T, event: DocumentEvent) -> Self {
        Self {
            value,
            event: Some(event),
        }
    }

    fn unchanged(value: T) -> Self {
        Self { value, event: None }
    }

    pub fn is_change(&self) -> bool {
        self.event.is_some()
    }

    fn discard(self) -> Applied<()> {
        Applied {
            value: (),
            event: self.event,
        }
    }
}

/// Edits that can be executed against a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append an element (with its subtree) at the top level or under `parent`
    AddElement {
        element: Element,
        parent: Option<ElementId>,
    },

    /// Shallow-merge new fields into an element
    UpdateElement { id: ElementId, patch: ElementPatch },

    /// Remove an element and its subtree
    RemoveElement { id: ElementId },

    /// Deep copy with fresh ids, placed right after the original
    DuplicateElement { id: ElementId },

    /// Swap with the neighbouring sibling
    MoveElement { id: ElementId, direction: Direction },
}

impl Command {
    /// Execute the command against `tree`.
    pub fn apply(self, tree: &mut Tree, ctx: &mut CommandContext<'_>) -> CommandResult<()> {
        Ok(match self {
            Command::AddElement { element, parent } => {
                add_element(tree, ctx, element, parent.as_ref())?.discard()
            }
            Command::UpdateElement { id, patch } => update_element(tree, &id, patch)?.discard(),
            Command::RemoveElement { id } => remove_element(tree, &id)?.discard(),
            Command::DuplicateElement { id } => duplicate_element(tree, ctx, &id)?.discard(),
            Command::MoveElement { id, direction } => {
                move_element(tree, &id, direction)?.discard()
            }
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddElement { .. } => "add",
            Command::UpdateElement { .. } => "update",
            Command::RemoveElement { .. } => "remove",
            Command::DuplicateElement { .. } => "duplicate",
            Command::MoveElement { .. } => "move",
        }
    }
}

pub(crate) fn add_element(
    tree: &mut Tree,
    ctx: &mut CommandContext<'_>,
    element: Element,
    parent: Option<&ElementId>,
) -> CommandResult<ElementId> {
    let parent_kind = match parent {
        None => None,
        Some(p) if !tree.contains(p) => return Err(EditError::NotFound(p.clone())),
        Some(p) => match tree.kind_of(p) {
            Some(kind) if kind.is_container() => Some(kind),
            _ => return Err(EditError::NotAContainer(p.clone())),
        },
    };
    ctx.nesting.check_subtree(parent_kind, &element)?;

    let id = element.id.clone();
    tree.insert(element, parent, None)?;
    Ok(Applied::changed(
        id.clone(),
        DocumentEvent::ElementAdded {
            id,
            parent: parent.cloned(),
        },
    ))
}

pub(crate) fn update_element(
    tree: &mut Tree,
    id: &ElementId,
    patch: ElementPatch,
) -> CommandResult<bool> {
    if tree.update(id, patch)? {
        Ok(Applied::changed(
            true,
            DocumentEvent::ElementUpdated { id: id.clone() },
        ))
    } else {
        Ok(Applied::unchanged(false))
    }
}

pub(crate) fn remove_element(tree: &mut Tree, id: &ElementId) -> CommandResult<Element> {
    let removed = tree.remove(id)?;
    Ok(Applied::changed(
        removed,
        DocumentEvent::ElementRemoved { id: id.clone() },
    ))
}

pub(crate) fn duplicate_element(
    tree: &mut Tree,
    ctx: &mut CommandContext<'_>,
    id: &ElementId,
) -> CommandResult<ElementId> {
    let (parent, index) = tree
        .position(id)
        .ok_or_else(|| EditError::NotFound(id.clone()))?;
    let original = tree
        .get(id)
        .ok_or_else(|| EditError::NotFound(id.clone()))?;

    let copy = with_fresh_ids(original, tree, ctx.ids);
    let copy_id = copy.id.clone();
    tree.insert(copy, parent.as_ref(), Some(index + 1))?;

    Ok(Applied::changed(
        copy_id.clone(),
        DocumentEvent::ElementDuplicated {
            source: id.clone(),
            copy: copy_id,
        },
    ))
}

pub(crate) fn move_element(
    tree: &mut Tree,
    id: &ElementId,
    direction: Direction,
) -> CommandResult<bool> {
    if tree.swap_adjacent(id, direction == Direction::Down)? {
        Ok(Applied::changed(
            true,
            DocumentEvent::ElementMoved {
                id: id.clone(),
                direction,
            },
        ))
    } else {
        Ok(Applied::unchanged(false))
    }
}

/// Reassigns the id of `element` and of every descendant.
fn with_fresh_ids(mut element: Element, tree: &Tree, ids: &mut dyn IdGenerator) -> Element {
    element.id = loop {
        let candidate = ids.next_id();
        if !tree.contains(&candidate) {
            break candidate;
        }
    };
    if let Some(children) = element.children.take() {
        let mut fresh = Vec::with_capacity(children.len());
        for child in children {
            fresh.push(with_fresh_ids(child, tree, ids));
        }
        element.children = Some(fresh);
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NestingPolicy;
    use crate::element::{ContainerContent, ElementContent, ElementKind, TextContent};
    use crate::id_generator::SequentialIds;

    fn fixture() -> Tree {
        Tree::from_elements(vec![
            Element::new("s", ElementContent::Section(ContainerContent::default())).with_children(
                vec![
                    Element::new("a", ElementContent::Text(TextContent::new("a"))),
                    Element::new("b", ElementContent::Text(TextContent::new("b"))),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_lands_after_original() {
        let mut tree = fixture();
        let mut ids = SequentialIds::new("dup");
        let mut ctx = CommandContext::new(&mut ids, NestingPolicy::Relaxed);

        let applied = duplicate_element(&mut tree, &mut ctx, &"a".into()).unwrap();
        let order: Vec<_> = tree.children_of(&"s".into()).unwrap().cloned().collect();
        assert_eq!(order, vec!["a".into(), applied.value.clone(), "b".into()]);
        assert!(applied.is_change());
    }

    #[test]
    fn move_at_boundary_is_unchanged() {
        let mut tree = fixture();
        let applied = move_element(&mut tree, &"a".into(), Direction::Up).unwrap();
        assert!(!applied.is_change());
        let applied = move_element(&mut tree, &"b".into(), Direction::Down).unwrap();
        assert!(!applied.is_change());
        let applied = move_element(&mut tree, &"b".into(), Direction::Up).unwrap();
        assert!(applied.is_change());
        assert_eq!(tree.position(&"b".into()), Some((Some("s".into()), 0)));
    }

    #[test]
    fn strict_policy_rejects_misplaced_add() {
        let mut tree = fixture();
        let mut ids = SequentialIds::new("strict");
        let mut ctx = CommandContext::new(&mut ids, NestingPolicy::Strict);
        let heading = crate::element::factory::create(ElementKind::Heading, ctx.ids);

        let err = add_element(&mut tree, &mut ctx, heading, Some(&"s".into())).unwrap_err();
        assert!(matches!(err, EditError::NestingViolation { .. }));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn update_with_same_values_is_unchanged() {
        let mut tree = fixture();
        let patch = ElementPatch::new().content(ElementContent::Text(TextContent::new("a")));
        let applied = update_element(&mut tree, &"a".into(), patch).unwrap();
        assert!(!applied.is_change());
    }
}
