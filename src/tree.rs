//! Arena storage for the element tree.
//!
//! Nodes live in a flat `id -> node` map; each node records its parent and, for
//! containers, the ordered ids of its children. Lookups are O(1) and structural edits
//! touch one sibling list. Both collections are persistent (`im`), so cloning a `Tree`
//! for the undo history is O(1) and the clone shares every untouched node with the
//! live tree.

use std::collections::HashSet;

use im::{HashMap, Vector};

use crate::element::{Element, ElementContent, ElementKind, ElementPatch, Settings, Styles};
use crate::error::EditError;
use crate::id_generator::ElementId;

#[derive(Debug, Clone, PartialEq)]
struct Node {
    id: ElementId,
    content: ElementContent,
    styles: Styles,
    settings: Settings,
    parent: Option<ElementId>,
    /// `Some` exactly when the element is a container (or was loaded with children).
    children: Option<Vector<ElementId>>,
}

/// A full tree. Also serves as a history snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    nodes: HashMap<ElementId, Node>,
    roots: Vector<ElementId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<Element>) -> Result<Self, EditError> {
        let mut tree = Self::new();
        for element in elements {
            tree.insert(element, None, None)?;
        }
        Ok(tree)
    }

    /// Total number of elements at every depth.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn roots(&self) -> impl Iterator<Item = &ElementId> {
        self.roots.iter()
    }

    /// Child ids of a container, `None` for leaves and unknown ids.
    pub fn children_of(&self, id: &ElementId) -> Option<impl Iterator<Item = &ElementId>> {
        self.nodes
            .get(id)
            .and_then(|node| node.children.as_ref())
            .map(|children| children.iter())
    }

    /// `None` for top-level elements and unknown ids.
    pub fn parent_of(&self, id: &ElementId) -> Option<&ElementId> {
        self.nodes.get(id).and_then(|node| node.parent.as_ref())
    }

    pub fn kind_of(&self, id: &ElementId) -> Option<ElementKind> {
        self.nodes.get(id).and_then(|node| node.content.kind())
    }

    /// Every id, in pre-order.
    pub fn ids(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<&ElementId> = self.roots.iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id.clone());
            if let Some(children) = self.nodes.get(id).and_then(|n| n.children.as_ref()) {
                stack.extend(children.iter().rev());
            }
        }
        out
    }

    /// Materializes the element and its subtree.
    pub fn get(&self, id: &ElementId) -> Option<Element> {
        let node = self.nodes.get(id)?;
        let children = node
            .children
            .as_ref()
            .map(|ids| ids.iter().filter_map(|child| self.get(child)).collect());
        Some(Element {
            id: node.id.clone(),
            content: node.content.clone(),
            styles: node.styles.clone(),
            settings: node.settings.clone(),
            children,
        })
    }

    /// Materializes the whole top-level sequence.
    pub fn to_elements(&self) -> Vec<Element> {
        self.roots.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Parent and index of `id` within its sibling sequence.
    pub fn position(&self, id: &ElementId) -> Option<(Option<ElementId>, usize)> {
        let node = self.nodes.get(id)?;
        let siblings = self.siblings(node.parent.as_ref())?;
        let index = siblings.index_of(id)?;
        Some((node.parent.clone(), index))
    }

    fn siblings(&self, parent: Option<&ElementId>) -> Option<&Vector<ElementId>> {
        match parent {
            Some(parent) => self.nodes.get(parent)?.children.as_ref(),
            None => Some(&self.roots),
        }
    }

    fn siblings_mut(&mut self, parent: Option<&ElementId>) -> Option<&mut Vector<ElementId>> {
        match parent {
            Some(parent) => self.nodes.get_mut(parent)?.children.as_mut(),
            None => Some(&mut self.roots),
        }
    }

    /// Inserts `element` with its subtree under `parent` (top level when `None`), at
    /// `index` or appended when `index` is `None`.
    pub(crate) fn insert(
        &mut self,
        element: Element,
        parent: Option<&ElementId>,
        index: Option<usize>,
    ) -> Result<(), EditError> {
        if let Some(parent) = parent {
            let node = self
                .nodes
                .get(parent)
                .ok_or_else(|| EditError::NotFound(parent.clone()))?;
            if !node.content.accepts_children() {
                return Err(EditError::NotAContainer(parent.clone()));
            }
        }
        self.validate_subtree(&element)?;

        let id = element.id.clone();
        self.attach(element, parent.cloned());
        if let Some(siblings) = self.siblings_mut(parent) {
            match index {
                Some(index) if index < siblings.len() => siblings.insert(index, id),
                _ => siblings.push_back(id),
            }
        }
        Ok(())
    }

    fn validate_subtree(&self, element: &Element) -> Result<(), EditError> {
        let mut seen = HashSet::new();
        let mut failure = None;
        element.walk(&mut |e| {
            if failure.is_some() {
                return;
            }
            if self.contains(&e.id) || !seen.insert(&e.id) {
                failure = Some(EditError::DuplicateId(e.id.clone()));
            } else if e.kind().is_some_and(|k| !k.is_container()) && !e.children().is_empty() {
                failure = Some(EditError::LeafWithChildren(e.id.clone()));
            }
        });
        failure.map_or(Ok(()), Err)
    }

    fn attach(&mut self, element: Element, parent: Option<ElementId>) {
        let Element {
            id,
            content,
            styles,
            settings,
            children,
        } = element;

        let is_container = content.accepts_children();
        let children = match children {
            Some(children) => {
                let mut ids = Vector::new();
                for child in children {
                    ids.push_back(child.id.clone());
                    self.attach(child, Some(id.clone()));
                }
                Some(ids)
            }
            None if is_container => Some(Vector::new()),
            None => None,
        };
        // Leaves never carry a children list, even an empty one.
        let children = if is_container || content.kind().is_none() {
            children
        } else {
            None
        };

        self.nodes.insert(
            id.clone(),
            Node {
                id,
                content,
                styles,
                settings,
                parent,
                children,
            },
        );
    }

    /// Detaches `id` from its sibling sequence and drops its subtree from the arena.
    pub(crate) fn remove(&mut self, id: &ElementId) -> Result<Element, EditError> {
        let removed = self
            .get(id)
            .ok_or_else(|| EditError::NotFound(id.clone()))?;
        let parent = self.nodes.get(id).and_then(|node| node.parent.clone());

        if let Some(siblings) = self.siblings_mut(parent.as_ref()) {
            if let Some(index) = siblings.index_of(id) {
                siblings.remove(index);
            }
        }
        removed.walk(&mut |e| {
            self.nodes.remove(&e.id);
        });
        Ok(removed)
    }

    /// Swaps `id` with its previous (`forward == false`) or next sibling.
    /// Returns `false` when already at that end of the sequence.
    pub(crate) fn swap_adjacent(&mut self, id: &ElementId, forward: bool) -> Result<bool, EditError> {
        let (parent, index) = self
            .position(id)
            .ok_or_else(|| EditError::NotFound(id.clone()))?;
        let Some(siblings) = self.siblings_mut(parent.as_ref()) else {
            return Ok(false);
        };
        let other = if forward {
            index + 1
        } else if index > 0 {
            index - 1
        } else {
            return Ok(false);
        };
        if other >= siblings.len() {
            return Ok(false);
        }
        siblings.swap(index, other);
        Ok(true)
    }

    /// Applies a shallow patch. Returns whether anything actually changed.
    pub(crate) fn update(&mut self, id: &ElementId, patch: ElementPatch) -> Result<bool, EditError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| EditError::NotFound(id.clone()))?;

        if let Some(content) = &patch.content {
            if content.type_name() != node.content.type_name() {
                return Err(EditError::KindMismatch {
                    id: id.clone(),
                    expected: node.content.type_name().to_owned(),
                    found: content.type_name().to_owned(),
                });
            }
        }

        let mut changed = false;
        if let Some(content) = patch.content {
            changed |= node.content != content;
            node.content = content;
        }
        if let Some(styles) = patch.styles {
            changed |= node.styles != styles;
            node.styles = styles;
        }
        if let Some(settings) = patch.settings {
            changed |= node.settings != settings;
            node.settings = settings;
        }
        Ok(changed)
    }
}
