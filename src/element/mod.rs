//! The element model: one node of a page or funnel tree.
//!
//! Elements are plain owned values. The [`Document`](crate::Document) stores them in an
//! arena ([`Tree`](crate::tree::Tree)) and hands out materialized copies, so an `Element`
//! held by a caller never aliases the live tree.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod content;
pub mod factory;
mod settings;
mod wire;

pub use content::*;
pub use settings::Settings;
pub use wire::{from_json, to_json, RawElement};
pub(crate) use wire::{check_unique_ids, ensure_recognized};

use crate::error::EditError;
use crate::id_generator::ElementId;

/// CSS-like presentational properties. Never interpreted by edit operations.
pub type Styles = BTreeMap<String, String>;

/// Closed set of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Section,
    Row,
    Column,
    Heading,
    Text,
    Image,
    Video,
    Button,
    Form,
    Input,
    Select,
    Checkbox,
    Divider,
    Spacer,
    Countdown,
    Testimonial,
    Pricing,
    Faq,
    Popup,
    Html,
}

impl ElementKind {
    pub const ALL: [ElementKind; 20] = [
        ElementKind::Section,
        ElementKind::Row,
        ElementKind::Column,
        ElementKind::Heading,
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Video,
        ElementKind::Button,
        ElementKind::Form,
        ElementKind::Input,
        ElementKind::Select,
        ElementKind::Checkbox,
        ElementKind::Divider,
        ElementKind::Spacer,
        ElementKind::Countdown,
        ElementKind::Testimonial,
        ElementKind::Pricing,
        ElementKind::Faq,
        ElementKind::Popup,
        ElementKind::Html,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ElementKind::Section => "section",
            ElementKind::Row => "row",
            ElementKind::Column => "column",
            ElementKind::Heading => "heading",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Video => "video",
            ElementKind::Button => "button",
            ElementKind::Form => "form",
            ElementKind::Input => "input",
            ElementKind::Select => "select",
            ElementKind::Checkbox => "checkbox",
            ElementKind::Divider => "divider",
            ElementKind::Spacer => "spacer",
            ElementKind::Countdown => "countdown",
            ElementKind::Testimonial => "testimonial",
            ElementKind::Pricing => "pricing",
            ElementKind::Faq => "faq",
            ElementKind::Popup => "popup",
            ElementKind::Html => "html",
        }
    }

    /// Container kinds own a (possibly empty) children list; every other kind is a leaf.
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            ElementKind::Section
                | ElementKind::Row
                | ElementKind::Column
                | ElementKind::Form
                | ElementKind::Popup
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EditError::UnknownKind(s.to_owned()))
    }
}

/// A node of the tree together with its whole subtree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawElement")]
pub struct Element {
    pub id: ElementId,
    pub content: ElementContent,
    pub styles: Styles,
    pub settings: Settings,
    /// `Some` for container kinds, `None` for leaves.
    pub children: Option<Vec<Element>>,
}

impl Element {
    pub fn new(id: impl Into<ElementId>, content: ElementContent) -> Self {
        let children = content.accepts_children().then(Vec::new);
        Self {
            id: id.into(),
            content,
            styles: Styles::new(),
            settings: Settings::default(),
            children,
        }
    }

    /// `None` for elements loaded with a type outside [`ElementKind`].
    pub fn kind(&self) -> Option<ElementKind> {
        self.content.kind()
    }

    pub fn type_name(&self) -> &str {
        self.content.type_name()
    }

    pub fn is_container(&self) -> bool {
        self.content.accepts_children()
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn children(&self) -> &[Element] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Pre-order walk over this element and every descendant.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Number of elements in this subtree, itself included.
    pub fn count(&self) -> usize {
        let mut n = 0;
        self.walk(&mut |_| n += 1);
        n
    }

    pub fn find(&self, id: &ElementId) -> Option<&Element> {
        if &self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }
}

/// Fields replaced by an update. Absent fields are kept as they are.
///
/// The merge is shallow: a present `styles` map replaces the whole map rather than
/// being merged key by key. Batch several field changes into one patch so they undo
/// as a single step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub content: Option<ElementContent>,
    pub styles: Option<Styles>,
    pub settings: Option<Settings>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: ElementContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn styles(mut self, styles: Styles) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.styles.is_none() && self.settings.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.as_str().parse::<ElementKind>(), Ok(kind));
        }
        assert_eq!(
            "carousel".parse::<ElementKind>(),
            Err(EditError::UnknownKind("carousel".into()))
        );
    }

    #[test]
    fn containers_start_with_empty_children() {
        let column = Element::new("c", ElementContent::Column(ContainerContent::default()));
        assert_eq!(column.children, Some(vec![]));

        let text = Element::new("t", ElementContent::Text(TextContent::new("hi")));
        assert_eq!(text.children, None);
    }

    #[test]
    fn find_walks_descendants() {
        let tree = Element::new("s", ElementContent::Section(ContainerContent::default()))
            .with_children(vec![
                Element::new("r", ElementContent::Row(ContainerContent::default())).with_children(
                    vec![Element::new("t", ElementContent::Text(TextContent::new("x")))],
                ),
            ]);
        assert_eq!(tree.count(), 3);
        assert_eq!(tree.find(&"t".into()).map(|e| e.type_name()), Some("text"));
        assert!(tree.find(&"missing".into()).is_none());
    }
}
