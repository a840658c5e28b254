//! The Element JSON schema: what loads come in as and what saves go out as.

use serde::ser::{Error as _, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{Element, ElementContent, Settings, Styles};
use crate::error::{ExportError, LoadError};
use crate::id_generator::ElementId;

/// An element exactly as it appears on the wire, before its content is typed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub content: Map<String, Value>,
    #[serde(default)]
    pub styles: Styles,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub children: Option<Vec<RawElement>>,
}

impl TryFrom<RawElement> for Element {
    type Error = LoadError;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let content = ElementContent::decode(&raw.type_name, raw.content).map_err(|err| {
            LoadError::InvalidContent {
                id: raw.id.clone(),
                type_name: raw.type_name.clone(),
                reason: err.to_string(),
            }
        })?;

        let children = match raw.children {
            Some(children) => Some(
                children
                    .into_iter()
                    .map(Element::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        let children = match (content.kind(), children) {
            (Some(kind), children) if kind.is_container() => Some(children.unwrap_or_default()),
            (Some(_), Some(children)) if !children.is_empty() => {
                return Err(LoadError::LeafWithChildren(raw.id));
            }
            (Some(_), _) => None,
            (None, children) => children,
        };

        Ok(Element {
            id: raw.id,
            content,
            styles: raw.styles,
            settings: raw.settings,
            children,
        })
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let content = self.content.encode().map_err(S::Error::custom)?;
        let fields = if self.children.is_some() { 6 } else { 5 };
        let mut state = serializer.serialize_struct("Element", fields)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", self.type_name())?;
        state.serialize_field("content", &content)?;
        state.serialize_field("styles", &self.styles)?;
        state.serialize_field("settings", &self.settings)?;
        if let Some(children) = &self.children {
            state.serialize_field("children", children)?;
        }
        state.end()
    }
}

/// Encodes a top-level sequence. Fails on the first element whose type is unrecognized.
pub fn to_json(elements: &[Element]) -> Result<String, ExportError> {
    for element in elements {
        ensure_recognized(element)?;
    }
    Ok(serde_json::to_string_pretty(elements)?)
}

/// Parses a top-level sequence, rejecting trees that reuse an id.
pub fn from_json(json: &str) -> Result<Vec<Element>, LoadError> {
    let raw: Vec<RawElement> = serde_json::from_str(json)?;
    let elements = raw
        .into_iter()
        .map(Element::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    check_unique_ids(&elements)?;
    Ok(elements)
}

pub(crate) fn ensure_recognized(element: &Element) -> Result<(), ExportError> {
    let mut unknown = None;
    element.walk(&mut |e| {
        if unknown.is_none() && e.kind().is_none() {
            unknown = Some(e);
        }
    });
    match unknown {
        Some(e) => Err(ExportError::UnknownType {
            id: e.id.clone(),
            type_name: e.type_name().to_owned(),
        }),
        None => Ok(()),
    }
}

pub(crate) fn check_unique_ids(elements: &[Element]) -> Result<(), LoadError> {
    let mut seen = std::collections::HashSet::new();
    let mut duplicate = None;
    for element in elements {
        element.walk(&mut |e| {
            if !seen.insert(&e.id) && duplicate.is_none() {
                duplicate = Some(e.id.clone());
            }
        });
    }
    match duplicate {
        Some(id) => Err(LoadError::DuplicateId(id)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, TextContent};

    #[test]
    fn leaf_children_are_rejected() {
        let json = r#"[{"id":"t","type":"text","children":[{"id":"x","type":"text"}]}]"#;
        assert!(matches!(
            from_json(json),
            Err(LoadError::LeafWithChildren(id)) if id.as_str() == "t"
        ));
    }

    #[test]
    fn empty_leaf_children_are_dropped() {
        let elements = from_json(r#"[{"id":"t","type":"text","children":[]}]"#).unwrap();
        assert_eq!(elements[0].children, None);
    }

    #[test]
    fn containers_gain_children_list() {
        let elements = from_json(r#"[{"id":"s","type":"section"}]"#).unwrap();
        assert_eq!(elements[0].kind(), Some(ElementKind::Section));
        assert_eq!(elements[0].children, Some(vec![]));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[{"id":"a","type":"section","children":[{"id":"a","type":"row"}]}]"#;
        assert!(matches!(from_json(json), Err(LoadError::DuplicateId(_))));
    }

    #[test]
    fn unrecognized_types_block_encoding() {
        let elements =
            from_json(r#"[{"id":"s","type":"section","children":[{"id":"w","type":"widget"}]}]"#)
                .unwrap();
        match to_json(&elements) {
            Err(ExportError::UnknownType { id, type_name }) => {
                assert_eq!(id.as_str(), "w");
                assert_eq!(type_name, "widget");
            }
            other => panic!("expected UnknownType, got {other:?}"),
        }
    }

    #[test]
    fn leaves_omit_children_key() {
        let text = Element::new("t", ElementContent::Text(TextContent::new("hello")));
        let value = serde_json::to_value(&text).unwrap();
        assert!(value.get("children").is_none());
        assert_eq!(value["type"], "text");
        assert_eq!(value["content"]["text"], "hello");
    }
}
