use thiserror::Error;

use crate::element::ElementKind;
use crate::id_generator::ElementId;

/// Errors returned by edit operations. A failed edit leaves the document untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no element with id {0}")]
    NotFound(ElementId),

    #[error("element {0} cannot hold children")]
    NotAContainer(ElementId),

    #[error("leaf element {0} carries children")]
    LeafWithChildren(ElementId),

    #[error("id {0} is already used in this tree")]
    DuplicateId(ElementId),

    #[error("element {id} is a {expected}, patch content is for a {found}")]
    KindMismatch {
        id: ElementId,
        expected: String,
        found: String,
    },

    #[error("{child} may not be placed {}", placement(.parent))]
    NestingViolation {
        parent: Option<ElementKind>,
        child: String,
    },

    #[error("unknown element type {0:?}")]
    UnknownKind(String),
}

fn placement(parent: &Option<ElementKind>) -> String {
    match parent {
        Some(kind) => format!("inside a {kind}"),
        None => "at the top level".to_owned(),
    }
}

/// Errors raised while projecting a tree into JSON or markup.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("element {id} has unrecognized type {type_name:?}")]
    UnknownType { id: ElementId, type_name: String },

    #[error("failed to encode tree: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading an externally supplied tree.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid content for {type_name} element {id}: {reason}")]
    InvalidContent {
        id: ElementId,
        type_name: String,
        reason: String,
    },

    #[error("id {0} appears more than once")]
    DuplicateId(ElementId),

    #[error("leaf element {0} carries children")]
    LeafWithChildren(ElementId),

    #[error(transparent)]
    Edit(EditError),
}

impl From<EditError> for LoadError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::DuplicateId(id) => LoadError::DuplicateId(id),
            EditError::LeafWithChildren(id) => LoadError::LeafWithChildren(id),
            other => LoadError::Edit(other),
        }
    }
}

/// Errors reported by a save collaborator.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save rejected: {0}")]
    Rejected(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("not authorized to save")]
    Unauthorized,

    #[error("failed to encode tree for saving: {0}")]
    Encode(#[from] ExportError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid editor config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_message_names_placement() {
        let top = EditError::NestingViolation {
            parent: None,
            child: "row".into(),
        };
        assert_eq!(top.to_string(), "row may not be placed at the top level");

        let nested = EditError::NestingViolation {
            parent: Some(ElementKind::Row),
            child: "heading".into(),
        };
        assert_eq!(nested.to_string(), "heading may not be placed inside a row");
    }
}
