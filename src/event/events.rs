use crate::command::Direction;
use crate::id_generator::ElementId;

/// Something that happened to a document. Emitted after the change is installed.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    /// The document was (re)initialized from an external tree.
    Loaded {
        elements: usize,
    },
    ElementAdded {
        id: ElementId,
        parent: Option<ElementId>,
    },
    ElementUpdated {
        id: ElementId,
    },
    ElementRemoved {
        id: ElementId,
    },
    ElementDuplicated {
        source: ElementId,
        copy: ElementId,
    },
    ElementMoved {
        id: ElementId,
        direction: Direction,
    },
    Undone {
        revision: u64,
    },
    Redone {
        revision: u64,
    },
    Saved {
        revision: u64,
    },
    SaveFailed {
        revision: u64,
        reason: String,
    },
}
