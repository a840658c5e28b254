use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

/// Opaque identifier of an element. Assigned once at creation and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Source of fresh element ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> ElementId;
}

/// Random v4 uuids. The default for documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> ElementId {
        ElementId(uuid::Uuid::new_v4().to_string())
    }
}

// Shared across every SequentialIds so two generators with the same prefix never collide.
static NEXT_ELEMENT_ID: AtomicUsize = AtomicUsize::new(1);

/// Predictable ids of the form `<prefix>-<n>`, handy in tests and fixtures.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("el")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ElementId {
        let n = NEXT_ELEMENT_ID.fetch_add(1, Ordering::SeqCst);
        ElementId(format!("{}-{}", self.prefix, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_distinct() {
        let mut a = SequentialIds::new("x");
        let mut b = SequentialIds::new("x");
        let first = a.next_id();
        let second = b.next_id();
        assert_ne!(first, second);
        assert!(first.as_str().starts_with("x-"));
    }

    #[test]
    fn uuid_ids_parse_back() {
        let id = UuidIds.next_id();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }
}
