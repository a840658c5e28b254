use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementKind};
use crate::error::{ConfigError, EditError};

/// How strictly parent/child combinations are checked when elements are added.
///
/// Leaves never take children under either policy; that is part of the element model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestingPolicy {
    /// Any container may hold any element.
    #[default]
    Relaxed,
    /// Enforce the section > row > column layout grid.
    Strict,
}

impl NestingPolicy {
    /// Checks placing `child` under a parent of kind `parent` (`None` = top level).
    pub fn check(self, parent: Option<ElementKind>, child: &Element) -> Result<(), EditError> {
        if self == NestingPolicy::Relaxed {
            return Ok(());
        }
        let allowed = match child.kind() {
            Some(kind) => strict_allows(parent, kind),
            None => false,
        };
        if allowed {
            Ok(())
        } else {
            Err(EditError::NestingViolation {
                parent,
                child: child.type_name().to_owned(),
            })
        }
    }

    /// Like [`check`](Self::check), then recursively for everything the element carries.
    pub fn check_subtree(
        self,
        parent: Option<ElementKind>,
        element: &Element,
    ) -> Result<(), EditError> {
        self.check(parent, element)?;
        for child in element.children() {
            self.check_subtree(element.kind(), child)?;
        }
        Ok(())
    }
}

fn strict_allows(parent: Option<ElementKind>, child: ElementKind) -> bool {
    use ElementKind::*;

    let structural = matches!(child, Section | Row | Column | Popup);
    match parent {
        None => matches!(child, Section | Popup),
        Some(Section) => child == Row,
        Some(Row) => child == Column,
        Some(Column) => !structural,
        Some(Form) => matches!(
            child,
            Input | Select | Checkbox | Button | Text | Heading | Divider | Spacer | Html
        ),
        Some(Popup) => child == Row || !structural,
        Some(_) => false,
    }
}

/// Editor settings, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Oldest undo steps are dropped past this many. `None` keeps everything.
    pub history_limit: Option<usize>,
    /// Seconds between auto-save attempts while the document is dirty.
    pub autosave_interval_secs: u64,
    pub nesting: NestingPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            autosave_interval_secs: 300, // 5 minutes
            nesting: NestingPolicy::Relaxed,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory::create_with_id;

    fn el(kind: ElementKind) -> Element {
        create_with_id(kind, kind.as_str().into())
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{ "nesting": "strict" }"#).unwrap();
        assert_eq!(config.nesting, NestingPolicy::Strict);
        assert_eq!(config.history_limit, None);
        assert_eq!(config.autosave_interval(), Duration::from_secs(300));
    }

    #[test]
    fn history_limit_is_opt_in() {
        let config = EditorConfig::from_json(r#"{ "history_limit": 20 }"#).unwrap();
        assert_eq!(config.history_limit, Some(20));
        assert_eq!(EditorConfig::default().history_limit, None);
    }

    #[test]
    fn bad_json_is_reported() {
        assert!(EditorConfig::from_json(r#"{ "nesting": "loose" }"#).is_err());
    }

    #[test]
    fn relaxed_allows_anything() {
        let policy = NestingPolicy::Relaxed;
        assert!(policy.check(Some(ElementKind::Row), &el(ElementKind::Heading)).is_ok());
        assert!(policy.check(None, &el(ElementKind::Text)).is_ok());
    }

    #[test]
    fn strict_follows_layout_grid() {
        let policy = NestingPolicy::Strict;
        assert!(policy.check(None, &el(ElementKind::Section)).is_ok());
        assert!(policy.check(Some(ElementKind::Section), &el(ElementKind::Row)).is_ok());
        assert!(policy.check(Some(ElementKind::Row), &el(ElementKind::Column)).is_ok());
        assert!(policy.check(Some(ElementKind::Column), &el(ElementKind::Form)).is_ok());
        assert!(policy.check(Some(ElementKind::Form), &el(ElementKind::Input)).is_ok());

        assert!(policy.check(None, &el(ElementKind::Row)).is_err());
        assert!(policy.check(Some(ElementKind::Row), &el(ElementKind::Heading)).is_err());
        assert!(policy.check(Some(ElementKind::Form), &el(ElementKind::Video)).is_err());
        assert!(policy.check(Some(ElementKind::Column), &el(ElementKind::Section)).is_err());
    }
}
