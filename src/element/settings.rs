use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn is_false(b: &bool) -> bool {
    !*b
}

/// Behavioral flags read by the renderer. Edit operations never look inside.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub open_in_new_tab: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub autoplay: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub muted: bool,
    #[serde(rename = "loop", skip_serializing_if = "is_false")]
    pub looping: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub controls: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// Flags this crate has no field for, carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Settings {
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            link: Some(url.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_flags_survive() {
        let settings: Settings =
            serde_json::from_value(json!({ "autoplay": true, "trackingPixel": "abc" })).unwrap();
        assert!(settings.autoplay);
        assert_eq!(settings.extra.get("trackingPixel"), Some(&json!("abc")));
        assert_eq!(
            serde_json::to_value(&settings).unwrap(),
            json!({ "autoplay": true, "trackingPixel": "abc" })
        );
    }

    #[test]
    fn loop_uses_wire_name() {
        let settings: Settings = serde_json::from_value(json!({ "loop": true })).unwrap();
        assert!(settings.looping);
        assert!(settings.extra.is_empty());
    }
}
