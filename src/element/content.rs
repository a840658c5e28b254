use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::ElementKind;

/// Per-type content. The variant is the element's type.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    Section(ContainerContent),
    Row(ContainerContent),
    Column(ContainerContent),
    Heading(HeadingContent),
    Text(TextContent),
    Image(ImageContent),
    Video(VideoContent),
    Button(ButtonContent),
    Form(FormContent),
    Input(InputContent),
    Select(SelectContent),
    Checkbox(CheckboxContent),
    Divider(EmptyContent),
    Spacer(SpacerContent),
    Countdown(CountdownContent),
    Testimonial(TestimonialContent),
    Pricing(PricingContent),
    Faq(FaqContent),
    Popup(PopupContent),
    Html(HtmlContent),
    /// Loaded from data whose type is outside [`ElementKind`]. Kept verbatim so
    /// exports can refuse it instead of dropping it.
    Unrecognized {
        type_name: String,
        fields: Map<String, Value>,
    },
}

impl ElementContent {
    pub fn kind(&self) -> Option<ElementKind> {
        Some(match self {
            ElementContent::Section(_) => ElementKind::Section,
            ElementContent::Row(_) => ElementKind::Row,
            ElementContent::Column(_) => ElementKind::Column,
            ElementContent::Heading(_) => ElementKind::Heading,
            ElementContent::Text(_) => ElementKind::Text,
            ElementContent::Image(_) => ElementKind::Image,
            ElementContent::Video(_) => ElementKind::Video,
            ElementContent::Button(_) => ElementKind::Button,
            ElementContent::Form(_) => ElementKind::Form,
            ElementContent::Input(_) => ElementKind::Input,
            ElementContent::Select(_) => ElementKind::Select,
            ElementContent::Checkbox(_) => ElementKind::Checkbox,
            ElementContent::Divider(_) => ElementKind::Divider,
            ElementContent::Spacer(_) => ElementKind::Spacer,
            ElementContent::Countdown(_) => ElementKind::Countdown,
            ElementContent::Testimonial(_) => ElementKind::Testimonial,
            ElementContent::Pricing(_) => ElementKind::Pricing,
            ElementContent::Faq(_) => ElementKind::Faq,
            ElementContent::Popup(_) => ElementKind::Popup,
            ElementContent::Html(_) => ElementKind::Html,
            ElementContent::Unrecognized { .. } => return None,
        })
    }

    pub fn type_name(&self) -> &str {
        match self {
            ElementContent::Unrecognized { type_name, .. } => type_name,
            known => known.kind().map_or("", ElementKind::as_str),
        }
    }

    /// Unrecognized content never takes new children.
    pub fn accepts_children(&self) -> bool {
        self.kind().is_some_and(ElementKind::is_container)
    }

    /// Empty content of the given kind, with every field at its default.
    pub fn empty(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Section => ElementContent::Section(Default::default()),
            ElementKind::Row => ElementContent::Row(Default::default()),
            ElementKind::Column => ElementContent::Column(Default::default()),
            ElementKind::Heading => ElementContent::Heading(Default::default()),
            ElementKind::Text => ElementContent::Text(Default::default()),
            ElementKind::Image => ElementContent::Image(Default::default()),
            ElementKind::Video => ElementContent::Video(Default::default()),
            ElementKind::Button => ElementContent::Button(Default::default()),
            ElementKind::Form => ElementContent::Form(Default::default()),
            ElementKind::Input => ElementContent::Input(Default::default()),
            ElementKind::Select => ElementContent::Select(Default::default()),
            ElementKind::Checkbox => ElementContent::Checkbox(Default::default()),
            ElementKind::Divider => ElementContent::Divider(Default::default()),
            ElementKind::Spacer => ElementContent::Spacer(Default::default()),
            ElementKind::Countdown => ElementContent::Countdown(Default::default()),
            ElementKind::Testimonial => ElementContent::Testimonial(Default::default()),
            ElementKind::Pricing => ElementContent::Pricing(Default::default()),
            ElementKind::Faq => ElementContent::Faq(Default::default()),
            ElementKind::Popup => ElementContent::Popup(Default::default()),
            ElementKind::Html => ElementContent::Html(Default::default()),
        }
    }

    /// Decodes the `content` object of the JSON schema for the named type.
    pub fn decode(type_name: &str, fields: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let Ok(kind) = type_name.parse::<ElementKind>() else {
            return Ok(ElementContent::Unrecognized {
                type_name: type_name.to_owned(),
                fields,
            });
        };
        let value = Value::Object(fields);
        Ok(match kind {
            ElementKind::Section => ElementContent::Section(parse(value)?),
            ElementKind::Row => ElementContent::Row(parse(value)?),
            ElementKind::Column => ElementContent::Column(parse(value)?),
            ElementKind::Heading => ElementContent::Heading(parse(value)?),
            ElementKind::Text => ElementContent::Text(parse(value)?),
            ElementKind::Image => ElementContent::Image(parse(value)?),
            ElementKind::Video => ElementContent::Video(parse(value)?),
            ElementKind::Button => ElementContent::Button(parse(value)?),
            ElementKind::Form => ElementContent::Form(parse(value)?),
            ElementKind::Input => ElementContent::Input(parse(value)?),
            ElementKind::Select => ElementContent::Select(parse(value)?),
            ElementKind::Checkbox => ElementContent::Checkbox(parse(value)?),
            ElementKind::Divider => ElementContent::Divider(parse(value)?),
            ElementKind::Spacer => ElementContent::Spacer(parse(value)?),
            ElementKind::Countdown => ElementContent::Countdown(parse(value)?),
            ElementKind::Testimonial => ElementContent::Testimonial(parse(value)?),
            ElementKind::Pricing => ElementContent::Pricing(parse(value)?),
            ElementKind::Faq => ElementContent::Faq(parse(value)?),
            ElementKind::Popup => ElementContent::Popup(parse(value)?),
            ElementKind::Html => ElementContent::Html(parse(value)?),
        })
    }

    /// Encodes into the `content` object of the JSON schema.
    pub fn encode(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let value = match self {
            ElementContent::Section(c) | ElementContent::Row(c) | ElementContent::Column(c) => {
                serde_json::to_value(c)?
            }
            ElementContent::Heading(c) => serde_json::to_value(c)?,
            ElementContent::Text(c) => serde_json::to_value(c)?,
            ElementContent::Image(c) => serde_json::to_value(c)?,
            ElementContent::Video(c) => serde_json::to_value(c)?,
            ElementContent::Button(c) => serde_json::to_value(c)?,
            ElementContent::Form(c) => serde_json::to_value(c)?,
            ElementContent::Input(c) => serde_json::to_value(c)?,
            ElementContent::Select(c) => serde_json::to_value(c)?,
            ElementContent::Checkbox(c) => serde_json::to_value(c)?,
            ElementContent::Divider(c) => serde_json::to_value(c)?,
            ElementContent::Spacer(c) => serde_json::to_value(c)?,
            ElementContent::Countdown(c) => serde_json::to_value(c)?,
            ElementContent::Testimonial(c) => serde_json::to_value(c)?,
            ElementContent::Pricing(c) => serde_json::to_value(c)?,
            ElementContent::Faq(c) => serde_json::to_value(c)?,
            ElementContent::Popup(c) => serde_json::to_value(c)?,
            ElementContent::Html(c) => serde_json::to_value(c)?,
            ElementContent::Unrecognized { fields, .. } => return Ok(fields.clone()),
        };
        Ok(match value {
            Value::Object(map) => map,
            _ => Map::new(),
        })
    }
}

// Every content struct flattens the keys it has no field for into `extra`, so a load
// followed by a save never loses data the builder does not model.
fn parse<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(value)
}

/// Content of section, row and column elements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Keys with no typed field, carried through load and save untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadingContent {
    pub text: String,
    /// 1 through 6. Loaded values outside that range are clamped.
    #[serde(deserialize_with = "heading_level")]
    pub level: u8,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for HeadingContent {
    fn default() -> Self {
        Self {
            text: String::new(),
            level: 2,
            extra: Map::new(),
        }
    }
}

impl HeadingContent {
    pub fn new(text: impl Into<String>, level: u8) -> Self {
        Self {
            text: text.into(),
            level: level.clamp(1, 6),
            extra: Map::new(),
        }
    }
}

fn heading_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let level = u64::deserialize(deserializer)?;
    Ok(level.clamp(1, 6) as u8)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextContent {
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoContent {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonContent {
    pub label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ButtonContent {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub submit_label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputContent {
    pub label: String,
    pub name: String,
    pub placeholder: String,
    /// The HTML input type: text, email, tel, ...
    pub input_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectContent {
    pub label: String,
    pub name: String,
    pub options: Vec<SelectOption>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckboxContent {
    pub label: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Content of kinds that carry nothing beyond styles (divider).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmptyContent {
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacerContent {
    /// CSS length, e.g. `40px`.
    pub height: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CountdownContent {
    /// ISO-8601 timestamp the countdown runs to.
    pub target: String,
    pub expired_text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialContent {
    pub quote: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingContent {
    pub plan: String,
    pub price: String,
    pub currency: String,
    pub period: String,
    pub features: Vec<String>,
    pub cta_label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaqContent {
    pub items: Vec<FaqItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PopupContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HtmlContent {
    pub code: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
