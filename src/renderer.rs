//! Preview export: projects a tree into HTML markup without touching it.

use std::fmt::Write as _;

use crate::element::{Element, ElementContent, Styles};
use crate::error::ExportError;

/// Renders element trees as HTML fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer {
    /// One element per line, indented by depth
    pretty: bool,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Renders the top-level sequence. Aborts on the first element whose type is not
    /// recognized rather than emitting a partial page.
    pub fn render(&self, elements: &[Element]) -> Result<String, ExportError> {
        let mut markup = Markup {
            out: String::new(),
            pretty: self.pretty,
        };
        for element in elements {
            markup.element(element, 0)?;
        }
        Ok(markup.out)
    }
}

struct Markup {
    out: String,
    pretty: bool,
}

impl Markup {
    fn line(&mut self, depth: usize, text: &str) {
        if self.pretty {
            for _ in 0..depth {
                self.out.push_str("  ");
            }
        }
        self.out.push_str(text);
        if self.pretty {
            self.out.push('\n');
        }
    }

    fn container(
        &mut self,
        depth: usize,
        element: &Element,
        open: String,
        close: &str,
    ) -> Result<(), ExportError> {
        self.line(depth, &open);
        for child in element.children() {
            self.element(child, depth + 1)?;
        }
        self.line(depth, close);
        Ok(())
    }

    fn element(&mut self, element: &Element, depth: usize) -> Result<(), ExportError> {
        let attrs = common_attrs(element);
        match &element.content {
            ElementContent::Section(_) => {
                self.container(depth, element, format!("<section{attrs}>"), "</section>")
            }
            ElementContent::Row(_) => {
                self.container(depth, element, format!("<div class=\"row\"{attrs}>"), "</div>")
            }
            ElementContent::Column(_) => self.container(
                depth,
                element,
                format!("<div class=\"column\"{attrs}>"),
                "</div>",
            ),
            ElementContent::Form(form) => {
                self.line(depth, &format!("<form{attrs}>"));
                if let Some(title) = &form.title {
                    self.line(depth + 1, &format!("<h3>{}</h3>", escape(title)));
                }
                for child in element.children() {
                    self.element(child, depth + 1)?;
                }
                self.line(
                    depth + 1,
                    &format!(
                        "<button type=\"submit\">{}</button>",
                        escape(&form.submit_label)
                    ),
                );
                self.line(depth, "</form>");
                Ok(())
            }
            ElementContent::Popup(popup) => {
                self.line(depth, &format!("<div class=\"popup\" role=\"dialog\"{attrs}>"));
                if let Some(title) = &popup.title {
                    self.line(depth + 1, &format!("<h3>{}</h3>", escape(title)));
                }
                for child in element.children() {
                    self.element(child, depth + 1)?;
                }
                self.line(depth, "</div>");
                Ok(())
            }
            ElementContent::Unrecognized { type_name, .. } => Err(ExportError::UnknownType {
                id: element.id.clone(),
                type_name: type_name.clone(),
            }),
            leaf => {
                let html = leaf_markup(element, leaf, &attrs);
                self.line(depth, &html);
                Ok(())
            }
        }
    }
}

fn leaf_markup(element: &Element, content: &ElementContent, attrs: &str) -> String {
    let settings = &element.settings;
    let required = if settings.required { " required" } else { "" };
    match content {
        ElementContent::Heading(h) => {
            let level = h.level.clamp(1, 6);
            linked(element, format!("<h{level}{attrs}>{}</h{level}>", escape(&h.text)))
        }
        ElementContent::Text(t) => format!("<p{attrs}>{}</p>", escape(&t.text)),
        ElementContent::Image(img) => linked(
            element,
            format!(
                "<img src=\"{}\" alt=\"{}\"{attrs}>",
                escape(&img.src),
                escape(&img.alt)
            ),
        ),
        ElementContent::Video(video) => {
            let mut flags = String::new();
            for (on, name) in [
                (settings.controls, " controls"),
                (settings.autoplay, " autoplay"),
                (settings.muted, " muted"),
                (settings.looping, " loop"),
            ] {
                if on {
                    flags.push_str(name);
                }
            }
            let poster = video
                .poster
                .as_ref()
                .map(|p| format!(" poster=\"{}\"", escape(p)))
                .unwrap_or_default();
            format!(
                "<video src=\"{}\"{poster}{flags}{attrs}></video>",
                escape(&video.url)
            )
        }
        ElementContent::Button(button) => match &settings.link {
            Some(link) => format!(
                "<a class=\"button\" href=\"{}\"{}{attrs}>{}</a>",
                escape(link),
                new_tab(element),
                escape(&button.label)
            ),
            None => format!("<button type=\"button\"{attrs}>{}</button>", escape(&button.label)),
        },
        ElementContent::Input(input) => {
            let input_type = if input.input_type.is_empty() {
                "text"
            } else {
                input.input_type.as_str()
            };
            format!(
                "<label{attrs}>{}<input type=\"{}\" name=\"{}\" placeholder=\"{}\"{required}></label>",
                escape(&input.label),
                escape(input_type),
                escape(&input.name),
                escape(&input.placeholder)
            )
        }
        ElementContent::Select(select) => {
            let mut options = String::new();
            for option in &select.options {
                let _ = write!(
                    options,
                    "<option value=\"{}\">{}</option>",
                    escape(&option.value),
                    escape(&option.label)
                );
            }
            format!(
                "<label{attrs}>{}<select name=\"{}\"{required}>{options}</select></label>",
                escape(&select.label),
                escape(&select.name)
            )
        }
        ElementContent::Checkbox(checkbox) => format!(
            "<label{attrs}><input type=\"checkbox\" name=\"{}\"{required}> {}</label>",
            escape(&checkbox.name),
            escape(&checkbox.label)
        ),
        ElementContent::Divider(_) => format!("<hr{attrs}>"),
        ElementContent::Spacer(spacer) => {
            let mut styles = element.styles.clone();
            styles
                .entry("height".to_owned())
                .or_insert_with(|| spacer.height.clone());
            format!(
                "<div class=\"spacer\" data-id=\"{}\"{}{}></div>",
                escape(element.id.as_str()),
                style_attr(&styles),
                hidden(element)
            )
        }
        ElementContent::Countdown(countdown) => format!(
            "<div class=\"countdown\" data-target=\"{}\" data-expired-text=\"{}\"{attrs}></div>",
            escape(&countdown.target),
            escape(&countdown.expired_text)
        ),
        ElementContent::Testimonial(t) => {
            let avatar = t
                .avatar
                .as_ref()
                .map(|src| format!("<img class=\"avatar\" src=\"{}\" alt=\"\">", escape(src)))
                .unwrap_or_default();
            let cite = match &t.role {
                Some(role) => format!("{}, {}", escape(&t.author), escape(role)),
                None => escape(&t.author),
            };
            format!(
                "<blockquote class=\"testimonial\"{attrs}>{avatar}<p>{}</p><cite>{cite}</cite></blockquote>",
                escape(&t.quote)
            )
        }
        ElementContent::Pricing(p) => {
            let mut features = String::new();
            for feature in &p.features {
                let _ = write!(features, "<li>{}</li>", escape(feature));
            }
            let period = if p.period.is_empty() {
                String::new()
            } else {
                format!(" / {}", escape(&p.period))
            };
            let cta = match &settings.link {
                Some(link) => format!(
                    "<a class=\"button\" href=\"{}\"{}>{}</a>",
                    escape(link),
                    new_tab(element),
                    escape(&p.cta_label)
                ),
                None => format!("<button type=\"button\">{}</button>", escape(&p.cta_label)),
            };
            format!(
                "<div class=\"pricing\"{attrs}><h3>{}</h3><p class=\"price\">{} {}{period}</p><ul>{features}</ul>{cta}</div>",
                escape(&p.plan),
                escape(&p.currency),
                escape(&p.price)
            )
        }
        ElementContent::Faq(faq) => {
            let mut items = String::new();
            for item in &faq.items {
                let _ = write!(
                    items,
                    "<dt>{}</dt><dd>{}</dd>",
                    escape(&item.question),
                    escape(&item.answer)
                );
            }
            format!("<dl class=\"faq\"{attrs}>{items}</dl>")
        }
        ElementContent::Html(html) => html.code.clone(),
        // Containers and unrecognized content are handled by the caller.
        _ => String::new(),
    }
}

/// `data-id`, inline style and `hidden`, shared by every element.
fn common_attrs(element: &Element) -> String {
    format!(
        " data-id=\"{}\"{}{}",
        escape(element.id.as_str()),
        style_attr(&element.styles),
        hidden(element)
    )
}

fn style_attr(styles: &Styles) -> String {
    if styles.is_empty() {
        return String::new();
    }
    let css = styles
        .iter()
        .map(|(property, value)| format!("{property}: {value}"))
        .collect::<Vec<_>>()
        .join("; ");
    format!(" style=\"{}\"", escape(&css))
}

fn hidden(element: &Element) -> &'static str {
    if element.settings.hidden { " hidden" } else { "" }
}

fn new_tab(element: &Element) -> &'static str {
    if element.settings.open_in_new_tab {
        " target=\"_blank\" rel=\"noopener\""
    } else {
        ""
    }
}

/// Wraps in a link when the element's settings carry one.
fn linked(element: &Element, inner: String) -> String {
    match &element.settings.link {
        Some(link) => format!("<a href=\"{}\"{}>{inner}</a>", escape(link), new_tab(element)),
        None => inner,
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ContainerContent, HeadingContent, Settings, TextContent};

    #[test]
    fn escapes_text() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn renders_nested_section() {
        let tree = vec![
            Element::new("s", ElementContent::Section(ContainerContent::default()))
                .with_style("padding", "8px")
                .with_children(vec![Element::new(
                    "t",
                    ElementContent::Text(TextContent::new("a < b")),
                )]),
        ];
        let html = HtmlRenderer::new().render(&tree).unwrap();
        assert_eq!(
            html,
            "<section data-id=\"s\" style=\"padding: 8px\"><p data-id=\"t\">a &lt; b</p></section>"
        );
    }

    #[test]
    fn heading_with_link() {
        let heading = Element::new("h", ElementContent::Heading(HeadingContent::new("Hi", 1)))
            .with_settings(Settings::link("https://example.com"));
        let html = HtmlRenderer::new().render(&[heading]).unwrap();
        assert_eq!(
            html,
            "<a href=\"https://example.com\"><h1 data-id=\"h\">Hi</h1></a>"
        );
    }

    #[test]
    fn pretty_indents_children() {
        let tree = vec![
            Element::new("s", ElementContent::Section(ContainerContent::default()))
                .with_children(vec![Element::new("t", ElementContent::Text(TextContent::new("x")))]),
        ];
        let html = HtmlRenderer::pretty().render(&tree).unwrap();
        assert_eq!(
            html,
            "<section data-id=\"s\">\n  <p data-id=\"t\">x</p>\n</section>\n"
        );
    }
}
