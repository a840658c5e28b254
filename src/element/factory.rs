//! Default elements for each type, as dropped from the palette.

use super::*;
use crate::id_generator::IdGenerator;

/// Creates an element of `kind` with a fresh id and placeholder content.
pub fn create(kind: ElementKind, ids: &mut dyn IdGenerator) -> Element {
    create_with_id(kind, ids.next_id())
}

pub fn create_with_id(kind: ElementKind, id: ElementId) -> Element {
    let element = Element::new(id, default_content(kind));
    match kind {
        ElementKind::Section => element
            .with_style("padding", "40px 20px")
            .with_style("width", "100%"),
        ElementKind::Row => element
            .with_style("display", "flex")
            .with_style("gap", "16px"),
        ElementKind::Column => element.with_style("flex", "1"),
        ElementKind::Button => element
            .with_style("padding", "12px 24px")
            .with_style("border-radius", "4px"),
        ElementKind::Divider => element.with_style("border-top", "1px solid #e5e7eb"),
        ElementKind::Video => element.with_settings(Settings {
            controls: true,
            ..Settings::default()
        }),
        _ => element,
    }
}

fn default_content(kind: ElementKind) -> ElementContent {
    match kind {
        ElementKind::Heading => ElementContent::Heading(HeadingContent::new("Heading", 2)),
        ElementKind::Text => ElementContent::Text(TextContent::new("Text")),
        ElementKind::Image => ElementContent::Image(ImageContent {
            src: String::new(),
            alt: "Image".into(),
            ..Default::default()
        }),
        ElementKind::Button => ElementContent::Button(ButtonContent::new("Click here")),
        ElementKind::Form => ElementContent::Form(FormContent {
            submit_label: "Submit".into(),
            ..Default::default()
        }),
        ElementKind::Input => ElementContent::Input(InputContent {
            label: "Name".into(),
            name: "name".into(),
            placeholder: String::new(),
            input_type: "text".into(),
            ..Default::default()
        }),
        ElementKind::Select => ElementContent::Select(SelectContent {
            label: "Choose".into(),
            name: "choice".into(),
            options: vec![
                SelectOption::new("Option 1", "option-1"),
                SelectOption::new("Option 2", "option-2"),
            ],
            ..Default::default()
        }),
        ElementKind::Checkbox => ElementContent::Checkbox(CheckboxContent {
            label: "I agree".into(),
            name: "agree".into(),
            ..Default::default()
        }),
        ElementKind::Spacer => ElementContent::Spacer(SpacerContent {
            height: "40px".into(),
            ..Default::default()
        }),
        ElementKind::Countdown => ElementContent::Countdown(CountdownContent {
            target: String::new(),
            expired_text: "This offer has ended".into(),
            ..Default::default()
        }),
        ElementKind::Testimonial => ElementContent::Testimonial(TestimonialContent {
            quote: "Quote".into(),
            author: "Customer".into(),
            ..Default::default()
        }),
        ElementKind::Pricing => ElementContent::Pricing(PricingContent {
            plan: "Plan".into(),
            price: "0".into(),
            currency: "JPY".into(),
            period: "month".into(),
            features: Vec::new(),
            cta_label: "Buy now".into(),
            ..Default::default()
        }),
        ElementKind::Faq => ElementContent::Faq(FaqContent {
            items: vec![FaqItem {
                question: "Question".into(),
                answer: "Answer".into(),
                ..Default::default()
            }],
            ..Default::default()
        }),
        other => ElementContent::empty(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::SequentialIds;

    #[test]
    fn every_kind_has_a_default() {
        let mut ids = SequentialIds::new("factory");
        for kind in ElementKind::ALL {
            let element = create(kind, &mut ids);
            assert_eq!(element.kind(), Some(kind));
            assert_eq!(element.children.is_some(), kind.is_container());
        }
    }
}
