//! Attachment to Adaptive Card rendering.

use crate::links::LinkFormatter;
use crate::types::card::{
    AdaptiveCard, Column, ColumnSet, ColumnWidth, Element, FontSize, FontType, FontWeight,
    HorizontalAlignment, Image, Spacing, TextBlock,
};
use crate::types::{card_color, Attachment, Field, Message};

pub struct CardRenderer {
    links: LinkFormatter,
}

impl CardRenderer {
    pub fn new(links: LinkFormatter) -> Self {
        Self { links }
    }

    /// Render `attachment` into a single-card message.
    pub fn render(&self, attachment: &Attachment) -> Message {
        let items = ItemsBuilder::default()
            .push(header_block(attachment))
            .push(self.title_block(attachment))
            .push(text_block(attachment))
            .push(field_table(&attachment.fields))
            .push_some(attachment.image_url().map(image_block))
            .push_some(attachment.footer().map(footer_block))
            .build();

        let body = Element::ColumnSet(ColumnSet {
            columns: vec![Column {
                items,
                width: ColumnWidth::Stretch,
                spacing: None,
            }],
            spacing: None,
        });

        Message::new(AdaptiveCard::new(vec![body]))
    }

    fn title_block(&self, attachment: &Attachment) -> Element {
        Element::TextBlock(TextBlock {
            wrap: Some(true),
            spacing: Some(Spacing::Small),
            ..TextBlock::new(self.links.format(&attachment.title_link, &attachment.title))
        })
    }
}

/// Collects card items, skipping optional sections that are absent.
#[derive(Default)]
struct ItemsBuilder {
    items: Vec<Element>,
}

impl ItemsBuilder {
    fn push(mut self, element: Element) -> Self {
        self.items.push(element);
        self
    }

    fn push_some(mut self, element: Option<Element>) -> Self {
        self.items.extend(element);
        self
    }

    fn build(self) -> Vec<Element> {
        self.items
    }
}

fn header_block(attachment: &Attachment) -> Element {
    Element::TextBlock(TextBlock {
        color: Some(card_color(&attachment.color)),
        ..TextBlock::new(attachment.author_name.as_str())
    })
}

fn text_block(attachment: &Attachment) -> Element {
    Element::TextBlock(TextBlock {
        wrap: Some(true),
        separator: Some(true),
        font_type: Some(FontType::Default),
        size: Some(FontSize::Small),
        ..TextBlock::new(attachment.text.as_str())
    })
}

/// Two aligned columns: titles on the left, values on the right.
fn field_table(fields: &[Field]) -> Element {
    let titles = fields
        .iter()
        .map(|field| {
            Element::TextBlock(TextBlock {
                weight: Some(FontWeight::Bolder),
                size: Some(FontSize::Small),
                ..TextBlock::new(field.title.as_str())
            })
        })
        .collect();

    let values = fields
        .iter()
        .map(|field| {
            Element::TextBlock(TextBlock {
                size: Some(FontSize::Small),
                ..TextBlock::new(field.value.as_str())
            })
        })
        .collect();

    Element::ColumnSet(ColumnSet {
        columns: vec![
            Column {
                items: titles,
                width: ColumnWidth::Auto,
                spacing: Some(Spacing::Small),
            },
            Column {
                items: values,
                width: ColumnWidth::Stretch,
                spacing: None,
            },
        ],
        spacing: Some(Spacing::Small),
    })
}

fn image_block(url: &str) -> Element {
    Element::Image(Image {
        url: url.to_string(),
    })
}

fn footer_block(footer: &str) -> Element {
    Element::TextBlock(TextBlock {
        size: Some(FontSize::Small),
        spacing: Some(Spacing::Small),
        horizontal_alignment: Some(HorizontalAlignment::Right),
        weight: Some(FontWeight::Lighter),
        is_subtle: Some(true),
        ..TextBlock::new(footer)
    })
}
