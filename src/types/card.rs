//! Adaptive Card schema, limited to the elements the renderer emits.

use serde::Serialize;

pub const MESSAGE_TYPE: &str = "message";
pub const CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";
pub const CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
pub const CARD_VERSION: &str = "1.2";

/// Top-level webhook payload.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Message {
    #[serde(rename = "type")]
    pub message_type: &'static str,
    pub attachments: Vec<CardAttachment>,
}

impl Message {
    pub fn new(card: AdaptiveCard) -> Self {
        Self {
            message_type: MESSAGE_TYPE,
            attachments: vec![CardAttachment {
                content_type: CARD_CONTENT_TYPE,
                content: card,
            }],
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardAttachment {
    pub content_type: &'static str,
    pub content: AdaptiveCard,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AdaptiveCard {
    #[serde(rename = "type")]
    pub card_type: &'static str,
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub version: &'static str,
    pub body: Vec<Element>,
}

impl AdaptiveCard {
    pub fn new(body: Vec<Element>) -> Self {
        Self {
            card_type: "AdaptiveCard",
            schema: CARD_SCHEMA,
            version: CARD_VERSION,
            body,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Element {
    TextBlock(TextBlock),
    Image(Image),
    ColumnSet(ColumnSet),
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_type: Option<FontType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<FontSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subtle: Option<bool>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Image {
    pub url: String,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ColumnSet {
    pub columns: Vec<Column>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename = "Column")]
pub struct Column {
    pub items: Vec<Element>,
    pub width: ColumnWidth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    Small,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontType {
    Default,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Bolder,
    Lighter,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
    Right,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    Auto,
    Stretch,
}
