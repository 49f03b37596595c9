//! Typed Portable Text document model.
//!
//! A document is an ordered list of [`Block`]s. Text blocks carry their spans and the
//! block-scoped mark definitions the spans refer to; every other block type is kept as
//! an opaque JSON payload and rendered through a custom-block handler.
//!
//! The serde representation follows the Portable Text wire format (`_type`, `_key`,
//! `listItem`, `markDefs`, ...), so a decoded document can be serialized back to JSON.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `_type` of a text block.
pub const TEXT_BLOCK_TYPE: &str = "block";

/// `_type` of a span child.
pub const SPAN_TYPE: &str = "span";

/// `_type` of the link annotation.
pub const LINK_MARK_TYPE: &str = "link";

/// A whole document, in order.
pub type Blocks = Vec<Block>;

/// One paragraph-equivalent unit of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text(TextBlock),
    Custom(CustomBlock),
}

impl Block {
    /// Decode a block from a JSON value, dispatching on `_type`.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value.get("_type").and_then(Value::as_str) {
            Some(TEXT_BLOCK_TYPE) => serde_json::from_value(value).map(Block::Text),
            _ => Ok(Block::Custom(CustomBlock::from_value(value))),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Block::Text(block) => &block.key,
            Block::Custom(block) => &block.key,
        }
    }

    pub fn block_type(&self) -> &str {
        match self {
            Block::Text(_) => TEXT_BLOCK_TYPE,
            Block::Custom(block) => &block.block_type,
        }
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Block::Text(block) => Some(block),
            Block::Custom(_) => None,
        }
    }
}

impl From<TextBlock> for Block {
    fn from(block: TextBlock) -> Self {
        Block::Text(block)
    }
}

impl From<CustomBlock> for Block {
    fn from(block: CustomBlock) -> Self {
        Block::Custom(block)
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Block::from_value(value).map_err(de::Error::custom)
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Tagged<'a> {
            #[serde(rename = "_type")]
            block_type: &'static str,
            #[serde(flatten)]
            block: &'a TextBlock,
        }

        match self {
            Block::Text(block) => Tagged {
                block_type: TEXT_BLOCK_TYPE,
                block,
            }
            .serialize(serializer),
            Block::Custom(block) => block.payload.serialize(serializer),
        }
    }
}

/// A block of inline text: paragraph, heading, quote or list item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(rename = "_key", default)]
    pub key: String,
    #[serde(default)]
    pub style: Style,
    #[serde(
        default,
        deserialize_with = "deserialize_list_item",
        skip_serializing_if = "Option::is_none"
    )]
    pub list_item: Option<ListKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default)]
    pub children: Vec<Span>,
    #[serde(default)]
    pub mark_defs: Vec<MarkDef>,
}

impl TextBlock {
    pub fn new(key: impl Into<String>) -> Self {
        TextBlock {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_list_item(mut self, kind: ListKind, level: u32) -> Self {
        self.list_item = Some(kind);
        self.level = Some(level);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.children.push(span);
        self
    }

    pub fn with_mark_def(mut self, mark_def: MarkDef) -> Self {
        self.mark_defs.push(mark_def);
        self
    }

    /// Nesting level of a list item. Missing or zero levels count as 1.
    pub fn list_level(&self) -> u32 {
        self.level.unwrap_or(1).max(1)
    }

    pub fn is_list_item(&self) -> bool {
        self.list_item.is_some()
    }

    /// Span texts concatenated, ignoring marks.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|span| span.text.as_str()).collect()
    }

    pub fn mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|def| def.key == key)
    }
}

/// Block style. Unrecognized values are preserved but render like `normal`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Style {
    #[default]
    Normal,
    /// `h1` through `h6`.
    Heading(u8),
    Blockquote,
    Other(String),
}

impl From<String> for Style {
    fn from(value: String) -> Self {
        Style::from(value.as_str())
    }
}

impl From<&str> for Style {
    fn from(value: &str) -> Self {
        match value {
            "normal" | "" => Style::Normal,
            "blockquote" => Style::Blockquote,
            "h1" => Style::Heading(1),
            "h2" => Style::Heading(2),
            "h3" => Style::Heading(3),
            "h4" => Style::Heading(4),
            "h5" => Style::Heading(5),
            "h6" => Style::Heading(6),
            other => Style::Other(other.to_string()),
        }
    }
}

impl From<Style> for String {
    fn from(style: Style) -> Self {
        match style {
            Style::Normal => "normal".to_string(),
            Style::Heading(level) => format!("h{level}"),
            Style::Blockquote => "blockquote".to_string(),
            Style::Other(other) => other,
        }
    }
}

/// Kind of list a list-item block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Bullet,
    Number,
}

impl ListKind {
    pub fn name(self) -> &'static str {
        match self {
            ListKind::Bullet => "bullet",
            ListKind::Number => "number",
        }
    }
}

/// `"number"` selects a numbered list; any other non-empty list type renders as bullets.
fn deserialize_list_item<'de, D>(deserializer: D) -> Result<Option<ListKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw.as_deref() {
        None | Some("") => None,
        Some("number") => Some(ListKind::Number),
        Some(other) => {
            if other != "bullet" {
                log::debug!("list type '{other}' rendered as bullet list");
            }
            Some(ListKind::Bullet)
        }
    })
}

/// A contiguous run of text sharing one set of marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "_key", default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(rename = "_type", default = "default_span_type")]
    pub span_type: String,
    #[serde(default)]
    pub marks: Vec<String>,
    #[serde(default)]
    pub text: String,
}

fn default_span_type() -> String {
    SPAN_TYPE.to_string()
}

impl Span {
    pub fn new<I, S>(text: impl Into<String>, marks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Span {
            key: String::new(),
            span_type: default_span_type(),
            marks: marks.into_iter().map(Into::into).collect(),
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Span::new(text, Vec::<String>::new())
    }
}

/// Block-scoped definition of an annotation mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub mark_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Any further type-specific attributes.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl MarkDef {
    pub fn link(key: impl Into<String>, href: impl Into<String>) -> Self {
        MarkDef {
            key: key.into(),
            mark_type: LINK_MARK_TYPE.to_string(),
            href: Some(href.into()),
            attributes: Map::new(),
        }
    }

    pub fn annotation(key: impl Into<String>, mark_type: impl Into<String>) -> Self {
        MarkDef {
            key: key.into(),
            mark_type: mark_type.into(),
            href: None,
            attributes: Map::new(),
        }
    }
}

/// Any block whose `_type` is not `block`; the JSON is kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomBlock {
    pub key: String,
    pub block_type: String,
    pub payload: Value,
}

impl CustomBlock {
    pub fn from_value(payload: Value) -> Self {
        let field = |name: &str| {
            payload
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        CustomBlock {
            key: field("_key"),
            block_type: field("_type"),
            payload,
        }
    }
}
