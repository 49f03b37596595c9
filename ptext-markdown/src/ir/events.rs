//! Defines the flat inline event stream produced for a text block.

use std::borrow::Cow;
use std::fmt;

/// Built-in decorator marks. Keys that are not defined in a block's `markDefs` must
/// name one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decorator {
    Strong,
    Em,
    Code,
    Underline,
    StrikeThrough,
}

impl Decorator {
    pub const ALL: [Decorator; 5] = [
        Decorator::Strong,
        Decorator::Em,
        Decorator::Code,
        Decorator::Underline,
        Decorator::StrikeThrough,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|decorator| decorator.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Decorator::Strong => "strong",
            Decorator::Em => "em",
            Decorator::Code => "code",
            Decorator::Underline => "underline",
            Decorator::StrikeThrough => "strike-through",
        }
    }
}

/// What a mark key resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkKind<'a> {
    Decorator(Decorator),
    Link { href: &'a str },
    /// A `markDefs` entry of a type other than `link`.
    Annotation { mark_type: &'a str },
}

/// An open mark: the key used by the spans plus its resolved meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkInfo<'a> {
    pub key: &'a str,
    pub kind: MarkKind<'a>,
}

impl MarkInfo<'_> {
    pub fn is_code(&self) -> bool {
        self.kind == MarkKind::Decorator(Decorator::Code)
    }
}

/// One step of a block's inline content.
///
/// A well-formed stream is strictly bracketed: every `Close` matches the innermost
/// unclosed `Open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineEvent<'a> {
    Open(MarkInfo<'a>),
    /// Escaped text, or raw text while a `code` mark is open.
    Text(Cow<'a, str>),
    Close(MarkInfo<'a>),
}

impl fmt::Display for MarkInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MarkKind::Decorator(decorator) => f.write_str(decorator.name()),
            MarkKind::Link { href } => write!(f, "link({href})"),
            MarkKind::Annotation { mark_type } => write!(f, "{mark_type}[{}]", self.key),
        }
    }
}

impl fmt::Display for InlineEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineEvent::Open(mark) => write!(f, "open {mark}"),
            InlineEvent::Text(text) => write!(f, "text {text:?}"),
            InlineEvent::Close(mark) => write!(f, "close {mark}"),
        }
    }
}
