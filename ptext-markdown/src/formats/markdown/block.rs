//! Renders one text block to Markdown lines.
//!
//! | Portable Text        | Markdown                      |
//! |----------------------|-------------------------------|
//! | style `h1`..`h6`     | `#`..`######` + space         |
//! | style `blockquote`   | `> ` on every line            |
//! | other styles         | no prefix                     |
//! | `strong`             | `**text**`                    |
//! | `em`                 | `*text*`                      |
//! | `strike-through`     | `~~text~~`                    |
//! | `underline`          | `<u>text</u>`                 |
//! | `code`               | backtick fence, raw content   |
//! | `link` annotation    | `[text](href)`                |
//! | other annotations    | text only                     |
//! | list item            | indent + marker + space       |

use std::borrow::Cow;

use crate::common::lists::{ListContext, ListMarker};
use crate::common::marks::resolve_marks;
use crate::error::RenderError;
use crate::formats::markdown::escape::fence_inline_code;
use crate::formats::markdown::options::MarkdownOptions;
use crate::ir::events::{Decorator, InlineEvent, MarkInfo, MarkKind};
use crate::model::{Style, TextBlock};

/// Line prefixes of one list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPrefix {
    /// Indent, marker and a space, for the item's first line.
    pub first: String,
    /// Spaces up to the item's content column, for its other lines.
    pub continuation: String,
}

/// Indentation of the open lists.
///
/// A nested item is indented by `list_indent` relative to its parent, clamped into the
/// parent's content column plus at most three spaces so it stays inside the parent item.
#[derive(Debug, Default)]
pub struct ListLayout {
    /// Indent and content column of the latest item at each depth.
    frames: Vec<(String, usize)>,
}

impl ListLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefixes for the next item, placed by the list reconstructor at `context`.
    pub fn place(&mut self, context: &ListContext, options: &MarkdownOptions) -> ItemPrefix {
        self.frames.truncate(context.depth.saturating_sub(1));
        let indent = match self.frames.last() {
            None => String::new(),
            Some((parent_indent, content_column)) => {
                let candidate = format!("{parent_indent}{}", options.list_indent);
                let width = display_width(&candidate);
                if (*content_column..=content_column + 3).contains(&width) {
                    candidate
                } else {
                    " ".repeat(width.clamp(*content_column, content_column + 3))
                }
            }
        };

        let marker = list_marker(context.marker, options.bullet);
        let hang = marker.chars().count() + 1;
        let content_column = display_width(&indent) + hang;
        let prefix = ItemPrefix {
            first: format!("{indent}{marker} "),
            continuation: format!("{indent}{}", " ".repeat(hang)),
        };
        self.frames.push((indent, content_column));
        prefix
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

/// Column width of leading indentation, with tab stops every four columns.
fn display_width(indent: &str) -> usize {
    indent.chars().fold(0, |column, c| match c {
        '\t' => column + 4 - column % 4,
        _ => column + 1,
    })
}

/// Render a block, prefixed as a list item when `item` is given.
///
/// The result has no trailing newline. An empty string means the block renders to
/// nothing.
pub fn render_text_block(
    block: &TextBlock,
    item: Option<&ItemPrefix>,
    options: &MarkdownOptions,
) -> Result<String, RenderError> {
    let events = resolve_marks(block)?;
    let rendered = render_inline(&events, options);
    let trimmed = rendered.trim_matches('\n');
    let inline = if matches!(block.style, Style::Heading(_)) {
        // ATX headings are single-line.
        Cow::Owned(trimmed.replace('\n', " "))
    } else {
        Cow::Borrowed(trimmed)
    };

    if inline.is_empty() && item.is_none() {
        return Ok(String::new());
    }

    let style_prefix = match &block.style {
        Style::Heading(level) => format!("{} ", "#".repeat(usize::from(*level))),
        Style::Blockquote => "> ".to_string(),
        Style::Normal | Style::Other(_) => String::new(),
    };
    let quote_prefix = if block.style == Style::Blockquote {
        "> "
    } else {
        ""
    };
    let (first_prefix, continuation) = match item {
        Some(item) => (item.first.as_str(), item.continuation.as_str()),
        None => ("", ""),
    };

    let mut out = String::with_capacity(inline.len() + first_prefix.len() + 8);
    for (index, line) in inline.split('\n').enumerate() {
        let prefix = if index == 0 {
            format!("{first_prefix}{style_prefix}")
        } else {
            out.push('\n');
            format!("{continuation}{quote_prefix}")
        };
        if line.is_empty() {
            out.push_str(prefix.trim_end());
        } else {
            out.push_str(&prefix);
            out.push_str(line);
        }
    }

    Ok(out)
}

/// Inline content nested by mark.
enum Inline<'a> {
    Text(Cow<'a, str>),
    /// Raw content of a non-empty code run.
    Code(String),
    Marked(MarkInfo<'a>, Vec<Inline<'a>>),
}

/// Nest a bracketed event stream. Annotations without Markdown syntax dissolve into
/// their parent and empty code runs are dropped.
fn nest<'a>(events: &[InlineEvent<'a>]) -> Vec<Inline<'a>> {
    let mut root: Vec<Inline<'a>> = Vec::new();
    let mut open: Vec<(MarkInfo<'a>, Vec<Inline<'a>>)> = Vec::new();
    let mut code: Option<String> = None;

    fn attach<'a>(
        root: &mut Vec<Inline<'a>>,
        open: &mut [(MarkInfo<'a>, Vec<Inline<'a>>)],
        nodes: impl IntoIterator<Item = Inline<'a>>,
    ) {
        match open.last_mut() {
            Some((_, children)) => children.extend(nodes),
            None => root.extend(nodes),
        }
    }

    for event in events {
        match event {
            InlineEvent::Open(mark) if mark.is_code() => code = Some(String::new()),
            InlineEvent::Close(mark) if mark.is_code() => {
                let Some(content) = code.take().filter(|content| !content.is_empty()) else {
                    continue;
                };
                let siblings = match open.last_mut() {
                    Some((_, children)) => children,
                    None => &mut root,
                };
                // Adjacent fences would read as one span with a backtick run inside.
                match siblings.last_mut() {
                    Some(Inline::Code(previous)) => previous.push_str(&content),
                    _ => siblings.push(Inline::Code(content)),
                }
            }
            InlineEvent::Text(text) => match code.as_mut() {
                Some(buffer) => buffer.push_str(text),
                None if text.is_empty() => {}
                None => attach(&mut root, &mut open, [Inline::Text(text.clone())]),
            },
            InlineEvent::Open(mark) => open.push((mark.clone(), Vec::new())),
            InlineEvent::Close(_) => {
                if let Some((mark, children)) = open.pop() {
                    if matches!(mark.kind, MarkKind::Annotation { .. }) {
                        attach(&mut root, &mut open, children);
                    } else {
                        attach(&mut root, &mut open, [Inline::Marked(mark, children)]);
                    }
                }
            }
        }
    }

    while let Some((mark, children)) = open.pop() {
        attach(&mut root, &mut open, [Inline::Marked(mark, children)]);
    }
    root
}

/// Concatenate an inline event stream into Markdown text.
///
/// Whitespace at the edges of a marked run is moved outside its delimiters, and a run
/// without text renders nothing. Emphasis that CommonMark would not recognize next to
/// the surrounding characters falls back to inline HTML.
pub fn render_inline(events: &[InlineEvent<'_>], options: &MarkdownOptions) -> String {
    render_nodes(&nest(events), CharClass::Space, CharClass::Space, options)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Punct,
    Other,
}

fn classify(c: Option<char>) -> CharClass {
    match c {
        None => CharClass::Space,
        Some(c) if c.is_whitespace() => CharClass::Space,
        Some(c) if c.is_alphanumeric() => CharClass::Other,
        Some(_) => CharClass::Punct,
    }
}

enum Piece<'a> {
    Plain(Cow<'a, str>),
    Wrapped {
        mark: &'a MarkInfo<'a>,
        lead: String,
        core: String,
        trail: String,
    },
}

impl Piece<'_> {
    /// Class of the first rendered character, `None` for an empty piece.
    fn leading_class(&self) -> Option<CharClass> {
        match self {
            Piece::Plain(text) => text.chars().next().map(|c| classify(Some(c))),
            Piece::Wrapped { lead, .. } if !lead.is_empty() => Some(CharClass::Space),
            // Every delimiter starts with punctuation.
            Piece::Wrapped { .. } => Some(CharClass::Punct),
        }
    }
}

/// Render sibling nodes that sit between characters of class `before` and `after`.
fn render_nodes<'a>(
    nodes: &'a [Inline<'a>],
    before: CharClass,
    after: CharClass,
    options: &MarkdownOptions,
) -> String {
    let pieces: Vec<Piece<'a>> = nodes
        .iter()
        .map(|node| match node {
            Inline::Text(text) => Piece::Plain(Cow::Borrowed(&**text)),
            Inline::Code(content) => Piece::Plain(Cow::Owned(fence_inline_code(
                content,
                options.code_min_ticks,
            ))),
            Inline::Marked(mark, children) => {
                let inner = render_nodes(children, CharClass::Punct, CharClass::Punct, options);
                let core = inner.trim_matches(char::is_whitespace);
                if core.is_empty() {
                    return Piece::Plain(Cow::Owned(inner));
                }
                let lead_len = inner.len() - inner.trim_start_matches(char::is_whitespace).len();
                let core_end = lead_len + core.len();
                Piece::Wrapped {
                    mark,
                    lead: inner[..lead_len].to_string(),
                    core: core.to_string(),
                    trail: inner[core_end..].to_string(),
                }
            }
        })
        .collect();

    let mut out = String::new();
    for (index, piece) in pieces.iter().enumerate() {
        match piece {
            Piece::Plain(text) => out.push_str(text),
            Piece::Wrapped {
                mark,
                lead,
                core,
                trail,
            } => {
                out.push_str(lead);
                let prev_char = out.chars().next_back();
                let prev = match prev_char {
                    None => before,
                    Some(_) => classify(prev_char),
                };
                let next = if trail.is_empty() {
                    pieces[index + 1..]
                        .iter()
                        .find_map(|piece| piece.leading_class())
                        .unwrap_or(after)
                } else {
                    CharClass::Space
                };

                if matches!(mark.kind, MarkKind::Link { .. }) && out.ends_with('!') {
                    // `![` would start an image.
                    out.pop();
                    out.push_str("\\!");
                }
                let (open, close) = delimiters(mark, core, prev_char, prev, next);
                out.push_str(open);
                out.push_str(core);
                out.push_str(&close);
                out.push_str(trail);
            }
        }
    }
    out
}

/// Whether `*`-style delimiters around `core` are recognized between `prev` and `next`.
///
/// Siblings never share a delimiter run, so a delimiter next to another sibling's
/// delimiter sees punctuation.
fn flanks(core: &str, prev: CharClass, next: CharClass) -> bool {
    let first = classify(core.chars().next());
    let last = classify(core.chars().next_back());
    let can_open =
        first != CharClass::Space && (first != CharClass::Punct || prev != CharClass::Other);
    let can_close =
        last != CharClass::Space && (last != CharClass::Punct || next != CharClass::Other);
    can_open && can_close
}

/// Opening and closing delimiters of `mark` around `core`. `prev_char` is the last
/// character already written among the siblings.
fn delimiters<'a>(
    mark: &MarkInfo<'a>,
    core: &str,
    prev_char: Option<char>,
    prev: CharClass,
    next: CharClass,
) -> (&'static str, Cow<'a, str>) {
    match mark.kind {
        MarkKind::Decorator(decorator) => {
            let (open, close) = decorator_delimiters(decorator);
            // An opener right after a sibling's closer of the same character would
            // join its delimiter run.
            let joins_run =
                prev_char.is_some_and(|c| matches!(c, '*' | '~') && open.starts_with(c));
            let (open, close) = if joins_run || !flanks(core, prev, next) {
                html_delimiters(decorator)
            } else {
                (open, close)
            };
            (open, Cow::Borrowed(close))
        }
        MarkKind::Link { href } => ("[", Cow::Owned(format!("]({})", link_destination(href)))),
        MarkKind::Annotation { .. } => ("", Cow::Borrowed("")),
    }
}

fn decorator_delimiters(decorator: Decorator) -> (&'static str, &'static str) {
    match decorator {
        Decorator::Strong => ("**", "**"),
        Decorator::Em => ("*", "*"),
        Decorator::StrikeThrough => ("~~", "~~"),
        Decorator::Underline => ("<u>", "</u>"),
        // Fenced as a code node.
        Decorator::Code => ("", ""),
    }
}

fn html_delimiters(decorator: Decorator) -> (&'static str, &'static str) {
    match decorator {
        Decorator::Strong => ("<strong>", "</strong>"),
        Decorator::Em => ("<em>", "</em>"),
        Decorator::StrikeThrough => ("<del>", "</del>"),
        Decorator::Underline => ("<u>", "</u>"),
        Decorator::Code => ("", ""),
    }
}

/// Link destinations with spaces or parentheses go in angle brackets.
fn link_destination(href: &str) -> Cow<'_, str> {
    if href
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>'))
    {
        Cow::Owned(format!(
            "<{}>",
            href.replace('<', "%3C").replace('>', "%3E")
        ))
    } else {
        Cow::Borrowed(href)
    }
}

/// Text of a list marker, without the trailing space.
pub fn list_marker(marker: ListMarker, bullet: char) -> String {
    match marker {
        ListMarker::Bullet => bullet.to_string(),
        ListMarker::Number(number) => format!("{number}."),
    }
}
