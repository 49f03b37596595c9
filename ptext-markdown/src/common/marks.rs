//! Resolves a block's flat span/mark sequence into a properly nested event stream.
//!
//! # The High-Level Concept
//!
//! A Portable Text span only says *which* marks are active on its text. Markdown needs
//! strictly bracketed delimiters, so the nesting order has to be invented. We keep a
//! stack of open marks and, for every span, diff the stack against the span's mark set:
//!
//! ```text
//! spans:   [strong] "a"   [strong, em] "b"   [em] "c"
//! stack:   strong         strong em          em
//! events:  open strong, text a, open em, text b, close em, close strong,
//!          open em, text c, close em
//! ```
//!
//! # The Algorithm
//!
//! 1. Resolve every key of the span: a `markDefs` entry (link or other annotation), else
//!    a built-in decorator. Anything else fails the conversion.
//! 2. Keep the longest prefix of the stack (bottom to top) whose marks are all still
//!    wanted. Everything above that prefix is closed top-down, even marks that are
//!    still wanted: a mark cannot outlive a mark opened inside it.
//! 3. Open the wanted marks that are not on the stack, in canonical order:
//!    - annotations (links) first, so they end up outermost
//!    - then decorators by their first appearance in the block
//!    - `code` always last
//! 4. Emit the span text: escaped, or raw if `code` is open.
//! 5. After the last span, close everything.
//!
//! Inline code cannot contain other markup, so `code` is kept on top of the stack: when
//! a new mark has to open while `code` is open, `code` is closed and reopened inside it.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::RenderError;
use crate::formats::markdown::escape::{escape_markdown_from, LinePosition};
use crate::ir::events::{Decorator, InlineEvent, MarkInfo, MarkKind};
use crate::model::{Span, TextBlock, LINK_MARK_TYPE};

/// Resolve all spans of `block` into a bracketed event stream.
pub fn resolve_marks(block: &TextBlock) -> Result<Vec<InlineEvent<'_>>, RenderError> {
    let mut resolver = MarkResolver::new(block);
    for span in &block.children {
        resolver.push_span(span)?;
    }
    Ok(resolver.finish())
}

/// Call-scoped state of the mark-diff stack for one block.
struct MarkResolver<'a> {
    block: &'a TextBlock,
    /// Order in which mark keys first appear in the block.
    first_seen: HashMap<&'a str, usize>,
    stack: Vec<MarkInfo<'a>>,
    events: Vec<InlineEvent<'a>>,
    position: LinePosition,
}

impl<'a> MarkResolver<'a> {
    fn new(block: &'a TextBlock) -> Self {
        let mut first_seen = HashMap::new();
        for key in block.children.iter().flat_map(|span| &span.marks) {
            let next = first_seen.len();
            first_seen.entry(key.as_str()).or_insert(next);
        }

        MarkResolver {
            block,
            first_seen,
            stack: Vec::new(),
            events: Vec::new(),
            position: LinePosition::Start { indent: 0 },
        }
    }

    fn resolve(&self, key: &'a str) -> Result<MarkInfo<'a>, RenderError> {
        if let Some(def) = self.block.mark_def(key) {
            let kind = if def.mark_type == LINK_MARK_TYPE {
                MarkKind::Link {
                    href: def.href.as_deref().unwrap_or_default(),
                }
            } else {
                log::trace!("annotation '{}' has no Markdown syntax, keeping text only", def.mark_type);
                MarkKind::Annotation {
                    mark_type: &def.mark_type,
                }
            };
            return Ok(MarkInfo { key, kind });
        }

        Decorator::from_name(key)
            .map(|decorator| MarkInfo {
                key,
                kind: MarkKind::Decorator(decorator),
            })
            .ok_or_else(|| RenderError::UnresolvedMark {
                block_key: self.block.key.clone(),
                mark: key.to_string(),
            })
    }

    fn open_rank(&self, mark: &MarkInfo<'a>) -> (u8, usize) {
        let class = match mark.kind {
            MarkKind::Link { .. } | MarkKind::Annotation { .. } => 0,
            MarkKind::Decorator(Decorator::Code) => 2,
            MarkKind::Decorator(_) => 1,
        };
        let seen = self.first_seen.get(mark.key).copied().unwrap_or(usize::MAX);
        (class, seen)
    }

    fn push_span(&mut self, span: &'a Span) -> Result<(), RenderError> {
        let mut wanted: Vec<MarkInfo<'a>> = Vec::with_capacity(span.marks.len());
        for key in &span.marks {
            if wanted.iter().any(|mark| mark.key == key.as_str()) {
                continue;
            }
            wanted.push(self.resolve(key)?);
        }

        let is_wanted = |open: &MarkInfo<'a>| wanted.iter().any(|mark| mark.key == open.key);
        let mut keep = self.stack.iter().take_while(|open| is_wanted(*open)).count();

        let has_new_marks = wanted.len() > keep;
        if has_new_marks {
            if let Some(code_at) = self.stack[..keep].iter().position(MarkInfo::is_code) {
                keep = code_at;
            }
        }

        while self.stack.len() > keep {
            if let Some(mark) = self.stack.pop() {
                self.events.push(InlineEvent::Close(mark));
            }
        }

        let mut opening: Vec<MarkInfo<'a>> = wanted
            .into_iter()
            .filter(|mark| !self.stack.iter().any(|open| open.key == mark.key))
            .collect();
        opening.sort_by_key(|mark| self.open_rank(mark));
        for mark in opening {
            self.events.push(InlineEvent::Open(mark.clone()));
            self.stack.push(mark);
        }

        if !span.text.is_empty() {
            let text = if self.stack.iter().any(MarkInfo::is_code) {
                self.position = if span.text.ends_with('\n') {
                    LinePosition::Start { indent: 0 }
                } else {
                    LinePosition::Inline
                };
                Cow::Borrowed(span.text.as_str())
            } else {
                Cow::Owned(escape_markdown_from(&span.text, &mut self.position))
            };
            self.events.push(InlineEvent::Text(text));
        }

        Ok(())
    }

    fn finish(mut self) -> Vec<InlineEvent<'a>> {
        while let Some(mark) = self.stack.pop() {
            self.events.push(InlineEvent::Close(mark));
        }
        self.events
    }
}
