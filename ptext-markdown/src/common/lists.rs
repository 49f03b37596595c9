//! Rebuilds nested lists from the flat, leveled list-item blocks of a document.
//!
//! Portable Text has no list container: a list is a run of consecutive blocks carrying
//! `listItem` and `level`. We keep a stack of open list frames, one per nesting level
//! currently open, and derive each item's depth and marker from it.
//!
//! ```text
//! block          frames after             context
//! bullet 1 "a"   [1 bullet]               depth 1, "-"
//! number 2 "b"   [1 bullet, 2 number]     depth 2, "1."
//! number 2 "c"   [1 bullet, 2 number]     depth 2, "2."
//! bullet 1 "d"   [1 bullet]               depth 1, "-"
//! paragraph      []                       (not a list item)
//! ```
//!
//! Frames are never reopened: once popped, a later list at the same level and kind
//! starts counting from 1 again.

use crate::model::{Block, ListKind};

/// Marker of a rendered list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    Number(usize),
}

/// Where a list-item block sits in the reconstructed list structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListContext {
    /// Number of open frames, including the item's own (1 for a top-level item).
    pub depth: usize,
    pub marker: ListMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListFrame {
    level: u32,
    kind: ListKind,
    next_number: usize,
}

impl ListFrame {
    fn new(level: u32, kind: ListKind) -> Self {
        ListFrame {
            level,
            kind,
            next_number: 1,
        }
    }
}

/// Stack of open list frames, threaded across the blocks of one document.
#[derive(Debug, Default)]
pub struct ListReconstructor {
    frames: Vec<ListFrame>,
}

impl ListReconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_open(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Place a list item at `level` of `kind`, updating the frame stack.
    pub fn push_item(&mut self, level: u32, kind: ListKind) -> ListContext {
        let level = level.max(1);

        while self.frames.last().is_some_and(|top| top.level > level) {
            self.frames.pop();
        }

        match self.frames.last() {
            Some(top) if top.level == level && top.kind == kind => {}
            Some(top) if top.level == level => {
                log::trace!("list kind changes at level {level}, starting a new list");
                self.frames.pop();
                self.frames.push(ListFrame::new(level, kind));
            }
            _ => {
                log::trace!("opening {} list at level {level}", kind.name());
                self.frames.push(ListFrame::new(level, kind));
            }
        }

        let depth = self.frames.len();
        let marker = match self.frames.last_mut() {
            Some(top) if top.kind == ListKind::Number => {
                let number = top.next_number;
                top.next_number += 1;
                ListMarker::Number(number)
            }
            _ => ListMarker::Bullet,
        };

        ListContext { depth, marker }
    }

    /// Close every open frame. Returns how many were closed.
    pub fn close_all(&mut self) -> usize {
        let closed = self.frames.len();
        if closed > 0 {
            log::trace!("closing {closed} list frame(s)");
        }
        self.frames.clear();
        closed
    }
}

/// List context of every block of a document, `None` for blocks that are not list
/// items.
pub fn list_contexts(blocks: &[Block]) -> Vec<Option<ListContext>> {
    let mut lists = ListReconstructor::new();
    blocks
        .iter()
        .map(|block| match block.as_text() {
            Some(text) => match text.list_item {
                Some(kind) => Some(lists.push_item(text.list_level(), kind)),
                None => {
                    lists.close_all();
                    None
                }
            },
            None => {
                lists.close_all();
                None
            }
        })
        .collect()
}
