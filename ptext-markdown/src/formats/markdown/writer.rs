//! Document-level Markdown writer.
//!
//! Walks the blocks once, threads list state across them and writes each rendered
//! block to the sink as soon as it is ready. Blocks are separated by a blank line,
//! except that consecutive items of one list run are written on adjacent lines. The
//! output ends with exactly one newline; an empty document writes nothing.

use std::io::Write;

use crate::common::lists::ListReconstructor;
use crate::error::RenderError;
use crate::formats::markdown::block::{render_text_block, ListLayout};
use crate::formats::markdown::options::MarkdownOptions;
use crate::model::{Block, CustomBlock, TextBlock};

pub struct MarkdownWriter<'o, W: Write> {
    out: W,
    options: &'o MarkdownOptions,
    lists: ListReconstructor,
    layout: ListLayout,
    wrote_any: bool,
    in_list_run: bool,
}

impl<'o, W: Write> MarkdownWriter<'o, W> {
    pub fn new(out: W, options: &'o MarkdownOptions) -> Self {
        MarkdownWriter {
            out,
            options,
            lists: ListReconstructor::new(),
            layout: ListLayout::new(),
            wrote_any: false,
            in_list_run: false,
        }
    }

    /// Write every block and finish the document. Returns the sink.
    pub fn write_blocks(mut self, blocks: &[Block]) -> Result<W, RenderError> {
        for block in blocks {
            self.write_block(block)?;
        }
        self.finish()
    }

    pub fn write_block(&mut self, block: &Block) -> Result<(), RenderError> {
        match block {
            Block::Text(text) => self.write_text_block(text),
            Block::Custom(custom) => self.write_custom_block(custom),
        }
    }

    /// Close open lists, terminate the output and flush. Returns the sink.
    pub fn finish(mut self) -> Result<W, RenderError> {
        self.close_lists();
        if self.wrote_any {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_text_block(&mut self, block: &TextBlock) -> Result<(), RenderError> {
        let item = match block.list_item {
            Some(kind) => {
                let context = self.lists.push_item(block.list_level(), kind);
                Some(self.layout.place(&context, self.options))
            }
            None => {
                self.close_lists();
                None
            }
        };

        let rendered = render_text_block(block, item.as_ref(), self.options)?;
        if rendered.is_empty() {
            log::trace!("block '{}' renders empty, skipping", block.key);
            self.in_list_run = false;
            return Ok(());
        }

        let tight = item.is_some() && self.in_list_run;
        self.emit(&rendered, tight)?;
        self.in_list_run = item.is_some();
        Ok(())
    }

    fn write_custom_block(&mut self, block: &CustomBlock) -> Result<(), RenderError> {
        self.close_lists();
        self.in_list_run = false;

        if !self.options.has_custom_block_handler() {
            log::debug!(
                "no handler for custom block '{}' of type '{}', skipping",
                block.key,
                block.block_type
            );
            return Ok(());
        }

        match self.options.render_custom_block(block) {
            Some(rendered) => {
                let rendered = rendered.trim_end_matches(['\n', '\r']);
                if rendered.is_empty() {
                    log::debug!("custom block '{}' rendered empty", block.key);
                    Ok(())
                } else {
                    self.emit(rendered, false)
                }
            }
            None => {
                log::debug!(
                    "custom block handler declined block '{}' of type '{}'",
                    block.key,
                    block.block_type
                );
                Ok(())
            }
        }
    }

    fn close_lists(&mut self) {
        self.lists.close_all();
        self.layout.clear();
    }

    fn emit(&mut self, rendered: &str, tight: bool) -> Result<(), RenderError> {
        if self.wrote_any {
            let separator: &[u8] = if tight { b"\n" } else { b"\n\n" };
            self.out.write_all(separator)?;
        }
        self.out.write_all(rendered.as_bytes())?;
        self.wrote_any = true;
        Ok(())
    }
}
