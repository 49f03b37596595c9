//! Rendering options for the Markdown writer.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::FormatError;
use crate::model::CustomBlock;

/// Renders blocks whose `_type` is not `block`.
///
/// Returning `None` (or an empty string) renders nothing for the block.
pub trait CustomBlockHandler: Send + Sync {
    fn render(&self, block: &CustomBlock) -> Option<String>;
}

impl<F> CustomBlockHandler for F
where
    F: Fn(&CustomBlock) -> Option<String> + Send + Sync,
{
    fn render(&self, block: &CustomBlock) -> Option<String> {
        self(block)
    }
}

/// Knobs of the Markdown writer.
#[derive(Clone)]
pub struct MarkdownOptions {
    /// Indentation added per nesting level of a list.
    pub list_indent: String,
    /// Marker of bullet list items: `-`, `*` or `+`.
    pub bullet: char,
    /// Minimum fence length of inline code.
    pub code_min_ticks: usize,
    pub(super) custom_blocks: Option<Arc<dyn CustomBlockHandler>>,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        MarkdownOptions {
            list_indent: "    ".to_string(),
            bullet: '-',
            code_min_ticks: 1,
            custom_blocks: None,
        }
    }
}

impl fmt::Debug for MarkdownOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkdownOptions")
            .field("list_indent", &self.list_indent)
            .field("bullet", &self.bullet)
            .field("code_min_ticks", &self.code_min_ticks)
            .field("custom_blocks", &self.custom_blocks.is_some())
            .finish()
    }
}

impl MarkdownOptions {
    pub fn with_custom_block_handler<H>(mut self, handler: H) -> Self
    where
        H: CustomBlockHandler + 'static,
    {
        self.custom_blocks = Some(Arc::new(handler));
        self
    }

    pub fn has_custom_block_handler(&self) -> bool {
        self.custom_blocks.is_some()
    }

    pub(crate) fn render_custom_block(&self, block: &CustomBlock) -> Option<String> {
        self.custom_blocks
            .as_ref()
            .and_then(|handler| handler.render(block))
    }

    /// Apply string parameters as passed through the format registry.
    ///
    /// Supported keys: `list-indent` (a number of spaces, `tab`, or literal
    /// whitespace), `bullet` and `code-min-ticks`.
    pub fn apply_params(&mut self, params: &HashMap<String, String>) -> Result<(), FormatError> {
        for (key, value) in params {
            match key.as_str() {
                "list-indent" => self.list_indent = parse_indent(value)?,
                "bullet" => self.bullet = parse_bullet(value)?,
                "code-min-ticks" => {
                    self.code_min_ticks = value
                        .parse::<usize>()
                        .ok()
                        .filter(|ticks| *ticks >= 1)
                        .ok_or_else(|| invalid("code-min-ticks", value))?;
                }
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'markdown' does not support option '{other}'"
                    )))
                }
            }
        }
        Ok(())
    }
}

fn invalid(option: &str, value: &str) -> FormatError {
    FormatError::InvalidOption {
        option: option.to_string(),
        value: value.to_string(),
    }
}

fn parse_indent(value: &str) -> Result<String, FormatError> {
    if let Ok(width) = value.parse::<usize>() {
        if width >= 1 {
            return Ok(" ".repeat(width));
        }
    } else if value == "tab" {
        return Ok("\t".to_string());
    } else if !value.is_empty() && value.chars().all(|c| c == ' ' || c == '\t') {
        return Ok(value.to_string());
    }
    Err(invalid("list-indent", value))
}

/// Bullet markers CommonMark accepts.
pub fn parse_bullet(value: &str) -> Result<char, FormatError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ ('-' | '*' | '+')), None) => Ok(c),
        _ => Err(invalid("bullet", value)),
    }
}
