//! Markdown escaping and inline-code fencing.

/// Where the next character of escaped text falls on its output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePosition {
    /// At the start of a line, after `indent` spaces. A block marker may still follow
    /// while `indent` is at most three.
    Start { indent: usize },
    /// After a digit run that starts a line, where `.` or `)` would end an ordered marker.
    Ordinal,
    Inline,
}

/// Escape Markdown syntax characters in text that starts a line.
///
/// Always escaped:
/// - Backslash: `\\`
/// - Emphasis and strike-through: `*`, `_`, `~`
/// - Links: `[`, `]`
/// - Code: `` ` ``
/// - HTML, entities and quotes: `<`, `>`, `&`
///
/// Escaped only where a line starts, after at most three spaces:
/// - Headings: `#`
/// - Bullet markers: `-`, `+`
/// - Setext underlines: `=`
/// - Ordered markers: the `.` or `)` after a leading digit run (`1. x` becomes `1\. x`)
pub fn escape_markdown(text: &str) -> String {
    escape_markdown_at(text, true)
}

/// Like [`escape_markdown`], for text that may continue an existing line.
///
/// `at_line_start` tells whether the first character of `text` begins a line; after
/// any `\n` in `text` the following character always does.
pub fn escape_markdown_at(text: &str, at_line_start: bool) -> String {
    let mut position = if at_line_start {
        LinePosition::Start { indent: 0 }
    } else {
        LinePosition::Inline
    };
    escape_markdown_from(text, &mut position)
}

/// Escape `text` starting at `position`, leaving `position` where the text ends.
pub fn escape_markdown_from(text: &str, position: &mut LinePosition) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);

    for c in text.chars() {
        *position = match (c, *position) {
            ('\n', _) => {
                result.push(c);
                LinePosition::Start { indent: 0 }
            }
            (' ', LinePosition::Start { indent }) if indent < 3 => {
                result.push(c);
                LinePosition::Start { indent: indent + 1 }
            }
            ('0'..='9', LinePosition::Start { .. } | LinePosition::Ordinal) => {
                result.push(c);
                LinePosition::Ordinal
            }
            ('\\' | '*' | '_' | '~' | '[' | ']' | '`' | '<' | '>' | '&', _)
            | ('#' | '-' | '+' | '=', LinePosition::Start { .. })
            | ('.' | ')', LinePosition::Ordinal) => {
                result.push('\\');
                result.push(c);
                LinePosition::Inline
            }
            _ => {
                result.push(c);
                LinePosition::Inline
            }
        };
    }

    result
}

/// Length of the longest run of consecutive backticks in `content`.
pub fn longest_backtick_run(content: &str) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == '`' {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    max_run
}

/// Number of backticks needed to fence `content` as inline code.
///
/// Always longer than the longest backtick run inside `content`, and at least
/// `min_ticks` (itself at least 1).
pub fn calculate_inline_code_ticks(content: &str, min_ticks: usize) -> usize {
    (longest_backtick_run(content) + 1).max(min_ticks.max(1))
}

/// Wrap raw `content` in an inline-code fence.
///
/// A single space is padded inside the fence when the content starts or ends with a
/// backtick, so the fence and the content cannot merge, and when the content is
/// wrapped in spaces, since readers strip one space from each side.
pub fn fence_inline_code(content: &str, min_ticks: usize) -> String {
    let fence = "`".repeat(calculate_inline_code_ticks(content, min_ticks));
    let space_wrapped = content.starts_with(' ')
        && content.ends_with(' ')
        && !content.chars().all(|c| c == ' ');
    let pad = if content.starts_with('`') || content.ends_with('`') || space_wrapped {
        " "
    } else {
        ""
    };
    format!("{fence}{pad}{content}{pad}{fence}")
}
