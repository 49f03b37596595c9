//! Export tests for Markdown format (Portable Text → Markdown)
//!
//! These tests build documents with the typed model and check the exact Markdown text.

use crate::common::{render_blocks, render_json};
use insta::assert_snapshot;
use ptext_markdown::common::marks::resolve_marks;
use ptext_markdown::{
    to_markdown, Block, CustomBlock, ListKind, MarkDef, MarkdownOptions, RenderError, Span,
    Style, TextBlock,
};

fn paragraph(spans: Vec<Span>) -> Block {
    let mut block = TextBlock::new("p");
    block.children = spans;
    block.into()
}

fn item(kind: ListKind, level: u32, text: &str) -> Block {
    TextBlock::new(text)
        .with_list_item(kind, level)
        .with_span(Span::plain(text))
        .into()
}

fn event_dump(block: &TextBlock) -> String {
    resolve_marks(block)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_plain_paragraph() {
    let blocks = vec![paragraph(vec![Span::plain("Plain text.")])];
    assert_eq!(render_blocks(&blocks), "Plain text.\n");
}

#[test]
fn test_strong_then_plain() {
    let blocks = vec![paragraph(vec![
        Span::new("Bold", ["strong"]),
        Span::plain(" plain"),
    ])];
    assert_eq!(render_blocks(&blocks), "**Bold** plain\n");
}

#[test]
fn test_link() {
    let block = TextBlock::new("p")
        .with_mark_def(MarkDef::link("l", "https://x"))
        .with_span(Span::new("click", ["l"]));
    assert_eq!(render_blocks(&[Block::from(block)]), "[click](https://x)\n");
}

#[test]
fn test_three_bullets() {
    let blocks = vec![
        item(ListKind::Bullet, 1, "a"),
        item(ListKind::Bullet, 1, "b"),
        item(ListKind::Bullet, 1, "c"),
    ];
    assert_eq!(render_blocks(&blocks), "- a\n- b\n- c\n");
}

#[test]
fn test_literal_asterisk_is_escaped() {
    let blocks = vec![paragraph(vec![Span::plain("2 * 3")])];
    assert_eq!(render_blocks(&blocks), "2 \\* 3\n");
}

#[test]
fn test_empty_document() {
    assert_eq!(render_blocks(&[]), "");
    assert_eq!(render_json("[]"), "");
}

#[test]
fn test_document_of_only_skipped_blocks_is_empty() {
    let blocks = vec![
        paragraph(vec![Span::plain("")]),
        CustomBlock::from_value(serde_json::json!({ "_type": "break" })).into(),
    ];
    assert_eq!(render_blocks(&blocks), "");
}

#[test]
fn test_deep_and_skipped_list_levels() {
    let blocks = vec![
        item(ListKind::Bullet, 1, "top"),
        item(ListKind::Bullet, 3, "deep"),
        item(ListKind::Bullet, 2, "middle"),
        item(ListKind::Number, 1, "numbered"),
    ];
    assert_eq!(
        render_blocks(&blocks),
        "- top\n    - deep\n    - middle\n1. numbered\n"
    );
}

#[test]
fn test_multiline_list_item() {
    let blocks = vec![
        item(ListKind::Number, 1, "first line\nsecond line"),
        item(ListKind::Number, 1, "next"),
    ];
    assert_eq!(
        render_blocks(&blocks),
        "1. first line\n   second line\n2. next\n"
    );
}

#[test]
fn test_list_text_looking_like_a_marker_is_escaped() {
    let blocks = vec![item(ListKind::Bullet, 1, "- not nested")];
    assert_eq!(render_blocks(&blocks), "- \\- not nested\n");
}

#[test]
fn test_heading_levels() {
    let blocks: Vec<Block> = (1..=6)
        .map(|level| {
            TextBlock::new(format!("h{level}"))
                .with_style(Style::Heading(level))
                .with_span(Span::plain(format!("Level {level}")))
                .into()
        })
        .collect();
    assert_snapshot!(render_blocks(&blocks), @r"
    # Level 1

    ## Level 2

    ### Level 3

    #### Level 4

    ##### Level 5

    ###### Level 6
    ");
}

#[test]
fn test_custom_options() {
    let mut options = MarkdownOptions::default();
    options.list_indent = "  ".to_string();
    options.bullet = '*';
    options.code_min_ticks = 2;
    let blocks = vec![
        item(ListKind::Bullet, 1, "a"),
        item(ListKind::Bullet, 2, "b"),
        paragraph(vec![Span::new("x", ["code"])]),
    ];
    let mut out = Vec::new();
    to_markdown(&blocks, &mut out, &options).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "* a\n  * b\n\n``x``\n");
}

#[test]
fn test_custom_block_handler() {
    let options =
        MarkdownOptions::default().with_custom_block_handler(|block: &CustomBlock| {
            match block.block_type.as_str() {
                "code" => block.payload["code"]
                    .as_str()
                    .map(|code| format!("```\n{code}\n```")),
                _ => None,
            }
        });
    let blocks = vec![
        paragraph(vec![Span::plain("Example:")]),
        CustomBlock::from_value(serde_json::json!({
            "_type": "code",
            "_key": "c",
            "code": "let x = 1;"
        }))
        .into(),
        CustomBlock::from_value(serde_json::json!({ "_type": "video" })).into(),
    ];
    let output = ptext_markdown::to_markdown_string(&blocks, &options).unwrap();
    assert_eq!(output, "Example:\n\n```\nlet x = 1;\n```\n");
}

#[test]
fn test_unresolved_mark_fails_the_conversion() {
    let blocks = vec![
        paragraph(vec![Span::plain("fine")]),
        paragraph(vec![Span::new("broken", ["ghost"])]),
    ];
    let result = ptext_markdown::to_markdown_string(&blocks, &MarkdownOptions::default());
    match result {
        Err(RenderError::UnresolvedMark { mark, .. }) => assert_eq!(mark, "ghost"),
        other => panic!("expected unresolved mark, got {other:?}"),
    }
}

#[test]
fn test_overlapping_marks_event_stream() {
    let block = TextBlock::new("p")
        .with_mark_def(MarkDef::link("l", "https://x"))
        .with_span(Span::new("a", ["em"]))
        .with_span(Span::new("b", ["em", "l", "code"]))
        .with_span(Span::new("c", ["l", "strong"]));
    assert_snapshot!(event_dump(&block), @r#"
    open em
    text "a"
    open link(https://x)
    open code
    text "b"
    close code
    close link(https://x)
    close em
    open link(https://x)
    open strong
    text "c"
    close strong
    close link(https://x)
    "#);
    assert_eq!(
        render_blocks(&[Block::from(block)]),
        "*a[`b`](https://x)*[**c**](https://x)\n"
    );
}
