//! Structural export tests
//!
//! The rendered Markdown is parsed back with comrak and the resulting AST is checked, so
//! these tests verify what a CommonMark reader sees rather than exact text.

use crate::common::{fixtures_dir, render_blocks, render_json};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use ptext_markdown::{Block, Span, TextBlock};

fn parse_markdown<'a>(arena: &'a Arena<AstNode<'a>>, md: &str) -> &'a AstNode<'a> {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    parse_document(arena, md, &options)
}

fn render_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    let source =
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
    render_json(&source)
}

/// Literal text of a subtree: text, inline code and line breaks.
fn collect_text<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::Code(code) => out.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push('\n'),
        _ => {}
    }
    for child in node.children() {
        collect_text(child, out);
    }
}

fn text_of<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn node_name<'a>(node: &'a AstNode<'a>) -> &'static str {
    match node.data.borrow().value {
        NodeValue::Document => "Document",
        NodeValue::Paragraph => "Paragraph",
        NodeValue::Heading(_) => "Heading",
        NodeValue::BlockQuote => "BlockQuote",
        NodeValue::List(_) => "List",
        NodeValue::Item(_) => "Item",
        NodeValue::Strong => "Strong",
        NodeValue::Emph => "Emph",
        NodeValue::Strikethrough => "Strikethrough",
        NodeValue::Code(_) => "Code",
        NodeValue::Link(_) => "Link",
        NodeValue::HtmlInline(_) => "HtmlInline",
        NodeValue::ThematicBreak => "ThematicBreak",
        NodeValue::CodeBlock(_) => "CodeBlock",
        _ => "Other",
    }
}

fn child_names<'a>(node: &'a AstNode<'a>) -> Vec<&'static str> {
    node.children().map(node_name).collect()
}

fn render_spans(spans: Vec<Span>) -> String {
    let mut block = TextBlock::new("p");
    block.children = spans;
    render_blocks(&[Block::from(block)])
}

#[test]
fn test_paragraph_fixture_structure() {
    let md = render_fixture("paragraphs.json");
    let arena = Arena::new();
    let root = parse_markdown(&arena, &md);

    assert_eq!(
        child_names(root),
        vec!["Paragraph", "Heading", "BlockQuote", "Paragraph", "Heading"]
    );

    let children: Vec<_> = root.children().collect();
    match &children[1].data.borrow().value {
        NodeValue::Heading(heading) => assert_eq!(heading.level, 1),
        other => panic!("expected heading, got {other:?}"),
    }
    assert_eq!(text_of(children[2]), "Quoted line one\nline two");

    // Escaped characters come back as literal text, not emphasis.
    assert_eq!(
        text_of(children[3]),
        "Stars * and _underscores_ and 1. numbers"
    );
    assert!(child_names(children[3]).iter().all(|name| *name == "Other"));
    assert_eq!(text_of(children[4]), "# Not a nested heading");
}

#[test]
fn test_marks_fixture_structure() {
    let md = render_fixture("marks.json");
    let arena = Arena::new();
    let root = parse_markdown(&arena, &md);
    let paragraphs: Vec<_> = root.children().collect();
    assert_eq!(paragraphs.len(), 4);

    assert_eq!(child_names(paragraphs[0]), vec!["Strong", "Other"]);

    let strong = paragraphs[1].first_child().expect("strong node");
    assert_eq!(node_name(strong), "Strong");
    assert_eq!(child_names(strong), vec!["Other", "Emph", "Other"]);
    assert_eq!(text_of(strong), "all bold, partly italic, bold again");

    assert_eq!(
        child_names(paragraphs[2]),
        vec!["Strikethrough", "Other", "HtmlInline", "Other", "HtmlInline"]
    );

    let code = paragraphs[3]
        .children()
        .find(|node| node_name(node) == "Code")
        .expect("code span");
    assert_eq!(text_of(code), "fmt.Println(`x`)");
}

#[test]
fn test_links_fixture_structure() {
    let md = render_fixture("links.json");
    let arena = Arena::new();
    let root = parse_markdown(&arena, &md);
    let paragraphs: Vec<_> = root.children().collect();

    let link = paragraphs[0]
        .children()
        .find(|node| node_name(node) == "Link")
        .expect("link");
    match &link.data.borrow().value {
        NodeValue::Link(link) => assert_eq!(link.url, "https://example.com"),
        other => panic!("expected link, got {other:?}"),
    }
    assert_eq!(text_of(link), "the docs");

    let link = paragraphs[1].first_child().expect("link");
    assert_eq!(node_name(link), "Link");
    assert_eq!(child_names(link), vec!["Strong"]);

    assert_eq!(child_names(paragraphs[2]), vec!["Other"]);
    assert_eq!(text_of(paragraphs[2]), "annotated text");
}

#[test]
fn test_lists_fixture_structure() {
    let md = render_fixture("lists.json");
    let arena = Arena::new();
    let root = parse_markdown(&arena, &md);

    assert_eq!(
        child_names(root),
        vec!["Paragraph", "List", "Paragraph", "List"]
    );
    let blocks: Vec<_> = root.children().collect();

    let shopping = blocks[1];
    match &shopping.data.borrow().value {
        NodeValue::List(list) => {
            assert_eq!(list.list_type, ListType::Bullet);
            assert!(list.tight);
        }
        other => panic!("expected list, got {other:?}"),
    }
    let items: Vec<_> = shopping.children().collect();
    assert_eq!(items.len(), 3);
    assert_eq!(child_names(items[1]), vec!["Paragraph", "List"]);

    let nested = items[1].last_child().expect("nested list");
    match &nested.data.borrow().value {
        NodeValue::List(list) => {
            assert_eq!(list.list_type, ListType::Ordered);
            assert_eq!(list.start, 1);
        }
        other => panic!("expected list, got {other:?}"),
    }
    assert_eq!(nested.children().count(), 2);

    // "Steps" closed the first list, so numbering starts over.
    match &blocks[3].data.borrow().value {
        NodeValue::List(list) => {
            assert_eq!(list.list_type, ListType::Ordered);
            assert_eq!(list.start, 1);
        }
        other => panic!("expected list, got {other:?}"),
    };
}

#[test]
fn test_empty_strong_span_is_not_a_thematic_break() {
    let md = render_blocks(&[
        TextBlock::new("a").with_span(Span::plain("above")).into(),
        TextBlock::new("b").with_span(Span::new("", ["strong"])).into(),
        TextBlock::new("c").with_span(Span::plain("below")).into(),
    ]);
    let arena = Arena::new();
    let root = parse_markdown(&arena, &md);
    assert_eq!(child_names(root), vec!["Paragraph", "Paragraph"]);
}

#[test]
fn test_intraword_emphasis_parses_back() {
    let md = render_spans(vec![
        Span::plain("foo"),
        Span::new("bar", ["em"]),
        Span::plain("baz"),
    ]);
    let arena = Arena::new();
    let paragraph = parse_markdown(&arena, &md).first_child().expect("paragraph");
    assert_eq!(child_names(paragraph), vec!["Other", "Emph", "Other"]);
    let emph = paragraph.children().nth(1).expect("emphasis");
    assert_eq!(text_of(emph), "bar");
    assert_eq!(text_of(paragraph), "foobarbaz");
}

#[test]
fn test_trailing_space_inside_strong_parses_back() {
    let md = render_spans(vec![Span::new("Bold ", ["strong"]), Span::plain("plain")]);
    let arena = Arena::new();
    let paragraph = parse_markdown(&arena, &md).first_child().expect("paragraph");
    assert_eq!(child_names(paragraph), vec!["Strong", "Other"]);
    assert_eq!(text_of(paragraph), "Bold plain");
}

#[test]
fn test_unflanked_strong_parses_as_html() {
    let md = render_spans(vec![Span::new("f(x)", ["strong"]), Span::plain("y")]);
    let arena = Arena::new();
    let paragraph = parse_markdown(&arena, &md).first_child().expect("paragraph");
    assert_eq!(
        child_names(paragraph),
        vec!["HtmlInline", "Other", "HtmlInline", "Other"]
    );
    assert_eq!(text_of(paragraph), "f(x)y");
}

#[test]
fn test_line_start_markers_stay_paragraph_text() {
    for text in ["  # spaced", "   - spaced", "1) paren", "a\n===", "~~~", "  > quote"] {
        let md = render_spans(vec![Span::plain(text)]);
        let arena = Arena::new();
        let root = parse_markdown(&arena, &md);
        assert_eq!(child_names(root), vec!["Paragraph"], "{text:?} rendered as {md:?}");
        assert_eq!(text_of(root), text.trim_start(), "{md:?}");
    }
}

#[test]
fn test_nested_list_under_wide_number_stays_nested() {
    let mut blocks: Vec<Block> = (0..100)
        .map(|index| {
            TextBlock::new(format!("n{index}"))
                .with_list_item(ptext_markdown::ListKind::Number, 1)
                .with_span(Span::plain("item"))
                .into()
        })
        .collect();
    blocks.push(
        TextBlock::new("child")
            .with_list_item(ptext_markdown::ListKind::Bullet, 2)
            .with_span(Span::plain("child"))
            .into(),
    );
    let md = render_blocks(&blocks);
    let arena = Arena::new();
    let root = parse_markdown(&arena, &md);
    assert_eq!(child_names(root), vec!["List"]);
    let list = root.first_child().expect("list");
    assert_eq!(list.children().count(), 100);
    let last = list.last_child().expect("item 100");
    assert_eq!(child_names(last), vec!["Paragraph", "List"]);
}
