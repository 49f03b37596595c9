//! Decoding tests for the Portable Text JSON format

use crate::common::fixtures_dir;
use ptext_markdown::format::Format;
use ptext_markdown::{
    parse_blocks, Block, FormatError, FormatRegistry, ListKind, PortableTextFormat, Style,
};

fn load_fixture(name: &str) -> Vec<Block> {
    let path = fixtures_dir().join(name);
    let source =
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
    PortableTextFormat.parse(&source).expect("fixture should parse")
}

#[test]
fn test_lists_fixture_decodes_list_fields() {
    let blocks = load_fixture("lists.json");
    assert_eq!(blocks.len(), 11);

    let kinds: Vec<Option<(ListKind, u32)>> = blocks
        .iter()
        .map(|block| {
            block
                .as_text()
                .and_then(|text| text.list_item.map(|kind| (kind, text.list_level())))
        })
        .collect();
    assert_eq!(kinds[0], None);
    assert_eq!(kinds[1], Some((ListKind::Bullet, 1)));
    assert_eq!(kinds[3], Some((ListKind::Number, 2)));
    assert_eq!(kinds[9], None);
    assert_eq!(blocks[9].block_type(), "image");
    assert_eq!(blocks[9].key(), "img");
}

#[test]
fn test_links_fixture_decodes_mark_defs() {
    let blocks = load_fixture("links.json");
    let first = blocks[0].as_text().unwrap();
    let link = first.mark_def("lnk1").expect("link definition");
    assert_eq!(link.mark_type, "link");
    assert_eq!(link.href.as_deref(), Some("https://example.com"));

    let third = blocks[2].as_text().unwrap();
    let comment = third.mark_def("c1").expect("comment definition");
    assert_eq!(comment.attributes["text"], "check this");
}

#[test]
fn test_single_object_document() {
    let blocks = load_fixture("single.json");
    assert_eq!(blocks.len(), 1);
    let text = blocks[0].as_text().unwrap();
    assert_eq!(text.style, Style::Normal);
    assert_eq!(text.plain_text(), "Only one block");
}

#[test]
fn test_custom_block_keeps_whole_payload() {
    let blocks = parse_blocks(
        r#"[{"_type": "youtube", "_key": "v", "url": "https://youtu.be/x", "meta": {"w": 640}}]"#,
    )
    .unwrap();
    match &blocks[0] {
        Block::Custom(custom) => {
            assert_eq!(custom.payload["meta"]["w"], 640);
            assert_eq!(custom.payload["_type"], "youtube");
        }
        other => panic!("expected custom block, got {other:?}"),
    }
}

#[test]
fn test_malformed_documents_fail_before_rendering() {
    let registry = FormatRegistry::default();
    for source in ["", "{", "null", "\"text\"", "[1, 2]"] {
        let result = registry.parse(source, "portable-text");
        assert!(
            matches!(result, Err(FormatError::ParseError(_))),
            "{source:?} should fail to parse"
        );
    }
}

#[test]
fn test_registry_converts_json_to_markdown() {
    let registry = FormatRegistry::default();
    let blocks = registry
        .parse(
            r#"[{"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Hi"}]}]"#,
            "portable-text",
        )
        .unwrap();
    assert_eq!(registry.serialize(&blocks, "markdown").unwrap(), "## Hi\n");
}
