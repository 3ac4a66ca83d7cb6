//! Tests for TreeBuilder

use rstest::rstest;

use domtree::domain::{DomainError, TreeBuilder};
use domtree::util::testing::init_test_setup;

const DOC: &str = "<html>
<body>
<p>
Hello
<b>
world
</b>
again
</p>
</body>
</html>";

#[test]
fn given_well_formed_lines_when_building_then_creates_child_sibling_structure() {
    // Arrange
    init_test_setup();

    // Act
    let tree = TreeBuilder::new().build_from_str(DOC).unwrap();

    // Assert
    let root = tree.root().expect("root");
    assert_eq!(tree.label(root), Some("html"));
    let body = tree.first_child(root).unwrap();
    assert_eq!(tree.label(body), Some("body"));
    assert_eq!(tree.next_sibling(body), None);

    let p = tree.first_child(body).unwrap();
    let children: Vec<_> = tree
        .children(p)
        .map(|c| tree.label(c).unwrap().to_string())
        .collect();
    assert_eq!(children, vec!["Hello", "b", "again"]);
    assert_eq!(tree.depth(), 5);
    assert_eq!(tree.leaf_texts(), vec!["Hello", "world", "again"]);
}

#[test]
fn given_empty_input_when_building_then_returns_empty_tree() {
    let tree = TreeBuilder::new()
        .build_from_lines(Vec::<String>::new())
        .unwrap();
    assert!(tree.is_empty());
    assert!(tree.root().is_none());
}

#[test]
fn given_reader_when_building_then_matches_str_build() {
    let from_reader = TreeBuilder::new()
        .build_from_reader(std::io::Cursor::new(DOC.as_bytes()))
        .unwrap();
    assert_eq!(from_reader.get_html(), format!("{DOC}\n"));
}

#[test]
fn given_reader_with_bad_bytes_when_building_then_returns_io_error() {
    let bytes: &[u8] = b"<html>\nok\n\xff\xfe\n</html>\n";
    let result = TreeBuilder::new().build_from_reader(bytes);
    assert!(matches!(result, Err(DomainError::Io(_))));
}

#[test]
fn given_reader_when_structure_fails_before_bad_bytes_then_stops_reading() {
    // Lines are consumed one at a time, so the structural error wins
    let bytes: &[u8] = b"no marker\n\xff\xfe\n";
    let result = TreeBuilder::new().build_from_reader(bytes);
    assert!(matches!(
        result,
        Err(DomainError::MissingRootMarker { line: 1, .. })
    ));
}

#[test]
fn given_mismatched_close_when_building_strict_then_errors() {
    let result = TreeBuilder::new().build_from_str("<html>\n<p>\nx\n</b>\n</html>");

    match result {
        Err(DomainError::MismatchedClose {
            line,
            expected,
            found,
        }) => {
            assert_eq!(line, 4);
            assert_eq!(expected, "p");
            assert_eq!(found, "b");
        }
        other => panic!("expected MismatchedClose, got {other:?}"),
    }
}

#[test]
fn given_mismatched_close_when_building_lenient_then_pops_anyway() {
    let tree = TreeBuilder::lenient()
        .build_from_str("<html>\n<p>\nx\n</b>\ny\n</html>")
        .unwrap();

    let root = tree.root().unwrap();
    let labels: Vec<_> = tree
        .children(root)
        .map(|c| tree.label(c).unwrap())
        .collect();
    assert_eq!(labels, vec!["p", "y"]);
}

#[test]
fn given_extra_close_when_building_then_reports_underflow() {
    let result = TreeBuilder::new().build_from_str("<html>\n</html>\n</html>");
    assert!(matches!(
        result,
        Err(DomainError::StackUnderflow { line: 3, .. })
    ));
}

#[test]
fn given_extra_close_when_building_lenient_then_still_underflows() {
    let result = TreeBuilder::lenient().build_from_str("<html>\n</html>\n</div>");
    assert!(matches!(result, Err(DomainError::StackUnderflow { .. })));
}

#[rstest]
#[case("plain text first\n<html>\n</html>")]
#[case("</html>")]
fn given_first_line_not_opening_marker_when_building_then_errors(#[case] doc: &str) {
    let result = TreeBuilder::new().build_from_str(doc);
    assert!(matches!(
        result,
        Err(DomainError::MissingRootMarker { line: 1, .. })
    ));
}

#[rstest]
#[case("<html>\n</html>\n<p>")]
#[case("<html>\n</html>\ntrailing")]
fn given_content_after_root_when_building_then_errors(#[case] doc: &str) {
    let result = TreeBuilder::new().build_from_str(doc);
    assert!(matches!(
        result,
        Err(DomainError::ContentAfterRoot { line: 3, .. })
    ));
}

#[test]
fn given_unclosed_tag_when_building_strict_then_errors() {
    let result = TreeBuilder::new().build_from_str("<html>\n<p>\ntext\n</p>");
    match result {
        Err(DomainError::UnclosedTag { name }) => assert_eq!(name, "html"),
        other => panic!("expected UnclosedTag, got {other:?}"),
    }
}

#[test]
fn given_unclosed_tag_when_building_lenient_then_keeps_partial_tree() {
    let tree = TreeBuilder::lenient()
        .build_from_str("<html>\n<p>\ntext")
        .unwrap();
    assert_eq!(tree.get_html(), "<html>\n<p>\ntext\n</p>\n</html>\n");
}

#[test]
fn given_blank_lines_when_building_then_skips_them() {
    let tree = TreeBuilder::new()
        .build_from_str("<html>\n\nhello\n\n</html>\n")
        .unwrap();
    assert_eq!(tree.leaf_texts(), vec!["hello"]);
}

#[test]
fn given_text_with_angle_brackets_when_building_then_keeps_it_verbatim() {
    let tree = TreeBuilder::new()
        .build_from_str("<p>\na <b> inside text\n<3\n</p>")
        .unwrap();
    assert_eq!(tree.leaf_texts(), vec!["a <b> inside text", "<3"]);
}
