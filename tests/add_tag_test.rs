//! Tests for add_tag

use rstest::rstest;

use domtree::domain::{DomTree, WrapTag};
use domtree::util::testing::{init_test_setup, tree_from};

fn child_labels(tree: &DomTree, parent_label: &str) -> Vec<String> {
    let (parent, _) = tree
        .iter()
        .find(|(_, node)| !node.is_leaf() && node.data.label == parent_label)
        .expect("parent present");
    tree.children(parent)
        .map(|c| tree.label(c).unwrap().to_string())
        .collect()
}

#[test]
fn given_word_inside_longer_words_when_tagging_then_only_free_standing_occurrence_is_wrapped() {
    // Arrange
    init_test_setup();
    let mut tree = tree_from("<p>\nThe cats concatenate cat.\n</p>");

    // Act
    tree.add_tag("cat", "em");

    // Assert
    assert_eq!(
        tree.get_html(),
        "<p>\nThe cats concatenate \n<em>\ncat.\n</em>\n</p>\n"
    );
}

#[test]
fn given_capitalized_word_when_tagging_lowercase_then_original_case_is_kept() {
    let mut tree = tree_from("<p>\nThe cat sat.\n</p>");

    tree.add_tag("the", "em");

    assert_eq!(child_labels(&tree, "p"), vec!["em", " cat sat."]);
    assert_eq!(tree.leaf_texts(), vec!["The", " cat sat."]);
}

#[test]
fn given_text_followed_by_siblings_when_tagging_then_rest_of_chain_is_relinked() {
    let mut tree = tree_from("<p>\na cat here\n<b>\nstay\n</b>\nlast\n</p>");

    tree.add_tag("cat", "b");

    assert_eq!(
        child_labels(&tree, "p"),
        vec!["a ", "b", " here", "b", "last"]
    );
    assert_eq!(
        tree.get_html(),
        "<p>\na \n<b>\ncat\n</b>\n here\n<b>\nstay\n</b>\nlast\n</p>\n"
    );
}

#[test]
fn given_text_after_an_element_when_tagging_then_sibling_text_is_processed() {
    let mut tree = tree_from("<p>\n<em>\nfirst\n</em>\nthen the dog!\n</p>");

    tree.add_tag("dog", "em");

    assert_eq!(child_labels(&tree, "p"), vec!["em", "then the ", "em"]);
    assert_eq!(
        tree.leaf_texts(),
        vec!["first", "then the ", "dog!"]
    );
}

#[test]
fn given_deeply_nested_text_when_tagging_then_it_is_found() {
    let mut tree = tree_from(
        "<html>\n<body>\n<div>\n<ul>\n<li>\nrust is fun, rust\n</li>\n</ul>\n</div>\n</body>\n</html>",
    );

    tree.add_tag_kind("Rust", WrapTag::B);

    assert_eq!(tree.count_label("b"), 2);
    assert_eq!(child_labels(&tree, "li"), vec!["b", " is fun, ", "b"]);
    assert_eq!(tree.leaf_texts(), vec!["rust", " is fun, ", "rust"]);
}

#[test]
fn given_repeated_tagging_when_word_already_wrapped_then_new_leaves_are_not_rescanned() {
    let mut tree = tree_from("<p>\ncat\n</p>");

    tree.add_tag("cat", "em");
    assert_eq!(tree.get_html(), "<p>\n<em>\ncat\n</em>\n</p>\n");

    // A second call wraps the existing leaf once more, nothing loops
    tree.add_tag("cat", "em");
    assert_eq!(tree.count_label("em"), 2);
    assert_eq!(tree.leaf_texts(), vec!["cat"]);
}

#[test]
fn given_no_occurrence_when_tagging_then_tree_unchanged() {
    let mut tree = tree_from("<p>\nconcatenate bobcat\n</p>");
    let before = tree.get_html();
    let nodes = tree.len();

    tree.add_tag("cat", "em");

    assert_eq!(tree.get_html(), before);
    assert_eq!(tree.len(), nodes);
}

#[rstest]
#[case("", "em")]
#[case("cat", "")]
#[case("cat", "p")]
#[case("cat", "strong")]
fn given_rejected_arguments_when_tagging_then_noop(#[case] word: &str, #[case] tag: &str) {
    let mut tree = tree_from("<p>\nthe cat\n</p>");
    let before = tree.get_html();
    tree.add_tag(word, tag);
    assert_eq!(tree.get_html(), before);
}

#[test]
fn given_empty_tree_when_tagging_then_noop() {
    let mut tree = DomTree::new();
    tree.add_tag("cat", "em");
    assert!(tree.is_empty());
}

#[test]
fn given_tagged_tree_when_rebuilding_from_html_then_shape_is_stable() {
    let mut tree = tree_from("<p>\nHello world, hello!\n</p>");
    tree.add_tag("hello", "b");

    let html = tree.get_html();
    let rebuilt = tree_from(&html);

    assert_eq!(rebuilt.get_html(), html);
    assert_eq!(rebuilt.count_label("b"), 2);
}
