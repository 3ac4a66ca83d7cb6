//! Serialization back to the line format, and diagnostic tree display.

use std::fmt;
use std::io::{self, Write};

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::DomTree;

enum Step {
    Enter(Index),
    Exit(Index),
}

impl DomTree {
    /// Reconstruct the line-oriented document, one line per marker or text
    /// leaf, each followed by a newline.
    #[instrument(level = "debug", skip(self))]
    pub fn get_html(&self) -> String {
        let mut out = String::new();
        let mut steps: Vec<Step> = self.root().map(Step::Enter).into_iter().collect();

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(idx) => {
                    let Some(node) = self.get_node(idx) else {
                        continue;
                    };
                    if let Some(next) = node.next_sibling {
                        steps.push(Step::Enter(next));
                    }
                    // A childless root still needs its markers to be re-readable.
                    let is_root = self.root() == Some(idx);
                    match node.first_child {
                        None if !is_root => {
                            out.push_str(&node.data.label);
                            out.push('\n');
                        }
                        first => {
                            out.push('<');
                            out.push_str(&node.data.label);
                            out.push_str(">\n");
                            steps.push(Step::Exit(idx));
                            if let Some(child) = first {
                                steps.push(Step::Enter(child));
                            }
                        }
                    }
                }
                Step::Exit(idx) => {
                    out.push_str("</");
                    out.push_str(self.label(idx).unwrap_or_default());
                    out.push_str(">\n");
                }
            }
        }

        out
    }

    /// Write the diagnostic tree view to `writer`.
    pub fn print_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", self.to_tree_string())
    }

    /// Write the diagnostic tree view to stdout.
    pub fn print(&self) -> io::Result<()> {
        self.print_to(&mut io::stdout().lock())
    }
}

impl fmt::Display for DomTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_html())
    }
}

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for DomTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root_idx) = self.root() else {
            return Tree::new("(empty)".to_string());
        };

        // Children are converted before their parent, so walk post-order
        // keeping one pending list of finished subtrees per open node.
        let root_label = self.label(root_idx).unwrap_or_default().to_string();
        let mut open: Vec<(Index, Tree<String>)> = vec![(root_idx, Tree::new(root_label))];
        let mut pending: Vec<Option<Index>> = vec![self.first_child(root_idx)];

        while let Some(cursor) = pending.last_mut() {
            match *cursor {
                Some(idx) => {
                    *cursor = self.next_sibling(idx);
                    let label = self.label(idx).unwrap_or_default().to_string();
                    open.push((idx, Tree::new(label)));
                    pending.push(self.first_child(idx));
                }
                None => {
                    pending.pop();
                    let Some((_, finished)) = open.pop() else {
                        break;
                    };
                    match open.last_mut() {
                        Some((_, parent)) => {
                            parent.push(finished);
                        }
                        None => return finished,
                    }
                }
            }
        }

        Tree::new("(empty)".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TreeBuilder;

    #[test]
    fn test_to_tree_string_nests_children() {
        let tree = TreeBuilder::new()
            .build_from_str("<html>\n<p>\nhello\n</p>\nbye\n</html>")
            .unwrap();
        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "html");
        assert!(lines[1].ends_with("p"));
        assert!(lines[2].ends_with("hello"));
        assert!(lines[3].ends_with("bye"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_empty_tree_renders_placeholder() {
        let tree = DomTree::new();
        assert_eq!(tree.get_html(), "");
        assert_eq!(tree.to_tree_string().to_string().trim_end(), "(empty)");
    }

    #[test]
    fn test_print_to_writer() {
        let tree = TreeBuilder::new()
            .build_from_str("<b>\nbold\n</b>")
            .unwrap();
        let mut buf = Vec::new();
        tree.print_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("b\n"));
        assert!(text.contains("bold"));
    }
}
