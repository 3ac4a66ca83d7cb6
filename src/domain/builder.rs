//! Tree builder for turning line-oriented markup into a `DomTree`.

use std::io::BufRead;

use generational_arena::Index;
use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::domain::arena::DomTree;
use crate::domain::entities::Line;
use crate::domain::error::{DomainError, DomainResult};

/// Constructs a document tree from a stream of marker and text lines.
pub struct TreeBuilder {
    marker_regex: Regex,
    strict: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Strict builder: closing markers must match the open tag and every tag
    /// must be closed by the end of input.
    pub fn new() -> Self {
        Self {
            marker_regex: Regex::new(r"^<(/?)([^<>/]+)>$").expect("marker regex is valid"),
            strict: true,
        }
    }

    /// Builder that trusts closing markers blindly and accepts unclosed tags.
    pub fn lenient() -> Self {
        Self::new().with_strict(false)
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Classify a raw input line.
    pub fn classify(&self, raw: &str) -> Line {
        match self.marker_regex.captures(raw) {
            Some(caps) => {
                let name = caps[2].to_string();
                if caps[1].is_empty() {
                    Line::Open(name)
                } else {
                    Line::Close(name)
                }
            }
            None => Line::Text(raw.to_string()),
        }
    }

    pub fn build_from_str(&self, input: &str) -> DomainResult<DomTree> {
        self.build_from_lines(input.lines())
    }

    /// Build while reading; a read error stops the build at that line.
    pub fn build_from_reader<R: BufRead>(&self, reader: R) -> DomainResult<DomTree> {
        self.build(reader.lines().map(|line| line.map_err(DomainError::from)))
    }

    /// Build the tree; an empty sequence yields an empty tree.
    pub fn build_from_lines<I, S>(&self, lines: I) -> DomainResult<DomTree>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.build(lines.into_iter().map(Ok))
    }

    #[instrument(level = "debug", skip(self, lines), fields(strict = self.strict))]
    fn build<I, S>(&self, lines: I) -> DomainResult<DomTree>
    where
        I: IntoIterator<Item = DomainResult<S>>,
        S: AsRef<str>,
    {
        let mut tree = DomTree::new();
        let mut stack: Vec<Index> = Vec::new();

        for (line_no, raw) in lines.into_iter().enumerate() {
            let line_no = line_no + 1;
            let raw = raw?;
            let raw = raw.as_ref();
            if raw.is_empty() {
                continue;
            }
            let line = self.classify(raw);
            trace!(line_no, ?line, "classified");

            if tree.root().is_none() {
                match line {
                    Line::Open(name) => {
                        let root = tree.insert_root(name);
                        stack.push(root);
                        continue;
                    }
                    _ => {
                        return Err(DomainError::MissingRootMarker {
                            line: line_no,
                            content: raw.to_string(),
                        })
                    }
                }
            }

            match line {
                Line::Open(name) => {
                    let parent = Self::open_parent(&stack, line_no, raw)?;
                    let idx = tree.alloc(name);
                    tree.append_child(parent, idx);
                    stack.push(idx);
                }
                Line::Close(name) => {
                    let open = stack.pop().ok_or_else(|| DomainError::StackUnderflow {
                        line: line_no,
                        name: name.clone(),
                    })?;
                    let open_name = tree.label(open).unwrap_or_default();
                    if self.strict && open_name != name {
                        return Err(DomainError::MismatchedClose {
                            line: line_no,
                            expected: open_name.to_string(),
                            found: name,
                        });
                    }
                }
                Line::Text(text) => {
                    let parent = Self::open_parent(&stack, line_no, raw)?;
                    let idx = tree.alloc(text);
                    tree.append_child(parent, idx);
                }
            }
        }

        if let Some(&open) = stack.last() {
            let name = tree.label(open).unwrap_or_default().to_string();
            if self.strict {
                return Err(DomainError::UnclosedTag { name });
            }
            debug!(%name, depth = stack.len(), "input ended with open tags");
        }

        debug!(nodes = tree.len(), depth = tree.depth(), "built tree");
        Ok(tree)
    }

    /// Innermost open tag; once the root is closed nothing may follow.
    fn open_parent(stack: &[Index], line_no: usize, raw: &str) -> DomainResult<Index> {
        stack
            .last()
            .copied()
            .ok_or_else(|| DomainError::ContentAfterRoot {
                line: line_no,
                content: raw.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_lines() {
        let builder = TreeBuilder::new();
        assert_eq!(builder.classify("<html>"), Line::Open("html".into()));
        assert_eq!(builder.classify("</td>"), Line::Close("td".into()));
        assert_eq!(builder.classify("Hello <b>"), Line::Text("Hello <b>".into()));
        assert_eq!(builder.classify("<3 rust"), Line::Text("<3 rust".into()));
        assert_eq!(builder.classify("<>"), Line::Text("<>".into()));
    }

    #[test]
    fn test_builder_modes() {
        assert!(TreeBuilder::new().is_strict());
        assert!(!TreeBuilder::lenient().is_strict());
        assert!(TreeBuilder::lenient().with_strict(true).is_strict());
    }
}
