//! Tag removal: unwrap matching containers in place.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::DomTree;
use crate::domain::entities::{RemovableTag, PARAGRAPH};

impl DomTree {
    /// Remove every `p`, `em`, `b`, `ol` or `ul` container, splicing its
    /// children into its place. Unsupported tags are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_tag(&mut self, tag: &str) {
        match RemovableTag::parse(tag) {
            Some(kind) => self.remove_tag_kind(kind),
            None => debug!(tag, "tag cannot be removed, ignoring"),
        }
    }

    /// Unwrap every container labeled `tag`.
    ///
    /// Children of an unwrapped list become paragraphs (one level only). The
    /// scan resumes at the first spliced-in child, so nested and adjacent
    /// occurrences all go in a single call. The root is never unwrapped.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_tag_kind(&mut self, tag: RemovableTag) {
        let Some(root) = self.root() else {
            return;
        };
        let label = tag.as_str();
        let mut removed = 0usize;
        let mut parents = vec![root];

        while let Some(parent) = parents.pop() {
            let mut containers = Vec::new();
            let mut prev: Option<Index> = None;
            let mut cursor = self.first_child(parent);

            while let Some(child) = cursor {
                if self.is_leaf(child) {
                    prev = Some(child);
                    cursor = self.next_sibling(child);
                    continue;
                }
                if self.label(child) == Some(label) {
                    if tag.coerces_children() {
                        self.coerce_children(child);
                    }
                    let head = self.first_child(child);
                    cursor = self.splice(parent, prev, child, head);
                    removed += 1;
                    continue;
                }
                containers.push(child);
                prev = Some(child);
                cursor = self.next_sibling(child);
            }

            // Reverse so the leftmost subtree is processed first
            parents.extend(containers.into_iter().rev());
        }

        debug!(%tag, removed, "removed tags");
    }

    fn coerce_children(&mut self, list: Index) {
        let items: Vec<Index> = self
            .children(list)
            .filter(|&item| !self.is_leaf(item))
            .collect();
        for item in items {
            if let Some(node) = self.get_node_mut(item) {
                node.data.label = PARAGRAPH.to_string();
            }
        }
    }
}
