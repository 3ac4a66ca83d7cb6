//! Tag renaming and table row bolding.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::DomTree;
use crate::domain::entities::{BOLD, CELL, ROW, TABLE};
use crate::domain::error::{DomainError, DomainResult};

impl DomTree {
    /// Rename every node labeled `old` to `new`.
    #[instrument(level = "debug", skip(self))]
    pub fn replace_tag(&mut self, old: &str, new: &str) -> DomainResult<()> {
        if old.is_empty() || new.is_empty() {
            return Err(DomainError::InvalidArgument(
                "replace_tag needs a non-empty old and new tag".to_string(),
            ));
        }

        let matches: Vec<Index> = self
            .iter()
            .filter(|(_, node)| node.data.label == old)
            .map(|(idx, _)| idx)
            .collect();

        for &idx in &matches {
            if let Some(node) = self.get_node_mut(idx) {
                node.data.label = new.to_string();
            }
        }
        debug!(renamed = matches.len(), "replaced tags");
        Ok(())
    }

    /// Bold every cell of the `row`-th row (1-based) of every table.
    ///
    /// Each `td` of that row gets a `b` container as its sole child, which in
    /// turn takes over the cell's previous children. Tables with fewer rows
    /// are left as they are.
    #[instrument(level = "debug", skip(self))]
    pub fn bold_row(&mut self, row: usize) -> DomainResult<()> {
        if row == 0 {
            return Err(DomainError::InvalidArgument(
                "rows are numbered from 1".to_string(),
            ));
        }

        let tables: Vec<Index> = self
            .iter()
            .filter(|(_, node)| !node.is_leaf() && node.data.label == TABLE)
            .map(|(idx, _)| idx)
            .collect();

        for table in tables {
            match self.nth_row(table, row) {
                Some(tr) => self.bold_cells(tr),
                None => trace!(?table, row, "table has no such row"),
            }
        }
        Ok(())
    }

    fn nth_row(&self, table: Index, row: usize) -> Option<Index> {
        self.children(table)
            .filter(|&child| !self.is_leaf(child) && self.label(child) == Some(ROW))
            .nth(row - 1)
    }

    fn bold_cells(&mut self, tr: Index) {
        let cells: Vec<Index> = self
            .children(tr)
            .filter(|&child| !self.is_leaf(child) && self.label(child) == Some(CELL))
            .collect();

        for td in cells {
            let bold = self.alloc(BOLD);
            let contents = self.first_child(td);
            if let Some(node) = self.get_node_mut(bold) {
                node.first_child = contents;
            }
            if let Some(node) = self.get_node_mut(td) {
                node.first_child = Some(bold);
            }
            debug!(?td, "bolded cell");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::TreeBuilder;

    #[test]
    fn test_replace_tag_rejects_empty_names() {
        let mut tree = TreeBuilder::new()
            .build_from_str("<html>\n<p>\nhi\n</p>\n</html>")
            .unwrap();
        assert!(tree.replace_tag("", "div").is_err());
        assert!(tree.replace_tag("p", "").is_err());
        assert_eq!(tree.count_label("p"), 1);
    }

    #[test]
    fn test_bold_row_rejects_row_zero() {
        let mut tree = TreeBuilder::new()
            .build_from_str("<table>\n<tr>\n<td>\nx\n</td>\n</tr>\n</table>")
            .unwrap();
        assert!(tree.bold_row(0).is_err());
        assert_eq!(tree.count_label("b"), 0);
    }
}
