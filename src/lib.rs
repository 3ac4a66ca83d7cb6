//! domtree: an in-memory DOM tree for line-oriented markup.
//!
//! Documents are built from lines that are each an opening marker `<name>`,
//! a closing marker `</name>`, or text. The resulting [`DomTree`] supports
//! tag renaming, table row bolding, tag unwrapping and word tagging, and
//! serializes back to the same line format.
//!
//! ```ignore
//! let mut tree = TreeBuilder::new().build_from_str("<p>\nThe cat sat.\n</p>")?;
//! tree.add_tag("cat", "em");
//! assert_eq!(tree.get_html(), "<p>\nThe \n<em>\ncat\n</em>\n sat.\n</p>\n");
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{DomTree, DomainError, DomainResult, TreeBuilder};
