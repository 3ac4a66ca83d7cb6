//! Domain layer: the document tree and its operations
//!
//! This layer is independent of external concerns (no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod mutate;
pub mod render;
pub mod tagger;
pub mod unwrap;

pub use arena::{DomTree, NodeData, TreeNode};
pub use builder::TreeBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use render::TreeNodeConvert;
pub use tagger::{split_occurrences, Segment};
