//! Compressed constituent tree
//!
//! The tree is an arena: nodes live in a flat store addressed by [`NodeId`].
//! Parent links, trace targets and reconstruction sites are plain ids, so no
//! node ever owns another through a back-reference.

pub mod arena;
pub mod bracket;
pub mod node;
pub mod relations;

pub use arena::Tree;
pub use bracket::{parse_bracketed, ParsedTree};
pub use node::{Node, NodeId};
pub use relations::{LOCAL_DOMAIN_LABELS, RESTRICTOR_BARRIER_LABELS, RESTRICTOR_LABELS};
