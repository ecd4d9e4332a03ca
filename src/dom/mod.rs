//! Slotmap-backed DOM arena of mounted widget nodes.

pub mod node;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use tree::Dom;
