//! Lazy tree-expansion engine over linked AAS records.
//!
//! Nodes live in a flat arena addressed by [`NodeId`]; parent/child
//! relationships are index references, so the tree needs no cyclic object
//! graph. Child loading is a small per-node state machine
//! (`UNEXPANDED → LOADING → LOADED | ERROR`) driven by discrete completion
//! events, independent of any particular concurrency primitive.
//!
//! Expansion discovers and types children according to the parent record's
//! kind, propagating placement transforms and ownership down the hierarchy,
//! and fetching referenced shells and models through the loader on demand.

mod node;
mod tree;

pub use node::{ExpansionState, NodeId, TreeNode};
pub use tree::{ExpandError, Tree};
