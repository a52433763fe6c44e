//! Tree node data.

use aas_explorer_types::{Record, Transform};

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Child-loading state machine of one node.
///
/// `Unexpanded → Loading` fires exactly once per node lifetime, when child
/// loading is first requested on a non-leaf node. `Loaded` and `Error` are
/// terminal; collapsing the node prunes its children and starts a fresh
/// lifetime, which is also the retry path after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionState {
    /// Children not yet requested. Leaf records skip this state entirely.
    Unexpanded,
    /// A child load is in flight. A stalled fetch keeps the node here
    /// indefinitely; there are no timeouts and no cancellation.
    Loading,
    /// All children resolved.
    Loaded,
    /// A child load failed; whatever children were already appended stay.
    Error,
}

/// One node of the explorer tree.
#[derive(Debug)]
pub struct TreeNode {
    pub record: Record,
    /// 0 at the root, +1 per level.
    pub depth: u32,
    pub parent: Option<NodeId>,
    /// Stable key for the visualization registry: parent path id + local
    /// segment + `/`. Computed once at construction, never recomputed.
    pub path_id: String,
    /// Local placement relative to the parent. Handed to the engine as-is,
    /// never pre-multiplied with ancestor transforms.
    pub transform: Transform,
    /// Manufacturer part id of the owning participant.
    pub owner: String,
    /// Whether the node's children are currently visible.
    pub expanded: bool,
    /// Whether the node's 3d model is currently shown in the engine.
    pub shows_model: bool,
    pub state: ExpansionState,
    pub children: Vec<NodeId>,
}
