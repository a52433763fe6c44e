//! The node arena and the expansion algorithm.

use thiserror::Error;
use tracing::error;

use aas_explorer_loader::{LoadError, Loader, RecordFetcher};
use aas_explorer_types::{Aas, Record, Transform};
use aas_explorer_viz::Visualizer;

use crate::node::{ExpansionState, NodeId, TreeNode};

/// Failure while expanding one node's children.
///
/// Never escapes [`Tree::load_children`]; it is logged there and degrades the
/// node to [`ExpansionState::Error`] without touching sibling nodes.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// A BOM/CAD child item without a `catenaXId` cannot be resolved. The
    /// expansion aborts at this item; earlier siblings stay, later ones are
    /// never loaded.
    #[error("child item {index} has no catenaXId")]
    MissingReference { index: usize },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("node is no longer part of the tree")]
    NodeGone,
}

/// Arena-backed explorer tree rooted at one participant's shell.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Option<TreeNode>>,
    root: NodeId,
}

impl Tree {
    /// Builds a tree with `root` at depth 0 under the parent path `/`, owned
    /// by the shell's own manufacturer.
    pub fn with_root(root: Aas) -> Tree {
        let owner = root.owner().to_string();
        let mut tree = Tree {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.insert(None, "/", 0, Record::Aas(root), Transform::IDENTITY, owner);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(
        &mut self,
        parent: Option<NodeId>,
        parent_path_id: &str,
        depth: u32,
        record: Record,
        transform: Transform,
        owner: String,
    ) -> NodeId {
        let path_id = format!("{}{}/", parent_path_id, record.local_segment());
        // Leaves reach their terminal state immediately, with zero children.
        let state = if record.is_leaf() {
            ExpansionState::Loaded
        } else {
            ExpansionState::Unexpanded
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(TreeNode {
            record,
            depth,
            parent,
            path_id,
            transform,
            owner,
            expanded: false,
            shows_model: false,
            state,
            children: Vec::new(),
        }));
        if let Some(parent) = parent {
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.children.push(id);
            }
        }
        id
    }

    /// Drives the child-load step for `id`.
    ///
    /// Fires the `Unexpanded → Loading` transition exactly once; calls on a
    /// node in any other state are no-ops, so a renderer may invoke this on
    /// every pass. A failure is logged and leaves the node in the terminal
    /// `Error` state with whatever children were already appended; it does
    /// not propagate, roll back siblings, or disturb the rest of the tree.
    pub async fn load_children<F: RecordFetcher>(&mut self, id: NodeId, loader: &Loader<F>) {
        match self.node_mut(id) {
            Some(node) if node.state == ExpansionState::Unexpanded => {
                node.state = ExpansionState::Loading;
            }
            _ => return,
        }

        match self.expand(id, loader).await {
            Ok(()) => {
                if let Some(node) = self.node_mut(id) {
                    node.state = ExpansionState::Loaded;
                }
            }
            Err(err) => {
                let path_id = self.node(id).map(|node| node.path_id.clone()).unwrap_or_default();
                error!(%path_id, %err, "child expansion failed");
                if let Some(node) = self.node_mut(id) {
                    node.state = ExpansionState::Error;
                }
            }
        }
    }

    /// Appends `id`'s children according to its record kind. Children are
    /// appended one by one, in source-item order, each as soon as its own
    /// load resolves.
    async fn expand<F: RecordFetcher>(
        &mut self,
        id: NodeId,
        loader: &Loader<F>,
    ) -> Result<(), ExpandError> {
        let (record, depth, path_id, owner) = {
            let node = self.node(id).ok_or(ExpandError::NodeGone)?;
            (
                node.record.clone(),
                node.depth,
                node.path_id.clone(),
                node.owner.clone(),
            )
        };

        match record {
            // The shell's submodels were already resolved by the loader; its
            // children are exactly [part, cad, bom?], owned by the shell's
            // manufacturer.
            Record::Aas(aas) => {
                let owner = aas.owner().to_string();
                let Aas { part, cad, bom, .. } = aas;
                self.insert(
                    Some(id),
                    &path_id,
                    depth + 1,
                    Record::Part(part),
                    Transform::IDENTITY,
                    owner.clone(),
                );
                self.insert(
                    Some(id),
                    &path_id,
                    depth + 1,
                    Record::Cad(cad),
                    Transform::IDENTITY,
                    owner.clone(),
                );
                if let Some(bom) = bom {
                    self.insert(
                        Some(id),
                        &path_id,
                        depth + 1,
                        Record::Bom(bom),
                        Transform::IDENTITY,
                        owner,
                    );
                }
                Ok(())
            }

            Record::Bom(bom) => {
                for (index, item) in bom.child_items.iter().enumerate() {
                    let child_ref = item
                        .catena_x_id
                        .as_deref()
                        .ok_or(ExpandError::MissingReference { index })?;
                    let child = loader.load_aas(&format!("{child_ref}.json")).await?;
                    let child_owner = child.owner().to_string();
                    self.insert(
                        Some(id),
                        &path_id,
                        depth + 1,
                        Record::Aas(child),
                        Transform::IDENTITY,
                        child_owner,
                    );
                }
                Ok(())
            }

            Record::Cad(cad) => {
                for (index, item) in cad.child_items.iter().enumerate() {
                    let child_ref = item
                        .catena_x_id
                        .as_deref()
                        .ok_or(ExpandError::MissingReference { index })?;
                    let transform = item.transformation.unwrap_or(Transform::IDENTITY);
                    if child_ref.starts_with("AAS") {
                        let mut child = loader.load_aas(&format!("{child_ref}.json")).await?;
                        if depth > 1 {
                            // Deep re-entrant shells are locked: visible, but
                            // detail and expansion suppressed.
                            child.access = false;
                        }
                        let child_owner = child.owner().to_string();
                        self.insert(
                            Some(id),
                            &path_id,
                            depth + 1,
                            Record::Aas(child),
                            transform,
                            child_owner,
                        );
                    } else {
                        let child = loader.load_model(&format!("{child_ref}.json")).await?;
                        self.insert(
                            Some(id),
                            &path_id,
                            depth + 1,
                            Record::Model(child),
                            transform,
                            owner.clone(),
                        );
                    }
                }
                Ok(())
            }

            Record::Part(_) | Record::Model(_) => Ok(()),
        }
    }

    /// Toggles child visibility.
    ///
    /// Expanding a locked shell (`access = false`) is refused. Collapsing
    /// prunes the child subtree from the arena and resets the node to
    /// `Unexpanded`, so a later re-expansion reloads the children (the
    /// manual retry path after a failed load). Registry entries are keyed by
    /// path id, not node index, so shown models survive a collapse.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        let Some(node) = self.node(id) else {
            return;
        };
        if let Record::Aas(aas) = &node.record {
            if !aas.access && expanded {
                return;
            }
        }
        if node.expanded == expanded {
            return;
        }

        if expanded {
            if let Some(node) = self.node_mut(id) {
                node.expanded = true;
            }
        } else {
            self.prune_children(id);
            if let Some(node) = self.node_mut(id) {
                node.expanded = false;
                if !node.record.is_leaf() {
                    node.state = ExpansionState::Unexpanded;
                }
            }
        }
    }

    /// Shows or hides the 3d model behind `id`, colored by its owner.
    ///
    /// Only model nodes carry a 3d payload; for every other kind this is a
    /// no-op. The node's local transform is handed to the engine unchanged.
    pub async fn toggle_model(&mut self, id: NodeId, visualizer: &mut Visualizer, owner_color: &str) {
        let Some(node) = self.node(id) else {
            return;
        };
        let Record::Model(model) = &node.record else {
            return;
        };
        let path_id = node.path_id.clone();
        let file = model.file.clone();
        let transform = node.transform;
        let shown = node.shows_model;

        if shown {
            visualizer.hide(&path_id).await;
        } else {
            visualizer.show(&path_id, &file, transform, owner_color).await;
        }
        if let Some(node) = self.node_mut(id) {
            node.shows_model = !shown;
        }
    }

    fn prune_children(&mut self, id: NodeId) {
        let children = match self.node_mut(id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            self.remove_subtree(child);
        }
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let Some(slot) = self.nodes.get_mut(id.0) else {
            return;
        };
        if let Some(node) = slot.take() {
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }
}
