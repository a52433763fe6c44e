//! Session context.
//!
//! One [`Session`] spans one application run. It owns the only two pieces of
//! shared mutable state, the shell id allocator and the visualization
//! registry, so nothing in the explorer lives at module level and tests can
//! construct everything fresh.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use aas_explorer_loader::{LoadError, Loader, RecordFetcher, ShellIdAllocator};
use aas_explorer_tree::{NodeId, Tree};
use aas_explorer_viz::{VisualizationEngine, Visualizer};

use crate::config::ExplorerConfig;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown manufacturer: {name}")]
    UnknownManufacturer { name: String },

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Owns the loader, the visualizer, and the currently selected tree.
pub struct Session<F: RecordFetcher> {
    config: ExplorerConfig,
    loader: Loader<F>,
    visualizer: Visualizer,
    tree: Option<Tree>,
}

impl<F: RecordFetcher> Session<F> {
    /// Builds a session over `fetcher` against the config's base directory.
    /// Shell ids restart at zero with every session.
    pub fn new(config: ExplorerConfig, fetcher: F) -> Self {
        let loader = Loader::new(
            fetcher,
            config.base_dir.clone(),
            Arc::new(ShellIdAllocator::new()),
        );
        Self {
            config,
            loader,
            visualizer: Visualizer::new(),
            tree: None,
        }
    }

    /// Registers the 3d engine once its context is ready. The embedding
    /// layer typically follows up by selecting the first manufacturer.
    pub fn attach_engine(&mut self, engine: Arc<dyn VisualizationEngine>) {
        self.visualizer.attach_engine(engine);
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn loader(&self) -> &Loader<F> {
        &self.loader
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    pub fn tree_mut(&mut self) -> Option<&mut Tree> {
        self.tree.as_mut()
    }

    /// Selects a manufacturer: resets the 3d view, then loads the
    /// participant's root AAS into a fresh tree.
    ///
    /// Engine rejections during the reset are logged and never fail the
    /// selection. A root load failure leaves no tree installed; the caller
    /// renders the error state.
    pub async fn select_manufacturer(&mut self, name: &str) -> Result<&mut Tree, SessionError> {
        let manufacturer =
            self.config
                .manufacturer(name)
                .ok_or_else(|| SessionError::UnknownManufacturer {
                    name: name.to_string(),
                })?;
        let aas_path = manufacturer.aas_path.clone();

        self.reset_view().await;
        self.tree = None;

        let root = self.loader.load_aas(&aas_path).await.map_err(|err| {
            error!(name, %err, "root AAS load failed");
            SessionError::Load(err)
        })?;
        info!(name, id_short = %root.id_short, "selected manufacturer");
        Ok(self.tree.insert(Tree::with_root(root)))
    }

    /// Drives the child-load step for one node of the selected tree.
    pub async fn load_children(&mut self, id: NodeId) {
        let Some(tree) = self.tree.as_mut() else {
            return;
        };
        tree.load_children(id, &self.loader).await;
    }

    /// Shows or hides the 3d model behind a node, colored by its owner.
    pub async fn toggle_model(&mut self, id: NodeId) {
        let Some(tree) = self.tree.as_mut() else {
            return;
        };
        let owner = match tree.node(id) {
            Some(node) => node.owner.clone(),
            None => return,
        };
        let color = self.config.owner_color(&owner).to_string();
        tree.toggle_model(id, &mut self.visualizer, &color).await;
    }

    /// Clears the registry and the engine scene, and un-ghosts the view.
    /// Failures are logged and swallowed.
    async fn reset_view(&mut self) {
        self.visualizer.clear();
        let Some(engine) = self.visualizer.engine().cloned() else {
            return;
        };
        if let Err(err) = engine.clear().await {
            error!(%err, "scene clear rejected");
        }
        if let Err(err) = engine.set_ghosted(false).await {
            error!(%err, "ghosted reset rejected");
        }
    }
}
