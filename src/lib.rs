//! AAS Explorer: a navigable tree over linked supply-chain records with
//! optional projection into an external 3d viewer.
//!
//! A manufacturer selection yields a root AAS path; the loader resolves the
//! shell and its typed sub-records from cross-referenced JSON files; the tree
//! engine discovers and loads children on demand, propagating placement and
//! ownership down the hierarchy; per-node show/hide actions route through the
//! visualization registry to the external engine.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use aas_explorer::{ExplorerConfig, HttpFetcher, Session};
//!
//! # async fn run() {
//! let config = ExplorerConfig::from_env();
//! let mut session = Session::new(config, HttpFetcher::new());
//! let tree = session
//!     .select_manufacturer("Participant 1")
//!     .await
//!     .expect("root AAS should resolve");
//! let root = tree.root();
//! # }
//! ```

// Environment-driven configuration and the manufacturer catalog
pub mod config;

// Logging setup
pub mod logging;

// Session context - id allocator, loader, visualizer, selected tree
pub mod session;

// Re-exports for the explorer surface
pub use aas_explorer_loader::{
    FetchError, HttpFetcher, InProcessFetcher, LoadError, Loader, RecordFetcher, ShellIdAllocator,
    SubmodelKind,
};
pub use aas_explorer_tree::{ExpandError, ExpansionState, NodeId, Tree, TreeNode};
pub use aas_explorer_types::{
    Aas, Bom, Cad, ClassifyError, ModelData, Part, Record, RecordKind, Transform,
};
pub use aas_explorer_viz::{EngineError, InstanceId, VisualizationEngine, Visualizer};
pub use config::{ExplorerConfig, Manufacturer};
pub use session::{Session, SessionError};
