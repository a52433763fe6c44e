//! Visualization boundary of the AAS explorer.
//!
//! The external 3d engine owns the actual scene graph and camera; the
//! explorer consumes it only through the [`VisualizationEngine`] trait.
//! [`Visualizer`] keeps the registry of which tree node currently has a model
//! instantiated, guaranteeing at most one live engine instance per node.

mod registry;

use async_trait::async_trait;
use thiserror::Error;

use aas_explorer_types::Transform;

pub use registry::Visualizer;

/// Identifier of one instantiated model inside the external engine.
///
/// Engine instance ids may be reused across sessions; the registry therefore
/// never keys anything by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u32);

/// Rejection of an engine command. Never propagated past the registry or the
/// session reset action; always swallowed with a logged error.
#[derive(Debug, Error)]
#[error("engine rejected {command}: {message}")]
pub struct EngineError {
    pub command: &'static str,
    pub message: String,
}

/// Narrow command surface of the external 3d visualization engine.
///
/// All commands are asynchronous and may reject.
#[async_trait]
pub trait VisualizationEngine: Send + Sync {
    /// Instantiates geometry from a model URI and returns the instance id.
    async fn instantiate(&self, model_uri: &str) -> Result<InstanceId, EngineError>;

    /// Applies `transform` as the instance's local placement.
    async fn set_local_transform(
        &self,
        instance: InstanceId,
        transform: Transform,
    ) -> Result<(), EngineError>;

    /// Applies an appearance key (a hex color without the leading `#`).
    async fn set_appearance(&self, instance: InstanceId, appearance: &str)
        -> Result<(), EngineError>;

    /// Removes one instance from the scene.
    async fn remove(&self, instance: InstanceId) -> Result<(), EngineError>;

    /// Clears the whole scene.
    async fn clear(&self) -> Result<(), EngineError>;

    /// Sets the engine-global ghosted flag.
    async fn set_ghosted(&self, enabled: bool) -> Result<(), EngineError>;
}
