//! Placement transform for CAD child items.

use serde::{Deserialize, Serialize};

/// Column-major 4x4 placement matrix.
///
/// Each CAD child carries its placement relative to its direct parent. The
/// matrix is handed to the visualization engine as the instance's local
/// transform as-is; it is never pre-multiplied with ancestor transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transform(pub [f32; 16]);

impl Transform {
    pub const IDENTITY: Transform = Transform([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
