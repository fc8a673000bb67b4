//! Nodal loads - forces and moments applied directly to nodes

use serde::{Deserialize, Serialize};

/// A load applied directly to a node, in global coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodalLoad {
    /// Loaded node index
    pub node: usize,
    /// Force in X direction (N)
    pub fx: f64,
    /// Force in Y direction (N)
    pub fy: f64,
    /// Moment about the out-of-plane axis (N·m), counter-clockwise positive
    pub m: f64,
}

impl NodalLoad {
    /// Create a new nodal load with all components
    pub fn new(node: usize, fx: f64, fy: f64, m: f64) -> Self {
        Self { node, fx, fy, m }
    }

    /// Create a force-only nodal load
    pub fn force(node: usize, fx: f64, fy: f64) -> Self {
        Self::new(node, fx, fy, 0.0)
    }

    /// Create a moment-only nodal load
    pub fn moment(node: usize, m: f64) -> Self {
        Self::new(node, 0.0, 0.0, m)
    }

    /// Get the load as an array [FX, FY, M]
    pub fn as_array(&self) -> [f64; 3] {
        [self.fx, self.fy, self.m]
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            node: self.node,
            fx: self.fx * factor,
            fy: self.fy * factor,
            m: self.m * factor,
        }
    }
}
