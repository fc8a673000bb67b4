//! Distributed loads on elements

use serde::{Deserialize, Serialize};

/// Direction of a distributed load
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoadDirection {
    /// Element-local x direction (along the member)
    Axial,
    /// Element-local y direction (perpendicular to the member)
    Perpendicular,
    /// Global X direction
    GlobalX,
    /// Global Y direction
    GlobalY,
}

/// A linearly varying line load on an element
///
/// The intensity varies from `w0` at node 0 to `w1` at node 1 and is measured
/// per unit length of the member, whatever its direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Loaded element index
    pub element: usize,
    /// Intensity at node 0
    pub w0: f64,
    /// Intensity at node 1
    pub w1: f64,
    /// Load direction
    pub direction: LoadDirection,
}

impl DistributedLoad {
    /// Create a new distributed load
    pub fn new(element: usize, w0: f64, w1: f64, direction: LoadDirection) -> Self {
        Self {
            element,
            w0,
            w1,
            direction,
        }
    }

    /// Load perpendicular to the member (element-local reference plane)
    pub fn local(element: usize, w0: f64, w1: f64) -> Self {
        Self::new(element, w0, w1, LoadDirection::Perpendicular)
    }

    /// Load along global Y (global reference plane)
    pub fn global(element: usize, w0: f64, w1: f64) -> Self {
        Self::new(element, w0, w1, LoadDirection::GlobalY)
    }

    /// Create a uniform distributed load over the full member length
    pub fn uniform(element: usize, w: f64, direction: LoadDirection) -> Self {
        Self::new(element, w, w, direction)
    }

    /// Check if the load is uniform (constant magnitude)
    pub fn is_uniform(&self) -> bool {
        (self.w0 - self.w1).abs() < 1e-10
    }

    /// Check if this is a local coordinate load
    pub fn is_local(&self) -> bool {
        matches!(
            self.direction,
            LoadDirection::Axial | LoadDirection::Perpendicular
        )
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            w0: self.w0 * factor,
            w1: self.w1 * factor,
            ..*self
        }
    }

    /// Get the total force from this load over a member of the given length
    pub fn total_force(&self, length: f64) -> f64 {
        (self.w0 + self.w1) / 2.0 * length
    }

    /// Split into element-local intensities
    ///
    /// Returns `([a0, a1], [p0, p1])`: the axial and perpendicular intensities at
    /// each end, for an element with direction cosines `cos`, `sin`.
    pub fn local_components(&self, cos: f64, sin: f64) -> ([f64; 2], [f64; 2]) {
        let (axial, perpendicular) = match self.direction {
            LoadDirection::Axial => (1.0, 0.0),
            LoadDirection::Perpendicular => (0.0, 1.0),
            LoadDirection::GlobalX => (cos, -sin),
            LoadDirection::GlobalY => (sin, cos),
        };
        (
            [axial * self.w0, axial * self.w1],
            [perpendicular * self.w0, perpendicular * self.w1],
        )
    }
}
