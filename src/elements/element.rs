//! Element - 2D frame element (beam-column)

use serde::Serialize;

use super::{Material, Node, Section};
use crate::error::{FrameError, FrameResult};
use crate::math::{self, Mat6, DOF_PER_NODE};

/// Coincident-node threshold for element lengths
const MIN_LENGTH: f64 = 1e-10;

/// A 2D frame member connecting two nodes
///
/// Geometry (length, orientation, equation numbers) is derived from the end
/// nodes and recomputed whenever they move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Index of the start node
    node0: usize,
    /// Index of the end node
    node1: usize,
    /// Axial stiffness E * A
    ea: f64,
    /// Bending stiffness E * I
    ei: f64,
    length: f64,
    angle: f64,
    cos: f64,
    sin: f64,
    /// Global equations [Fx0, Fy0, M0, Fx1, Fy1, M1]
    equations: [usize; 6],
}

impl Element {
    /// Create an element between two nodes
    ///
    /// Fails with [`FrameError::InvalidGeometry`] if the nodes coincide or
    /// [`FrameError::InvalidInput`] if a stiffness is not positive.
    pub fn new(
        node0: usize,
        node1: usize,
        start: &Node,
        end: &Node,
        ea: f64,
        ei: f64,
    ) -> FrameResult<Self> {
        if node0 == node1 {
            return Err(FrameError::InvalidGeometry(format!(
                "Element connects node {} to itself",
                node0
            )));
        }
        for (name, value) in [("EA", ea), ("EI", ei)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(FrameError::InvalidInput(format!(
                    "{} must be positive and finite (received {})",
                    name, value
                )));
            }
        }

        let mut element = Self {
            node0,
            node1,
            ea,
            ei,
            length: 0.0,
            angle: 0.0,
            cos: 1.0,
            sin: 0.0,
            equations: equations_for(node0, node1),
        };
        element.update_geometry(start, end)?;
        Ok(element)
    }

    /// Create an element from a material and a cross-section
    pub fn from_properties(
        node0: usize,
        node1: usize,
        start: &Node,
        end: &Node,
        material: &Material,
        section: &Section,
    ) -> FrameResult<Self> {
        Self::new(
            node0,
            node1,
            start,
            end,
            material.e * section.a,
            material.e * section.i,
        )
    }

    /// Recompute length and orientation from the end node positions
    pub(crate) fn update_geometry(&mut self, start: &Node, end: &Node) -> FrameResult<()> {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length = dx.hypot(dy);

        if !(length > MIN_LENGTH) {
            return Err(FrameError::InvalidGeometry(format!(
                "Element has zero length: node0={}, node1={}",
                self.node0, self.node1
            )));
        }

        self.length = length;
        self.angle = dy.atan2(dx);
        self.cos = dx / length;
        self.sin = dy / length;
        Ok(())
    }

    pub fn node0(&self) -> usize {
        self.node0
    }

    pub fn node1(&self) -> usize {
        self.node1
    }

    pub fn ea(&self) -> f64 {
        self.ea
    }

    pub fn ei(&self) -> f64 {
        self.ei
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Orientation angle θ = atan2(Δy, Δx) in radians
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Direction cosines (cos θ, sin θ)
    pub fn cos_sin(&self) -> (f64, f64) {
        (self.cos, self.sin)
    }

    /// Global equation indices [Fx0, Fy0, M0, Fx1, Fy1, M1]
    pub fn equations(&self) -> [usize; 6] {
        self.equations
    }

    /// Local stiffness matrix (Euler-Bernoulli frame element)
    pub fn local_stiffness(&self) -> Mat6 {
        math::frame_local_stiffness(self.ea, self.ei, self.length)
    }

    /// Transformation matrix, `d_local = T * d_global`
    pub fn transform(&self) -> Mat6 {
        math::frame_transformation_matrix(self.cos, self.sin)
    }

    /// Global stiffness matrix, `T^T * K_local * T`
    pub fn global_stiffness(&self) -> Mat6 {
        let t = self.transform();
        t.transpose() * self.local_stiffness() * t
    }
}

fn equations_for(node0: usize, node1: usize) -> [usize; 6] {
    let a = node0 * DOF_PER_NODE;
    let b = node1 * DOF_PER_NODE;
    [a, a + 1, a + 2, b, b + 1, b + 2]
}
