//! Result types for frame analysis
//!
//! A [`Solution`] is an owned snapshot: it holds no references back into the
//! [`Structure`](crate::structure::Structure) it came from.
//!
//! ## Sign conventions
//! Member end forces are the forces the nodes exert on the element, in local
//! coordinates. Diagram quantities follow from equilibrium of the segment `[0, u]`:
//! - axial force `N(u) = -Fx0 - ∫ qx`, tension positive
//! - shear force `V(u) = Fy0 + ∫ qy`, so that `dV/du = qy`
//! - bending moment `M(u) = -M0 + ∫ V`, sagging positive, `dM/du = V`

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::math::{self, Polynomial, Vec6, DOF_PER_NODE};

/// Displacement results at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Rotation, counter-clockwise positive
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, RZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            rz: arr[2],
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

/// Reaction forces at a supported node
///
/// Components that are not restrained are reported as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction moment
    pub m: f64,
}

impl Reactions {
    /// Create from array [FX, FY, M]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            m: arr[2],
        }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        self.fx.hypot(self.fy)
    }
}

/// Internal forces in a member at one of its ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberForces {
    /// Axial force (positive = tension)
    pub axial: f64,
    /// Shear force
    pub shear: f64,
    /// Bending moment (positive = sagging)
    pub moment: f64,
}

impl MemberForces {
    /// Internal forces just inside node 0
    pub fn from_node0_forces(forces: &[f64; 6]) -> Self {
        Self {
            axial: -forces[0],
            shear: forces[1],
            moment: -forces[2],
        }
    }

    /// Internal forces just inside node 1
    pub fn from_node1_forces(forces: &[f64; 6]) -> Self {
        Self {
            axial: forces[3],
            shear: -forces[4],
            moment: forces[5],
        }
    }
}

/// One evaluated point of a member diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramPoint {
    pub u: f64,
    pub axial: f64,
    pub shear: f64,
    pub moment: f64,
    pub deflection: f64,
}

/// Polynomial description of a member's internal forces and displacements
///
/// All curves are functions of the local coordinate `u ∈ [0, length]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDiagram {
    pub length: f64,
    pub axial: Polynomial,
    pub shear: Polynomial,
    pub moment: Polynomial,
    /// Transverse deflection (cubic Hermite of the end displacements)
    pub deflection: Polynomial,
    /// Axial displacement (linear between the ends)
    pub axial_displacement: Polynomial,
}

impl MemberDiagram {
    /// Build the diagram from local end forces and displacements
    ///
    /// `axial_load` and `perpendicular_load` are the summed local intensities at
    /// each end of every distributed load acting on the member.
    pub fn new(
        end_forces: &Vec6,
        local_displacements: &Vec6,
        axial_load: [f64; 2],
        perpendicular_load: [f64; 2],
        length: f64,
    ) -> Self {
        let l = length;
        let [a0, a1] = axial_load;
        let [p0, p1] = perpendicular_load;
        let (f0x, f0y, m0) = (end_forces[0], end_forces[1], end_forces[2]);
        let (d0, d1) = (local_displacements[0], local_displacements[3]);

        Self {
            length,
            axial: Polynomial::new([-f0x, -a0, -(a1 - a0) / (2.0 * l), 0.0]),
            shear: Polynomial::new([f0y, p0, (p1 - p0) / (2.0 * l), 0.0]),
            moment: Polynomial::new([-m0, f0y, p0 / 2.0, (p1 - p0) / (6.0 * l)]),
            deflection: math::hermite_deflection(local_displacements, l),
            axial_displacement: Polynomial::new([d0, (d1 - d0) / l, 0.0, 0.0]),
        }
    }

    pub fn axial_at(&self, u: f64) -> f64 {
        self.axial.eval(u)
    }

    pub fn shear_at(&self, u: f64) -> f64 {
        self.shear.eval(u)
    }

    pub fn moment_at(&self, u: f64) -> f64 {
        self.moment.eval(u)
    }

    pub fn deflection_at(&self, u: f64) -> f64 {
        self.deflection.eval(u)
    }

    pub fn axial_displacement_at(&self, u: f64) -> f64 {
        self.axial_displacement.eval(u)
    }

    /// Largest absolute axial force and its position
    pub fn max_abs_axial(&self) -> (f64, f64) {
        self.axial.max_abs(self.length)
    }

    /// Largest absolute shear force and its position
    pub fn max_abs_shear(&self) -> (f64, f64) {
        self.shear.max_abs(self.length)
    }

    /// Largest absolute bending moment and its position
    pub fn max_abs_moment(&self) -> (f64, f64) {
        self.moment.max_abs(self.length)
    }

    /// Evaluate every curve at `n` equally spaced points (n >= 2), ends included
    pub fn sample(&self, n: usize) -> Vec<DiagramPoint> {
        let n = n.max(2);
        (0..n)
            .map(|k| {
                let u = self.length * k as f64 / (n - 1) as f64;
                DiagramPoint {
                    u,
                    axial: self.axial_at(u),
                    shear: self.shear_at(u),
                    moment: self.moment_at(u),
                    deflection: self.deflection_at(u),
                }
            })
            .collect()
    }
}

/// Recovered results for a single element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberResult {
    /// Local end forces [Fx0, Fy0, M0, Fx1, Fy1, M1]
    pub end_forces: [f64; 6],
    /// Local end displacements [u0, v0, θ0, u1, v1, θ1]
    pub local_displacements: [f64; 6],
    pub diagram: MemberDiagram,
}

impl MemberResult {
    pub fn forces_node0(&self) -> MemberForces {
        MemberForces::from_node0_forces(&self.end_forces)
    }

    pub fn forces_node1(&self) -> MemberForces {
        MemberForces::from_node1_forces(&self.end_forces)
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Total number of nodes
    pub num_nodes: usize,
    /// Total number of elements
    pub num_elements: usize,
    /// Total DOFs
    pub total_dofs: usize,
    /// Free DOFs (unknown)
    pub free_dofs: usize,
    /// Restrained DOFs
    pub restrained_dofs: usize,
    /// Maximum nodal translation
    pub max_displacement: f64,
    /// Node with maximum translation
    pub max_disp_node: usize,
    /// Maximum support reaction force
    pub max_reaction: f64,
    /// Node with maximum reaction force
    pub max_reaction_node: usize,
    /// Maximum member axial force along the span
    pub max_axial: f64,
    /// Element with maximum axial force
    pub max_axial_element: usize,
    /// Maximum member moment along the span
    pub max_moment: f64,
    /// Element with maximum moment
    pub max_moment_element: usize,
    /// Applied loads plus reactions [ΣFx, ΣFy, ΣM about the origin]
    pub equilibrium_residual: [f64; 3],
    /// Smallest relative pivot of the reduced stiffness matrix
    pub min_pivot_ratio: f64,
}

/// Complete result set of a linear static solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub(crate) displacements: DVector<f64>,
    pub(crate) reactions: DVector<f64>,
    pub(crate) reaction_dofs: Vec<usize>,
    pub(crate) members: Vec<MemberResult>,
    pub(crate) summary: AnalysisSummary,
}

impl Solution {
    /// Global displacement vector, indexed by equation (3 per node)
    pub fn displacements(&self) -> &DVector<f64> {
        &self.displacements
    }

    /// Reactions at restrained DOFs, ordered by support then Fx, Fy, M
    pub fn reactions(&self) -> &DVector<f64> {
        &self.reactions
    }

    /// Global equation of each reaction entry
    pub fn reaction_dofs(&self) -> &[usize] {
        &self.reaction_dofs
    }

    /// Per-element results, indexed like the structure's elements
    pub fn members(&self) -> &[MemberResult] {
        &self.members
    }

    pub fn member(&self, element: usize) -> FrameResult<&MemberResult> {
        self.members
            .get(element)
            .ok_or(FrameError::ElementNotFound(element))
    }

    pub fn summary(&self) -> &AnalysisSummary {
        &self.summary
    }

    /// Get node displacement
    pub fn node_displacement(&self, node: usize) -> FrameResult<NodeDisplacement> {
        let base = node * DOF_PER_NODE;
        if base + 2 >= self.displacements.len() {
            return Err(FrameError::NodeNotFound(node));
        }
        Ok(NodeDisplacement::from_array([
            self.displacements[base],
            self.displacements[base + 1],
            self.displacements[base + 2],
        ]))
    }

    /// Get the reactions of the support at `node`
    pub fn support_reactions(&self, node: usize) -> FrameResult<Reactions> {
        let mut components = [0.0; 3];
        let mut found = false;
        for (value, &dof) in self.reactions.iter().zip(&self.reaction_dofs) {
            if dof / DOF_PER_NODE == node {
                components[dof % DOF_PER_NODE] = *value;
                found = true;
            }
        }
        if !found {
            return Err(FrameError::InvalidInput(format!(
                "Node {} has no support",
                node
            )));
        }
        Ok(Reactions::from_array(components))
    }

    /// Get member forces just inside node 0
    pub fn member_forces_0(&self, element: usize) -> FrameResult<MemberForces> {
        Ok(self.member(element)?.forces_node0())
    }

    /// Get member forces just inside node 1
    pub fn member_forces_1(&self, element: usize) -> FrameResult<MemberForces> {
        Ok(self.member(element)?.forces_node1())
    }

    /// Serialize the full result set to pretty-printed JSON
    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
