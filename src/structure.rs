//! Structure - owns nodes, elements and supports and runs the linear solve

use log::{debug, info, trace, warn};
use serde::Serialize;

use crate::analysis::AnalysisOptions;
use crate::elements::{Element, Material, Node, Section, Support};
use crate::error::{FrameError, FrameResult};
use crate::loads::LoadSet;
use crate::math::solver::{submatrix, subvector};
use crate::math::{self, Mat, Vec, Vec6, DOF_PER_NODE};
use crate::results::{AnalysisSummary, MemberDiagram, MemberResult, Solution};

/// Summed local load intensities on one element: `([a0, a1], [p0, p1])`
type ElementIntensities = ([f64; 2], [f64; 2]);

/// Global stiffness matrix and load vector for one load set
#[derive(Debug, Clone)]
pub struct AssembledSystem {
    /// Global stiffness matrix (N x N)
    pub k: Mat,
    /// Global load vector, equivalent nodal loads included (N)
    pub f: Vec,
}

/// A 2D frame: nodes, elements connecting them, and supports
///
/// Nodes and elements are addressed by their insertion index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Structure {
    nodes: std::vec::Vec<Node>,
    elements: std::vec::Vec<Element>,
    supports: std::vec::Vec<Support>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Building the model
    // ========================

    /// Add a node and return its index
    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Add an element between two existing nodes and return its index
    pub fn add_element(
        &mut self,
        node0: usize,
        node1: usize,
        ea: f64,
        ei: f64,
    ) -> FrameResult<usize> {
        let start = self.node(node0)?;
        let end = self.node(node1)?;
        let element = Element::new(node0, node1, start, end, ea, ei)?;
        self.elements.push(element);
        Ok(self.elements.len() - 1)
    }

    /// Add an element whose stiffness comes from a material and a section
    pub fn add_member(
        &mut self,
        node0: usize,
        node1: usize,
        material: &Material,
        section: &Section,
    ) -> FrameResult<usize> {
        let start = self.node(node0)?;
        let end = self.node(node1)?;
        let element = Element::from_properties(node0, node1, start, end, material, section)?;
        self.elements.push(element);
        Ok(self.elements.len() - 1)
    }

    /// Add a support; a node carries at most one
    pub fn add_support(&mut self, support: Support) -> FrameResult<()> {
        self.node(support.node)?;
        if !support.is_supported() {
            return Err(FrameError::InvalidInput(format!(
                "Support at node {} restrains nothing",
                support.node
            )));
        }
        if self.supports.iter().any(|s| s.node == support.node) {
            return Err(FrameError::DuplicateSupport(support.node));
        }
        self.supports.push(support);
        Ok(())
    }

    /// Move a node and recompute every attached element
    ///
    /// If any attached element would collapse to zero length the structure is
    /// left untouched.
    pub fn set_node_coords(&mut self, index: usize, x: f64, y: f64) -> FrameResult<()> {
        let mut moved = *self.node(index)?;
        moved.set_coords([x, y]);

        let mut updated = std::vec::Vec::new();
        for (e, element) in self.elements.iter().enumerate() {
            if element.node0() != index && element.node1() != index {
                continue;
            }
            let start = if element.node0() == index {
                &moved
            } else {
                &self.nodes[element.node0()]
            };
            let end = if element.node1() == index {
                &moved
            } else {
                &self.nodes[element.node1()]
            };
            let mut element = element.clone();
            element.update_geometry(start, end)?;
            updated.push((e, element));
        }

        self.nodes[index] = moved;
        for (e, element) in updated {
            self.elements[e] = element;
        }
        Ok(())
    }

    // ========================
    // Accessors
    // ========================

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    pub fn node(&self, index: usize) -> FrameResult<&Node> {
        self.nodes.get(index).ok_or(FrameError::NodeNotFound(index))
    }

    pub fn element(&self, index: usize) -> FrameResult<&Element> {
        self.elements
            .get(index)
            .ok_or(FrameError::ElementNotFound(index))
    }

    /// Total number of equations (3 per node)
    pub fn num_dofs(&self) -> usize {
        self.nodes.len() * DOF_PER_NODE
    }

    /// Restrained equations, in support insertion order then Fx, Fy, M
    pub fn restrained_dofs(&self) -> std::vec::Vec<usize> {
        self.supports
            .iter()
            .flat_map(|s| {
                s.restrained_dofs()
                    .into_iter()
                    .map(move |offset| s.node * DOF_PER_NODE + offset)
            })
            .collect()
    }

    /// Free equations in ascending order
    pub fn free_dofs(&self) -> std::vec::Vec<usize> {
        let mut restrained = vec![false; self.num_dofs()];
        for dof in self.restrained_dofs() {
            restrained[dof] = true;
        }
        (0..self.num_dofs()).filter(|&d| !restrained[d]).collect()
    }

    // ========================
    // Analysis
    // ========================

    /// Check that every load refers to an existing node or element
    pub fn validate_loads(&self, loads: &LoadSet) -> FrameResult<()> {
        for load in &loads.nodal {
            if load.node >= self.nodes.len() {
                return Err(FrameError::InvalidLoadReference(format!(
                    "nodal load references missing node {}",
                    load.node
                )));
            }
        }
        for load in &loads.distributed {
            if load.element >= self.elements.len() {
                return Err(FrameError::InvalidLoadReference(format!(
                    "distributed load references missing element {}",
                    load.element
                )));
            }
        }
        for load in &loads.end_moments {
            if load.element >= self.elements.len() {
                return Err(FrameError::InvalidLoadReference(format!(
                    "end moment references missing element {}",
                    load.element
                )));
            }
        }
        Ok(())
    }

    /// Build the global stiffness matrix and load vector
    pub fn assemble(&self, loads: &LoadSet) -> FrameResult<AssembledSystem> {
        self.validate_loads(loads)?;

        let n = self.num_dofs();
        let mut k = Mat::zeros(n, n);
        let mut f = Vec::zeros(n);

        for element in &self.elements {
            let kg = element.global_stiffness();
            let eq = element.equations();
            for (a, &row) in eq.iter().enumerate() {
                for (b, &col) in eq.iter().enumerate() {
                    k[(row, col)] += kg[(a, b)];
                }
            }
        }

        for load in &loads.nodal {
            let base = load.node * DOF_PER_NODE;
            for (i, value) in load.as_array().into_iter().enumerate() {
                f[base + i] += value;
            }
        }

        for (element, intensities) in self.elements.iter().zip(self.load_intensities(loads)) {
            let Some(f_eq) = equivalent_loads(element, &intensities) else {
                continue;
            };
            let f_global = element.transform().transpose() * f_eq;
            for (i, &dof) in element.equations().iter().enumerate() {
                f[dof] += f_global[i];
            }
        }

        for load in &loads.end_moments {
            let element = &self.elements[load.element];
            let dof = element.equations()[load.end.dof_offset() + 2];
            f[dof] += load.m;
        }

        debug!(
            "Assembled {} equations from {} elements and {} loads",
            n,
            self.elements.len(),
            loads.len()
        );

        Ok(AssembledSystem { k, f })
    }

    /// Run a linear static analysis with default options
    pub fn solve(&self, loads: &LoadSet) -> FrameResult<Solution> {
        self.solve_with(loads, &AnalysisOptions::default())
    }

    /// Run a linear static analysis
    pub fn solve_with(&self, loads: &LoadSet, options: &AnalysisOptions) -> FrameResult<Solution> {
        let restrained = self.restrained_dofs();
        let free = self.free_dofs();

        if options.check_stability && restrained.len() < 3 {
            return Err(FrameError::UnderConstrained {
                restrained: restrained.len(),
            });
        }

        let AssembledSystem { k, f } = self.assemble(loads)?;
        debug!(
            "Partitioned system: {} free, {} restrained",
            free.len(),
            restrained.len()
        );

        // Rigid supports: prescribed displacements are zero
        let d_restrained = Vec::zeros(restrained.len());

        let mut displacements = Vec::zeros(self.num_dofs());
        let mut min_pivot_ratio = 1.0;
        if !free.is_empty() {
            let reduced = math::solve_reduced_system(
                &k,
                &f,
                &free,
                &restrained,
                &d_restrained,
                options.solver,
                options.pivot_tolerance,
            )?;
            for (i, &dof) in free.iter().enumerate() {
                displacements[dof] = reduced.solution[i];
            }
            min_pivot_ratio = reduced.min_pivot_ratio;
        }
        for (i, &dof) in restrained.iter().enumerate() {
            displacements[dof] = d_restrained[i];
        }

        // R = K_RU D_U + K_RR D_R - F_R
        let d_free = subvector(&displacements, &free);
        let reactions = submatrix(&k, &restrained, &free) * d_free
            + submatrix(&k, &restrained, &restrained) * &d_restrained
            - subvector(&f, &restrained);

        let members = self.recover_members(&displacements, loads);

        let residual = self.equilibrium_residual(loads, &reactions, &restrained);
        let scale = self.load_scale(loads, &reactions);
        let relative = if scale > 0.0 {
            residual.iter().fold(0.0_f64, |acc, r| acc.max(r.abs())) / scale
        } else {
            0.0
        };
        if relative > options.statics_tolerance {
            if options.check_statics {
                return Err(FrameError::StaticsCheckFailed { residual: relative });
            }
            warn!(
                "Equilibrium residual {:e} exceeds tolerance {:e}",
                relative, options.statics_tolerance
            );
        }

        let mut solution = Solution {
            displacements,
            reactions,
            reaction_dofs: restrained,
            members,
            summary: AnalysisSummary::default(),
        };
        solution.summary = self.summarize(&solution, residual, min_pivot_ratio);

        info!(
            "Linear analysis complete: {} free DOFs, {} elements",
            free.len(),
            self.elements.len()
        );

        Ok(solution)
    }

    /// Sum the local intensities of every distributed load, per element
    fn load_intensities(&self, loads: &LoadSet) -> std::vec::Vec<ElementIntensities> {
        let mut intensities = vec![([0.0; 2], [0.0; 2]); self.elements.len()];
        for load in &loads.distributed {
            let (cos, sin) = self.elements[load.element].cos_sin();
            let ([a0, a1], [p0, p1]) = load.local_components(cos, sin);
            let entry = &mut intensities[load.element];
            entry.0[0] += a0;
            entry.0[1] += a1;
            entry.1[0] += p0;
            entry.1[1] += p1;
        }
        intensities
    }

    /// Local end forces, displacements and diagrams of every element
    fn recover_members(
        &self,
        displacements: &Vec,
        loads: &LoadSet,
    ) -> std::vec::Vec<MemberResult> {
        self.elements
            .iter()
            .zip(self.load_intensities(loads))
            .enumerate()
            .map(|(e, (element, intensities))| {
                let eq = element.equations();
                let d_global = Vec6::from_fn(|i, _| displacements[eq[i]]);
                let d_local = element.transform() * d_global;

                let mut end_forces = element.local_stiffness() * d_local;
                if let Some(f_eq) = equivalent_loads(element, &intensities) {
                    end_forces -= f_eq;
                }
                trace!("Element {} local end forces: {:?}", e, end_forces.as_slice());

                let (axial_load, perpendicular_load) = intensities;
                MemberResult {
                    end_forces: std::array::from_fn(|i| end_forces[i]),
                    local_displacements: std::array::from_fn(|i| d_local[i]),
                    diagram: MemberDiagram::new(
                        &end_forces,
                        &d_local,
                        axial_load,
                        perpendicular_load,
                        element.length(),
                    ),
                }
            })
            .collect()
    }

    /// Resultant of the applied loads as [Fx, Fy, M about the origin]
    fn applied_resultant(&self, loads: &LoadSet) -> [f64; 3] {
        let mut total = [0.0; 3];

        for load in &loads.nodal {
            let node = &self.nodes[load.node];
            total[0] += load.fx;
            total[1] += load.fy;
            total[2] += load.m + node.x * load.fy - node.y * load.fx;
        }

        for load in &loads.distributed {
            let element = &self.elements[load.element];
            let start = &self.nodes[element.node0()];
            let (c, s) = element.cos_sin();
            let l = element.length();
            let ([a0, a1], [p0, p1]) = load.local_components(c, s);

            let rx_local = l * (a0 + a1) / 2.0;
            let ry_local = l * (p0 + p1) / 2.0;
            let rx = c * rx_local - s * ry_local;
            let ry = s * rx_local + c * ry_local;
            // ∫ u q_y du about the start node; the axial part has no lever arm
            let first_moment = l * l * (p0 + 2.0 * p1) / 6.0;

            total[0] += rx;
            total[1] += ry;
            total[2] += start.x * ry - start.y * rx + first_moment;
        }

        for load in &loads.end_moments {
            total[2] += load.m;
        }

        total
    }

    /// Applied loads plus reactions; zero for a structure in equilibrium
    fn equilibrium_residual(
        &self,
        loads: &LoadSet,
        reactions: &Vec,
        dofs: &[usize],
    ) -> [f64; 3] {
        let mut residual = self.applied_resultant(loads);
        for (value, &dof) in reactions.iter().zip(dofs) {
            let node = &self.nodes[dof / DOF_PER_NODE];
            match dof % DOF_PER_NODE {
                0 => {
                    residual[0] += value;
                    residual[2] -= node.y * value;
                }
                1 => {
                    residual[1] += value;
                    residual[2] += node.x * value;
                }
                _ => residual[2] += value,
            }
        }
        residual
    }

    /// Magnitude used to make the equilibrium residual relative
    fn load_scale(&self, loads: &LoadSet, reactions: &Vec) -> f64 {
        let applied = self.applied_resultant(loads);
        let nodal = loads
            .nodal
            .iter()
            .flat_map(|l| l.as_array())
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let distributed = loads
            .distributed
            .iter()
            .map(|l| l.total_force(self.elements[l.element].length()).abs())
            .fold(0.0_f64, f64::max);
        applied
            .iter()
            .fold(nodal.max(distributed), |acc, v| acc.max(v.abs()))
            .max(reactions.iter().fold(0.0_f64, |acc, r| acc.max(r.abs())))
    }

    fn summarize(
        &self,
        solution: &Solution,
        residual: [f64; 3],
        min_pivot_ratio: f64,
    ) -> AnalysisSummary {
        let mut summary = AnalysisSummary {
            num_nodes: self.nodes.len(),
            num_elements: self.elements.len(),
            total_dofs: self.num_dofs(),
            free_dofs: self.num_dofs() - solution.reaction_dofs.len(),
            restrained_dofs: solution.reaction_dofs.len(),
            equilibrium_residual: residual,
            min_pivot_ratio,
            ..Default::default()
        };

        for node in 0..self.nodes.len() {
            if let Ok(disp) = solution.node_displacement(node) {
                let magnitude = disp.translation_magnitude();
                if magnitude > summary.max_displacement {
                    summary.max_displacement = magnitude;
                    summary.max_disp_node = node;
                }
            }
        }

        for support in &self.supports {
            if let Ok(reactions) = solution.support_reactions(support.node) {
                let magnitude = reactions.force_magnitude();
                if magnitude > summary.max_reaction {
                    summary.max_reaction = magnitude;
                    summary.max_reaction_node = support.node;
                }
            }
        }

        for (e, member) in solution.members.iter().enumerate() {
            let (axial, _) = member.diagram.max_abs_axial();
            if axial > summary.max_axial {
                summary.max_axial = axial;
                summary.max_axial_element = e;
            }
            let (moment, _) = member.diagram.max_abs_moment();
            if moment > summary.max_moment {
                summary.max_moment = moment;
                summary.max_moment_element = e;
            }
        }

        summary
    }
}

/// Local equivalent nodal loads of the summed intensities, if any are non-zero
fn equivalent_loads(element: &Element, intensities: &ElementIntensities) -> Option<Vec6> {
    let ([a0, a1], [p0, p1]) = *intensities;
    if [a0, a1, p0, p1].iter().all(|w| *w == 0.0) {
        return None;
    }
    Some(math::equivalent_nodal_loads(a0, a1, p0, p1, element.length()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{DistributedLoad, ElementEnd, ElementEndMoment, NodalLoad};
    use approx::assert_relative_eq;

    fn cantilever(length: f64) -> Structure {
        let mut s = Structure::new();
        let n0 = s.add_node(Node::new(0.0, 0.0));
        let n1 = s.add_node(Node::new(length, 0.0));
        s.add_element(n0, n1, 1.0e6, 1.0e3).unwrap();
        s.add_support(Support::fixed(n0)).unwrap();
        s
    }

    #[test]
    fn test_add_element_checks_nodes() {
        let mut s = Structure::new();
        s.add_node(Node::new(0.0, 0.0));
        s.add_node(Node::new(0.0, 0.0));
        assert!(matches!(s.add_element(0, 5, 1.0, 1.0), Err(FrameError::NodeNotFound(5))));
        assert!(matches!(s.add_element(0, 1, 1.0, 1.0), Err(FrameError::InvalidGeometry(_))));
        assert!(s.elements().is_empty());
    }

    #[test]
    fn test_add_support_rules() {
        let mut s = cantilever(2.0);
        assert!(matches!(s.add_support(Support::pinned(0)), Err(FrameError::DuplicateSupport(0))));
        assert!(matches!(s.add_support(Support::fixed(9)), Err(FrameError::NodeNotFound(9))));
        assert!(matches!(
            s.add_support(Support::with_restraints(1, false, false, false)),
            Err(FrameError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_dof_partition_order() {
        let mut s = Structure::new();
        for x in [0.0, 1.0, 2.0] {
            s.add_node(Node::new(x, 0.0));
        }
        s.add_element(0, 1, 1.0, 1.0).unwrap();
        s.add_element(1, 2, 1.0, 1.0).unwrap();
        s.add_support(Support::roller_y(2)).unwrap();
        s.add_support(Support::pinned(0)).unwrap();

        assert_eq!(s.num_dofs(), 9);
        assert_eq!(s.restrained_dofs(), vec![7, 0, 1]);
        assert_eq!(s.free_dofs(), vec![2, 3, 4, 5, 6, 8]);
    }

    #[test]
    fn test_set_node_coords_updates_elements() {
        let mut s = cantilever(2.0);
        s.set_node_coords(1, 0.0, 3.0).unwrap();
        let element = s.element(0).unwrap();
        assert_relative_eq!(element.length(), 3.0);
        assert_relative_eq!(element.angle(), std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_set_node_coords_is_atomic() {
        let mut s = cantilever(2.0);
        let before = s.clone();
        assert!(matches!(s.set_node_coords(1, 0.0, 0.0), Err(FrameError::InvalidGeometry(_))));
        assert_eq!(s.nodes(), before.nodes());
        assert_eq!(s.elements(), before.elements());
    }

    #[test]
    fn test_validate_loads() {
        let s = cantilever(2.0);
        let bad_node = LoadSet::new().with_nodal(NodalLoad::force(4, 0.0, 1.0));
        let bad_element = LoadSet::new().with_distributed(DistributedLoad::local(3, 1.0, 1.0));
        let bad_moment =
            LoadSet::new().with_end_moment(ElementEndMoment::new(1, ElementEnd::Node0, 1.0));
        for loads in [bad_node, bad_element, bad_moment] {
            assert!(matches!(s.solve(&loads), Err(FrameError::InvalidLoadReference(_))));
        }
    }

    #[test]
    fn test_assembled_stiffness_is_symmetric() {
        let mut s = cantilever(2.0);
        let n2 = s.add_node(Node::new(3.0, 1.5));
        s.add_element(1, n2, 2.0e6, 5.0e2).unwrap();
        let system = s.assemble(&LoadSet::new()).unwrap();
        assert_relative_eq!(system.k, system.k.transpose(), epsilon = 1e-6);
    }

    #[test]
    fn test_end_moment_enters_rotation_equation() {
        let s = cantilever(2.0);
        let loads =
            LoadSet::new().with_end_moment(ElementEndMoment::new(0, ElementEnd::Node1, 7.0));
        let system = s.assemble(&loads).unwrap();
        assert_eq!(system.f[5], 7.0);
        assert_eq!(system.f.iter().filter(|v| **v != 0.0).count(), 1);
    }

    #[test]
    fn test_cantilever_tip_load() {
        let s = cantilever(2.0);
        let loads = LoadSet::new().with_nodal(NodalLoad::force(1, 0.0, -3.0));
        let solution = s.solve(&loads).unwrap();

        // P L^3 / 3EI
        let tip = solution.node_displacement(1).unwrap();
        assert_relative_eq!(tip.dy, -0.008, epsilon = 1e-12);
        let base = solution.support_reactions(0).unwrap();
        assert_relative_eq!(base.fy, 3.0, epsilon = 1e-9);
        assert_relative_eq!(base.m, 6.0, epsilon = 1e-9);
        assert!(solution.summary().equilibrium_residual.iter().all(|r| r.abs() < 1e-9));
    }

    #[test]
    fn test_fully_restrained_structure() {
        let mut s = cantilever(2.0);
        s.add_support(Support::fixed(1)).unwrap();
        let loads = LoadSet::new().with_distributed(DistributedLoad::local(0, -3.0, -3.0));
        let solution = s.solve(&loads).unwrap();

        assert!(solution.displacements().iter().all(|d| *d == 0.0));
        let left = solution.support_reactions(0).unwrap();
        assert_relative_eq!(left.fy, 3.0, epsilon = 1e-12);
        assert_relative_eq!(left.m, 1.0, epsilon = 1e-12);

        let member = solution.member(0).unwrap();
        assert_relative_eq!(member.end_forces[2], 1.0, epsilon = 1e-12);
        assert_relative_eq!(member.end_forces[5], -1.0, epsilon = 1e-12);
        assert_relative_eq!(member.diagram.moment_at(0.0), -1.0, epsilon = 1e-12);
        assert_relative_eq!(member.diagram.moment_at(1.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_under_constrained() {
        let mut s = Structure::new();
        s.add_node(Node::new(0.0, 0.0));
        s.add_node(Node::new(1.0, 0.0));
        s.add_element(0, 1, 1.0, 1.0).unwrap();
        s.add_support(Support::pinned(0)).unwrap();
        assert!(matches!(
            s.solve(&LoadSet::new()),
            Err(FrameError::UnderConstrained { restrained: 2 })
        ));
    }

    #[test]
    fn test_unconnected_node_is_unstable() {
        let mut s = cantilever(2.0);
        s.add_node(Node::new(5.0, 5.0));
        let err = s.solve(&LoadSet::new()).unwrap_err();
        assert!(matches!(err, FrameError::UnstableStructure { dof } if (6..9).contains(&dof)));
    }
}
