//! Frame Solver - linear static analysis of 2D frames
//!
//! This library implements the direct stiffness method for plane frames built
//! from two-node Euler-Bernoulli beam-column elements, supporting:
//! - Nodal forces and moments
//! - Linearly varying distributed loads (local or global direction)
//! - Concentrated moments at element ends
//! - Load cases and factored load combinations
//! - Reactions, local end forces and polynomial force/deflection diagrams
//!
//! ## Example
//! ```rust
//! use frame_solver::prelude::*;
//!
//! let mut frame = Structure::new();
//!
//! // Nodes
//! let base = frame.add_node(Node::new(0.0, 0.0));
//! let tip = frame.add_node(Node::new(3.0, 0.0));
//!
//! // Element from material and section
//! let section = Section::rectangular(0.1, 0.2);
//! frame.add_member(base, tip, &Material::steel(), &section).unwrap();
//!
//! // Supports
//! frame.add_support(Support::fixed(base)).unwrap();
//!
//! // Loads
//! let loads = LoadSet::new().with_nodal(NodalLoad::force(tip, 0.0, -10_000.0));
//!
//! // Analyze
//! let solution = frame.solve(&loads).unwrap();
//!
//! // Get results
//! let displacement = solution.node_displacement(tip).unwrap();
//! assert!(displacement.dy < 0.0);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod results;
pub mod structure;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, SolverKind};
    pub use crate::elements::{Element, Material, Node, Section, Support};
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::loads::{
        DistributedLoad, ElementEnd, ElementEndMoment, LoadCase, LoadCombination, LoadDirection,
        LoadSet, NodalLoad,
    };
    pub use crate::math::Polynomial;
    pub use crate::results::{
        AnalysisSummary, MemberDiagram, MemberForces, MemberResult, NodeDisplacement, Reactions,
        Solution,
    };
    pub use crate::structure::{AssembledSystem, Structure};
}
