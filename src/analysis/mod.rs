//! Analysis options

use serde::{Deserialize, Serialize};

/// Dense factorisation used for the reduced system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolverKind {
    /// Cholesky factorisation (stiffness matrix is symmetric positive-definite)
    #[default]
    Cholesky,
    /// LU decomposition with partial pivoting
    Lu,
}

/// Options for structural analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Factorisation for the free DOF system
    pub solver: SolverKind,
    /// Reject structures with fewer than 3 restrained components before solving
    pub check_stability: bool,
    /// Fail the solve if global equilibrium is not met within `statics_tolerance`
    pub check_statics: bool,
    /// Smallest accepted pivot, relative to its original diagonal entry
    pub pivot_tolerance: f64,
    /// Accepted equilibrium residual, relative to the largest applied load component
    pub statics_tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            solver: SolverKind::Cholesky,
            check_stability: true,
            check_statics: false,
            pivot_tolerance: 1e-10,
            statics_tolerance: 1e-6,
        }
    }
}

impl AnalysisOptions {
    /// Create options for a linear static analysis
    pub fn linear() -> Self {
        Self::default()
    }

    /// Select the factorisation
    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    /// Enable the equilibrium check
    pub fn with_statics_check(mut self) -> Self {
        self.check_statics = true;
        self
    }

    /// Set the pivot tolerance used for rigid-body detection
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    /// Set the equilibrium tolerance
    pub fn with_statics_tolerance(mut self, tol: f64) -> Self {
        self.statics_tolerance = tol;
        self
    }

    /// Skip the restraint-count precheck and rely on the pivot check alone
    pub fn without_stability_check(mut self) -> Self {
        self.check_stability = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = AnalysisOptions::default();
        assert_eq!(opts.solver, SolverKind::Cholesky);
        assert!(opts.check_stability);
        assert!(!opts.check_statics);
    }

    #[test]
    fn test_builder() {
        let opts = AnalysisOptions::linear()
            .with_solver(SolverKind::Lu)
            .with_statics_check()
            .with_pivot_tolerance(1e-8);
        assert_eq!(opts.solver, SolverKind::Lu);
        assert!(opts.check_statics);
        assert_eq!(opts.pivot_tolerance, 1e-8);
    }
}
