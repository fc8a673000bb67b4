//! Support conditions

use serde::{Deserialize, Serialize};

/// Support conditions at a node
///
/// Each flag restrains one of the node's three DOFs. Restrained DOFs are held at
/// zero displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    /// Supported node index
    pub node: usize,
    /// Restrained in X translation
    pub fx: bool,
    /// Restrained in Y translation
    pub fy: bool,
    /// Restrained in rotation
    pub m: bool,
}

impl Support {
    /// Create a support with specific restraints
    pub fn with_restraints(node: usize, fx: bool, fy: bool, m: bool) -> Self {
        Self { node, fx, fy, m }
    }

    /// Create a fully fixed support (all DOFs restrained)
    pub fn fixed(node: usize) -> Self {
        Self::with_restraints(node, true, true, true)
    }

    /// Create a pinned support (translations restrained, rotation free)
    pub fn pinned(node: usize) -> Self {
        Self::with_restraints(node, true, true, false)
    }

    /// Create a roller that restrains X translation only
    pub fn roller_x(node: usize) -> Self {
        Self::with_restraints(node, true, false, false)
    }

    /// Create a roller that restrains Y translation only
    pub fn roller_y(node: usize) -> Self {
        Self::with_restraints(node, false, true, false)
    }

    /// Restraint flags in DOF order [Fx, Fy, M]
    pub fn flags(&self) -> [bool; 3] {
        [self.fx, self.fy, self.m]
    }

    /// Get list of restrained DOF offsets (0-2), in Fx, Fy, M order
    pub fn restrained_dofs(&self) -> Vec<usize> {
        (0..3).filter(|&i| self.flags()[i]).collect()
    }

    /// Get list of free DOF offsets (0-2)
    pub fn free_dofs(&self) -> Vec<usize> {
        (0..3).filter(|&i| !self.flags()[i]).collect()
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.fx || self.fy || self.m
    }

    /// Count number of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.flags().iter().filter(|&&f| f).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_support() {
        let support = Support::fixed(0);
        assert!(support.fx && support.fy && support.m);
        assert_eq!(support.num_restrained(), 3);
        assert_eq!(support.restrained_dofs(), vec![0, 1, 2]);
    }

    #[test]
    fn test_pinned_support() {
        let support = Support::pinned(4);
        assert_eq!(support.node, 4);
        assert_eq!(support.restrained_dofs(), vec![0, 1]);
        assert_eq!(support.free_dofs(), vec![2]);
    }

    #[test]
    fn test_rollers() {
        assert_eq!(Support::roller_x(1).restrained_dofs(), vec![0]);
        assert_eq!(Support::roller_y(1).restrained_dofs(), vec![1]);
        assert!(!Support::with_restraints(1, false, false, false).is_supported());
    }
}
