//! Dense solve of the reduced (free DOF) system

use log::debug;

use super::{Mat, Vec};
use crate::analysis::SolverKind;
use crate::error::{FrameError, FrameResult};

/// Result of solving `K_UU * D_U = F_U - K_UR * D_R`
#[derive(Debug, Clone)]
pub struct ReducedSolve {
    /// Free displacements, ordered like the free DOF list
    pub solution: Vec,
    /// Smallest pivot found during factorisation, relative to its original diagonal
    pub min_pivot_ratio: f64,
}

/// Extract the sub-matrix of `k` at the given rows and columns
pub fn submatrix(k: &Mat, rows: &[usize], cols: &[usize]) -> Mat {
    Mat::from_fn(rows.len(), cols.len(), |i, j| k[(rows[i], cols[j])])
}

/// Extract the entries of `v` at the given indices
pub fn subvector(v: &Vec, indices: &[usize]) -> Vec {
    Vec::from_fn(indices.len(), |i, _| v[indices[i]])
}

/// Solve the reduced system over the free DOFs
///
/// `d_restrained` holds the prescribed displacements of the restrained DOFs
/// (all zero for rigid supports). The `K_UR * D_R` term is kept so prescribed
/// support displacements only need a non-zero `d_restrained`.
///
/// A pivot whose ratio to its original diagonal entry falls below
/// `pivot_tolerance` is treated as a rigid-body mode.
pub fn solve_reduced_system(
    k: &Mat,
    f: &Vec,
    free: &[usize],
    restrained: &[usize],
    d_restrained: &Vec,
    kind: SolverKind,
    pivot_tolerance: f64,
) -> FrameResult<ReducedSolve> {
    let k_uu = submatrix(k, free, free);
    let k_ur = submatrix(k, free, restrained);
    let rhs = subvector(f, free) - &k_ur * d_restrained;

    // A free DOF without any stiffness (e.g. an unconnected node) is a mechanism
    for (i, &dof) in free.iter().enumerate() {
        if k_uu[(i, i)] <= 0.0 || !k_uu[(i, i)].is_finite() {
            return Err(FrameError::UnstableStructure { dof });
        }
    }

    debug!(
        "Solving reduced system: {} free, {} restrained ({:?})",
        free.len(),
        restrained.len(),
        kind
    );

    match kind {
        SolverKind::Cholesky => solve_cholesky(k_uu, &rhs, free, pivot_tolerance),
        SolverKind::Lu => solve_lu(k_uu, &rhs, free, pivot_tolerance),
    }
}

fn solve_cholesky(
    k_uu: Mat,
    rhs: &Vec,
    free: &[usize],
    pivot_tolerance: f64,
) -> FrameResult<ReducedSolve> {
    let diagonal = k_uu.diagonal();
    let Some(chol) = k_uu.clone().cholesky() else {
        // Not positive definite: locate the offending equation through LU
        return match solve_lu(k_uu, rhs, free, pivot_tolerance) {
            Err(e) => Err(e),
            Ok(lu) => Err(FrameError::UnstableStructure {
                dof: free[largest_component(&lu.solution)],
            }),
        };
    };

    let l = chol.l();
    let mut min_ratio = f64::INFINITY;
    for i in 0..free.len() {
        let ratio = l[(i, i)] * l[(i, i)] / diagonal[i];
        if ratio < pivot_tolerance {
            return Err(FrameError::UnstableStructure { dof: free[i] });
        }
        min_ratio = min_ratio.min(ratio);
    }

    Ok(ReducedSolve {
        solution: chol.solve(rhs),
        min_pivot_ratio: min_ratio,
    })
}

fn solve_lu(
    k_uu: Mat,
    rhs: &Vec,
    free: &[usize],
    pivot_tolerance: f64,
) -> FrameResult<ReducedSolve> {
    let diagonal = k_uu.diagonal();
    let lu = k_uu.lu();
    let u = lu.u();

    let mut min_ratio = f64::INFINITY;
    for i in 0..free.len() {
        let ratio = u[(i, i)].abs() / diagonal[i];
        if ratio < pivot_tolerance || !ratio.is_finite() {
            return Err(FrameError::UnstableStructure { dof: free[i] });
        }
        min_ratio = min_ratio.min(ratio);
    }

    let solution = lu
        .solve(rhs)
        .ok_or(FrameError::UnstableStructure { dof: free[0] })?;

    Ok(ReducedSolve {
        solution,
        min_pivot_ratio: min_ratio,
    })
}

/// Index of the largest displacement magnitude, used to name a near-mechanism DOF
fn largest_component(solution: &Vec) -> usize {
    solution.iamax()
}
