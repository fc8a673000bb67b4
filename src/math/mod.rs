//! Mathematical utilities for 2D frame calculations

mod polynomial;
pub mod solver;

use nalgebra::{DMatrix, DVector, Matrix6, Vector6};

pub use polynomial::Polynomial;
pub use solver::{solve_reduced_system, ReducedSolve};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 6x6 matrix for element stiffness and transformation
pub type Mat6 = Matrix6<f64>;
/// 6-element vector for element end forces/displacements [Fx0, Fy0, M0, Fx1, Fy1, M1]
pub type Vec6 = Vector6<f64>;

/// Number of degrees of freedom per node (Fx, Fy, M)
pub const DOF_PER_NODE: usize = 3;

/// Compute the local stiffness matrix for a 2D frame element
///
/// # Arguments
/// * `ea` - Axial stiffness (E * A)
/// * `ei` - Bending stiffness (E * I)
/// * `length` - Element length
///
/// # Returns
/// 6x6 local stiffness matrix ordered [u0, v0, θ0, u1, v1, θ1]
pub fn frame_local_stiffness(ea: f64, ei: f64, length: f64) -> Mat6 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = ea / l;
    let ei_l3 = ei / l3;
    let ei_l2 = ei / l2;
    let ei_l = ei / l;

    #[rustfmt::skip]
    let data = [
        // Row 0: axial at node 0
        ea_l,   0.0,           0.0,          -ea_l,  0.0,           0.0,
        // Row 1: shear at node 0
        0.0,    12.0*ei_l3,    6.0*ei_l2,    0.0,    -12.0*ei_l3,   6.0*ei_l2,
        // Row 2: moment at node 0
        0.0,    6.0*ei_l2,     4.0*ei_l,     0.0,    -6.0*ei_l2,    2.0*ei_l,
        // Row 3: axial at node 1
        -ea_l,  0.0,           0.0,          ea_l,   0.0,           0.0,
        // Row 4: shear at node 1
        0.0,    -12.0*ei_l3,   -6.0*ei_l2,   0.0,    12.0*ei_l3,    -6.0*ei_l2,
        // Row 5: moment at node 1
        0.0,    6.0*ei_l2,     2.0*ei_l,     0.0,    -6.0*ei_l2,    4.0*ei_l,
    ];

    Mat6::from_row_slice(&data)
}

/// Compute the transformation matrix for a 2D frame element
///
/// Rotates global vectors into the element frame: `d_local = T * d_global`.
/// The rotational DOF is invariant in the plane.
///
/// # Arguments
/// * `cos` - Cosine of the element angle
/// * `sin` - Sine of the element angle
pub fn frame_transformation_matrix(cos: f64, sin: f64) -> Mat6 {
    let mut t = Mat6::zeros();

    for block in 0..2 {
        let o = block * DOF_PER_NODE;
        t[(o, o)] = cos;
        t[(o, o + 1)] = sin;
        t[(o + 1, o)] = -sin;
        t[(o + 1, o + 1)] = cos;
        t[(o + 2, o + 2)] = 1.0;
    }

    t
}

/// Equivalent nodal loads for a linearly varying load in local coordinates
///
/// The axial intensity varies from `a0` to `a1` and the perpendicular intensity
/// from `p0` to `p1` over the element length. The returned vector is what gets
/// added to the load vector; its negative is the fixed-end reaction set.
pub fn equivalent_nodal_loads(a0: f64, a1: f64, p0: f64, p1: f64, length: f64) -> Vec6 {
    let l = length;
    let l2 = l * l;

    Vec6::new(
        l * (2.0 * a0 + a1) / 6.0,
        l * (7.0 * p0 + 3.0 * p1) / 20.0,
        l2 * (3.0 * p0 + 2.0 * p1) / 60.0,
        l * (a0 + 2.0 * a1) / 6.0,
        l * (3.0 * p0 + 7.0 * p1) / 20.0,
        -l2 * (2.0 * p0 + 3.0 * p1) / 60.0,
    )
}

/// Fixed end reactions for a linearly varying load in local coordinates
pub fn fixed_end_reactions(a0: f64, a1: f64, p0: f64, p1: f64, length: f64) -> Vec6 {
    -equivalent_nodal_loads(a0, a1, p0, p1, length)
}

/// Cubic Hermite coefficients of the transverse deflection v(u)
///
/// `d` holds the local end displacements [u0, v0, θ0, u1, v1, θ1].
pub fn hermite_deflection(d: &Vec6, length: f64) -> Polynomial {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;
    let (v0, t0, v1, t1) = (d[1], d[2], d[4], d[5]);

    Polynomial::new([
        v0,
        t0,
        -3.0 * v0 / l2 - 2.0 * t0 / l + 3.0 * v1 / l2 - t1 / l,
        2.0 * v0 / l3 + t0 / l2 - 2.0 * v1 / l3 + t1 / l2,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transformation_matrix_horizontal() {
        let t = frame_transformation_matrix(1.0, 0.0);
        assert_relative_eq!(t, Mat6::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_transformation_matrix_vertical() {
        // Element pointing up: local x = global Y, local y = -global X
        let t = frame_transformation_matrix(0.0, 1.0);
        assert_relative_eq!(t[(0, 1)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(t[(1, 0)], -1.0, epsilon = 1e-12);
        assert_relative_eq!(t[(2, 2)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(t[(3, 4)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transformation_is_orthogonal() {
        let theta: f64 = 0.7;
        let t = frame_transformation_matrix(theta.cos(), theta.sin());
        assert_relative_eq!(t * t.transpose(), Mat6::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_local_stiffness_symmetry() {
        let k = frame_local_stiffness(2.0e9, 8.0e6, 5.0);
        assert_relative_eq!(k, k.transpose(), epsilon = 1e-6);
    }

    #[test]
    fn test_local_stiffness_terms() {
        let (ea, ei, l) = (1.0e6, 2.0e4, 4.0);
        let k = frame_local_stiffness(ea, ei, l);
        assert_relative_eq!(k[(0, 0)], ea / l);
        assert_relative_eq!(k[(1, 1)], 12.0 * ei / l.powi(3));
        assert_relative_eq!(k[(1, 2)], 6.0 * ei / l.powi(2));
        assert_relative_eq!(k[(2, 2)], 4.0 * ei / l);
        assert_relative_eq!(k[(2, 5)], 2.0 * ei / l);
        assert_relative_eq!(k[(4, 5)], -6.0 * ei / l.powi(2));
    }

    #[test]
    fn test_local_stiffness_rigid_body_modes() {
        let k = frame_local_stiffness(1.0e6, 2.0e4, 3.0);
        // Translation in x, translation in y, and rotation about node 0
        let tx = Vec6::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let ty = Vec6::new(0.0, 1.0, 0.0, 0.0, 1.0, 0.0);
        let rz = Vec6::new(0.0, 0.0, 1.0, 0.0, 3.0, 1.0);
        for mode in [tx, ty, rz] {
            assert_relative_eq!((k * mode).norm(), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_uniform_load_equivalents() {
        let (w, l) = (-10.0, 6.0);
        let f = equivalent_nodal_loads(0.0, 0.0, w, w, l);
        assert_relative_eq!(f[1], w * l / 2.0, epsilon = 1e-12);
        assert_relative_eq!(f[4], w * l / 2.0, epsilon = 1e-12);
        assert_relative_eq!(f[2], w * l * l / 12.0, epsilon = 1e-12);
        assert_relative_eq!(f[5], -w * l * l / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_triangular_load_equivalents() {
        let (w, l) = (30.0, 2.0);
        let f = equivalent_nodal_loads(0.0, 0.0, 0.0, w, l);
        assert_relative_eq!(f[1], 3.0 * w * l / 20.0, epsilon = 1e-12);
        assert_relative_eq!(f[4], 7.0 * w * l / 20.0, epsilon = 1e-12);
        assert_relative_eq!(f[2], w * l * l / 30.0, epsilon = 1e-12);
        assert_relative_eq!(f[5], -w * l * l / 20.0, epsilon = 1e-12);
        let rxn = fixed_end_reactions(0.0, 0.0, 0.0, w, l);
        assert_relative_eq!(rxn[1], -3.0 * w * l / 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_axial_load_equivalents() {
        let f = equivalent_nodal_loads(2.0, 2.0, 0.0, 0.0, 3.0);
        assert_relative_eq!(f[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(f[3], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hermite_matches_end_values() {
        let d = Vec6::new(0.0, 0.01, -0.002, 0.0, -0.03, 0.004);
        let l = 5.0;
        let v = hermite_deflection(&d, l);
        assert_relative_eq!(v.eval(0.0), 0.01, epsilon = 1e-12);
        assert_relative_eq!(v.eval(l), -0.03, epsilon = 1e-12);
        assert_relative_eq!(v.derivative().eval(0.0), -0.002, epsilon = 1e-12);
        assert_relative_eq!(v.derivative().eval(l), 0.004, epsilon = 1e-12);
    }
}
