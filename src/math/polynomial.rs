//! Cubic polynomials used for member diagrams

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg};

/// A polynomial of degree at most 3 in the local coordinate `u`
///
/// Coefficients are stored in ascending power order: `c0 + c1 u + c2 u² + c3 u³`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    pub coefficients: [f64; 4],
}

impl Polynomial {
    pub fn new(coefficients: [f64; 4]) -> Self {
        Self { coefficients }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(c0: f64) -> Self {
        Self::new([c0, 0.0, 0.0, 0.0])
    }

    /// Constant term
    pub fn c0(&self) -> f64 {
        self.coefficients[0]
    }

    /// Linear term
    pub fn c1(&self) -> f64 {
        self.coefficients[1]
    }

    /// Quadratic term
    pub fn c2(&self) -> f64 {
        self.coefficients[2]
    }

    /// Cubic term
    pub fn c3(&self) -> f64 {
        self.coefficients[3]
    }

    /// Evaluate at `u` (Horner)
    pub fn eval(&self, u: f64) -> f64 {
        let [c0, c1, c2, c3] = self.coefficients;
        ((c3 * u + c2) * u + c1) * u + c0
    }

    pub fn derivative(&self) -> Self {
        let [_, c1, c2, c3] = self.coefficients;
        Self::new([c1, 2.0 * c2, 3.0 * c3, 0.0])
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.coefficients.map(|c| c * factor))
    }

    /// Highest power with a non-zero coefficient (0 for the zero polynomial)
    pub fn degree(&self) -> usize {
        self.coefficients
            .iter()
            .rposition(|c| *c != 0.0)
            .unwrap_or(0)
    }

    /// Points in the open interval (0, length) where the derivative vanishes
    pub fn critical_points(&self, length: f64) -> std::vec::Vec<f64> {
        let [b, a2, a3, _] = self.derivative().coefficients;
        // derivative: a3 u² + a2 u + b
        let mut roots = std::vec::Vec::with_capacity(2);
        if a3.abs() > f64::EPSILON * (a2.abs() + b.abs()).max(1.0) {
            let disc = a2 * a2 - 4.0 * a3 * b;
            if disc >= 0.0 {
                let sq = disc.sqrt();
                roots.push((-a2 + sq) / (2.0 * a3));
                roots.push((-a2 - sq) / (2.0 * a3));
            }
        } else if a2 != 0.0 {
            roots.push(-b / a2);
        }
        roots.retain(|u| *u > 0.0 && *u < length);
        roots
    }

    /// Maximum absolute value over [0, length] and where it occurs
    pub fn max_abs(&self, length: f64) -> (f64, f64) {
        let mut best = (self.eval(0.0).abs(), 0.0);
        let candidates = self.critical_points(length);
        for u in candidates.into_iter().chain(std::iter::once(length)) {
            let value = self.eval(u).abs();
            if value > best.0 {
                best = (value, u);
            }
        }
        best
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        let mut c = self.coefficients;
        for (a, b) in c.iter_mut().zip(rhs.coefficients) {
            *a += b;
        }
        Polynomial::new(c)
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scaled(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_eval_and_derivative() {
        let p = Polynomial::new([1.0, -2.0, 0.5, 0.25]);
        assert_relative_eq!(p.eval(2.0), 1.0 - 4.0 + 2.0 + 2.0);
        assert_relative_eq!(p.derivative().eval(2.0), -2.0 + 2.0 + 3.0);
        assert_eq!(p.degree(), 3);
        assert_eq!(Polynomial::constant(4.0).degree(), 0);
    }

    #[test]
    fn test_max_abs_interior_extremum() {
        // Simply supported moment shape w u (L - u) / 2 with w = 8, L = 4
        let p = Polynomial::new([0.0, 16.0, -4.0, 0.0]);
        let (value, at) = p.max_abs(4.0);
        assert_relative_eq!(value, 16.0, epsilon = 1e-12);
        assert_relative_eq!(at, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_max_abs_at_end() {
        let p = Polynomial::new([-1.0, -3.0, 0.0, 0.0]);
        let (value, at) = p.max_abs(2.0);
        assert_relative_eq!(value, 7.0);
        assert_relative_eq!(at, 2.0);
    }
}
