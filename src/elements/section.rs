//! Section properties for frame elements

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Cross-section properties for in-plane bending
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area in m²
    pub a: f64,
    /// Moment of inertia about the bending axis in m⁴
    pub i: f64,
    /// Depth of section (optional) in m
    pub depth: Option<f64>,
}

impl Section {
    /// Create a new section with basic properties
    pub fn new(a: f64, i: f64) -> Self {
        Self { a, i, depth: None }
    }

    /// Create a rectangular section bending about its strong axis
    pub fn rectangular(width: f64, depth: f64) -> Self {
        Self {
            a: width * depth,
            i: width * depth.powi(3) / 12.0,
            depth: Some(depth),
        }
    }

    /// Create a solid circular section
    pub fn circular(diameter: f64) -> Self {
        let r = diameter / 2.0;
        Self {
            a: PI * r.powi(2),
            i: PI * r.powi(4) / 4.0,
            depth: Some(diameter),
        }
    }

    /// Create a hollow circular (pipe) section
    pub fn pipe(outer_diameter: f64, wall_thickness: f64) -> Self {
        let r_o = outer_diameter / 2.0;
        let r_i = r_o - wall_thickness;
        Self {
            a: PI * (r_o.powi(2) - r_i.powi(2)),
            i: PI * (r_o.powi(4) - r_i.powi(4)) / 4.0,
            depth: Some(outer_diameter),
        }
    }

    /// Elastic section modulus I / c, if the depth is known
    pub fn elastic_modulus(&self) -> Option<f64> {
        self.depth.map(|d| self.i / (d / 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangular_section() {
        let s = Section::rectangular(0.3, 0.5);
        assert_relative_eq!(s.a, 0.15);
        assert_relative_eq!(s.i, 0.3 * 0.125 / 12.0);
        assert_relative_eq!(s.elastic_modulus().unwrap(), 0.3 * 0.25 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pipe_reduces_to_circle() {
        let d = 0.2;
        let solid = Section::circular(d);
        let pipe = Section::pipe(d, d / 2.0);
        assert_relative_eq!(solid.a, pipe.a, epsilon = 1e-12);
        assert_relative_eq!(solid.i, pipe.i, epsilon = 1e-12);
    }
}
