//! Material properties

use serde::{Deserialize, Serialize};

/// Linear elastic material for frame members
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
}

impl Material {
    /// Create a new material with given properties
    pub fn new(e: f64, nu: f64) -> Self {
        Self { e, nu }
    }

    /// Create a standard steel material (A36)
    pub fn steel() -> Self {
        Self::new(200e9, 0.3)
    }

    /// Create a concrete material from its compressive strength in Pa
    pub fn concrete(fc: f64) -> Self {
        // ACI estimate: E = 4700 * sqrt(f'c in MPa) MPa
        let fc_mpa = fc / 1e6;
        Self::new(4700.0 * fc_mpa.sqrt() * 1e6, 0.2)
    }

    /// Create an aluminum material (6061-T6)
    pub fn aluminum() -> Self {
        Self::new(68.9e9, 0.33)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_modulus() {
        let c = Material::concrete(25e6);
        assert!((c.e - 23.5e9).abs() < 1e6);
    }
}
