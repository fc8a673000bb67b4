//! Error types for the frame solver

use thiserror::Error;

/// Main error type for frame analysis operations
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Node {0} not found in structure")]
    NodeNotFound(usize),

    #[error("Element {0} not found in structure")]
    ElementNotFound(usize),

    #[error("Node {0} already carries a support")]
    DuplicateSupport(usize),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid load reference: {0}")]
    InvalidLoadReference(String),

    #[error("Load case '{0}' not found")]
    LoadCaseNotFound(String),

    /// Fewer than 3 restrained components; raised before factorisation when
    /// `AnalysisOptions::check_stability` is on. Supports that restrain enough
    /// components but still leave a mechanism (e.g. parallel rollers) surface as
    /// [`FrameError::UnstableStructure`]. [`FrameError::is_instability`] covers both.
    #[error("Under-constrained: {restrained} restrained components, at least 3 required")]
    UnderConstrained { restrained: usize },

    /// Rigid-body mode found by the factorisation at global equation `dof`
    #[error("Structure is unstable: rigid-body mode detected at equation {dof}")]
    UnstableStructure { dof: usize },

    #[error("Statics check failed: equilibrium residual {residual:e}")]
    StaticsCheckFailed { residual: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl FrameError {
    /// True for the failures caused by insufficient or mechanism-forming supports
    pub fn is_instability(&self) -> bool {
        matches!(
            self,
            FrameError::UnderConstrained { .. } | FrameError::UnstableStructure { .. }
        )
    }
}

/// Result type for frame analysis operations
pub type FrameResult<T> = Result<T, FrameError>;
