//! Concentrated moments applied at an element end

use serde::{Deserialize, Serialize};

/// Element end a moment acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementEnd {
    Node0,
    Node1,
}

impl ElementEnd {
    /// Offset of this end's first DOF in the element equation list
    pub fn dof_offset(&self) -> usize {
        match self {
            ElementEnd::Node0 => 0,
            ElementEnd::Node1 => 3,
        }
    }
}

/// A concentrated moment at one end of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementEndMoment {
    /// Loaded element index
    pub element: usize,
    /// Which end receives the moment
    pub end: ElementEnd,
    /// Moment magnitude, counter-clockwise positive
    pub m: f64,
}

impl ElementEndMoment {
    pub fn new(element: usize, end: ElementEnd, m: f64) -> Self {
        Self { element, end, m }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            m: self.m * factor,
            ..*self
        }
    }
}
