//! Load cases

use serde::{Deserialize, Serialize};

use super::LoadSet;

/// A named group of loads that can be factored into combinations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCase {
    /// Name of the load case
    pub name: String,
    /// Description of the load case
    pub description: Option<String>,
    /// Loads belonging to this case
    pub loads: LoadSet,
}

impl LoadCase {
    /// Create a new load case
    pub fn new(name: &str, loads: LoadSet) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            loads,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}
