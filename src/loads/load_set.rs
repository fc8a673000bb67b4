//! Load sets - the three load collections consumed by a solve

use serde::{Deserialize, Serialize};

use super::{DistributedLoad, ElementEndMoment, NodalLoad};

/// Nodal loads, distributed loads and end moments applied together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadSet {
    #[serde(default)]
    pub nodal: Vec<NodalLoad>,
    #[serde(default)]
    pub distributed: Vec<DistributedLoad>,
    #[serde(default)]
    pub end_moments: Vec<ElementEndMoment>,
}

impl LoadSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodal(mut self, load: NodalLoad) -> Self {
        self.nodal.push(load);
        self
    }

    pub fn with_distributed(mut self, load: DistributedLoad) -> Self {
        self.distributed.push(load);
        self
    }

    pub fn with_end_moment(mut self, load: ElementEndMoment) -> Self {
        self.end_moments.push(load);
        self
    }

    pub fn push_nodal(&mut self, load: NodalLoad) {
        self.nodal.push(load);
    }

    pub fn push_distributed(&mut self, load: DistributedLoad) {
        self.distributed.push(load);
    }

    pub fn push_end_moment(&mut self, load: ElementEndMoment) {
        self.end_moments.push(load);
    }

    pub fn is_empty(&self) -> bool {
        self.nodal.is_empty() && self.distributed.is_empty() && self.end_moments.is_empty()
    }

    /// Total number of load records
    pub fn len(&self) -> usize {
        self.nodal.len() + self.distributed.len() + self.end_moments.len()
    }

    /// Scale every load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            nodal: self.nodal.iter().map(|l| l.scaled(factor)).collect(),
            distributed: self.distributed.iter().map(|l| l.scaled(factor)).collect(),
            end_moments: self.end_moments.iter().map(|l| l.scaled(factor)).collect(),
        }
    }

    /// Append every load of `other`
    pub fn extend(&mut self, other: &LoadSet) {
        self.nodal.extend_from_slice(&other.nodal);
        self.distributed.extend_from_slice(&other.distributed);
        self.end_moments.extend_from_slice(&other.end_moments);
    }

    /// Union of two load sets
    pub fn merged(&self, other: &LoadSet) -> Self {
        let mut out = self.clone();
        out.extend(other);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::ElementEnd;

    #[test]
    fn test_builder_and_merge() {
        let a = LoadSet::new()
            .with_nodal(NodalLoad::force(1, 0.0, -10.0))
            .with_distributed(DistributedLoad::local(0, -2.0, -2.0));
        let b = LoadSet::new().with_end_moment(ElementEndMoment::new(0, ElementEnd::Node1, 5.0));

        let ab = a.merged(&b);
        assert_eq!(ab.len(), 3);
        assert_eq!(ab.end_moments[0].m, 5.0);
        assert!(LoadSet::new().is_empty());
    }

    #[test]
    fn test_scaled() {
        let a = LoadSet::new()
            .with_nodal(NodalLoad::new(1, 1.0, 2.0, 3.0))
            .with_end_moment(ElementEndMoment::new(0, ElementEnd::Node0, -4.0));
        let s = a.scaled(-0.5);
        assert_eq!(s.nodal[0].as_array(), [-0.5, -1.0, -1.5]);
        assert_eq!(s.end_moments[0].m, 2.0);
    }
}
