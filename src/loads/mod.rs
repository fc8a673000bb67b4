//! Load types and load combinations

mod distributed;
mod end_moment;
mod load_case;
mod load_combo;
mod load_set;
mod node_load;

pub use distributed::{DistributedLoad, LoadDirection};
pub use end_moment::{ElementEnd, ElementEndMoment};
pub use load_case::LoadCase;
pub use load_combo::LoadCombination;
pub use load_set::LoadSet;
pub use node_load::NodalLoad;
