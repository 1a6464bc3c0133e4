mod medal;
mod tracker;

pub use medal::{LevelRecord, Medal};
pub use tracker::{ObjectiveTracker, ObjectiveUpdate};
