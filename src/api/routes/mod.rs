pub mod charts;
pub mod matches;
