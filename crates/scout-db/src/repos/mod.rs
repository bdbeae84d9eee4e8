//! Repository methods on [`ScoutDb`](crate::ScoutDb), one module per table.

pub mod paper;
pub mod project;
