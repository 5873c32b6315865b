//! Ride planning and fairness reporting.
//!
//! `RidePlanner` turns a driver suggestion into a complete, persistable
//! `Ride` record; `FairnessReport` computes the per-member numbers a UI
//! shows next to the suggestion. Both are read-only over the group
//! snapshot; persisting the planned ride stays the caller's job.

mod report;
mod ride_planner;

pub use report::{FairnessReport, MemberLoad};
pub use ride_planner::{PlanRequest, RidePlanner};
