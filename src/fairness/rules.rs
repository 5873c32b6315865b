//! Built-in fairness rules.
//!
//! # Catalog
//!
//! - **WLOAD**: decay-weighted driving load (the stock primary rule)
//! - **COUNT**: undecayed drive count (plain rotation, no recency decay)
//! - **LRD**: least-recent driver (the stock tie-breaker)
//!
//! # Score Convention
//! All rules return lower scores for members more overdue to drive.

use super::{Candidate, FairnessContext, FairnessRule, RuleScore};

/// Decay-weighted driving load.
///
/// Each ride a member drove contributes `decay ^ months` of load, so old
/// rides fade smoothly instead of falling off a cliff. The member with the
/// least accumulated load drives next.
#[derive(Debug, Clone, Copy)]
pub struct WeightedLoad;

impl FairnessRule for WeightedLoad {
    fn name(&self) -> &'static str {
        "WLOAD"
    }

    fn evaluate(&self, candidate: &Candidate, _context: &FairnessContext) -> RuleScore {
        candidate.weighted_load
    }

    fn description(&self) -> &'static str {
        "Decay-weighted driving load"
    }
}

/// Undecayed drive count.
///
/// Alternative primary rule for groups that want a plain turn count where
/// a two-year-old drive weighs the same as yesterday's.
#[derive(Debug, Clone, Copy)]
pub struct DriveCount;

impl FairnessRule for DriveCount {
    fn name(&self) -> &'static str {
        "COUNT"
    }

    fn evaluate(&self, candidate: &Candidate, _context: &FairnessContext) -> RuleScore {
        candidate.drive_count as f64
    }

    fn description(&self) -> &'static str {
        "Undecayed drive count"
    }
}

/// Least-recent driver.
///
/// Scores by last-drive instant, so whoever drove longest ago comes first.
/// Never-driven members carry epoch-zero and therefore beat any real date.
#[derive(Debug, Clone, Copy)]
pub struct LeastRecent;

impl FairnessRule for LeastRecent {
    fn name(&self) -> &'static str {
        "LRD"
    }

    fn evaluate(&self, candidate: &Candidate, _context: &FairnessContext) -> RuleScore {
        candidate.last_drive_ms as f64
    }

    fn description(&self) -> &'static str {
        "Least-recent driver"
    }
}
