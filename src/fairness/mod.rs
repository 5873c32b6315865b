//! Fairness rules and the driver-selection engine.
//!
//! Ranks the members present for a ride and picks the next driver.
//! Selection is a pure computation over a history snapshot: the caller
//! supplies the present set, the ride log, and a [`FairnessContext`]
//! carrying the reference time; nothing reads the wall clock unless
//! the caller asks for it via [`FairnessContext::now`].
//!
//! # Usage
//!
//! ```
//! use fairpool::fairness::{FairnessContext, FairnessEngine, rules};
//!
//! let engine = FairnessEngine::new()
//!     .with_rule(rules::WeightedLoad)
//!     .with_rule(rules::LeastRecent);
//!
//! let context = FairnessContext::at_ms(0);
//! // let next = engine.select_driver(&present, &history, &context);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Hunter (1986), "The Exponentially Weighted Moving Average"

mod candidate;
mod context;
mod engine;
pub mod rules;

pub use candidate::Candidate;
pub use context::{FairnessContext, DEFAULT_DECAY_PER_MONTH, MONTH_MS};
pub use engine::FairnessEngine;

use std::fmt::Debug;

/// Score returned by a fairness rule.
///
/// Lower scores = picked sooner. The member with the smallest score under
/// the primary rule drives next.
pub type RuleScore = f64;

/// A fairness rule that scores a driver candidate.
///
/// # Score Convention
/// **Lower score = picked sooner.** Rules return smaller values for members
/// who are more overdue to drive.
pub trait FairnessRule: Send + Sync + Debug {
    /// Rule name (e.g., "WLOAD", "LRD").
    fn name(&self) -> &'static str;

    /// Scores a candidate given the fairness context.
    ///
    /// Returns a score where lower = picked sooner.
    fn evaluate(&self, candidate: &Candidate, context: &FairnessContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
