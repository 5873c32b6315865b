//! Driver-selection engine.
//!
//! Chains fairness rules sequentially: the first rule that separates two
//! candidates decides their order, later rules only break ties. A stable
//! sort keeps fully tied candidates in input order, so selection is a
//! total, deterministic function of its inputs.

use std::sync::Arc;

use tracing::debug;

use super::{rules, Candidate, FairnessContext, FairnessRule};
use crate::models::Ride;

/// A composable driver-selection engine.
///
/// The stock policy ([`FairnessEngine::default`]) ranks by decay-weighted
/// load and breaks ties by least-recent drive — never-driven members first.
///
/// # Example
/// ```
/// use fairpool::fairness::{FairnessContext, FairnessEngine, rules};
///
/// let engine = FairnessEngine::new()
///     .with_rule(rules::DriveCount)
///     .with_rule(rules::LeastRecent);
/// ```
#[derive(Clone)]
pub struct FairnessEngine {
    rules: Vec<Arc<dyn FairnessRule>>,
    epsilon: f64,
}

impl FairnessEngine {
    /// Creates an engine with no rules (every candidate ties).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// Appends a rule. Earlier rules dominate; later ones break ties.
    pub fn with_rule<R: FairnessRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the float-comparison tolerance for tie detection.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Ranks the present members, most overdue first.
    ///
    /// Accumulates candidate statistics in one pass over `history`, then
    /// stable-sorts by the rule chain. Duplicate present IDs collapse to
    /// their first occurrence; rides by absent drivers are ignored.
    pub fn rank(
        &self,
        present: &[&str],
        history: &[Ride],
        context: &FairnessContext,
    ) -> Vec<Candidate> {
        let mut candidates = Candidate::tally(present, history, context);
        // sort_by is stable: fully tied candidates keep input order.
        candidates.sort_by(|a, b| self.compare_sequential(a, b, context));
        candidates
    }

    /// Picks the next driver, or `None` when nobody is present.
    ///
    /// The empty present set is the only "no selection" case; it is a
    /// sentinel, not an error.
    pub fn select_driver(
        &self,
        present: &[&str],
        history: &[Ride],
        context: &FairnessContext,
    ) -> Option<String> {
        let ranked = self.rank(present, history, context);
        let selected = ranked.first().map(|c| c.member_id.clone());
        if let Some(ref driver) = selected {
            debug!(
                driver = %driver,
                candidates = ranked.len(),
                rides = history.len(),
                "selected next driver"
            );
        }
        selected
    }

    fn compare_sequential(
        &self,
        a: &Candidate,
        b: &Candidate,
        context: &FairnessContext,
    ) -> std::cmp::Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a, context);
            let score_b = rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a
                    .partial_cmp(&score_b)
                    .unwrap_or(std::cmp::Ordering::Equal);
            }
        }
        std::cmp::Ordering::Equal
    }
}

impl Default for FairnessEngine {
    /// Weighted load, then least-recent drive.
    fn default() -> Self {
        Self::new()
            .with_rule(rules::WeightedLoad)
            .with_rule(rules::LeastRecent)
    }
}

impl std::fmt::Debug for FairnessEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FairnessEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("epsilon", &self.epsilon)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn day(days_since_epoch: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + chrono::Days::new(days_since_epoch)
    }

    fn ride(id: &str, days_since_epoch: u64, driver: &str) -> Ride {
        Ride::new(id, "g1", day(days_since_epoch))
            .with_participants(["ana", "ben", "cho"])
            .with_driver(driver)
    }

    #[test]
    fn test_empty_present_returns_none() {
        let ctx = FairnessContext::at_ms(0);
        let engine = FairnessEngine::default();
        let history = vec![ride("r1", 0, "ana")];
        assert_eq!(engine.select_driver(&[], &history, &ctx), None);
        assert!(engine.rank(&[], &history, &ctx).is_empty());
    }

    #[test]
    fn test_empty_history_first_in_input_order() {
        let ctx = FairnessContext::at_ms(0);
        let engine = FairnessEngine::default();
        let next = engine.select_driver(&["cho", "ana", "ben"], &[], &ctx);
        assert_eq!(next.as_deref(), Some("cho"));
    }

    #[test]
    fn test_zero_drives_member_selected() {
        let ctx = FairnessContext::at_ms(20 * DAY_MS);
        let engine = FairnessEngine::default();
        let history = vec![
            ride("r1", 1, "ana"),
            ride("r2", 8, "ben"),
            ride("r3", 15, "ana"),
        ];
        // cho never drove
        let next = engine.select_driver(&["ana", "ben", "cho"], &history, &ctx);
        assert_eq!(next.as_deref(), Some("cho"));
    }

    #[test]
    fn test_tie_breaks_by_least_recent_drive() {
        let ctx = FairnessContext::at_ms(60 * DAY_MS);
        let engine = FairnessEngine::new()
            .with_rule(rules::DriveCount)
            .with_rule(rules::LeastRecent);
        let history = vec![ride("r1", 10, "ana"), ride("r2", 40, "ben")];
        // Equal counts; ana drove longer ago
        let next = engine.select_driver(&["ben", "ana"], &history, &ctx);
        assert_eq!(next.as_deref(), Some("ana"));
    }

    #[test]
    fn test_never_driven_beats_any_real_date_on_tie() {
        let ctx = FairnessContext::at_ms(60 * DAY_MS);
        // Count-only primary forces a tie path through LeastRecent
        let engine = FairnessEngine::new()
            .with_rule(rules::DriveCount)
            .with_rule(rules::LeastRecent);
        let history = vec![ride("r1", 1, "ana")];
        let ranked = engine.rank(&["ana", "ben"], &history, &ctx);
        // ben never drove: count 1 vs 0 already separates, so check instants too
        assert_eq!(ranked[0].member_id, "ben");
        assert_eq!(ranked[0].last_drive_ms, 0);
    }

    #[test]
    fn test_decay_prefers_older_single_drive() {
        let ctx = FairnessContext::at_ms(400 * DAY_MS);
        let engine = FairnessEngine::default();
        // ana drove 400 days before reference, ben 1 day before
        let history = vec![ride("r1", 0, "ana"), ride("r2", 399, "ben")];
        let ranked = engine.rank(&["ana", "ben"], &history, &ctx);

        assert_eq!(ranked[0].member_id, "ana");
        assert!(ranked[0].weighted_load < ranked[1].weighted_load);
        // 0.92^13.33 ≈ 0.33, 0.92^0.033 ≈ 0.997
        assert!((ranked[0].weighted_load - 0.92f64.powf(400.0 / 30.0)).abs() < 1e-12);
        assert!((ranked[1].weighted_load - 0.92f64.powf(1.0 / 30.0)).abs() < 1e-12);
    }

    #[test]
    fn test_worked_example_forty_days() {
        // present = [A, B, C]; one ride by A, 40 days before reference
        let ctx = FairnessContext::at_ms(40 * DAY_MS);
        let engine = FairnessEngine::default();
        let history = vec![ride("r1", 0, "ana")];
        let ranked = engine.rank(&["ana", "ben", "cho"], &history, &ctx);

        // B and C tie at zero, B first by input order; A last at ≈0.894
        assert_eq!(ranked[0].member_id, "ben");
        assert_eq!(ranked[1].member_id, "cho");
        assert_eq!(ranked[2].member_id, "ana");
        assert!((ranked[2].weighted_load - 0.894).abs() < 1e-3);

        let next = engine.select_driver(&["ana", "ben", "cho"], &history, &ctx);
        assert_eq!(next.as_deref(), Some("ben"));
    }

    #[test]
    fn test_absent_driver_rides_do_not_affect_ranking() {
        let ctx = FairnessContext::at_ms(30 * DAY_MS);
        let engine = FairnessEngine::default();
        let without = vec![ride("r1", 10, "ana")];
        let with = vec![
            ride("r1", 10, "ana"),
            ride("r2", 20, "dan"),
            ride("r3", 25, "dan"),
        ];
        let a = engine.rank(&["ana", "ben"], &without, &ctx);
        let b = engine.rank(&["ana", "ben"], &with, &ctx);
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_present_ids_single_candidate() {
        let ctx = FairnessContext::at_ms(10 * DAY_MS);
        let engine = FairnessEngine::default();
        let history = vec![ride("r1", 5, "ana")];
        let ranked = engine.rank(&["ana", "ana", "ben", "ana"], &history, &ctx);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[1].member_id, "ana");
        assert_eq!(ranked[1].drive_count, 1);
    }

    #[test]
    fn test_idempotent_with_pinned_reference() {
        let ctx = FairnessContext::at_ms(123 * DAY_MS);
        let engine = FairnessEngine::default();
        let history = vec![
            ride("r1", 3, "ana"),
            ride("r2", 40, "ben"),
            ride("r3", 80, "cho"),
        ];
        let first = engine.select_driver(&["ana", "ben", "cho"], &history, &ctx);
        let second = engine.select_driver(&["ana", "ben", "cho"], &history, &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stable_order_for_fully_tied_candidates() {
        let ctx = FairnessContext::at_ms(0);
        let engine = FairnessEngine::default();
        // No history: everyone ties on load and last drive
        let ranked = engine.rank(&["zoe", "ana", "mia"], &[], &ctx);
        let ids: Vec<&str> = ranked.iter().map(|c| c.member_id.as_str()).collect();
        assert_eq!(ids, vec!["zoe", "ana", "mia"]);
    }

    #[test]
    fn test_no_rules_preserves_input_order() {
        let ctx = FairnessContext::at_ms(30 * DAY_MS);
        let engine = FairnessEngine::new();
        let history = vec![ride("r1", 0, "ben")];
        // Without rules everything ties, so ben stays first despite driving
        let next = engine.select_driver(&["ben", "ana"], &history, &ctx);
        assert_eq!(next.as_deref(), Some("ben"));
    }

    #[test]
    fn test_future_dated_ride_counts_full_weight() {
        let ctx = FairnessContext::at_ms(0);
        let engine = FairnessEngine::default();
        let history = vec![ride("r1", 90, "ana")]; // Dated after the reference
        let ranked = engine.rank(&["ana", "ben"], &history, &ctx);
        assert_eq!(ranked[0].member_id, "ben");
        assert!((ranked[1].weighted_load - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_debug_lists_rule_names() {
        let engine = FairnessEngine::default();
        let dbg = format!("{engine:?}");
        assert!(dbg.contains("WLOAD"));
        assert!(dbg.contains("LRD"));
    }
}
