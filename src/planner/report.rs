//! Fairness metrics per member.
//!
//! Computes the numbers a group screen shows next to the "who drives
//! next" suggestion.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Weighted load | Sum of `decay^months` over rides driven |
//! | Drive count | Undecayed number of rides driven |
//! | Last drive | Date of the most recent drive, if any |
//! | Share | Member's fraction of the group's total weighted load |
//! | Spread | Max − min weighted load across the roster |

use chrono::{DateTime, NaiveDate};

use crate::fairness::{FairnessContext, FairnessEngine};
use crate::models::Group;

/// One roster member's driving metrics.
#[derive(Debug, Clone)]
pub struct MemberLoad {
    /// Member ID.
    pub member_id: String,
    /// Display name from the roster.
    pub name: String,
    /// Decay-weighted driving load.
    pub weighted_load: f64,
    /// Undecayed drive count.
    pub drive_count: u32,
    /// Most recent drive date. `None` = never driven.
    pub last_drive: Option<NaiveDate>,
    /// Fraction of the group's total weighted load (0.0..1.0).
    pub share: f64,
}

/// Per-member fairness metrics for a group snapshot.
///
/// Rows are ordered by the selection ranking: the suggested next driver
/// comes first.
#[derive(Debug, Clone)]
pub struct FairnessReport {
    /// Metrics per roster member, most overdue first.
    pub loads: Vec<MemberLoad>,
    /// The member the stock policy would pick next.
    pub suggested_driver: Option<String>,
}

impl FairnessReport {
    /// Computes the report with the stock selection policy.
    pub fn compute(group: &Group, context: &FairnessContext) -> Self {
        Self::compute_with(&FairnessEngine::default(), group, context)
    }

    /// Computes the report with a caller-supplied engine.
    pub fn compute_with(
        engine: &FairnessEngine,
        group: &Group,
        context: &FairnessContext,
    ) -> Self {
        let roster = group.roster_ids();
        let ranked = engine.rank(&roster, &group.rides, context);

        let total: f64 = ranked.iter().map(|c| c.weighted_load).sum();
        let loads = ranked
            .iter()
            .map(|c| MemberLoad {
                member_id: c.member_id.clone(),
                name: group
                    .member(&c.member_id)
                    .map(|m| m.name.clone())
                    .unwrap_or_default(),
                weighted_load: c.weighted_load,
                drive_count: c.drive_count,
                last_drive: last_drive_date(c.last_drive_ms),
                share: if total > 0.0 {
                    c.weighted_load / total
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            loads,
            suggested_driver: ranked.first().map(|c| c.member_id.clone()),
        }
    }

    /// Max − min weighted load across the roster. 0.0 for empty rosters.
    pub fn spread(&self) -> f64 {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for l in &self.loads {
            min = min.min(l.weighted_load);
            max = max.max(l.weighted_load);
        }
        if self.loads.is_empty() {
            0.0
        } else {
            max - min
        }
    }

    /// Metrics row for a specific member.
    pub fn load_for(&self, member_id: &str) -> Option<&MemberLoad> {
        self.loads.iter().find(|l| l.member_id == member_id)
    }
}

fn last_drive_date(last_drive_ms: i64) -> Option<NaiveDate> {
    if last_drive_ms == 0 {
        return None;
    }
    DateTime::from_timestamp_millis(last_drive_ms).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, Ride};

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn day(days_since_epoch: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + chrono::Days::new(days_since_epoch)
    }

    fn sample_group() -> Group {
        Group::new("g1", "Morning pool")
            .with_member(Member::new("ana").with_name("Ana"))
            .with_member(Member::new("ben").with_name("Ben"))
            .with_member(Member::new("cho").with_name("Cho"))
            .with_ride(
                Ride::new("r1", "g1", day(10))
                    .with_participants(["ana", "ben", "cho"])
                    .with_driver("ana"),
            )
            .with_ride(
                Ride::new("r2", "g1", day(20))
                    .with_participants(["ana", "ben", "cho"])
                    .with_driver("ana"),
            )
            .with_ride(
                Ride::new("r3", "g1", day(25))
                    .with_participants(["ana", "ben", "cho"])
                    .with_driver("ben"),
            )
    }

    #[test]
    fn test_report_rows_ranked_most_overdue_first() {
        let report = FairnessReport::compute(&sample_group(), &FairnessContext::at_ms(30 * DAY_MS));
        let ids: Vec<&str> = report.loads.iter().map(|l| l.member_id.as_str()).collect();
        assert_eq!(ids, vec!["cho", "ben", "ana"]);
        assert_eq!(report.suggested_driver.as_deref(), Some("cho"));
    }

    #[test]
    fn test_report_counts_and_dates() {
        let report = FairnessReport::compute(&sample_group(), &FairnessContext::at_ms(30 * DAY_MS));

        let ana = report.load_for("ana").unwrap();
        assert_eq!(ana.name, "Ana");
        assert_eq!(ana.drive_count, 2);
        assert_eq!(ana.last_drive, Some(day(20)));

        let cho = report.load_for("cho").unwrap();
        assert_eq!(cho.drive_count, 0);
        assert_eq!(cho.last_drive, None);
        assert_eq!(cho.share, 0.0);
    }

    #[test]
    fn test_shares_sum_to_one_when_loaded() {
        let report = FairnessReport::compute(&sample_group(), &FairnessContext::at_ms(30 * DAY_MS));
        let total: f64 = report.loads.iter().map(|l| l.share).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_spread() {
        let ctx = FairnessContext::at_ms(30 * DAY_MS);
        let report = FairnessReport::compute(&sample_group(), &ctx);
        let max = report.load_for("ana").unwrap().weighted_load;
        assert!((report.spread() - max).abs() < 1e-9); // cho is at zero

        let empty = FairnessReport::compute(&Group::new("g2", "Empty"), &ctx);
        assert_eq!(empty.spread(), 0.0);
        assert_eq!(empty.suggested_driver, None);
    }

    #[test]
    fn test_zero_history_zero_shares() {
        let group = Group::new("g3", "Fresh")
            .with_member(Member::new("ana"))
            .with_member(Member::new("ben"));
        let report = FairnessReport::compute(&group, &FairnessContext::at_ms(0));
        assert!(report.loads.iter().all(|l| l.share == 0.0));
        assert_eq!(report.suggested_driver.as_deref(), Some("ana"));
    }
}
