//! Fairness context: reference time and decay factor.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Monthly retention factor: a month-old ride counts 8% less than a
/// fresh one. Smooth recency decay, not a cutoff window.
pub const DEFAULT_DECAY_PER_MONTH: f64 = 0.92;

/// Milliseconds in the 30-day month used for decay arithmetic.
///
/// Not a calendar month: parity with existing ride logs requires this
/// exact constant.
pub const MONTH_MS: i64 = 1000 * 60 * 60 * 24 * 30;

/// Evaluation context passed to fairness rules.
///
/// Carries the instant treated as "now" and the decay factor. Keeping the
/// reference time explicit (instead of reading the clock inside the engine)
/// is what makes selection deterministic and testable.
#[derive(Debug, Clone)]
pub struct FairnessContext {
    /// Reference instant (epoch ms). Ride ages are measured against this.
    pub reference_ms: i64,
    /// Per-month retention factor in (0, 1].
    pub decay_per_month: f64,
}

impl FairnessContext {
    /// Creates a context at the current wall-clock time.
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Creates a context pinned to the given instant.
    pub fn at(reference: DateTime<Utc>) -> Self {
        Self::at_ms(reference.timestamp_millis())
    }

    /// Creates a context pinned to midnight UTC of the given date.
    pub fn at_date(reference: NaiveDate) -> Self {
        Self::at(reference.and_time(NaiveTime::MIN).and_utc())
    }

    /// Creates a context from raw epoch milliseconds.
    pub fn at_ms(reference_ms: i64) -> Self {
        Self {
            reference_ms,
            decay_per_month: DEFAULT_DECAY_PER_MONTH,
        }
    }

    /// Overrides the decay factor.
    pub fn with_decay(mut self, decay_per_month: f64) -> Self {
        self.decay_per_month = decay_per_month;
        self
    }

    /// Decay weight of a ride dated `ride_ms`, seen from the reference time.
    ///
    /// `decay ^ elapsed_months` with elapsed time floored at zero: a ride
    /// dated after the reference contributes full weight, never more.
    pub fn weight_at(&self, ride_ms: i64) -> f64 {
        let elapsed_months =
            ((self.reference_ms - ride_ms) as f64 / MONTH_MS as f64).max(0.0);
        self.decay_per_month.powf(elapsed_months)
    }
}
