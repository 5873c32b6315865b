//! Ride planner.
//!
//! # Algorithm
//!
//! 1. Resolve the present set: the request's explicit participants, or the
//!    whole roster when none were selected.
//! 2. Reject participants unknown to the roster and empty candidate sets.
//! 3. Rank via the fairness engine and take the top member as driver.
//! 4. Emit the ride record; the caller persists it.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::fairness::{FairnessContext, FairnessEngine};
use crate::models::{Group, Ride};

/// Input container for planning one ride.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Calendar date of the ride.
    pub date: NaiveDate,
    /// Origin label.
    pub origin: String,
    /// Destination label.
    pub destination: String,
    /// Explicit present set. `None` = whole roster.
    pub participants: Option<Vec<String>>,
    /// Reference time override for decay arithmetic. `None` = wall clock.
    pub reference: Option<DateTime<Utc>>,
}

impl PlanRequest {
    /// Creates a request for the given date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            origin: String::new(),
            destination: String::new(),
            participants: None,
            reference: None,
        }
    }

    /// Sets the origin label.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Sets the destination label.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    /// Restricts the present set to the given members.
    pub fn with_participants<I, S>(mut self, member_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = Some(member_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Pins the reference time (deterministic planning).
    pub fn with_reference(mut self, reference: DateTime<Utc>) -> Self {
        self.reference = Some(reference);
        self
    }
}

/// Plans rides for a group using a fairness engine.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use fairpool::models::{Group, Member};
/// use fairpool::planner::{PlanRequest, RidePlanner};
///
/// let group = Group::new("g1", "Morning pool")
///     .with_member(Member::new("ana"))
///     .with_member(Member::new("ben"));
///
/// let request = PlanRequest::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
///     .with_origin("Campus")
///     .with_destination("Lakeside");
///
/// let ride = RidePlanner::new().plan(&group, "r1", &request).unwrap();
/// assert_eq!(ride.driver_id, "ana");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RidePlanner {
    engine: FairnessEngine,
}

impl RidePlanner {
    /// Creates a planner with the stock selection policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection policy.
    pub fn with_engine(mut self, engine: FairnessEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Suggests the next driver without building a ride.
    pub fn suggest(
        &self,
        group: &Group,
        present: &[&str],
        context: &FairnessContext,
    ) -> Option<String> {
        self.engine.select_driver(present, &group.rides, context)
    }

    /// Plans a complete ride record for the group.
    ///
    /// Does not mutate the group; appending the returned ride to the log
    /// is the caller's (or the store's) responsibility.
    pub fn plan(&self, group: &Group, ride_id: impl Into<String>, request: &PlanRequest) -> Result<Ride> {
        let participants: Vec<String> = match &request.participants {
            Some(selected) => {
                for id in selected {
                    if !group.is_member(id) {
                        return Err(Error::NotAMember {
                            group_id: group.id.clone(),
                            member_id: id.clone(),
                        });
                    }
                }
                selected.clone()
            }
            None => group.members.iter().map(|m| m.id.clone()).collect(),
        };

        if participants.is_empty() {
            return Err(Error::NoCandidates(group.id.clone()));
        }

        let context = match request.reference {
            Some(reference) => FairnessContext::at(reference),
            None => FairnessContext::now(),
        };

        let present: Vec<&str> = participants.iter().map(String::as_str).collect();
        let driver = self
            .engine
            .select_driver(&present, &group.rides, &context)
            // Unreachable with a non-empty present set; first participant stands in.
            .unwrap_or_else(|| participants[0].clone());

        debug!(
            group = %group.id,
            driver = %driver,
            participants = participants.len(),
            "planned ride"
        );

        Ok(Ride::new(ride_id, group.id.clone(), request.date)
            .with_origin(request.origin.clone())
            .with_destination(request.destination.clone())
            .with_participants(participants)
            .with_driver(driver))
    }
}
