//! Ride model.
//!
//! A ride is an immutable historical fact: on a given day, a set of members
//! travelled from an origin to a destination and exactly one of them drove.
//! Rides carry day granularity only; there is no time-of-day semantics.
//!
//! # Time Representation
//!
//! Dates are calendar dates (`chrono::NaiveDate`). Fairness arithmetic runs
//! on epoch milliseconds; [`Ride::date_ms`] converts at midnight UTC.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A logged carpool ride.
///
/// Belongs to exactly one group. A correct caller keeps the driver among
/// the participants; [`crate::validation`] checks it, the fairness engine
/// does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ride {
    /// Unique ride identifier.
    pub id: String,
    /// Owning group identifier.
    pub group_id: String,
    /// Calendar date of the ride (day granularity).
    pub date: NaiveDate,
    /// Origin label (free text, e.g. "Campus").
    pub origin: String,
    /// Destination label.
    pub destination: String,
    /// Member IDs who took part. Non-empty for a well-formed ride.
    pub participants: Vec<String>,
    /// Member ID of the driver.
    pub driver_id: String,
    /// Domain-specific key-value metadata.
    pub attributes: HashMap<String, String>,
}

impl Ride {
    /// Creates a new ride record.
    pub fn new(id: impl Into<String>, group_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            date,
            origin: String::new(),
            destination: String::new(),
            participants: Vec::new(),
            driver_id: String::new(),
            attributes: HashMap::new(),
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

    /// Adds a single participant.
    pub fn with_participant(mut self, member_id: impl Into<String>) -> Self {
        self.participants.push(member_id.into());
        self
    }

    /// Sets the participant list, deduplicated preserving first occurrence.
    pub fn with_participants<I, S>(mut self, member_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants.clear();
        for id in member_ids {
            let id = id.into();
            if !self.participants.contains(&id) {
                self.participants.push(id);
            }
        }
        self
    }

    /// Sets the driver.
    pub fn with_driver(mut self, member_id: impl Into<String>) -> Self {
        self.driver_id = member_id.into();
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The ride date as epoch milliseconds at midnight UTC.
    #[inline]
    pub fn date_ms(&self) -> i64 {
        self.date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis()
    }

    /// Whether the given member took part.
    pub fn has_participant(&self, member_id: &str) -> bool {
        self.participants.iter().any(|p| p == member_id)
    }

    /// Number of participants.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}
