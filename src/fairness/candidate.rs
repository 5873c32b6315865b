//! Driver candidate accumulation.
//!
//! One pass over the ride log turns the present set into scored
//! candidates: decay-weighted load, raw drive count, and last-drive
//! instant per member. Rules read these accumulations; they never touch
//! the log itself.

use std::collections::HashMap;

use super::FairnessContext;
use crate::models::Ride;

/// Per-member driving statistics for one selection.
///
/// `last_drive_ms == 0` means "never driven" and must sort as the most
/// overdue, which epoch-zero does under ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Member ID.
    pub member_id: String,
    /// Sum of decay weights over rides this member drove.
    pub weighted_load: f64,
    /// Undecayed number of rides this member drove.
    pub drive_count: u32,
    /// Most recent drive (epoch ms); 0 = never driven.
    pub last_drive_ms: i64,
}

impl Candidate {
    fn new(member_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            weighted_load: 0.0,
            drive_count: 0,
            last_drive_ms: 0,
        }
    }

    /// Whether this member has never driven.
    #[inline]
    pub fn never_drove(&self) -> bool {
        self.drive_count == 0
    }

    /// Accumulates driving statistics for the present members.
    ///
    /// Present IDs are deduplicated preserving first occurrence, so the
    /// result order is the input order and duplicates cannot double-count.
    /// Rides whose driver is not present contribute nothing.
    pub fn tally(present: &[&str], history: &[Ride], context: &FairnessContext) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = Vec::with_capacity(present.len());
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(present.len());

        for &id in present {
            if !index.contains_key(id) {
                index.insert(id, candidates.len());
                candidates.push(Candidate::new(id));
            }
        }

        for ride in history {
            if let Some(&i) = index.get(ride.driver_id.as_str()) {
                let ride_ms = ride.date_ms();
                let c = &mut candidates[i];
                c.weighted_load += context.weight_at(ride_ms);
                c.drive_count += 1;
                c.last_drive_ms = c.last_drive_ms.max(ride_ms);
            }
        }

        candidates
    }
}
