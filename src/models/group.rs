//! Group model.
//!
//! A group is a roster of members plus the rides logged against it. Driver
//! selection for a new ride depends only on the group's own log, so the
//! group is the natural snapshot unit handed to the fairness engine.

use serde::{Deserialize, Serialize};

use super::{Member, Ride};

/// A carpool group: roster + ride log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Code other users redeem to join.
    pub invite_code: String,
    /// Member ID of the group creator.
    pub owner_id: String,
    /// Roster, in join order.
    pub members: Vec<Member>,
    /// Ride log, in append order.
    pub rides: Vec<Ride>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            invite_code: String::new(),
            owner_id: String::new(),
            members: Vec::new(),
            rides: Vec::new(),
        }
    }

    /// Sets the invite code.
    pub fn with_invite_code(mut self, code: impl Into<String>) -> Self {
        self.invite_code = code.into();
        self
    }

    /// Sets the owner.
    pub fn with_owner(mut self, member_id: impl Into<String>) -> Self {
        self.owner_id = member_id.into();
        self
    }

    /// Adds a member (no-op when the ID is already on the roster).
    pub fn with_member(mut self, member: Member) -> Self {
        self.add_member(member);
        self
    }

    /// Adds a ride to the log.
    pub fn with_ride(mut self, ride: Ride) -> Self {
        self.rides.push(ride);
        self
    }

    /// Adds a member, keeping the roster a set. Returns whether it was new.
    pub fn add_member(&mut self, member: Member) -> bool {
        if self.is_member(&member.id) {
            return false;
        }
        self.members.push(member);
        true
    }

    /// Appends a ride to the log.
    pub fn add_ride(&mut self, ride: Ride) {
        self.rides.push(ride);
    }

    /// Looks up a member by ID.
    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    /// Whether the ID is on the roster.
    pub fn is_member(&self, member_id: &str) -> bool {
        self.member(member_id).is_some()
    }

    /// Roster IDs in join order.
    pub fn roster_ids(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.id.as_str()).collect()
    }

    /// Rides driven by the given member.
    pub fn rides_for_driver(&self, member_id: &str) -> Vec<&Ride> {
        self.rides
            .iter()
            .filter(|r| r.driver_id == member_id)
            .collect()
    }

    /// Number of members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Number of logged rides.
    pub fn ride_count(&self) -> usize {
        self.rides.len()
    }
}
