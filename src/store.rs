//! Group storage port.
//!
//! The persistence backend is an external collaborator: this module only
//! fixes the operations the rest of the system needs (create a group, join
//! by invite code, list members, log rides) as the [`GroupStore`] trait,
//! plus an in-memory reference implementation for embedding and tests.
//! Real-time change notification is the backend's concern, not modeled
//! here.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Group, Member, Ride};
use crate::planner::{PlanRequest, RidePlanner};
use crate::validation::validate_ride;

/// Operations a group backend must provide.
pub trait GroupStore {
    /// Creates a group owned by `owner`, minting an ID and invite code.
    fn create_group(&mut self, name: &str, owner: Member) -> Result<Group>;

    /// Adds a member via invite code. Returns the group ID. Joining a
    /// group the member already belongs to is a no-op.
    fn join(&mut self, invite_code: &str, member: Member) -> Result<String>;

    /// Fetches a group snapshot.
    fn group(&self, group_id: &str) -> Result<&Group>;

    /// Lists a group's roster in join order.
    fn members(&self, group_id: &str) -> Result<&[Member]>;

    /// Lists a group's ride log in append order.
    fn rides(&self, group_id: &str) -> Result<&[Ride]>;

    /// Plans a ride (driver selection included) and appends it to the log.
    fn log_ride(&mut self, group_id: &str, request: &PlanRequest) -> Result<Ride>;
}

/// Invite codes avoid characters that read ambiguously when shared aloud.
const INVITE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const INVITE_LEN: usize = 6;

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ID_LEN: usize = 8;

/// In-memory [`GroupStore`] reference implementation.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use fairpool::models::Member;
/// use fairpool::planner::PlanRequest;
/// use fairpool::store::{GroupStore, MemoryStore};
///
/// let mut store = MemoryStore::with_seed(7);
/// let group = store.create_group("Morning pool", Member::new("ana")).unwrap();
/// store.join(&group.invite_code, Member::new("ben")).unwrap();
///
/// let request = PlanRequest::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// let ride = store.log_ride(&group.id, &request).unwrap();
/// assert_eq!(ride.driver_id, "ana");
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    groups: HashMap<String, Group>,
    invite_index: HashMap<String, String>,
    planner: RidePlanner,
    rng: SmallRng,
}

impl MemoryStore {
    /// Creates a store seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_os_rng())
    }

    /// Creates a store with a fixed seed (deterministic IDs and codes).
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    /// Replaces the ride planner (selection policy).
    pub fn with_planner(mut self, planner: RidePlanner) -> Self {
        self.planner = planner;
        self
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            groups: HashMap::new(),
            invite_index: HashMap::new(),
            planner: RidePlanner::new(),
            rng,
        }
    }

    /// Number of groups held.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn mint(&mut self, alphabet: &[u8], len: usize) -> String {
        (0..len)
            .map(|_| alphabet[self.rng.random_range(0..alphabet.len())] as char)
            .collect()
    }

    fn mint_invite_code(&mut self) -> String {
        self.mint(INVITE_ALPHABET, INVITE_LEN)
    }

    fn mint_id(&mut self, prefix: &str) -> String {
        let suffix = self.mint(ID_ALPHABET, ID_LEN);
        format!("{prefix}-{suffix}")
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupStore for MemoryStore {
    fn create_group(&mut self, name: &str, owner: Member) -> Result<Group> {
        let id = self.mint_id("grp");
        let code = self.mint_invite_code();

        let group = Group::new(id.clone(), name)
            .with_invite_code(code.clone())
            .with_owner(owner.id.clone())
            .with_member(owner);

        info!(group = %id, invite_code = %code, "created group");
        self.invite_index.insert(code, id.clone());
        self.groups.insert(id, group.clone());
        Ok(group)
    }

    fn join(&mut self, invite_code: &str, member: Member) -> Result<String> {
        let group_id = self
            .invite_index
            .get(invite_code)
            .cloned()
            .ok_or_else(|| Error::UnknownInviteCode(invite_code.to_string()))?;

        let group = self
            .groups
            .get_mut(&group_id)
            .ok_or_else(|| Error::GroupNotFound(group_id.clone()))?;

        let member_id = member.id.clone();
        if group.add_member(member) {
            info!(group = %group_id, member = %member_id, "member joined");
        }
        Ok(group_id)
    }

    fn group(&self, group_id: &str) -> Result<&Group> {
        self.groups
            .get(group_id)
            .ok_or_else(|| Error::GroupNotFound(group_id.to_string()))
    }

    fn members(&self, group_id: &str) -> Result<&[Member]> {
        Ok(&self.group(group_id)?.members)
    }

    fn rides(&self, group_id: &str) -> Result<&[Ride]> {
        Ok(&self.group(group_id)?.rides)
    }

    fn log_ride(&mut self, group_id: &str, request: &PlanRequest) -> Result<Ride> {
        if !self.groups.contains_key(group_id) {
            return Err(Error::GroupNotFound(group_id.to_string()));
        }
        let ride_id = self.mint_id("ride");

        let group = self
            .groups
            .get(group_id)
            .ok_or_else(|| Error::GroupNotFound(group_id.to_string()))?;
        let ride = self.planner.plan(group, ride_id, request)?;

        validate_ride(&ride, &group.members).map_err(|errors| {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            Error::InvalidRide(messages.join("; "))
        })?;

        let group = self
            .groups
            .get_mut(group_id)
            .ok_or_else(|| Error::GroupNotFound(group_id.to_string()))?;
        group.add_ride(ride.clone());

        debug!(group = %group_id, ride = %ride.id, driver = %ride.driver_id, "logged ride");
        Ok(ride)
    }
}
