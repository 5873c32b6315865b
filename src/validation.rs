//! Structural validation for group data.
//!
//! Checks integrity of a roster and its ride log before trusting them
//! for planning or display. Detects:
//! - Duplicate member or ride IDs
//! - Rides with no participants
//! - Ride participants unknown to the roster
//! - A driver who is not a participant of their own ride
//!
//! All findings are reported at once rather than failing on the first.

use crate::models::{Member, Ride};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A ride has no participants.
    EmptyParticipants,
    /// A ride references a member not on the roster.
    UnknownMember,
    /// A ride's driver is not among its participants.
    DriverNotParticipant,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster and its ride log.
///
/// Checks:
/// 1. No duplicate member IDs
/// 2. No duplicate ride IDs
/// 3. Every ride has at least one participant
/// 4. Every participant and driver is on the roster
/// 5. Every driver is a participant of their own ride
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_group(members: &[Member], rides: &[Ride]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut roster: HashSet<&str> = HashSet::new();
    for m in members {
        if !roster.insert(m.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate member ID: {}", m.id),
            ));
        }
    }

    let mut ride_ids: HashSet<&str> = HashSet::new();
    for ride in rides {
        if !ride_ids.insert(ride.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate ride ID: {}", ride.id),
            ));
        }
        check_ride(ride, &roster, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a single ride against a roster.
///
/// Same per-ride checks as [`validate_group`], for callers appending one
/// ride to an already-trusted log.
pub fn validate_ride(ride: &Ride, members: &[Member]) -> ValidationResult {
    let roster: HashSet<&str> = members.iter().map(|m| m.id.as_str()).collect();
    let mut errors = Vec::new();
    check_ride(ride, &roster, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_ride(ride: &Ride, roster: &HashSet<&str>, errors: &mut Vec<ValidationError>) {
    if ride.participants.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyParticipants,
            format!("Ride '{}' has no participants", ride.id),
        ));
    }

    for p in &ride.participants {
        if !roster.contains(p.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownMember,
                format!("Ride '{}' references unknown member '{}'", ride.id, p),
            ));
        }
    }

    if !ride.driver_id.is_empty() {
        if !roster.contains(ride.driver_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownMember,
                format!(
                    "Ride '{}' references unknown member '{}'",
                    ride.id, ride.driver_id
                ),
            ));
        }
        if !ride.has_participant(&ride.driver_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DriverNotParticipant,
                format!(
                    "Ride '{}' driver '{}' is not a participant",
                    ride.id, ride.driver_id
                ),
            ));
        }
    }
}
