//! Member model.
//!
//! A member is a participant in a carpool group. The ID is an opaque token
//! minted by whatever identity provider the embedding application uses;
//! this crate never inspects it. Members are immutable once created and
//! compare by ID only.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// A carpool group member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Opaque identity token.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Domain-specific key-value metadata.
    pub attributes: HashMap<String, String>,
}

impl Member {
    /// Creates a new member with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            attributes: HashMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

// Equality is by ID: display names and attributes are presentation data
// and must not affect set membership.
impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Member {}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
