//! Contact records and their transfer objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Assigned by the store on insert.
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Set when the record is first built from a [`NewContact`].
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Contact as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactDto {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Payload for editing a contact.
///
/// An absent `email` leaves the stored one untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEdit {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

crate::identified!(entity Contact: u64);
crate::identified!(dto ContactDto: u64, ContactEdit: u64);
