//! Users and their per-venue roles.
//!
//! A `User` joins a venue through an `EventUser` association. Collaborator,
//! organizer, installer and attendee records each hang off one association,
//! which is how every role reaches its venue.

use crate::model::validation::{require_email, require_text, ModelValidationError};
use crate::model::RecordId;
use serde::{Deserialize, Serialize};

/// Authenticated account. Superusers bypass venue scoping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<RecordId>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_superuser: bool,
    /// Unix epoch milliseconds.
    pub date_joined: i64,
}

impl User {
    /// Creates an unsaved, non-superuser account.
    pub fn new(username: impl Into<String>, email: impl Into<String>, date_joined: i64) -> Self {
        Self {
            id: None,
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            is_superuser: false,
            date_joined,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("user", "username", &self.username)?;
        require_email(&self.email)
    }
}

/// Association between a user and the venue they take part in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventUser {
    pub id: Option<RecordId>,
    pub user_id: RecordId,
    pub venue_id: RecordId,
    pub assisted: bool,
}

/// Staff member helping run a venue. Grants scoped admin access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: Option<RecordId>,
    pub event_user_id: RecordId,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Assignments given to the collaborator, e.g. talks or coffee.
    pub assignation: Option<String>,
    pub time_availability: Option<String>,
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub id: Option<RecordId>,
    pub event_user_id: RecordId,
    pub is_coordinator: bool,
}

/// Linux knowledge level declared by an installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallerLevel {
    Beginner,
    Medium,
    Advanced,
    SuperHacker,
}

/// Volunteer installing software on attendees' hardware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installer {
    pub id: Option<RecordId>,
    pub event_user_id: RecordId,
    pub level: InstallerLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: Option<RecordId>,
    pub event_user_id: RecordId,
    pub additional_info: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::User;

    #[test]
    fn user_requires_username_and_email() {
        assert!(User::new("jdoe", "jdoe@example.org", 0).validate().is_ok());
        assert!(User::new("", "jdoe@example.org", 0).validate().is_err());
        assert!(User::new("jdoe", "not-an-email", 0).validate().is_err());
    }
}
