//! Venue ("sede") records and per-venue front page data.
//!
//! # Invariants
//! - `Venue::name` is unique across the database.
//! - `Venue::date` is a `YYYY-MM-DD` calendar date.

use crate::model::validation::{require_date, require_text, ModelValidationError};
use crate::model::RecordId;
use serde::{Deserialize, Serialize};

/// An event edition held at one place on one date.
///
/// Root of visibility scoping: every scoped record reaches exactly one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// `None` until persisted.
    pub id: Option<RecordId>,
    pub name: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub district: Option<String>,
    /// Building where the event takes place.
    pub place: String,
    pub date: String,
}

impl Venue {
    /// Creates an unsaved venue with empty country/region.
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        place: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            country: String::new(),
            region: String::new(),
            city: city.into(),
            district: None,
            place: place.into(),
            date: date.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("venue", "name", &self.name)?;
        require_text("venue", "city", &self.city)?;
        require_text("venue", "place", &self.place)?;
        require_date(&self.date)
    }
}

/// Kind of public contact channel, e.g. `mail` or `twitter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactType {
    pub id: Option<RecordId>,
    pub name: String,
    /// CSS icon class shown next to the contact link.
    pub icon_class: String,
}

/// Public contact channel of one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Option<RecordId>,
    pub venue_id: RecordId,
    pub contact_type_id: RecordId,
    pub url: String,
    pub text: String,
}

/// Free-form HTML shown on a venue's front page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub id: Option<RecordId>,
    pub venue_id: RecordId,
    pub html: String,
}
