//! Hardware and software catalogs and the installations performed at venues.

use crate::model::validation::{require_text, ModelValidationError};
use crate::model::RecordId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareManufacturer {
    pub id: Option<RecordId>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareKind {
    Mobile,
    Notebook,
    Netbook,
    Tablet,
    Desktop,
    Other,
}

/// One attendee device brought in for an installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hardware {
    pub id: Option<RecordId>,
    pub kind: HardwareKind,
    pub manufacturer_id: Option<RecordId>,
    pub model: Option<String>,
    pub serial: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftwareKind {
    OperativeSystem,
    Application,
    /// Support and problem fixing rather than a new install.
    Support,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Software {
    pub id: Option<RecordId>,
    pub name: String,
    pub version: String,
    pub kind: SoftwareKind,
}

impl Software {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("software", "name", &self.name)?;
        require_text("software", "version", &self.version)
    }
}

/// Installation performed by an installer for an attendee.
///
/// Scoped to the installer's venue, never the attendee's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installation {
    pub id: Option<RecordId>,
    pub attendee_id: RecordId,
    pub installer_id: RecordId,
    pub hardware_id: Option<RecordId>,
    pub software_id: Option<RecordId>,
    /// Problems found worth documenting.
    pub notes: Option<String>,
}
