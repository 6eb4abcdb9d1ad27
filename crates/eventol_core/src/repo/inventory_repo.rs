//! Inventory repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist hardware/software catalog rows and installations.
//! - Keep enum-to-code mapping inside the persistence boundary.
//!
//! # Invariants
//! - An installation's attendee and installer belong to the same venue.

use crate::model::inventory::{
    Hardware, HardwareKind, HardwareManufacturer, Installation, Software, SoftwareKind,
};
use crate::model::entity::EntityKind;
use crate::model::validation::require_text;
use crate::model::RecordId;
use crate::repo::{query_optional, shared_venue, RepoResult};
use rusqlite::{params, Connection};

const ATTENDEE_VENUE_SQL: &str = "SELECT event_users.venue_id
FROM attendees
JOIN event_users ON event_users.id = attendees.event_user_id
WHERE attendees.id = ?1;";

const INSTALLER_VENUE_SQL: &str = "SELECT event_users.venue_id
FROM installers
JOIN event_users ON event_users.id = installers.event_user_id
WHERE installers.id = ?1;";

/// Repository interface for inventory and installations.
pub trait InventoryRepository {
    fn create_manufacturer(&self, manufacturer: &HardwareManufacturer) -> RepoResult<RecordId>;
    fn create_hardware(&self, hardware: &Hardware) -> RepoResult<RecordId>;
    fn create_software(&self, software: &Software) -> RepoResult<RecordId>;
    fn create_installation(&self, installation: &Installation) -> RepoResult<RecordId>;
    fn get_installation(&self, id: RecordId) -> RepoResult<Option<Installation>>;
}

/// SQLite-backed inventory repository.
pub struct SqliteInventoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteInventoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl InventoryRepository for SqliteInventoryRepository<'_> {
    fn create_manufacturer(&self, manufacturer: &HardwareManufacturer) -> RepoResult<RecordId> {
        require_text("hardware_manufacturer", "name", &manufacturer.name)?;
        self.conn.execute(
            "INSERT INTO hardware_manufacturers (name) VALUES (?1);",
            [manufacturer.name.trim()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_hardware(&self, hardware: &Hardware) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO hardware (kind, manufacturer_id, model, serial)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                hardware_kind_to_db(hardware.kind),
                hardware.manufacturer_id,
                hardware.model.as_deref(),
                hardware.serial.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_software(&self, software: &Software) -> RepoResult<RecordId> {
        software.validate()?;
        self.conn.execute(
            "INSERT INTO software (name, version, kind) VALUES (?1, ?2, ?3);",
            params![
                software.name.trim(),
                software.version.trim(),
                software_kind_to_db(software.kind),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_installation(&self, installation: &Installation) -> RepoResult<RecordId> {
        shared_venue(
            self.conn,
            EntityKind::Installation,
            &[
                (EntityKind::Attendee, ATTENDEE_VENUE_SQL, installation.attendee_id),
                (EntityKind::Installer, INSTALLER_VENUE_SQL, installation.installer_id),
            ],
        )?;
        self.conn.execute(
            "INSERT INTO installations (
                attendee_id,
                installer_id,
                hardware_id,
                software_id,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                installation.attendee_id,
                installation.installer_id,
                installation.hardware_id,
                installation.software_id,
                installation.notes.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_installation(&self, id: RecordId) -> RepoResult<Option<Installation>> {
        query_optional(
            self.conn,
            "SELECT id, attendee_id, installer_id, hardware_id, software_id, notes
             FROM installations
             WHERE id = ?1;",
            [id],
            |row| {
                Ok(Installation {
                    id: Some(row.get("id")?),
                    attendee_id: row.get("attendee_id")?,
                    installer_id: row.get("installer_id")?,
                    hardware_id: row.get("hardware_id")?,
                    software_id: row.get("software_id")?,
                    notes: row.get("notes")?,
                })
            },
        )
    }
}

fn hardware_kind_to_db(kind: HardwareKind) -> &'static str {
    match kind {
        HardwareKind::Mobile => "mobile",
        HardwareKind::Notebook => "notebook",
        HardwareKind::Netbook => "netbook",
        HardwareKind::Tablet => "tablet",
        HardwareKind::Desktop => "desktop",
        HardwareKind::Other => "other",
    }
}

fn software_kind_to_db(kind: SoftwareKind) -> &'static str {
    match kind {
        SoftwareKind::OperativeSystem => "operative_system",
        SoftwareKind::Application => "application",
        SoftwareKind::Support => "support",
        SoftwareKind::Other => "other",
    }
}
