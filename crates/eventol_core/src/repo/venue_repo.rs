//! Venue repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist venues and the per-venue contact/front page records.
//! - Look venues up by id or by their unique name.

use crate::model::entity::EntityKind;
use crate::model::venue::{Contact, ContactType, EventInfo, Venue};
use crate::model::validation::require_text;
use crate::model::RecordId;
use crate::repo::{query_optional, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const VENUE_SELECT_SQL: &str = "SELECT
    id,
    name,
    country,
    region,
    city,
    district,
    place,
    date
FROM venues";

/// Repository interface for venues and venue front page data.
pub trait VenueRepository {
    fn create_venue(&self, venue: &Venue) -> RepoResult<RecordId>;
    fn update_venue(&self, venue: &Venue) -> RepoResult<()>;
    fn get_venue(&self, id: RecordId) -> RepoResult<Option<Venue>>;
    fn find_venue_by_name(&self, name: &str) -> RepoResult<Option<Venue>>;
    fn create_contact_type(&self, contact_type: &ContactType) -> RepoResult<RecordId>;
    fn create_contact(&self, contact: &Contact) -> RepoResult<RecordId>;
    fn create_event_info(&self, info: &EventInfo) -> RepoResult<RecordId>;
}

/// SQLite-backed venue repository.
pub struct SqliteVenueRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVenueRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl VenueRepository for SqliteVenueRepository<'_> {
    fn create_venue(&self, venue: &Venue) -> RepoResult<RecordId> {
        venue.validate()?;

        self.conn.execute(
            "INSERT INTO venues (name, country, region, city, district, place, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                venue.name.trim(),
                venue.country,
                venue.region,
                venue.city,
                venue.district.as_deref(),
                venue.place,
                venue.date,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_venue(&self, venue: &Venue) -> RepoResult<()> {
        venue.validate()?;
        let id = venue.id.ok_or_else(|| {
            RepoError::InvalidData("cannot update a venue that was never persisted".to_string())
        })?;

        let changed = self.conn.execute(
            "UPDATE venues
             SET
                name = ?1,
                country = ?2,
                region = ?3,
                city = ?4,
                district = ?5,
                place = ?6,
                date = ?7
             WHERE id = ?8;",
            params![
                venue.name.trim(),
                venue.country,
                venue.region,
                venue.city,
                venue.district.as_deref(),
                venue.place,
                venue.date,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Venue,
                id,
            });
        }
        Ok(())
    }

    fn get_venue(&self, id: RecordId) -> RepoResult<Option<Venue>> {
        query_optional(
            self.conn,
            &format!("{VENUE_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_venue_row,
        )
    }

    fn find_venue_by_name(&self, name: &str) -> RepoResult<Option<Venue>> {
        query_optional(
            self.conn,
            &format!("{VENUE_SELECT_SQL} WHERE name = ?1;"),
            [name.trim()],
            parse_venue_row,
        )
    }

    fn create_contact_type(&self, contact_type: &ContactType) -> RepoResult<RecordId> {
        require_text("contact_type", "name", &contact_type.name)?;
        self.conn.execute(
            "INSERT INTO contact_types (name, icon_class) VALUES (?1, ?2);",
            params![contact_type.name, contact_type.icon_class],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_contact(&self, contact: &Contact) -> RepoResult<RecordId> {
        require_text("contact", "url", &contact.url)?;
        self.conn.execute(
            "INSERT INTO contacts (venue_id, contact_type_id, url, text)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                contact.venue_id,
                contact.contact_type_id,
                contact.url,
                contact.text
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_event_info(&self, info: &EventInfo) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO event_infos (venue_id, html) VALUES (?1, ?2);",
            params![info.venue_id, info.html],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}

fn parse_venue_row(row: &Row<'_>) -> RepoResult<Venue> {
    let venue = Venue {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        country: row.get("country")?,
        region: row.get("region")?,
        city: row.get("city")?,
        district: row.get("district")?,
        place: row.get("place")?,
        date: row.get("date")?,
    };
    venue.validate()?;
    Ok(venue)
}
