//! People repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist users, venue associations and the per-venue role records.
//! - Provide the identity lookups used to resolve the acting user.
//!
//! # Invariants
//! - A user joins one venue at most once (`UNIQUE(user_id, venue_id)`).
//! - Each role record owns exactly one association.

use crate::model::entity::EntityKind;
use crate::model::people::{
    Attendee, Collaborator, EventUser, Installer, InstallerLevel, Organizer, User,
};
use crate::model::RecordId;
use crate::repo::{bool_to_int, int_to_bool, query_optional, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    username,
    first_name,
    last_name,
    email,
    is_superuser,
    date_joined
FROM users";

/// Repository interface for accounts and venue roles.
pub trait PeopleRepository {
    fn create_user(&self, user: &User) -> RepoResult<RecordId>;
    fn get_user(&self, id: RecordId) -> RepoResult<Option<User>>;
    fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    fn set_superuser(&self, user_id: RecordId, is_superuser: bool) -> RepoResult<()>;
    fn create_event_user(&self, event_user: &EventUser) -> RepoResult<RecordId>;
    fn get_event_user(&self, id: RecordId) -> RepoResult<Option<EventUser>>;
    fn mark_assisted(&self, event_user_id: RecordId, assisted: bool) -> RepoResult<()>;
    fn create_collaborator(&self, collaborator: &Collaborator) -> RepoResult<RecordId>;
    fn create_organizer(&self, organizer: &Organizer) -> RepoResult<RecordId>;
    fn create_installer(&self, installer: &Installer) -> RepoResult<RecordId>;
    fn create_attendee(&self, attendee: &Attendee) -> RepoResult<RecordId>;
}

/// SQLite-backed people repository.
pub struct SqlitePeopleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePeopleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PeopleRepository for SqlitePeopleRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<RecordId> {
        user.validate()?;

        self.conn.execute(
            "INSERT INTO users (
                username,
                first_name,
                last_name,
                email,
                is_superuser,
                date_joined
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                user.username.trim(),
                user.first_name,
                user.last_name,
                user.email.trim(),
                bool_to_int(user.is_superuser),
                user.date_joined,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_user(&self, id: RecordId) -> RepoResult<Option<User>> {
        query_optional(
            self.conn,
            &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_user_row,
        )
    }

    fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        query_optional(
            self.conn,
            &format!("{USER_SELECT_SQL} WHERE username = ?1;"),
            [username.trim()],
            parse_user_row,
        )
    }

    fn set_superuser(&self, user_id: RecordId, is_superuser: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users SET is_superuser = ?1 WHERE id = ?2;",
            params![bool_to_int(is_superuser), user_id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::User,
                id: user_id,
            });
        }
        Ok(())
    }

    fn create_event_user(&self, event_user: &EventUser) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO event_users (user_id, venue_id, assisted) VALUES (?1, ?2, ?3);",
            params![
                event_user.user_id,
                event_user.venue_id,
                bool_to_int(event_user.assisted)
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_event_user(&self, id: RecordId) -> RepoResult<Option<EventUser>> {
        query_optional(
            self.conn,
            "SELECT id, user_id, venue_id, assisted FROM event_users WHERE id = ?1;",
            [id],
            |row| {
                Ok(EventUser {
                    id: Some(row.get("id")?),
                    user_id: row.get("user_id")?,
                    venue_id: row.get("venue_id")?,
                    assisted: int_to_bool("event_users", "assisted", row.get("assisted")?)?,
                })
            },
        )
    }

    fn mark_assisted(&self, event_user_id: RecordId, assisted: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE event_users SET assisted = ?1 WHERE id = ?2;",
            params![bool_to_int(assisted), event_user_id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::EventUser,
                id: event_user_id,
            });
        }
        Ok(())
    }

    fn create_collaborator(&self, collaborator: &Collaborator) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO collaborators (
                event_user_id,
                phone,
                address,
                assignation,
                time_availability,
                additional_info
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                collaborator.event_user_id,
                collaborator.phone.as_deref(),
                collaborator.address.as_deref(),
                collaborator.assignation.as_deref(),
                collaborator.time_availability.as_deref(),
                collaborator.additional_info.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_organizer(&self, organizer: &Organizer) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO organizers (event_user_id, is_coordinator) VALUES (?1, ?2);",
            params![organizer.event_user_id, bool_to_int(organizer.is_coordinator)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_installer(&self, installer: &Installer) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO installers (event_user_id, level) VALUES (?1, ?2);",
            params![installer.event_user_id, installer_level_to_db(installer.level)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_attendee(&self, attendee: &Attendee) -> RepoResult<RecordId> {
        self.conn.execute(
            "INSERT INTO attendees (event_user_id, additional_info) VALUES (?1, ?2);",
            params![attendee.event_user_id, attendee.additional_info.as_deref()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let user = User {
        id: Some(row.get("id")?),
        username: row.get("username")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        is_superuser: int_to_bool("users", "is_superuser", row.get("is_superuser")?)?,
        date_joined: row.get("date_joined")?,
    };
    user.validate()?;
    Ok(user)
}

fn installer_level_to_db(level: InstallerLevel) -> &'static str {
    match level {
        InstallerLevel::Beginner => "beginner",
        InstallerLevel::Medium => "medium",
        InstallerLevel::Advanced => "advanced",
        InstallerLevel::SuperHacker => "super_hacker",
    }
}
