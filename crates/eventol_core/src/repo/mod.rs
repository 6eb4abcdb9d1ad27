//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented write and lookup contracts per aggregate.
//! - Isolate SQLite statement details from the admin and service layers.
//!
//! # Invariants
//! - Write paths call the record's `validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Repositories never apply venue scoping; that belongs to `scope`.
//! - A row whose venue-bound parents sit in different venues is rejected,
//!   so every scoped record reaches exactly one venue.

pub mod inventory_repo;
pub mod people_repo;
pub mod program_repo;
pub mod venue_repo;

use crate::db::DbError;
use crate::model::entity::EntityKind;
use crate::model::validation::ModelValidationError;
use crate::model::RecordId;
use rusqlite::{Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and lookups.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    NotFound { entity: EntityKind, id: RecordId },
    /// A new `entity` row links parents from two venues.
    VenueMismatch {
        entity: EntityKind,
        parent: EntityKind,
        expected: RecordId,
        found: RecordId,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::VenueMismatch {
                entity,
                parent,
                expected,
                found,
            } => write!(
                f,
                "{entity} would span venues: {parent} belongs to venue {found}, expected venue {expected}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::VenueMismatch { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Runs one single-row lookup and maps the row through `parse`.
pub(crate) fn query_optional<T, P, F>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: F,
) -> RepoResult<Option<T>>
where
    P: rusqlite::Params,
    F: FnOnce(&Row<'_>) -> RepoResult<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    match rows.next()? {
        Some(row) => Ok(Some(parse(row)?)),
        None => Ok(None),
    }
}

/// One venue-bound parent of a row about to be inserted: its kind, a query
/// selecting its venue id from `?1`, and its id.
pub(crate) type VenueParent<'a> = (EntityKind, &'a str, RecordId);

/// Returns the venue shared by every parent of a new `entity` row.
///
/// # Errors
/// - `NotFound` when a parent row does not exist.
/// - `VenueMismatch` when two parents reach different venues.
pub(crate) fn shared_venue(
    conn: &Connection,
    entity: EntityKind,
    parents: &[VenueParent<'_>],
) -> RepoResult<RecordId> {
    let mut expected: Option<RecordId> = None;
    for &(parent, sql, id) in parents {
        let found = conn
            .query_row(sql, [id], |row| row.get::<_, RecordId>(0))
            .optional()?
            .ok_or(RepoError::NotFound { entity: parent, id })?;
        match expected {
            None => expected = Some(found),
            Some(venue) if venue != found => {
                return Err(RepoError::VenueMismatch {
                    entity,
                    parent,
                    expected: venue,
                    found,
                })
            }
            Some(_) => {}
        }
    }
    expected.ok_or_else(|| RepoError::InvalidData(format!("{entity} has no venue-bound parent")))
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(table: &str, column: &str, value: i64) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean `{other}` in {table}.{column}"
        ))),
    }
}
