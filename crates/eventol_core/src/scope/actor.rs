//! Acting user resolution.
//!
//! # Responsibility
//! - Turn an authenticated user id into the `Actor` the scoping policy sees.
//!
//! # Invariants
//! - Superusers are unrestricted regardless of collaborator records.
//! - A non-superuser is scoped only when exactly one collaborator record
//!   resolves to a venue; anything else yields `Actor::Unassigned`.

use crate::model::entity::EntityKind;
use crate::model::RecordId;
use crate::repo::people_repo::{PeopleRepository, SqlitePeopleRepository};
use crate::repo::{RepoError, RepoResult};
use log::warn;
use rusqlite::Connection;
use serde::Serialize;

/// Venue an actor is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueRef {
    pub id: RecordId,
    pub name: String,
}

/// Authenticated administrative user as seen by the scoping policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    /// Sees every record.
    Superuser { user_id: RecordId },
    /// Sees records of one venue.
    Collaborator { user_id: RecordId, venue: VenueRef },
    /// Non-superuser without a resolvable venue. Sees nothing.
    Unassigned { user_id: RecordId },
}

impl Actor {
    pub fn user_id(&self) -> RecordId {
        match self {
            Self::Superuser { user_id }
            | Self::Collaborator { user_id, .. }
            | Self::Unassigned { user_id } => *user_id,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Superuser { .. })
    }

    /// Venue the actor is bound to, if any.
    pub fn venue(&self) -> Option<&VenueRef> {
        match self {
            Self::Collaborator { venue, .. } => Some(venue),
            Self::Superuser { .. } | Self::Unassigned { .. } => None,
        }
    }

    /// Stable label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Superuser { .. } => "superuser",
            Self::Collaborator { .. } => "collaborator",
            Self::Unassigned { .. } => "unassigned",
        }
    }
}

/// Resolves the actor for `user_id`.
///
/// # Errors
/// - `RepoError::NotFound` when the user does not exist.
/// - `RepoError::Db` on query failure.
pub fn resolve_actor(conn: &Connection, user_id: RecordId) -> RepoResult<Actor> {
    let user = SqlitePeopleRepository::new(conn)
        .get_user(user_id)?
        .ok_or(RepoError::NotFound {
            entity: EntityKind::User,
            id: user_id,
        })?;

    if user.is_superuser {
        return Ok(Actor::Superuser { user_id });
    }

    let mut stmt = conn.prepare(
        "SELECT venues.id, venues.name
         FROM collaborators
         JOIN event_users ON event_users.id = collaborators.event_user_id
         JOIN venues ON venues.id = event_users.venue_id
         WHERE event_users.user_id = ?1
         ORDER BY venues.id ASC
         LIMIT 2;",
    )?;
    let venues = stmt
        .query_map([user_id], |row| {
            Ok(VenueRef {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut venues = venues.into_iter();
    match (venues.next(), venues.next()) {
        (Some(venue), None) => Ok(Actor::Collaborator { user_id, venue }),
        (None, _) => {
            warn!(
                "event=actor_resolve module=scope status=denied user_id={user_id} reason=no_collaborator"
            );
            Ok(Actor::Unassigned { user_id })
        }
        (Some(_), Some(_)) => {
            warn!(
                "event=actor_resolve module=scope status=denied user_id={user_id} reason=multiple_venues"
            );
            Ok(Actor::Unassigned { user_id })
        }
    }
}
