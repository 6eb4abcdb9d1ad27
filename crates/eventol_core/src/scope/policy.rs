//! Access-scoping policy.
//!
//! # Responsibility
//! - Decide, per actor and entity, which records are visible.
//! - Offer the decision in query form (`ScopeFilter`) and in collection
//!   form (`filter_ids`) with identical results.
//!
//! # Invariants
//! - Superusers see every record of every registered entity.
//! - Collaborators see scoped records whose venue is theirs, plus global
//!   catalogs.
//! - Unassigned actors see nothing; this is not an error.
//! - Applying the policy twice equals applying it once.

use crate::model::entity::EntityKind;
use crate::model::RecordId;
use crate::scope::actor::Actor;
use crate::scope::join::{JoinPlan, ROOT_ALIAS};
use crate::scope::path::FieldPath;
use crate::scope::registry::{EntityRegistry, ScopePath};
use crate::scope::AccessResult;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension};

/// Query-time form of a scoping decision.
#[derive(Debug, Clone, PartialEq)]
pub enum ScopeFilter<'r> {
    /// Every row is visible.
    All,
    /// No row is visible.
    Deny,
    /// Rows whose `path` column equals `value` are visible.
    VenueEquals {
        path: &'r FieldPath,
        value: Value,
        venue_id: RecordId,
    },
}

/// Stateless scoping policy over a registry.
#[derive(Debug, Clone, Copy)]
pub struct ScopePolicy<'r> {
    registry: &'r EntityRegistry,
}

impl<'r> ScopePolicy<'r> {
    pub fn new(registry: &'r EntityRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r EntityRegistry {
        self.registry
    }

    /// Decides what `actor` may see of `kind`.
    ///
    /// # Errors
    /// - `RegistryError::UnregisteredEntity` when `kind` was never registered.
    pub fn scope_filter(&self, actor: &Actor, kind: EntityKind) -> AccessResult<ScopeFilter<'r>> {
        let config = self.registry.config(kind)?;
        let filter = match (actor, &config.scope) {
            (Actor::Superuser { .. }, _) => ScopeFilter::All,
            (Actor::Unassigned { .. }, _) => ScopeFilter::Deny,
            (Actor::Collaborator { .. }, ScopePath::Global) => ScopeFilter::All,
            (Actor::Collaborator { venue, .. }, ScopePath::Root(path)) => ScopeFilter::VenueEquals {
                path,
                value: Value::Text(venue.name.clone()),
                venue_id: venue.id,
            },
            (Actor::Collaborator { venue, .. }, ScopePath::Relation(path)) => {
                ScopeFilter::VenueEquals {
                    path,
                    value: Value::Integer(venue.id),
                    venue_id: venue.id,
                }
            }
        };
        Ok(filter)
    }

    /// Resolves the venue owning record `id` of `kind` by walking its
    /// declared path.
    ///
    /// Returns `None` for global entities and for missing records.
    pub fn resolve_venue(
        &self,
        conn: &Connection,
        kind: EntityKind,
        id: RecordId,
    ) -> AccessResult<Option<RecordId>> {
        let config = self.registry.config(kind)?;
        let sql = match &config.scope {
            ScopePath::Global => return Ok(None),
            ScopePath::Root(_) => format!("SELECT {ROOT_ALIAS}.id FROM venues AS {ROOT_ALIAS} WHERE {ROOT_ALIAS}.id = ?1;"),
            ScopePath::Relation(path) => {
                let mut plan = JoinPlan::new(kind);
                let column = plan.column_ref(path);
                format!(
                    "SELECT {column} {} WHERE {ROOT_ALIAS}.id = ?1;",
                    plan.from_clause()
                )
            }
        };

        let venue_id = conn
            .query_row(&sql, [id], |row| row.get::<_, Option<RecordId>>(0))
            .optional()?
            .flatten();
        Ok(venue_id)
    }

    /// Returns the ids of `ids` visible to `actor`, preserving order.
    ///
    /// Ids that do not exist are dropped for scoped actors.
    pub fn filter_ids(
        &self,
        conn: &Connection,
        actor: &Actor,
        kind: EntityKind,
        ids: &[RecordId],
    ) -> AccessResult<Vec<RecordId>> {
        let visible = match self.scope_filter(actor, kind)? {
            ScopeFilter::All => ids.to_vec(),
            ScopeFilter::Deny => Vec::new(),
            ScopeFilter::VenueEquals { venue_id, .. } => {
                let mut visible = Vec::with_capacity(ids.len());
                for &id in ids {
                    if self.resolve_venue(conn, kind, id)? == Some(venue_id) {
                        visible.push(id);
                    }
                }
                visible
            }
        };

        debug!(
            "event=scope_filter module=scope status=ok entity={kind} actor={} requested={} visible={}",
            actor.label(),
            ids.len(),
            visible.len()
        );
        Ok(visible)
    }
}
