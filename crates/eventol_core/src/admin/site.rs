//! Admin site: scoped listing, detail lookup and export.
//!
//! # Responsibility
//! - Pair a connection with the entity registry and scoping policy.
//! - Return only records the acting user may see.
//!
//! # Invariants
//! - A record invisible to the actor is reported exactly like a missing one.
//! - Listing columns are `display_fields`; export columns are `export_fields`.

use crate::admin::query::select_records;
use crate::admin::table::{Record, RecordTable};
use crate::model::entity::EntityKind;
use crate::model::RecordId;
use crate::scope::actor::Actor;
use crate::scope::path::FieldPath;
use crate::scope::policy::ScopePolicy;
use crate::scope::registry::EntityRegistry;
use crate::scope::AccessResult;
use rusqlite::Connection;

/// Scoped administrative view over one connection.
pub struct AdminSite<'a> {
    conn: &'a Connection,
    policy: ScopePolicy<'a>,
}

impl<'a> AdminSite<'a> {
    pub fn new(conn: &'a Connection, registry: &'a EntityRegistry) -> Self {
        Self {
            conn,
            policy: ScopePolicy::new(registry),
        }
    }

    pub fn policy(&self) -> ScopePolicy<'a> {
        self.policy
    }

    /// Registered entity identifiers, sorted.
    pub fn entities(&self) -> Vec<&'static str> {
        self.policy.registry().entity_names()
    }

    /// Lists visible records of `kind` with their display fields.
    pub fn list(&self, actor: &Actor, kind: EntityKind) -> AccessResult<RecordTable> {
        let config = self.policy.registry().config(kind)?;
        self.table(actor, kind, &config.display_fields, None)
    }

    /// Returns one visible record with its display fields.
    pub fn get(&self, actor: &Actor, kind: EntityKind, id: RecordId) -> AccessResult<Option<Record>> {
        let config = self.policy.registry().config(kind)?;
        let table = self.table(actor, kind, &config.display_fields, Some(id))?;
        Ok(table.rows.into_iter().next())
    }

    /// Exports visible records of `kind` in the declared export order.
    pub fn export(&self, actor: &Actor, kind: EntityKind) -> AccessResult<RecordTable> {
        let config = self.policy.registry().config(kind)?;
        self.table(actor, kind, &config.export_fields, None)
    }

    /// Narrows already-fetched ids to the visible ones.
    pub fn visible_ids(
        &self,
        actor: &Actor,
        kind: EntityKind,
        ids: &[RecordId],
    ) -> AccessResult<Vec<RecordId>> {
        self.policy.filter_ids(self.conn, actor, kind, ids)
    }

    fn table(
        &self,
        actor: &Actor,
        kind: EntityKind,
        fields: &[FieldPath],
        only_id: Option<RecordId>,
    ) -> AccessResult<RecordTable> {
        let filter = self.policy.scope_filter(actor, kind)?;
        let rows = select_records(self.conn, kind, fields, &filter, only_id)?;
        Ok(RecordTable {
            entity: kind,
            columns: fields.iter().map(|field| field.source().to_string()).collect(),
            rows,
        })
    }
}
