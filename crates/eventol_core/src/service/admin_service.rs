//! Admin use-case service.
//!
//! # Responsibility
//! - Resolve the acting user by username, then delegate to `AdminSite`.
//! - Emit one metadata-only log event per request.
//!
//! # Invariants
//! - Every entry point goes through actor resolution; there is no
//!   unscoped read path.
//! - Log lines carry counts and identifiers, never record contents.

use crate::admin::export::{render, ExportFormat};
use crate::admin::site::AdminSite;
use crate::admin::table::{Record, RecordTable};
use crate::model::RecordId;
use crate::repo::people_repo::{PeopleRepository, SqlitePeopleRepository};
use crate::scope::actor::{resolve_actor, Actor};
use crate::scope::registry::EntityRegistry;
use crate::scope::{AccessError, AccessResult};
use log::{debug, error, info};
use rusqlite::Connection;
use std::time::Instant;

/// Username-driven entry points over the admin site.
pub struct AdminService<'a> {
    conn: &'a Connection,
    registry: &'a EntityRegistry,
}

impl<'a> AdminService<'a> {
    pub fn new(conn: &'a Connection, registry: &'a EntityRegistry) -> Self {
        Self { conn, registry }
    }

    /// Resolves `username` into the actor seen by the scoping policy.
    ///
    /// # Errors
    /// - `AccessError::UnknownUser` when no account has this username.
    pub fn actor_for(&self, username: &str) -> AccessResult<Actor> {
        let user = SqlitePeopleRepository::new(self.conn)
            .find_user_by_username(username)?
            .ok_or_else(|| AccessError::UnknownUser(username.trim().to_string()))?;
        let user_id = user.id.ok_or_else(|| AccessError::UnknownUser(user.username.clone()))?;
        Ok(resolve_actor(self.conn, user_id)?)
    }

    /// Lists records of `entity` visible to `username`.
    pub fn list(&self, username: &str, entity: &str) -> AccessResult<RecordTable> {
        self.logged("admin_list", username, entity, |site, actor| {
            let kind = self.registry.config_by_name(entity)?.kind;
            let table = site.list(actor, kind)?;
            Ok((table.len(), table))
        })
    }

    /// Returns one record of `entity` if visible to `username`.
    pub fn get(&self, username: &str, entity: &str, id: RecordId) -> AccessResult<Option<Record>> {
        self.logged("admin_get", username, entity, |site, actor| {
            let kind = self.registry.config_by_name(entity)?.kind;
            let record = site.get(actor, kind, id)?;
            Ok((usize::from(record.is_some()), record))
        })
    }

    /// Exports records of `entity` visible to `username` in `format`.
    pub fn export(
        &self,
        username: &str,
        entity: &str,
        format: ExportFormat,
    ) -> AccessResult<String> {
        self.logged("admin_export", username, entity, |site, actor| {
            let kind = self.registry.config_by_name(entity)?.kind;
            let table = site.export(actor, kind)?;
            debug!(
                "event=admin_export_render module=admin status=start entity={kind} format={} columns={}",
                format.as_str(),
                table.columns.len()
            );
            Ok((table.len(), render(&table, format)?))
        })
    }

    fn logged<T, F>(&self, event: &str, username: &str, entity: &str, run: F) -> AccessResult<T>
    where
        F: FnOnce(&AdminSite<'a>, &Actor) -> AccessResult<(usize, T)>,
    {
        let started_at = Instant::now();
        let site = AdminSite::new(self.conn, self.registry);
        let result = self
            .actor_for(username)
            .and_then(|actor| run(&site, &actor).map(|(rows, value)| (actor, rows, value)));

        match result {
            Ok((actor, rows, value)) => {
                info!(
                    "event={event} module=admin status=ok entity={} actor={} user_id={} rows={rows} duration_ms={}",
                    entity.trim(),
                    actor.label(),
                    actor.user_id(),
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                error!(
                    "event={event} module=admin status=error entity={} duration_ms={} error={err}",
                    entity.trim(),
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}
