//! Core domain logic for the EventoL event manager.
//! This crate owns the schema, repositories and venue-scoped admin access.

pub mod admin;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod scope;
pub mod service;

pub use admin::export::{ExportError, ExportFormat};
pub use admin::site::AdminSite;
pub use admin::table::{CellValue, Record, RecordTable};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::entity::EntityKind;
pub use model::RecordId;
pub use repo::{RepoError, RepoResult};
pub use scope::actor::{resolve_actor, Actor, VenueRef};
pub use scope::policy::{ScopeFilter, ScopePolicy};
pub use scope::registry::{EntityRegistration, EntityRegistry, RegistryError};
pub use scope::{AccessError, AccessResult};
pub use service::admin_service::AdminService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
