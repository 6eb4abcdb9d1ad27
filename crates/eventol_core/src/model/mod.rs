//! Event domain model.
//!
//! # Responsibility
//! - Define the records stored for venues, people, inventory and program.
//! - Describe the relational schema used by venue scoping and export paths.
//! - Validate record invariants before persistence.
//!
//! # Invariants
//! - Every record is identified by a database-assigned `RecordId`.
//! - Every venue-scoped record reaches exactly one venue through
//!   non-nullable foreign keys.

pub mod entity;
pub mod inventory;
pub mod people;
pub mod program;
pub mod schema;
pub mod validation;
pub mod venue;

/// Database-assigned row identifier shared by every table.
pub type RecordId = i64;
