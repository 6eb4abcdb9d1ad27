//! Administrative listing, detail and export over scoped queries.
//!
//! # Responsibility
//! - Render registered entities as tables of display or export fields.
//! - Route every read through the scoping policy.
//!
//! # Invariants
//! - No admin read bypasses `ScopePolicy`.
//! - Column order follows the registry declaration.

pub mod export;
mod query;
pub mod site;
pub mod table;
