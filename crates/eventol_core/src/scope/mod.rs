//! Venue-scoped visibility.
//!
//! # Responsibility
//! - Resolve who is acting and which venue binds them.
//! - Declare, per entity, the relation path that reaches the owning venue.
//! - Filter record collections down to what an actor may see.
//!
//! # Invariants
//! - Scoping never mutates state.
//! - Actors without a resolvable venue see nothing (fail closed).
//! - Declaration errors surface at registration, not per request.

pub mod actor;
pub(crate) mod join;
pub mod path;
pub mod policy;
pub mod registry;

use crate::admin::export::ExportError;
use crate::repo::RepoError;
use crate::scope::registry::RegistryError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AccessResult<T> = Result<T, AccessError>;

/// Errors from scoped reads.
#[derive(Debug)]
pub enum AccessError {
    Registry(RegistryError),
    Repo(RepoError),
    /// No account with this username.
    UnknownUser(String),
    Export(ExportError),
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::UnknownUser(username) => write!(f, "unknown user: {username}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::UnknownUser(_) => None,
            Self::Export(err) => Some(err),
        }
    }
}

impl From<RegistryError> for AccessError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<RepoError> for AccessError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ExportError> for AccessError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<rusqlite::Error> for AccessError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}
