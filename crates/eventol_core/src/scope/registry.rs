//! Startup-time entity registry.
//!
//! # Responsibility
//! - Map each administrable entity to its path-to-venue, display fields and
//!   export field order.
//! - Reject malformed declarations when they are registered, never when a
//!   request arrives.
//!
//! # Invariants
//! - Each entity is registered at most once.
//! - `Venue` is the only entity scoped by `ScopePath::Root`.
//! - Every stored path has been resolved against schema metadata.

use crate::model::entity::EntityKind;
use crate::scope::path::{resolve_field_path, resolve_venue_path, FieldPath, PathError};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Registry declaration and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateEntity(EntityKind),
    MalformedPath {
        entity: EntityKind,
        path: String,
        reason: PathError,
    },
    /// Root scoping declared for a non-venue entity, or venue declared
    /// with anything but root scoping.
    InvalidRootScope(EntityKind),
    UnregisteredEntity(EntityKind),
    UnknownEntityName(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEntity(kind) => write!(f, "entity already registered: {kind}"),
            Self::MalformedPath {
                entity,
                path,
                reason,
            } => write!(f, "malformed path `{path}` for {entity}: {reason}"),
            Self::InvalidRootScope(kind) => {
                write!(f, "root scoping applies to venue only, got {kind}")
            }
            Self::UnregisteredEntity(kind) => write!(f, "entity is not registered: {kind}"),
            Self::UnknownEntityName(name) => write!(f, "unknown entity: {name}"),
        }
    }
}

impl Error for RegistryError {}

/// How an entity's records are tied to a venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopePath {
    /// Shared catalog visible to every assigned actor.
    Global,
    /// The venue itself, matched by its unique name.
    Root(FieldPath),
    /// Foreign-key chain ending at the venue id.
    Relation(FieldPath),
}

/// Unresolved scoping declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeDeclaration {
    Global,
    Root,
    Path(String),
}

/// One entity declaration before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRegistration {
    kind: EntityKind,
    scope: ScopeDeclaration,
    display: Vec<String>,
    export: Vec<String>,
}

impl EntityRegistration {
    /// Entity scoped through a dotted relation path ending at `venue`.
    pub fn scoped(kind: EntityKind, path: impl Into<String>) -> Self {
        Self::with_scope(kind, ScopeDeclaration::Path(path.into()))
    }

    /// The venue entity itself.
    pub fn venue_root() -> Self {
        Self::with_scope(EntityKind::Venue, ScopeDeclaration::Root)
    }

    /// Shared catalog entity without a venue.
    pub fn global(kind: EntityKind) -> Self {
        Self::with_scope(kind, ScopeDeclaration::Global)
    }

    fn with_scope(kind: EntityKind, scope: ScopeDeclaration) -> Self {
        Self {
            kind,
            scope,
            display: Vec::new(),
            export: Vec::new(),
        }
    }

    /// Columns shown in listings, after `id`.
    pub fn display(mut self, fields: &[&str]) -> Self {
        self.display = fields.iter().map(|field| field.to_string()).collect();
        self
    }

    /// Export columns in order. Defaults to the display fields.
    pub fn export(mut self, fields: &[&str]) -> Self {
        self.export = fields.iter().map(|field| field.to_string()).collect();
        self
    }
}

/// Resolved configuration for one registered entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityConfig {
    pub kind: EntityKind,
    pub scope: ScopePath,
    pub display_fields: Vec<FieldPath>,
    pub export_fields: Vec<FieldPath>,
}

/// Explicit table of administrable entities.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entries: BTreeMap<EntityKind, EntityConfig>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves and registers one entity declaration.
    pub fn register(&mut self, registration: EntityRegistration) -> Result<(), RegistryError> {
        let kind = registration.kind;
        if self.entries.contains_key(&kind) {
            return Err(RegistryError::DuplicateEntity(kind));
        }

        let scope = match registration.scope {
            ScopeDeclaration::Global if kind == EntityKind::Venue => {
                return Err(RegistryError::InvalidRootScope(kind));
            }
            ScopeDeclaration::Global => ScopePath::Global,
            ScopeDeclaration::Root if kind == EntityKind::Venue => {
                ScopePath::Root(FieldPath::own_column(kind, "name"))
            }
            ScopeDeclaration::Root => return Err(RegistryError::InvalidRootScope(kind)),
            ScopeDeclaration::Path(_) if kind == EntityKind::Venue => {
                return Err(RegistryError::InvalidRootScope(kind));
            }
            ScopeDeclaration::Path(path) => ScopePath::Relation(
                resolve_venue_path(kind, &path).map_err(|reason| malformed(kind, &path, reason))?,
            ),
        };

        let display_fields = resolve_all(kind, &registration.display)?;
        let export_fields = if registration.export.is_empty() {
            display_fields.clone()
        } else {
            resolve_all(kind, &registration.export)?
        };

        self.entries.insert(
            kind,
            EntityConfig {
                kind,
                scope,
                display_fields,
                export_fields,
            },
        );
        Ok(())
    }

    /// Returns the configuration of a registered entity.
    pub fn config(&self, kind: EntityKind) -> Result<&EntityConfig, RegistryError> {
        self.entries
            .get(&kind)
            .ok_or(RegistryError::UnregisteredEntity(kind))
    }

    /// Parses an entity identifier and returns its configuration.
    pub fn config_by_name(&self, name: &str) -> Result<&EntityConfig, RegistryError> {
        let kind = EntityKind::parse(name)
            .ok_or_else(|| RegistryError::UnknownEntityName(name.trim().to_string()))?;
        self.config(kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered entity identifiers, sorted.
    pub fn entity_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().map(|kind| kind.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// The event manager's administrative surface.
    ///
    /// `User` is left unregistered: accounts are managed by the identity layer.
    pub fn eventol_default() -> Result<Self, RegistryError> {
        const PERSON: &[&str] = &[
            "event_user.user.first_name",
            "event_user.user.last_name",
            "event_user.user.username",
            "event_user.user.email",
        ];

        let mut registry = Self::new();
        for registration in [
            EntityRegistration::venue_root().display(&["name", "city", "place", "date"]),
            EntityRegistration::scoped(EntityKind::EventUser, "venue")
                .display(&["user.username", "venue.name", "assisted"]),
            EntityRegistration::scoped(EntityKind::Collaborator, "event_user.venue")
                .display(&["event_user.user.username", "assignation"])
                .export(&[
                    PERSON[0],
                    PERSON[1],
                    PERSON[2],
                    PERSON[3],
                    "event_user.user.date_joined",
                    "phone",
                    "address",
                    "event_user.assisted",
                    "assignation",
                    "time_availability",
                    "additional_info",
                ]),
            EntityRegistration::scoped(EntityKind::Organizer, "event_user.venue")
                .display(&["event_user.user.username", "is_coordinator"]),
            EntityRegistration::scoped(EntityKind::Installer, "event_user.venue")
                .display(&["event_user.user.username", "level"])
                .export(&[
                    PERSON[0],
                    PERSON[1],
                    PERSON[2],
                    PERSON[3],
                    "event_user.user.date_joined",
                    "event_user.assisted",
                    "level",
                ]),
            EntityRegistration::scoped(EntityKind::Attendee, "event_user.venue")
                .display(&["event_user.user.username", "event_user.assisted"])
                .export(&[
                    PERSON[0],
                    PERSON[1],
                    PERSON[2],
                    PERSON[3],
                    "event_user.assisted",
                    "additional_info",
                ]),
            EntityRegistration::global(EntityKind::HardwareManufacturer).display(&["name"]),
            EntityRegistration::global(EntityKind::Hardware)
                .display(&["kind", "manufacturer.name", "model"]),
            EntityRegistration::global(EntityKind::Software).display(&["name", "version", "kind"]),
            EntityRegistration::scoped(EntityKind::Installation, "installer.event_user.venue")
                .display(&[
                    "attendee.event_user.user.username",
                    "hardware.model",
                    "software.name",
                ])
                .export(&[
                    "hardware.kind",
                    "hardware.manufacturer.name",
                    "hardware.model",
                    "hardware.serial",
                    "software.kind",
                    "software.name",
                    "software.version",
                    "attendee.event_user.user.email",
                    "installer.event_user.user.username",
                    "notes",
                ]),
            EntityRegistration::global(EntityKind::ActivityType).display(&["name"]),
            EntityRegistration::scoped(EntityKind::Activity, "venue")
                .display(&["title", "activity_type.name", "start_date"]),
            EntityRegistration::global(EntityKind::TalkType).display(&["name"]),
            EntityRegistration::scoped(EntityKind::TalkProposal, "activity.venue")
                .display(&["activity.title", "talk_type.name"])
                .export(&[
                    "id",
                    "activity",
                    "talk_type",
                    "speakers_email",
                    "labels",
                    "presentation",
                ]),
            EntityRegistration::scoped(EntityKind::Room, "venue")
                .display(&["name", "for_talk_type.name"]),
            EntityRegistration::scoped(EntityKind::TalkTime, "venue")
                .display(&["talk_type.name", "start_date", "end_date"]),
            EntityRegistration::scoped(EntityKind::Talk, "proposal.activity.venue")
                .display(&["proposal.activity.title", "room.name", "talk_time.start_date"]),
            EntityRegistration::scoped(EntityKind::Comment, "activity.venue")
                .display(&["activity", "created", "user"]),
            EntityRegistration::global(EntityKind::ContactType).display(&["name", "icon_class"]),
            EntityRegistration::scoped(EntityKind::Contact, "venue")
                .display(&["contact_type.name", "url", "text"]),
            EntityRegistration::scoped(EntityKind::EventInfo, "venue").display(&["venue.name"]),
        ] {
            registry.register(registration)?;
        }
        Ok(registry)
    }
}

fn resolve_all(kind: EntityKind, paths: &[String]) -> Result<Vec<FieldPath>, RegistryError> {
    paths
        .iter()
        .map(|path| resolve_field_path(kind, path).map_err(|reason| malformed(kind, path, reason)))
        .collect()
}

fn malformed(entity: EntityKind, path: &str, reason: PathError) -> RegistryError {
    RegistryError::MalformedPath {
        entity,
        path: path.to_string(),
        reason,
    }
}
