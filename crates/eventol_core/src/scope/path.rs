//! Relation path parsing and resolution.
//!
//! # Responsibility
//! - Parse dotted paths such as `installer.event_user.venue`.
//! - Resolve every segment against static schema metadata once, at
//!   registration time, so request-time code never sees an invalid path.
//!
//! # Invariants
//! - A resolved `FieldPath` joins only declared relations and ends in a
//!   real column of the last joined entity.
//! - A venue path ends in a relation targeting `Venue` and never crosses a
//!   nullable foreign key.

use crate::model::entity::EntityKind;
use crate::model::schema::{schema_of, Relation};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid path segment regex"));

/// Why a declared path could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    Empty,
    InvalidSegment(String),
    UnknownRelation {
        entity: EntityKind,
        segment: String,
    },
    UnknownField {
        entity: EntityKind,
        segment: String,
    },
    /// The last segment does not point at a venue.
    NotVenueTerminated {
        reached: EntityKind,
    },
    /// A venue path crosses a foreign key that may be NULL.
    NullableHop(String),
}

impl Display for PathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "path must not be empty"),
            Self::InvalidSegment(segment) => write!(f, "invalid path segment `{segment}`"),
            Self::UnknownRelation { entity, segment } => {
                write!(f, "{entity} has no relation `{segment}`")
            }
            Self::UnknownField { entity, segment } => {
                write!(f, "{entity} has no column or relation `{segment}`")
            }
            Self::NotVenueTerminated { reached } => {
                write!(f, "path ends at {reached} instead of venue")
            }
            Self::NullableHop(segment) => {
                write!(f, "relation `{segment}` is nullable and cannot scope by venue")
            }
        }
    }
}

impl Error for PathError {}

/// A resolved path from a root entity to one column.
///
/// `joins` is the chain of relations to follow from the root; `column` is
/// read on the last entity reached (the root itself when `joins` is empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    source: String,
    root: EntityKind,
    joins: Vec<&'static Relation>,
    column: &'static str,
}

impl FieldPath {
    /// The path as it was declared.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> EntityKind {
        self.root
    }

    pub fn joins(&self) -> &[&'static Relation] {
        &self.joins
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    /// Entity owning `column`.
    pub fn leaf(&self) -> EntityKind {
        self.joins.last().map_or(self.root, |relation| relation.target)
    }

    /// Path to a plain column of `root`, e.g. the venue `name`.
    pub(crate) fn own_column(root: EntityKind, column: &'static str) -> Self {
        Self {
            source: column.to_string(),
            root,
            joins: Vec::new(),
            column,
        }
    }
}

/// Resolves a display/export path.
///
/// Every segment but the last must be a relation. The last segment may be a
/// column, or a relation whose foreign-key value is then read.
pub fn resolve_field_path(root: EntityKind, path: &str) -> Result<FieldPath, PathError> {
    let segments = split_segments(path)?;
    let (last, hops) = segments.split_last().ok_or(PathError::Empty)?;
    let (joins, leaf) = follow_relations(root, hops)?;

    let schema = schema_of(leaf);
    let column = if let Some(column) = schema.columns.iter().find(|column| **column == *last) {
        *column
    } else if let Some(relation) = schema.relation(last) {
        relation.column
    } else {
        return Err(PathError::UnknownField {
            entity: leaf,
            segment: (*last).to_string(),
        });
    };

    Ok(FieldPath {
        source: segments.join("."),
        root,
        joins,
        column,
    })
}

/// Resolves a path-to-venue.
///
/// The result reads the venue foreign key held by the last non-venue entity,
/// so the venue table itself is never joined.
pub fn resolve_venue_path(root: EntityKind, path: &str) -> Result<FieldPath, PathError> {
    let segments = split_segments(path)?;
    let (joins, leaf) = follow_relations(root, &segments)?;

    if leaf != EntityKind::Venue {
        return Err(PathError::NotVenueTerminated { reached: leaf });
    }
    reject_nullable_hops(&joins)?;

    let mut joins = joins;
    let venue_hop = joins.pop().ok_or(PathError::Empty)?;
    Ok(FieldPath {
        source: segments.join("."),
        root,
        joins,
        column: venue_hop.column,
    })
}

fn split_segments(path: &str) -> Result<Vec<&str>, PathError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    trimmed
        .split('.')
        .map(|segment| {
            if SEGMENT_RE.is_match(segment) {
                Ok(segment)
            } else {
                Err(PathError::InvalidSegment(segment.to_string()))
            }
        })
        .collect()
}

/// A venue reached through a nullable foreign key may be absent, which
/// would leave the record without an owner.
fn reject_nullable_hops(joins: &[&Relation]) -> Result<(), PathError> {
    match joins.iter().find(|relation| relation.nullable) {
        Some(nullable) => Err(PathError::NullableHop(nullable.name.to_string())),
        None => Ok(()),
    }
}

fn follow_relations(
    root: EntityKind,
    segments: &[&str],
) -> Result<(Vec<&'static Relation>, EntityKind), PathError> {
    let mut current = root;
    let mut joins = Vec::with_capacity(segments.len());
    for segment in segments {
        let relation =
            schema_of(current)
                .relation(segment)
                .ok_or_else(|| PathError::UnknownRelation {
                    entity: current,
                    segment: (*segment).to_string(),
                })?;
        joins.push(relation);
        current = relation.target;
    }
    Ok((joins, current))
}

#[cfg(test)]
mod tests {
    use super::{reject_nullable_hops, resolve_field_path, resolve_venue_path, PathError};
    use crate::model::entity::EntityKind;
    use crate::model::schema::Relation;

    #[test]
    fn venue_path_drops_the_final_venue_join() {
        let path = resolve_venue_path(EntityKind::Installation, "installer.event_user.venue")
            .expect("installation path");
        let names: Vec<_> = path.joins().iter().map(|relation| relation.name).collect();
        assert_eq!(names, vec!["installer", "event_user"]);
        assert_eq!(path.column(), "venue_id");
        assert_eq!(path.leaf(), EntityKind::EventUser);
        assert_eq!(path.source(), "installer.event_user.venue");
    }

    #[test]
    fn single_hop_venue_path_reads_root_column() {
        let path = resolve_venue_path(EntityKind::Room, "venue").expect("room path");
        assert!(path.joins().is_empty());
        assert_eq!(path.column(), "venue_id");
    }

    #[test]
    fn venue_path_must_end_at_venue() {
        let err = resolve_venue_path(EntityKind::Comment, "activity")
            .expect_err("activity is not a venue");
        assert_eq!(
            err,
            PathError::NotVenueTerminated {
                reached: EntityKind::Activity
            }
        );
    }

    #[test]
    fn venue_path_rejects_unknown_relations() {
        let unknown = resolve_venue_path(EntityKind::Comment, "activity.sede")
            .expect_err("unknown relation");
        assert!(matches!(unknown, PathError::UnknownRelation { .. }));

        let column_hop = resolve_venue_path(EntityKind::Comment, "body.venue")
            .expect_err("columns cannot be traversed");
        assert!(matches!(column_hop, PathError::UnknownRelation { .. }));
    }

    #[test]
    fn nullable_hop_is_rejected_wherever_it_appears() {
        let installer = Relation {
            name: "installer",
            column: "installer_id",
            target: EntityKind::Installer,
            nullable: false,
        };
        let sponsor = Relation {
            name: "sponsor_venue",
            column: "sponsor_venue_id",
            target: EntityKind::Venue,
            nullable: true,
        };

        assert_eq!(reject_nullable_hops(&[&installer]), Ok(()));
        assert_eq!(
            reject_nullable_hops(&[&installer, &sponsor]),
            Err(PathError::NullableHop("sponsor_venue".to_string()))
        );
    }

    #[test]
    fn field_path_accepts_columns_and_relation_terminals() {
        let email = resolve_field_path(EntityKind::Installation, "attendee.event_user.user.email")
            .expect("email path");
        assert_eq!(email.joins().len(), 3);
        assert_eq!(email.column(), "email");
        assert_eq!(email.leaf(), EntityKind::User);

        let fk = resolve_field_path(EntityKind::Comment, "activity").expect("fk path");
        assert!(fk.joins().is_empty());
        assert_eq!(fk.column(), "activity_id");
    }

    #[test]
    fn field_path_rejects_malformed_segments() {
        assert_eq!(resolve_field_path(EntityKind::Venue, "  "), Err(PathError::Empty));
        assert!(matches!(
            resolve_field_path(EntityKind::Installer, "event_user..user"),
            Err(PathError::InvalidSegment(_))
        ));
        assert!(matches!(
            resolve_field_path(EntityKind::Installer, "event_user__user__email"),
            Err(PathError::UnknownField { .. })
        ));
        assert!(matches!(
            resolve_field_path(EntityKind::Installer, "Level"),
            Err(PathError::InvalidSegment(_))
        ));
    }
}
