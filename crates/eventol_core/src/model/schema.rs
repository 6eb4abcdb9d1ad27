//! Static relational metadata for every entity table.
//!
//! # Responsibility
//! - Name the table, plain columns and foreign-key relations of each entity.
//! - Serve as the single lookup used to resolve relation paths.
//!
//! # Invariants
//! - Descriptors mirror the migrated SQLite schema exactly.
//! - Relation names are unique per entity and never collide with columns.

use crate::model::entity::EntityKind;

/// One foreign-key relation from an entity to another entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    /// Path segment naming this relation, e.g. `event_user`.
    pub name: &'static str,
    /// Foreign-key column on the owning table, e.g. `event_user_id`.
    pub column: &'static str,
    pub target: EntityKind,
    /// Whether the foreign key may be NULL.
    pub nullable: bool,
}

/// Table layout of one entity.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub table: &'static str,
    /// Plain columns, including `id`, excluding foreign keys.
    pub columns: &'static [&'static str],
    pub relations: &'static [Relation],
}

impl EntitySchema {
    pub fn relation(&self, name: &str) -> Option<&'static Relation> {
        self.relations.iter().find(|relation| relation.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(&name)
    }
}

const fn rel(
    name: &'static str,
    column: &'static str,
    target: EntityKind,
    nullable: bool,
) -> Relation {
    Relation {
        name,
        column,
        target,
        nullable,
    }
}

const EVENT_USER_REL: &[Relation] = &[rel("event_user", "event_user_id", EntityKind::EventUser, false)];
const VENUE_REL: &[Relation] = &[rel("venue", "venue_id", EntityKind::Venue, false)];

static SCHEMAS: &[EntitySchema] = &[
    EntitySchema {
        kind: EntityKind::Venue,
        table: "venues",
        columns: &["id", "name", "country", "region", "city", "district", "place", "date"],
        relations: &[],
    },
    EntitySchema {
        kind: EntityKind::User,
        table: "users",
        columns: &[
            "id",
            "username",
            "first_name",
            "last_name",
            "email",
            "is_superuser",
            "date_joined",
        ],
        relations: &[],
    },
    EntitySchema {
        kind: EntityKind::EventUser,
        table: "event_users",
        columns: &["id", "assisted"],
        relations: &[
            rel("user", "user_id", EntityKind::User, false),
            rel("venue", "venue_id", EntityKind::Venue, false),
        ],
    },
    EntitySchema {
        kind: EntityKind::Collaborator,
        table: "collaborators",
        columns: &[
            "id",
            "phone",
            "address",
            "assignation",
            "time_availability",
            "additional_info",
        ],
        relations: EVENT_USER_REL,
    },
    EntitySchema {
        kind: EntityKind::Organizer,
        table: "organizers",
        columns: &["id", "is_coordinator"],
        relations: EVENT_USER_REL,
    },
    EntitySchema {
        kind: EntityKind::Installer,
        table: "installers",
        columns: &["id", "level"],
        relations: EVENT_USER_REL,
    },
    EntitySchema {
        kind: EntityKind::Attendee,
        table: "attendees",
        columns: &["id", "additional_info"],
        relations: EVENT_USER_REL,
    },
    EntitySchema {
        kind: EntityKind::HardwareManufacturer,
        table: "hardware_manufacturers",
        columns: &["id", "name"],
        relations: &[],
    },
    EntitySchema {
        kind: EntityKind::Hardware,
        table: "hardware",
        columns: &["id", "kind", "model", "serial"],
        relations: &[rel(
            "manufacturer",
            "manufacturer_id",
            EntityKind::HardwareManufacturer,
            true,
        )],
    },
    EntitySchema {
        kind: EntityKind::Software,
        table: "software",
        columns: &["id", "name", "version", "kind"],
        relations: &[],
    },
    EntitySchema {
        kind: EntityKind::Installation,
        table: "installations",
        columns: &["id", "notes"],
        relations: &[
            rel("attendee", "attendee_id", EntityKind::Attendee, false),
            rel("installer", "installer_id", EntityKind::Installer, false),
            rel("hardware", "hardware_id", EntityKind::Hardware, true),
            rel("software", "software_id", EntityKind::Software, true),
        ],
    },
    EntitySchema {
        kind: EntityKind::ActivityType,
        table: "activity_types",
        columns: &["id", "name"],
        relations: &[],
    },
    EntitySchema {
        kind: EntityKind::Activity,
        table: "activities",
        columns: &[
            "id",
            "title",
            "abstract",
            "long_description",
            "start_date",
            "end_date",
        ],
        relations: &[
            rel("venue", "venue_id", EntityKind::Venue, false),
            // Added by the second migration, so older rows may carry NULL.
            rel("activity_type", "activity_type_id", EntityKind::ActivityType, true),
        ],
    },
    EntitySchema {
        kind: EntityKind::TalkType,
        table: "talk_types",
        columns: &["id", "name"],
        relations: &[],
    },
    EntitySchema {
        kind: EntityKind::TalkProposal,
        table: "talk_proposals",
        columns: &["id", "speakers_email", "labels", "presentation"],
        relations: &[
            rel("activity", "activity_id", EntityKind::Activity, false),
            rel("talk_type", "talk_type_id", EntityKind::TalkType, false),
        ],
    },
    EntitySchema {
        kind: EntityKind::Room,
        table: "rooms",
        columns: &["id", "name"],
        relations: &[
            rel("venue", "venue_id", EntityKind::Venue, false),
            rel("for_talk_type", "for_talk_type_id", EntityKind::TalkType, true),
        ],
    },
    EntitySchema {
        kind: EntityKind::TalkTime,
        table: "talk_times",
        columns: &["id", "start_date", "end_date"],
        relations: &[
            rel("venue", "venue_id", EntityKind::Venue, false),
            rel("talk_type", "talk_type_id", EntityKind::TalkType, false),
        ],
    },
    EntitySchema {
        kind: EntityKind::Talk,
        table: "talks",
        columns: &["id"],
        relations: &[
            rel("proposal", "proposal_id", EntityKind::TalkProposal, false),
            rel("room", "room_id", EntityKind::Room, false),
            rel("talk_time", "talk_time_id", EntityKind::TalkTime, false),
        ],
    },
    EntitySchema {
        kind: EntityKind::Comment,
        table: "comments",
        columns: &["id", "body", "created"],
        relations: &[
            rel("activity", "activity_id", EntityKind::Activity, false),
            rel("user", "user_id", EntityKind::User, false),
        ],
    },
    EntitySchema {
        kind: EntityKind::ContactType,
        table: "contact_types",
        columns: &["id", "name", "icon_class"],
        relations: &[],
    },
    EntitySchema {
        kind: EntityKind::Contact,
        table: "contacts",
        columns: &["id", "url", "text"],
        relations: &[
            rel("venue", "venue_id", EntityKind::Venue, false),
            rel("contact_type", "contact_type_id", EntityKind::ContactType, false),
        ],
    },
    EntitySchema {
        kind: EntityKind::EventInfo,
        table: "event_infos",
        columns: &["id", "html"],
        relations: VENUE_REL,
    },
];

/// Returns the table layout for `kind`.
pub fn schema_of(kind: EntityKind) -> &'static EntitySchema {
    // SCHEMAS is declared in `EntityKind::ALL` order.
    &SCHEMAS[kind as usize]
}

#[cfg(test)]
mod tests {
    use super::{schema_of, SCHEMAS};
    use crate::model::entity::EntityKind;

    #[test]
    fn every_kind_has_its_own_descriptor() {
        assert_eq!(SCHEMAS.len(), EntityKind::ALL.len());
        for kind in EntityKind::ALL {
            assert_eq!(schema_of(kind).kind, kind);
        }
    }

    #[test]
    fn relation_names_do_not_shadow_columns() {
        for schema in SCHEMAS {
            assert!(schema.has_column("id"), "{} lacks id", schema.table);
            for relation in schema.relations {
                assert!(
                    !schema.has_column(relation.name),
                    "{}.{} is both column and relation",
                    schema.table,
                    relation.name
                );
            }
        }
    }

    #[test]
    fn installation_reaches_installer() {
        let relation = schema_of(EntityKind::Installation)
            .relation("installer")
            .expect("installer relation");
        assert_eq!(relation.column, "installer_id");
        assert_eq!(relation.target, EntityKind::Installer);
        assert!(!relation.nullable);
    }
}
