//! Two-venue fixture shared by the admin and scoping tests.

#![allow(dead_code)]

use eventol_core::model::inventory::{
    Hardware, HardwareKind, HardwareManufacturer, Installation, Software, SoftwareKind,
};
use eventol_core::model::people::{
    Attendee, Collaborator, EventUser, Installer, InstallerLevel, User,
};
use eventol_core::model::program::{Activity, Comment, TalkProposal, TalkType};
use eventol_core::model::venue::Venue;
use eventol_core::repo::inventory_repo::{InventoryRepository, SqliteInventoryRepository};
use eventol_core::repo::people_repo::{PeopleRepository, SqlitePeopleRepository};
use eventol_core::repo::program_repo::{ProgramRepository, SqliteProgramRepository};
use eventol_core::repo::venue_repo::{SqliteVenueRepository, VenueRepository};
use eventol_core::{open_db_in_memory, RecordId};
use rusqlite::Connection;

pub const JOINED: i64 = 1_714_176_000_000;

pub struct Fixture {
    pub conn: Connection,
    pub v1: RecordId,
    pub v2: RecordId,
    pub admin: RecordId,
    /// Collaborator of V1.
    pub ana: RecordId,
    /// Collaborator of V2.
    pub bruno: RecordId,
    /// Attendee of V1 without a collaborator record.
    pub carla: RecordId,
    /// Collaborator of both venues.
    pub dario: RecordId,
    pub a1: RecordId,
    pub a2: RecordId,
    pub c1: RecordId,
    pub c2: RecordId,
    pub p1: RecordId,
    pub p2: RecordId,
    pub talk_type: RecordId,
    pub installer_v1: RecordId,
    pub installer_v2: RecordId,
    pub attendee_v1: RecordId,
    pub attendee_v2: RecordId,
    /// Installed by V1's installer on a notebook.
    pub i1: RecordId,
    /// Installed by V2's installer without hardware.
    pub i2: RecordId,
}

pub fn seed() -> Fixture {
    let conn = open_db_in_memory().unwrap();
    let venues = SqliteVenueRepository::new(&conn);
    let people = SqlitePeopleRepository::new(&conn);
    let inventory = SqliteInventoryRepository::new(&conn);
    let program = SqliteProgramRepository::new(&conn);

    let v1 = venues
        .create_venue(&Venue::new("FLISoL Caba", "Buenos Aires", "UTN", "2024-04-27"))
        .unwrap();
    let v2 = venues
        .create_venue(&Venue::new("FLISoL Rosario", "Rosario", "UNR", "2024-04-27"))
        .unwrap();

    let admin = user(&people, "admin");
    people.set_superuser(admin, true).unwrap();
    let ana = user(&people, "ana");
    let bruno = user(&people, "bruno");
    let carla = user(&people, "carla");
    let dario = user(&people, "dario");
    let eva = user(&people, "eva");

    let ana_v1 = join(&people, ana, v1);
    let bruno_v2 = join(&people, bruno, v2);
    let carla_v1 = join(&people, carla, v1);
    let dario_v1 = join(&people, dario, v1);
    let dario_v2 = join(&people, dario, v2);
    let eva_v2 = join(&people, eva, v2);

    for event_user_id in [ana_v1, bruno_v2, dario_v1, dario_v2] {
        people
            .create_collaborator(&Collaborator {
                event_user_id,
                assignation: Some("Acreditaciones".to_string()),
                ..Collaborator::default()
            })
            .unwrap();
    }

    let installer_v1 = installer(&people, ana_v1, InstallerLevel::Advanced);
    let installer_v2 = installer(&people, bruno_v2, InstallerLevel::Beginner);
    let attendee_v1 = attendee(&people, carla_v1);
    let attendee_v2 = attendee(&people, eva_v2);

    let manufacturer = inventory
        .create_manufacturer(&HardwareManufacturer {
            id: None,
            name: "Lenovo".to_string(),
        })
        .unwrap();
    let notebook = inventory
        .create_hardware(&Hardware {
            id: None,
            kind: HardwareKind::Notebook,
            manufacturer_id: Some(manufacturer),
            model: Some("X220".to_string()),
            serial: Some("SN-1".to_string()),
        })
        .unwrap();
    let debian = inventory
        .create_software(&Software {
            id: None,
            name: "Debian".to_string(),
            version: "12".to_string(),
            kind: SoftwareKind::OperativeSystem,
        })
        .unwrap();

    let i1 = inventory
        .create_installation(&Installation {
            id: None,
            attendee_id: attendee_v1,
            installer_id: installer_v1,
            hardware_id: Some(notebook),
            software_id: Some(debian),
            notes: Some("dual boot".to_string()),
        })
        .unwrap();
    let i2 = inventory
        .create_installation(&Installation {
            id: None,
            attendee_id: attendee_v2,
            installer_id: installer_v2,
            hardware_id: None,
            software_id: Some(debian),
            notes: None,
        })
        .unwrap();

    let talk = program.ensure_activity_type("talk").unwrap();
    let a1 = program
        .create_activity(&Activity::new(v1, talk, "Intro a Rust"))
        .unwrap();
    let a2 = program
        .create_activity(&Activity::new(v2, talk, "Software libre en la escuela"))
        .unwrap();

    let c1 = comment(&program, a1, ana, "Sala llena");
    let c2 = comment(&program, a2, bruno, "Falta proyector");

    let talk_type = program
        .create_talk_type(&TalkType {
            id: None,
            name: "Charla".to_string(),
        })
        .unwrap();
    let p1 = proposal(&program, a1, talk_type, "speaker@example.org");
    let p2 = proposal(&program, a2, talk_type, "otro@example.org");

    Fixture {
        conn,
        v1,
        v2,
        admin,
        ana,
        bruno,
        carla,
        dario,
        a1,
        a2,
        c1,
        c2,
        p1,
        p2,
        talk_type,
        installer_v1,
        installer_v2,
        attendee_v1,
        attendee_v2,
        i1,
        i2,
    }
}

fn user(people: &SqlitePeopleRepository<'_>, username: &str) -> RecordId {
    let mut user = User::new(username, format!("{username}@example.org"), JOINED);
    user.first_name = username.to_uppercase();
    people.create_user(&user).unwrap()
}

fn join(people: &SqlitePeopleRepository<'_>, user_id: RecordId, venue_id: RecordId) -> RecordId {
    people
        .create_event_user(&EventUser {
            id: None,
            user_id,
            venue_id,
            assisted: false,
        })
        .unwrap()
}

fn installer(
    people: &SqlitePeopleRepository<'_>,
    event_user_id: RecordId,
    level: InstallerLevel,
) -> RecordId {
    people
        .create_installer(&Installer {
            id: None,
            event_user_id,
            level,
        })
        .unwrap()
}

fn attendee(people: &SqlitePeopleRepository<'_>, event_user_id: RecordId) -> RecordId {
    people
        .create_attendee(&Attendee {
            id: None,
            event_user_id,
            additional_info: None,
        })
        .unwrap()
}

fn comment(
    program: &SqliteProgramRepository<'_>,
    activity_id: RecordId,
    user_id: RecordId,
    body: &str,
) -> RecordId {
    program
        .create_comment(&Comment {
            id: None,
            activity_id,
            user_id,
            body: body.to_string(),
            created: JOINED,
        })
        .unwrap()
}

fn proposal(
    program: &SqliteProgramRepository<'_>,
    activity_id: RecordId,
    talk_type_id: RecordId,
    speakers_email: &str,
) -> RecordId {
    program
        .create_talk_proposal(&TalkProposal {
            id: None,
            activity_id,
            talk_type_id,
            speakers_email: speakers_email.to_string(),
            labels: "Rust, Linux".to_string(),
            presentation: None,
        })
        .unwrap()
}
