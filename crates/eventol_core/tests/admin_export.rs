mod common;

use common::seed;
use eventol_core::admin::export::{to_csv, to_json};
use eventol_core::{
    resolve_actor, AccessError, AdminService, AdminSite, CellValue, EntityKind, EntityRegistry,
    ExportFormat, RegistryError,
};

#[test]
fn installation_export_follows_declared_column_order() {
    let fx = seed();
    let registry = EntityRegistry::eventol_default().unwrap();
    let site = AdminSite::new(&fx.conn, &registry);
    let admin = resolve_actor(&fx.conn, fx.admin).unwrap();

    let table = site.export(&admin, EntityKind::Installation).unwrap();
    assert_eq!(
        table.columns,
        vec![
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
        ]
    );
    assert_eq!(table.ids(), vec![fx.i1, fx.i2]);

    let first = &table.rows[0].values;
    assert_eq!(first[0], CellValue::Text("notebook".to_string()));
    assert_eq!(first[1], CellValue::Text("Lenovo".to_string()));
    assert_eq!(first[7], CellValue::Text("carla@example.org".to_string()));
    assert_eq!(first[8], CellValue::Text("ana".to_string()));

    let second = &table.rows[1].values;
    assert_eq!(second[0], CellValue::Null);
    assert_eq!(second[1], CellValue::Null);
    assert_eq!(second[5], CellValue::Text("Debian".to_string()));
    assert_eq!(second[9], CellValue::Null);
}

#[test]
fn scoped_export_contains_only_the_actor_venue() {
    let fx = seed();
    let registry = EntityRegistry::eventol_default().unwrap();
    let site = AdminSite::new(&fx.conn, &registry);
    let bruno = resolve_actor(&fx.conn, fx.bruno).unwrap();

    let proposals = site.export(&bruno, EntityKind::TalkProposal).unwrap();
    assert_eq!(
        proposals.columns,
        vec![
            "id",
            "activity",
            "talk_type",
            "speakers_email",
            "labels",
            "presentation"
        ]
    );
    assert_eq!(proposals.ids(), vec![fx.p2]);
    assert_eq!(proposals.rows[0].values[1].as_integer(), Some(fx.a2));

    let collaborators = site.export(&bruno, EntityKind::Collaborator).unwrap();
    let usernames: Vec<_> = collaborators
        .column("event_user.user.username")
        .unwrap()
        .into_iter()
        .filter_map(CellValue::as_text)
        .collect();
    assert_eq!(usernames, vec!["bruno", "dario"]);
}

#[test]
fn csv_export_has_header_and_one_line_per_row() {
    let fx = seed();
    let registry = EntityRegistry::eventol_default().unwrap();
    let site = AdminSite::new(&fx.conn, &registry);
    let ana = resolve_actor(&fx.conn, fx.ana).unwrap();

    let table = site.export(&ana, EntityKind::Installer).unwrap();
    let csv = to_csv(&table);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "event_user.user.first_name,event_user.user.last_name,event_user.user.username,\
         event_user.user.email,event_user.user.date_joined,event_user.assisted,level"
    );
    assert_eq!(
        lines[1],
        "ANA,,ana,ana@example.org,1714176000000,0,advanced"
    );
    assert_eq!(lines.len(), 2);
}

#[test]
fn json_export_keys_rows_by_field_path() {
    let fx = seed();
    let registry = EntityRegistry::eventol_default().unwrap();
    let site = AdminSite::new(&fx.conn, &registry);
    let ana = resolve_actor(&fx.conn, fx.ana).unwrap();

    let table = site.export(&ana, EntityKind::Installation).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&to_json(&table).unwrap()).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["hardware.model"], "X220");
    assert_eq!(rows[0]["notes"], "dual boot");

    let keys: Vec<&str> = rows[0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, table.columns);
}

#[test]
fn service_exports_by_username() {
    let fx = seed();
    let registry = EntityRegistry::eventol_default().unwrap();
    let service = AdminService::new(&fx.conn, &registry);

    let csv = service
        .export("ana", "comment", ExportFormat::Csv)
        .unwrap();
    assert_eq!(csv.lines().count(), 2);

    let empty = service
        .export("carla", "comment", ExportFormat::Json)
        .unwrap();
    assert_eq!(empty.trim(), "[]");
}

#[test]
fn service_get_hides_records_of_other_venues() {
    let fx = seed();
    let registry = EntityRegistry::eventol_default().unwrap();
    let service = AdminService::new(&fx.conn, &registry);

    assert!(service.get("ana", "comment", fx.c1).unwrap().is_some());
    assert!(service.get("ana", "comment", fx.c2).unwrap().is_none());
    assert!(service.get("admin", "comment", fx.c2).unwrap().is_some());
}

#[test]
fn service_rejects_unknown_users_and_entities() {
    let fx = seed();
    let registry = EntityRegistry::eventol_default().unwrap();
    let service = AdminService::new(&fx.conn, &registry);

    assert!(matches!(
        service.list("nobody", "comment"),
        Err(AccessError::UnknownUser(name)) if name == "nobody"
    ));
    assert!(matches!(
        service.list("ana", "user"),
        Err(AccessError::Registry(RegistryError::UnregisteredEntity(EntityKind::User)))
    ));
    assert!(matches!(
        service.list("ana", "speaker"),
        Err(AccessError::Registry(RegistryError::UnknownEntityName(_)))
    ));
}
