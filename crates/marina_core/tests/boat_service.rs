use marina_core::db::open_db_in_memory;
use marina_core::{
    ArrivalService, BoatListQuery, BoatPatch, BoatService, DockRequest, ErrorKind, MarinaError,
    NewBoat, NewSlip, SlipService, SqliteStore, ValidationError,
};
use rusqlite::Connection;

fn boats(conn: &Connection) -> BoatService<SqliteStore<'_>> {
    BoatService::new(SqliteStore::try_new(conn).unwrap())
}

fn slips(conn: &Connection) -> SlipService<SqliteStore<'_>> {
    SlipService::new(SqliteStore::try_new(conn).unwrap())
}

fn arrivals(conn: &Connection) -> ArrivalService<SqliteStore<'_>> {
    ArrivalService::new(SqliteStore::try_new(conn).unwrap())
}

fn dock_request(boat_id: &str, date: &str) -> DockRequest {
    DockRequest::new(boat_id, date)
}

#[test]
fn create_boat_starts_at_sea_and_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let service = boats(&conn);

    let created = service
        .create_boat(NewBoat {
            name: "Orca".to_string(),
            kind: Some("sloop".to_string()),
            length: Some(28.0),
        })
        .unwrap();
    assert!(created.at_sea);
    assert_eq!(created.self_link(), format!("/boats/{}", created.id));

    let fetched = service.get_boat(&created.id.to_string()).unwrap();
    assert_eq!(fetched, created);

    let minimal = service.create_boat(NewBoat::named("Skiff")).unwrap();
    assert!(minimal.kind.is_none());
    assert!(minimal.length.is_none());
}

#[test]
fn create_boat_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let err = boats(&conn).create_boat(NewBoat::named("  ")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn get_boat_with_unknown_or_malformed_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = boats(&conn);

    let err = service.get_boat("definitely-not-an-id").unwrap_err();
    assert!(matches!(err, MarinaError::BoatNotFound(_)));

    let err = service
        .get_boat("00000000-0000-4000-8000-000000000001")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn patch_boat_changes_only_provided_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = boats(&conn);
    let created = service
        .create_boat(NewBoat {
            name: "Orca".to_string(),
            kind: Some("sloop".to_string()),
            length: Some(28.0),
        })
        .unwrap();
    let id = created.id.to_string();

    let patched = service
        .patch_boat(
            &id,
            BoatPatch {
                length: Some(30.5),
                ..BoatPatch::default()
            },
        )
        .unwrap();
    assert_eq!(patched.name, "Orca");
    assert_eq!(patched.kind.as_deref(), Some("sloop"));
    assert_eq!(patched.length, Some(30.5));
    assert!(patched.at_sea);

    let unchanged = service.patch_boat(&id, BoatPatch::default()).unwrap();
    assert_eq!(unchanged, patched);
}

#[test]
fn patch_boat_validation_failure_leaves_boat_untouched() {
    let conn = open_db_in_memory().unwrap();
    let service = boats(&conn);
    let created = service.create_boat(NewBoat::named("Orca")).unwrap();
    let id = created.id.to_string();

    let err = service
        .patch_boat(
            &id,
            BoatPatch {
                name: Some(String::new()),
                length: Some(12.0),
                ..BoatPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(service.get_boat(&id).unwrap(), created);
}

#[test]
fn patch_boat_does_not_undock() {
    let conn = open_db_in_memory().unwrap();
    let boat = boats(&conn).create_boat(NewBoat::named("Orca")).unwrap();
    let slip = slips(&conn).create_slip(NewSlip { number: 1 }).unwrap();
    arrivals(&conn)
        .dock(&slip.id.to_string(), dock_request(&boat.id.to_string(), "2024-05-01"))
        .unwrap();

    let patched = boats(&conn)
        .patch_boat(
            &boat.id.to_string(),
            BoatPatch {
                name: Some("Orca II".to_string()),
                ..BoatPatch::default()
            },
        )
        .unwrap();
    assert!(!patched.at_sea);
    let slip = slips(&conn).get_slip(&slip.id.to_string()).unwrap();
    assert_eq!(slip.current_boat, Some(boat.id));
}

#[test]
fn replace_boat_resets_optionals_and_returns_to_sea() {
    let conn = open_db_in_memory().unwrap();
    let service = boats(&conn);
    let created = service
        .create_boat(NewBoat {
            name: "Orca".to_string(),
            kind: Some("sloop".to_string()),
            length: Some(28.0),
        })
        .unwrap();

    let replaced = service
        .replace_boat(&created.id.to_string(), NewBoat::named("Narwhal"))
        .unwrap();
    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.name, "Narwhal");
    assert!(replaced.kind.is_none());
    assert!(replaced.length.is_none());
    assert!(replaced.at_sea);
}

#[test]
fn replace_docked_boat_vacates_its_slip() {
    let conn = open_db_in_memory().unwrap();
    let boat = boats(&conn).create_boat(NewBoat::named("Orca")).unwrap();
    let slip = slips(&conn).create_slip(NewSlip { number: 3 }).unwrap();
    let slip_id = slip.id.to_string();
    arrivals(&conn)
        .dock(&slip_id, dock_request(&boat.id.to_string(), "2024-05-01"))
        .unwrap();

    let replaced = boats(&conn)
        .replace_boat(&boat.id.to_string(), NewBoat::named("Orca"))
        .unwrap();
    assert!(replaced.at_sea);

    let slip = slips(&conn).get_slip(&slip_id).unwrap();
    assert!(slip.current_boat.is_none());
    assert!(slip.arrival_date.is_none());
}

#[test]
fn replace_missing_boat_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let err = boats(&conn)
        .replace_boat("00000000-0000-4000-8000-000000000002", NewBoat::named("x"))
        .unwrap_err();
    assert!(matches!(err, MarinaError::BoatNotFound(_)));
}

#[test]
fn delete_docked_boat_frees_its_slip() {
    let conn = open_db_in_memory().unwrap();
    let boat = boats(&conn).create_boat(NewBoat::named("Orca")).unwrap();
    let slip = slips(&conn).create_slip(NewSlip { number: 7 }).unwrap();
    let slip_id = slip.id.to_string();
    arrivals(&conn)
        .dock(&slip_id, dock_request(&boat.id.to_string(), "2024-05-01"))
        .unwrap();

    boats(&conn).delete_boat(&boat.id.to_string()).unwrap();

    let err = boats(&conn).get_boat(&boat.id.to_string()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let slip = slips(&conn).get_slip(&slip_id).unwrap();
    assert!(slip.current_boat.is_none());
    assert!(slip.arrival_date.is_none());
}

#[test]
fn delete_missing_boat_is_not_found_and_ids_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let service = boats(&conn);
    let first = service.create_boat(NewBoat::named("Once")).unwrap();
    service.delete_boat(&first.id.to_string()).unwrap();

    let err = service.delete_boat(&first.id.to_string()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let second = service.create_boat(NewBoat::named("Once")).unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn list_boats_filters_docked() {
    let conn = open_db_in_memory().unwrap();
    let docked = boats(&conn).create_boat(NewBoat::named("Docked")).unwrap();
    boats(&conn).create_boat(NewBoat::named("Roaming")).unwrap();
    let slip = slips(&conn).create_slip(NewSlip { number: 1 }).unwrap();
    arrivals(&conn)
        .dock(&slip.id.to_string(), dock_request(&docked.id.to_string(), "2024-05-01"))
        .unwrap();

    let all = boats(&conn).list_boats(&BoatListQuery::default()).unwrap();
    assert_eq!(all.len(), 2);

    let in_port = boats(&conn)
        .list_boats(&BoatListQuery { at_sea: Some(false) })
        .unwrap();
    assert_eq!(in_port.len(), 1);
    assert_eq!(in_port[0].id, docked.id);
}

#[test]
fn validation_errors_name_the_missing_field() {
    let err = MarinaError::from(ValidationError::MissingField("name"));
    assert_eq!(err.to_string(), "missing required field `name`");
}
