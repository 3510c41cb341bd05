use marina_core::db::open_db_in_memory;
use marina_core::{
    ArrivalService, BoatRepository, BoatService, DockRequest, ErrorKind, MarinaError, NewBoat,
    NewSlip, Slip, SlipListQuery, SlipPatch, SlipRepository, SlipService, SqliteStore,
};
use rusqlite::Connection;
use uuid::Uuid;

fn slips(conn: &Connection) -> SlipService<SqliteStore<'_>> {
    SlipService::new(SqliteStore::try_new(conn).unwrap())
}

fn boats(conn: &Connection) -> BoatService<SqliteStore<'_>> {
    BoatService::new(SqliteStore::try_new(conn).unwrap())
}

fn dock(conn: &Connection, slip_id: &str, boat_id: &str) {
    ArrivalService::new(SqliteStore::try_new(conn).unwrap())
        .dock(
            slip_id,
            DockRequest::new(boat_id, "2024-05-01"),
        )
        .unwrap();
}

#[test]
fn create_slip_starts_vacant_and_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let service = slips(&conn);

    let created = service.create_slip(NewSlip { number: 12 }).unwrap();
    assert_eq!(created.number, 12);
    assert!(!created.is_occupied());
    assert!(created.arrival_date.is_none());
    assert_eq!(created.self_link(), format!("/slips/{}", created.id));

    assert_eq!(service.get_slip(&created.id.to_string()).unwrap(), created);
}

#[test]
fn slip_numbers_need_not_be_unique() {
    let conn = open_db_in_memory().unwrap();
    let service = slips(&conn);
    let first = service.create_slip(NewSlip { number: 1 }).unwrap();
    let second = service.create_slip(NewSlip { number: 1 }).unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(service.list_slips(&SlipListQuery::default()).unwrap().len(), 2);
}

#[test]
fn patch_slip_updates_number_and_arrival_date_only() {
    let conn = open_db_in_memory().unwrap();
    let service = slips(&conn);
    let created = service.create_slip(NewSlip { number: 4 }).unwrap();
    let id = created.id.to_string();

    let patched = service
        .patch_slip(
            &id,
            SlipPatch {
                arrival_date: Some("2024-06-01".to_string()),
                ..SlipPatch::default()
            },
        )
        .unwrap();
    assert_eq!(patched.number, 4);
    assert_eq!(patched.arrival_date.as_deref(), Some("2024-06-01"));
    assert!(!patched.is_occupied());

    let patched = service
        .patch_slip(
            &id,
            SlipPatch {
                number: Some(40),
                ..SlipPatch::default()
            },
        )
        .unwrap();
    assert_eq!(patched.number, 40);
    assert_eq!(patched.arrival_date.as_deref(), Some("2024-06-01"));
}

#[test]
fn patch_missing_slip_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let err = slips(&conn)
        .patch_slip("nope", SlipPatch::default())
        .unwrap_err();
    assert!(matches!(err, MarinaError::SlipNotFound(id) if id == "nope"));
}

#[test]
fn replace_occupied_slip_returns_boat_to_sea() {
    let conn = open_db_in_memory().unwrap();
    let boat = boats(&conn).create_boat(NewBoat::named("Orca")).unwrap();
    let slip = slips(&conn).create_slip(NewSlip { number: 2 }).unwrap();
    let slip_id = slip.id.to_string();
    dock(&conn, &slip_id, &boat.id.to_string());

    let replaced = slips(&conn)
        .replace_slip(&slip_id, NewSlip { number: 20 })
        .unwrap();
    assert_eq!(replaced.number, 20);
    assert!(replaced.current_boat.is_none());
    assert!(replaced.arrival_date.is_none());

    let boat = boats(&conn).get_boat(&boat.id.to_string()).unwrap();
    assert!(boat.at_sea);
}

#[test]
fn replace_tolerates_missing_occupant() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    let mut orphaned = Slip::new(8);
    orphaned.occupy(Uuid::new_v4(), "2024-01-01");
    store.create_slip(&orphaned).unwrap();

    let replaced = slips(&conn)
        .replace_slip(&orphaned.id.to_string(), NewSlip { number: 9 })
        .unwrap();
    assert_eq!(replaced.number, 9);
    assert!(!replaced.is_occupied());
}

#[test]
fn delete_occupied_slip_returns_boat_to_sea() {
    let conn = open_db_in_memory().unwrap();
    let boat = boats(&conn).create_boat(NewBoat::named("Orca")).unwrap();
    let slip = slips(&conn).create_slip(NewSlip { number: 2 }).unwrap();
    let slip_id = slip.id.to_string();
    dock(&conn, &slip_id, &boat.id.to_string());

    slips(&conn).delete_slip(&slip_id).unwrap();

    let err = slips(&conn).get_slip(&slip_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let boat = boats(&conn).get_boat(&boat.id.to_string()).unwrap();
    assert!(boat.at_sea);
}

#[test]
fn delete_tolerates_missing_occupant() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    let mut orphaned = Slip::new(8);
    orphaned.occupy(Uuid::new_v4(), "2024-01-01");
    store.create_slip(&orphaned).unwrap();

    slips(&conn).delete_slip(&orphaned.id.to_string()).unwrap();
    assert!(store.get_slip(orphaned.id).unwrap().is_none());
    assert!(store.list_boats(&Default::default()).unwrap().is_empty());
}

#[test]
fn list_slips_filters_by_occupancy() {
    let conn = open_db_in_memory().unwrap();
    let boat = boats(&conn).create_boat(NewBoat::named("Orca")).unwrap();
    let taken = slips(&conn).create_slip(NewSlip { number: 1 }).unwrap();
    let free = slips(&conn).create_slip(NewSlip { number: 2 }).unwrap();
    dock(&conn, &taken.id.to_string(), &boat.id.to_string());

    let occupied = slips(&conn)
        .list_slips(&SlipListQuery {
            occupied: Some(true),
        })
        .unwrap();
    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0].id, taken.id);

    let vacant = slips(&conn)
        .list_slips(&SlipListQuery {
            occupied: Some(false),
        })
        .unwrap();
    assert_eq!(vacant, vec![free]);
}
