//! Appointment integration tests

use chrono::{NaiveDate, NaiveTime};
use hospital_lib::app::{
    appointment_create, appointment_delete_by_ids, appointment_list_detailed, doctor_create,
    patient_create, patient_delete_by_ids, AppointmentCreateReq, Doctor, Patient,
};
use hospital_lib::infra::db::init_test_db;
use hospital_lib::infra::DbPool;

// ──────────────────────── Helper ────────────────────────

struct Fixture {
    pool: DbPool,
    patient: i64,
    doctor: i64,
}

fn setup() -> Fixture {
    let pool = init_test_db();
    let patient = patient_create(&pool, &mut Patient::new("Sam", "Ray")).unwrap();
    let mut d = Doctor::new("Ada", "Lin");
    d.specialization = Some("Cardiology".into());
    let doctor = doctor_create(&pool, &mut d).unwrap();
    Fixture {
        pool,
        patient,
        doctor,
    }
}

fn req(patient_id: i64, doctor_id: i64, notes: Option<&str>) -> AppointmentCreateReq {
    AppointmentCreateReq {
        patient_id,
        doctor_id,
        date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        notes: notes.map(str::to_string),
    }
}

// ══════════════════════════════════════════════════════════
//  appointment_create
// ══════════════════════════════════════════════════════════

#[test]
fn create_then_list_detailed() {
    let f = setup();
    appointment_create(&f.pool, req(f.patient, f.doctor, Some("Annual check"))).unwrap();

    let rows = appointment_list_detailed(&f.pool).unwrap();
    assert_eq!(rows.len(), 1);
    let a = &rows[0];
    assert_eq!(a.patient_id, f.patient);
    assert_eq!(a.doctor_id, f.doctor);
    assert_eq!(a.patient_name, "Sam Ray");
    assert_eq!(a.doctor_name, "Ada Lin (Cardiology)");
    assert_eq!(a.date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    assert_eq!(a.time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
    assert_eq!(a.notes.as_deref(), Some("Annual check"));
}

#[test]
fn blank_notes_are_stored_as_absent() {
    let f = setup();
    appointment_create(&f.pool, req(f.patient, f.doctor, Some(""))).unwrap();
    appointment_create(&f.pool, req(f.patient, f.doctor, Some("   \t"))).unwrap();
    appointment_create(&f.pool, req(f.patient, f.doctor, None)).unwrap();

    let rows = appointment_list_detailed(&f.pool).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|a| a.notes.is_none()));
}

#[test]
fn unknown_patient_is_constraint_violation() {
    let f = setup();
    let err = appointment_create(&f.pool, req(f.patient + 100, f.doctor, None)).unwrap_err();
    assert_eq!(err.code(), "CONSTRAINT_VIOLATION");
    assert!(appointment_list_detailed(&f.pool).unwrap().is_empty());
}

#[test]
fn unknown_doctor_is_constraint_violation() {
    let f = setup();
    let err = appointment_create(&f.pool, req(f.patient, f.doctor + 100, None)).unwrap_err();
    assert_eq!(err.code(), "CONSTRAINT_VIOLATION");
    assert!(appointment_list_detailed(&f.pool).unwrap().is_empty());
}

#[test]
fn doctor_without_specialization_has_plain_name() {
    let f = setup();
    let plain = doctor_create(&f.pool, &mut Doctor::new("Noor", "Haddad")).unwrap();
    appointment_create(&f.pool, req(f.patient, plain, None)).unwrap();
    let rows = appointment_list_detailed(&f.pool).unwrap();
    assert_eq!(rows[0].doctor_name, "Noor Haddad");
}

// ══════════════════════════════════════════════════════════
//  appointment_list_detailed
// ══════════════════════════════════════════════════════════

#[test]
fn list_is_newest_first() {
    let f = setup();
    for n in ["first", "second", "third"] {
        appointment_create(&f.pool, req(f.patient, f.doctor, Some(n))).unwrap();
    }
    let rows = appointment_list_detailed(&f.pool).unwrap();
    let notes: Vec<&str> = rows.iter().map(|a| a.notes.as_deref().unwrap()).collect();
    assert_eq!(notes, vec!["third", "second", "first"]);
    assert!(rows.windows(2).all(|w| w[0].id > w[1].id));
}

// ══════════════════════════════════════════════════════════
//  appointment_delete_by_ids
// ══════════════════════════════════════════════════════════

#[test]
fn delete_empty_set_is_noop() {
    let f = setup();
    appointment_create(&f.pool, req(f.patient, f.doctor, None)).unwrap();
    assert_eq!(appointment_delete_by_ids(&f.pool, &[]).unwrap(), 0);
    assert_eq!(appointment_list_detailed(&f.pool).unwrap().len(), 1);
}

#[test]
fn delete_selected_rows_only() {
    let f = setup();
    for n in ["a", "b", "c"] {
        appointment_create(&f.pool, req(f.patient, f.doctor, Some(n))).unwrap();
    }
    let rows = appointment_list_detailed(&f.pool).unwrap();
    let doomed = [rows[0].id, rows[2].id];

    assert_eq!(appointment_delete_by_ids(&f.pool, &doomed).unwrap(), 2);
    let left = appointment_list_detailed(&f.pool).unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].notes.as_deref(), Some("b"));
}

#[test]
fn patient_delete_removes_its_appointments_from_detailed_list() {
    let f = setup();
    appointment_create(&f.pool, req(f.patient, f.doctor, Some("x"))).unwrap();
    appointment_create(&f.pool, req(f.patient, f.doctor, Some("y"))).unwrap();
    let before: Vec<i64> = appointment_list_detailed(&f.pool)
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect();

    assert_eq!(patient_delete_by_ids(&f.pool, &[f.patient]).unwrap(), 1);

    let after = appointment_list_detailed(&f.pool).unwrap();
    assert!(after.iter().all(|a| !before.contains(&a.id)));
    assert!(after.is_empty());
}
