//! Appointment use cases.

use super::shared::{delete_where_in, unique_ids};
use crate::domain::{doctor_display_name, normalize_notes, patient_display_name};
use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::row;
use crate::infra::DbPool;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Row};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct AppointmentCreateReq {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
}

/// Appointment joined with patient and doctor display names. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedAppointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
}

fn map_detailed(r: &Row<'_>) -> rusqlite::Result<DetailedAppointment> {
    let specialization = row::opt_text(r, "specialization")?;
    Ok(DetailedAppointment {
        id: row::id(r, "id")?,
        patient_id: row::id(r, "patient_id")?,
        doctor_id: row::id(r, "doctor_id")?,
        patient_name: patient_display_name(
            &row::text(r, "patient_first")?,
            &row::text(r, "patient_last")?,
        ),
        doctor_name: doctor_display_name(
            &row::text(r, "doctor_first")?,
            &row::text(r, "doctor_last")?,
            specialization.as_deref(),
        ),
        date: row::date(r, "appointment_date")?,
        time: row::time(r, "appointment_time")?,
        notes: row::opt_non_blank(r, "notes")?,
    })
}

/// Insert an appointment. Unknown patient or doctor ids are rejected by the
/// foreign keys as a constraint violation; no pre-check is made here.
pub fn appointment_create(pool: &DbPool, req: AppointmentCreateReq) -> Result<(), AppError> {
    let notes = normalize_notes(req.notes.as_deref());

    let conn = get_connection(pool)?;
    conn.execute(
        "INSERT INTO appointments (patient_id, doctor_id, appointment_date, appointment_time, notes) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![req.patient_id, req.doctor_id, req.date, req.time, notes],
    )?;
    log::info!(
        "Created appointment for patient {} with doctor {}",
        req.patient_id,
        req.doctor_id
    );
    Ok(())
}

pub fn appointment_list_detailed(pool: &DbPool) -> Result<Vec<DetailedAppointment>, AppError> {
    let conn = get_connection(pool)?;
    let mut stmt = conn.prepare(
        "SELECT a.id, a.patient_id, a.doctor_id,
                p.first_name AS patient_first, p.last_name AS patient_last,
                d.first_name AS doctor_first, d.last_name AS doctor_last, d.specialization,
                a.appointment_date, a.appointment_time, a.notes
         FROM appointments a
         JOIN patients p ON p.id = a.patient_id
         JOIN doctors d ON d.id = a.doctor_id
         ORDER BY a.id DESC",
    )?;
    let rows = stmt.query_map([], map_detailed)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    log::debug!("Listed {} appointments", out.len());
    Ok(out)
}

pub fn appointment_delete_by_ids(pool: &DbPool, ids: &[i64]) -> Result<usize, AppError> {
    let ids = unique_ids(ids);
    if ids.is_empty() {
        return Ok(0);
    }
    let conn = get_connection(pool)?;
    let removed = delete_where_in(&conn, "appointments", "id", &ids)?;
    log::info!("Deleted {} appointments", removed);
    Ok(removed)
}
