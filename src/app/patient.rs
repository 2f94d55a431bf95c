//! Patient use cases.

use super::shared::{delete_where_in, optional_text, required_name, unique_ids};
use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::row;
use crate::infra::DbPool;
use chrono::NaiveDate;
use rusqlite::{params, Row};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patient {
    /// Assigned by storage on creation.
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl Patient {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: None,
            gender: None,
            birth_date: None,
        }
    }
}

fn map_patient(r: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: Some(row::id(r, "id")?),
        first_name: row::text(r, "first_name")?,
        last_name: row::text(r, "last_name")?,
        phone: row::opt_text(r, "phone")?,
        gender: row::opt_text(r, "gender")?,
        birth_date: row::opt_date(r, "birth_date")?,
    })
}

/// Insert the patient and write the generated id back onto it.
pub fn patient_create(pool: &DbPool, patient: &mut Patient) -> Result<i64, AppError> {
    patient.first_name = required_name("first_name", &patient.first_name)?;
    patient.last_name = required_name("last_name", &patient.last_name)?;
    patient.phone = optional_text(patient.phone.take());
    patient.gender = optional_text(patient.gender.take());

    let conn = get_connection(pool)?;
    conn.execute(
        "INSERT INTO patients (first_name, last_name, phone, gender, birth_date) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            &patient.first_name,
            &patient.last_name,
            &patient.phone,
            &patient.gender,
            &patient.birth_date
        ],
    )?;
    let id = conn.last_insert_rowid();
    patient.id = Some(id);
    log::info!("Created patient {}", id);
    Ok(id)
}

/// All patients, newest first.
pub fn patient_list(pool: &DbPool) -> Result<Vec<Patient>, AppError> {
    let conn = get_connection(pool)?;
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, phone, gender, birth_date FROM patients ORDER BY id DESC",
    )?;
    let rows = stmt.query_map([], map_patient)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    log::debug!("Listed {} patients", out.len());
    Ok(out)
}

/// Delete patients and, first, every appointment that references them.
/// Both statements share one transaction. Returns patient rows removed.
pub fn patient_delete_by_ids(pool: &DbPool, ids: &[i64]) -> Result<usize, AppError> {
    let ids = unique_ids(ids);
    if ids.is_empty() {
        return Ok(0);
    }

    let conn = get_connection(pool)?;
    let tx = conn.unchecked_transaction()?;
    let appointments = delete_where_in(&tx, "appointments", "patient_id", &ids)?;
    let removed = delete_where_in(&tx, "patients", "id", &ids)?;
    tx.commit()?;

    log::info!(
        "Deleted {} patients ({} appointments cascaded)",
        removed,
        appointments
    );
    Ok(removed)
}
