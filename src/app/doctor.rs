//! Doctor use cases.

use super::shared::{delete_where_in, optional_text, required_name, unique_ids};
use crate::error::AppError;
use crate::infra::get_connection;
use crate::infra::row;
use crate::infra::DbPool;
use rusqlite::{params, Row};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Doctor {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub specialization: Option<String>,
    pub phone: Option<String>,
}

impl Doctor {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            specialization: None,
            phone: None,
        }
    }
}

fn map_doctor(r: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: Some(row::id(r, "id")?),
        first_name: row::text(r, "first_name")?,
        last_name: row::text(r, "last_name")?,
        specialization: row::opt_text(r, "specialization")?,
        phone: row::opt_text(r, "phone")?,
    })
}

pub fn doctor_create(pool: &DbPool, doctor: &mut Doctor) -> Result<i64, AppError> {
    doctor.first_name = required_name("first_name", &doctor.first_name)?;
    doctor.last_name = required_name("last_name", &doctor.last_name)?;
    doctor.specialization = optional_text(doctor.specialization.take());
    doctor.phone = optional_text(doctor.phone.take());

    let conn = get_connection(pool)?;
    conn.execute(
        "INSERT INTO doctors (first_name, last_name, specialization, phone) VALUES (?1, ?2, ?3, ?4)",
        params![
            &doctor.first_name,
            &doctor.last_name,
            &doctor.specialization,
            &doctor.phone
        ],
    )?;
    let id = conn.last_insert_rowid();
    doctor.id = Some(id);
    log::info!("Created doctor {}", id);
    Ok(id)
}

pub fn doctor_list(pool: &DbPool) -> Result<Vec<Doctor>, AppError> {
    let conn = get_connection(pool)?;
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, specialization, phone FROM doctors ORDER BY id DESC",
    )?;
    let rows = stmt.query_map([], map_doctor)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    log::debug!("Listed {} doctors", out.len());
    Ok(out)
}

/// Cascades to the doctors' appointments inside the same transaction.
pub fn doctor_delete_by_ids(pool: &DbPool, ids: &[i64]) -> Result<usize, AppError> {
    let ids = unique_ids(ids);
    if ids.is_empty() {
        return Ok(0);
    }

    let conn = get_connection(pool)?;
    let tx = conn.unchecked_transaction()?;
    let appointments = delete_where_in(&tx, "appointments", "doctor_id", &ids)?;
    let removed = delete_where_in(&tx, "doctors", "id", &ids)?;
    tx.commit()?;

    log::info!(
        "Deleted {} doctors ({} appointments cascaded)",
        removed,
        appointments
    );
    Ok(removed)
}
