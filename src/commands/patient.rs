use super::{parse_opt_date, DeleteReq, DeleteResp};
use crate::app::{patient_create, patient_delete_by_ids, patient_list, Patient};
use crate::error::AppError;
use crate::infra::DbPool;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCreateReq {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    /// `yyyy-mm-dd`; blank means unknown.
    pub birth_date: Option<String>,
}

pub fn cmd_patient_create(pool: &DbPool, req: PatientCreateReq) -> Result<Patient, AppError> {
    let mut patient = Patient {
        id: None,
        first_name: req.first_name,
        last_name: req.last_name,
        phone: req.phone,
        gender: req.gender,
        birth_date: parse_opt_date("birthDate", req.birth_date.as_deref())?,
    };
    patient_create(pool, &mut patient)?;
    Ok(patient)
}

pub fn cmd_patient_list(pool: &DbPool) -> Result<Vec<Patient>, AppError> {
    patient_list(pool)
}

pub fn cmd_patient_delete(pool: &DbPool, req: DeleteReq) -> Result<DeleteResp, AppError> {
    Ok(DeleteResp {
        deleted: patient_delete_by_ids(pool, &req.ids)?,
    })
}
