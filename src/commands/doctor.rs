use super::{DeleteReq, DeleteResp};
use crate::app::{doctor_create, doctor_delete_by_ids, doctor_list, Doctor};
use crate::error::AppError;
use crate::infra::DbPool;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorCreateReq {
    pub first_name: String,
    pub last_name: String,
    pub specialization: Option<String>,
    pub phone: Option<String>,
}

pub fn cmd_doctor_create(pool: &DbPool, req: DoctorCreateReq) -> Result<Doctor, AppError> {
    let mut doctor = Doctor {
        id: None,
        first_name: req.first_name,
        last_name: req.last_name,
        specialization: req.specialization,
        phone: req.phone,
    };
    doctor_create(pool, &mut doctor)?;
    Ok(doctor)
}

pub fn cmd_doctor_list(pool: &DbPool) -> Result<Vec<Doctor>, AppError> {
    doctor_list(pool)
}

pub fn cmd_doctor_delete(pool: &DbPool, req: DeleteReq) -> Result<DeleteResp, AppError> {
    Ok(DeleteResp {
        deleted: doctor_delete_by_ids(pool, &req.ids)?,
    })
}
