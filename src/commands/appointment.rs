use super::{parse_date, parse_time, DeleteReq, DeleteResp};
use crate::app::{
    appointment_create, appointment_delete_by_ids, appointment_list_detailed,
    AppointmentCreateReq, DetailedAppointment,
};
use crate::error::AppError;
use crate::infra::DbPool;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCreateArgs {
    pub patient_id: i64,
    pub doctor_id: i64,
    /// `yyyy-mm-dd`
    pub date: String,
    /// `HH:mm` or `HH:mm:ss`
    pub time: String,
    pub notes: Option<String>,
}

pub fn cmd_appointment_create(pool: &DbPool, req: AppointmentCreateArgs) -> Result<(), AppError> {
    let create = AppointmentCreateReq {
        patient_id: req.patient_id,
        doctor_id: req.doctor_id,
        date: parse_date("date", &req.date)?,
        time: parse_time("time", &req.time)?,
        notes: req.notes,
    };
    appointment_create(pool, create)
}

pub fn cmd_appointment_list(pool: &DbPool) -> Result<Vec<DetailedAppointment>, AppError> {
    appointment_list_detailed(pool)
}

pub fn cmd_appointment_delete(pool: &DbPool, req: DeleteReq) -> Result<DeleteResp, AppError> {
    Ok(DeleteResp {
        deleted: appointment_delete_by_ids(pool, &req.ids)?,
    })
}
