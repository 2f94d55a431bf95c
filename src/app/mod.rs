//! Application use cases and transactions.

mod appointment;
mod doctor;
mod patient;
mod shared;

pub use appointment::{
    appointment_create, appointment_delete_by_ids, appointment_list_detailed,
    AppointmentCreateReq, DetailedAppointment,
};
pub use doctor::{doctor_create, doctor_delete_by_ids, doctor_list, Doctor};
pub use patient::{patient_create, patient_delete_by_ids, patient_list, Patient};
