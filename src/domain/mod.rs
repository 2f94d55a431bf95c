//! Pure domain helpers with no storage access.

pub mod names;

pub use names::{doctor_display_name, normalize_notes, patient_display_name};
