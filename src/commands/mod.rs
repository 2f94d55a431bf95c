//! Command handlers for the presentation layer (DTO boundary).
//!
//! A frontend drives the backend with one JSON object per line:
//! `{"cmd": "patient_list", "args": {...}}`. Each request gets exactly one
//! reply line, `{"ok": ...}` or `{"error": {"code", "message", "details"}}`.

pub mod appointment;
pub mod doctor;
pub mod patient;

use crate::error::AppError;
use crate::infra::{ping, DbPool};
use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{BufRead, Write};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReq {
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResp {
    pub deleted: usize,
}

pub(crate) fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{field} must be yyyy-mm-dd")))
}

pub(crate) fn parse_opt_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_date(field, s).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn parse_time(field: &str, raw: &str) -> Result<NaiveTime, AppError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| AppError::Validation(format!("{field} must be HH:mm")))
}

fn args<T: DeserializeOwned>(v: Value) -> Result<T, AppError> {
    Ok(serde_json::from_value(v)?)
}

fn reply<T: Serialize>(v: T) -> Result<Value, AppError> {
    serde_json::to_value(v).map_err(|e| AppError::Db(e.to_string()))
}

/// Dispatch one command by name.
pub fn invoke(pool: &DbPool, cmd: &str, a: Value) -> Result<Value, AppError> {
    match cmd {
        "ping" => {
            ping(pool)?;
            Ok(Value::Bool(true))
        }
        "patient_create" => reply(patient::cmd_patient_create(pool, args(a)?)?),
        "patient_list" => reply(patient::cmd_patient_list(pool)?),
        "patient_delete" => reply(patient::cmd_patient_delete(pool, args(a)?)?),
        "doctor_create" => reply(doctor::cmd_doctor_create(pool, args(a)?)?),
        "doctor_list" => reply(doctor::cmd_doctor_list(pool)?),
        "doctor_delete" => reply(doctor::cmd_doctor_delete(pool, args(a)?)?),
        "appointment_create" => reply(appointment::cmd_appointment_create(pool, args(a)?)?),
        "appointment_list" => reply(appointment::cmd_appointment_list(pool)?),
        "appointment_delete" => reply(appointment::cmd_appointment_delete(pool, args(a)?)?),
        other => Err(AppError::Validation(format!("unknown command: {other}"))),
    }
}

#[derive(Debug, Deserialize)]
struct Request {
    cmd: String,
    #[serde(default)]
    args: Value,
}

fn handle_line(pool: &DbPool, line: &str) -> Value {
    let result = serde_json::from_str::<Request>(line)
        .map_err(AppError::from)
        .and_then(|req| invoke(pool, &req.cmd, req.args));
    match result {
        Ok(v) => json!({ "ok": v }),
        Err(e) => {
            log::warn!("Command failed: {} ({})", e, e.code());
            json!({ "error": e.to_serde() })
        }
    }
}

/// Serve newline-delimited requests until EOF. Blank lines are skipped.
pub fn serve_lines<R: BufRead, W: Write>(pool: &DbPool, input: R, mut output: W) -> std::io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let resp = handle_line(pool, &line);
        writeln!(output, "{}", resp)?;
        output.flush()?;
    }
    Ok(())
}
