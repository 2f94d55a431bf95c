//! Connection configuration, built once at startup.

use crate::error::AppError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "hospital.db";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

const APP_DIR_NAME: &str = "com.hospital.manager";
const CONFIG_FILE_NAME: &str = "config.json";

/// Storage connection options. `database` is the SQLite file; relative
/// paths resolve against the application data directory.
#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub timeout_ms: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 0,
            database: DEFAULT_DATABASE.to_string(),
            user: None,
            password: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

// Hand-written so the password never reaches a log line.
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

pub fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR_NAME)
}

impl DbConfig {
    /// Defaults, then the JSON config file if one exists, then `HOSPITAL_DB_*` env vars.
    pub fn load() -> Result<Self, AppError> {
        let path = std::env::var_os("HOSPITAL_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| app_data_dir().join(CONFIG_FILE_NAME));
        let base = if path.exists() {
            log::info!("Loading config from {:?}", path);
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        let cfg = base.apply_env(|key| std::env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Overlay environment values. `lookup` is injected so tests never touch the process env.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("HOSPITAL_DB_HOST") {
            self.host = v;
        }
        if let Some(v) = lookup("HOSPITAL_DB_PORT") {
            self.port = v
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("HOSPITAL_DB_PORT is not a port: {v}")))?;
        }
        if let Some(v) = lookup("HOSPITAL_DB_NAME") {
            self.database = v;
        }
        if let Some(v) = lookup("HOSPITAL_DB_USER") {
            self.user = Some(v);
        }
        if let Some(v) = lookup("HOSPITAL_DB_PASSWORD") {
            self.password = Some(v);
        }
        if let Some(v) = lookup("HOSPITAL_DB_TIMEOUT_MS") {
            self.timeout_ms = v.trim().parse().map_err(|_| {
                AppError::Config(format!("HOSPITAL_DB_TIMEOUT_MS is not a number: {v}"))
            })?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.trim().is_empty() {
            return Err(AppError::Config("database is required".into()));
        }
        Ok(())
    }

    /// The embedded engine only serves files on this machine.
    pub fn is_local_host(&self) -> bool {
        matches!(
            self.host.trim().to_ascii_lowercase().as_str(),
            "" | "localhost" | "127.0.0.1" | "::1"
        )
    }

    pub fn database_path(&self) -> PathBuf {
        let p = PathBuf::from(self.database.trim());
        if p.is_absolute() {
            p
        } else {
            app_data_dir().join(p)
        }
    }

    pub fn busy_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_are_local() {
        let cfg = DbConfig::default();
        assert!(cfg.is_local_host());
        assert_eq!(cfg.database, "hospital.db");
        assert_eq!(cfg.timeout_ms, 5_000);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg = DbConfig::from_json(r#"{"database": "/tmp/h.db", "timeoutMs": 250}"#).unwrap();
        assert_eq!(cfg.database, "/tmp/h.db");
        assert_eq!(cfg.timeout_ms, 250);
        assert_eq!(cfg.host, "localhost");
        assert!(cfg.user.is_none());
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = DbConfig::from_json("{not json").unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn env_overrides_file_values() {
        let cfg = DbConfig::default()
            .apply_env(env(&[
                ("HOSPITAL_DB_HOST", "db.internal"),
                ("HOSPITAL_DB_PORT", "3306"),
                ("HOSPITAL_DB_USER", "root"),
                ("HOSPITAL_DB_PASSWORD", "secret"),
                ("HOSPITAL_DB_TIMEOUT_MS", "100"),
            ]))
            .unwrap();
        assert_eq!(cfg.host, "db.internal");
        assert_eq!(cfg.port, 3306);
        assert_eq!(cfg.user.as_deref(), Some("root"));
        assert_eq!(cfg.timeout_ms, 100);
        assert!(!cfg.is_local_host());
    }

    #[test]
    fn bad_port_is_config_error() {
        let err = DbConfig::default()
            .apply_env(env(&[("HOSPITAL_DB_PORT", "abc")]))
            .unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn empty_database_fails_validation() {
        let cfg = DbConfig {
            database: "  ".into(),
            ..DbConfig::default()
        };
        assert_eq!(cfg.validate().unwrap_err().code(), "CONFIG_ERROR");
    }

    #[test]
    fn debug_output_redacts_password() {
        let cfg = DbConfig {
            password: Some("hunter2".into()),
            ..DbConfig::default()
        };
        let shown = format!("{:?}", cfg);
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("***"));
    }

    #[test]
    fn absolute_database_path_is_kept() {
        let dir = std::env::temp_dir().join("hospital.db");
        let cfg = DbConfig {
            database: dir.to_string_lossy().into_owned(),
            ..DbConfig::default()
        };
        assert_eq!(cfg.database_path(), dir);
    }
}
