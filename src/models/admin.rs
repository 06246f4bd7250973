use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `GET /admin/system-info`; unknown keys are kept in `extra`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub uptime_seconds: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /admin/backup-info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupInfo {
    #[serde(default)]
    pub last_backup: Option<String>,
    #[serde(default)]
    pub backup_count: Option<u64>,
    #[serde(default)]
    pub total_size_bytes: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_keys_survive() {
        let info: SystemInfo = serde_json::from_value(json!({
            "version": "2.1.0",
            "python_version": "3.12"
        }))
        .unwrap();

        assert_eq!(info.version.as_deref(), Some("2.1.0"));
        assert_eq!(info.extra.get("python_version"), Some(&json!("3.12")));
    }
}
