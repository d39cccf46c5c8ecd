//! # Case File Bank
//!
//! The fixed list of top 10 case files gated behind the reveal timer, plus the
//! JSON payloads exchanged between the backend and its clients.
//!
//! ## Notes
//! - The default bank is compiled into the binary from `cases.json`, order is the ranking.
//! - `CASES_PATH` lets an operator swap in a different list without a rebuild.
//! - Field names (`team`, `problem`, `tech`) are what the frontend renders, do not rename.
use std::{borrow::Cow, fs, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_BANK: &str = include_str!("../cases.json");

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CaseFile {
    pub team: String,
    pub problem: String,
    pub tech: Vec<String>,
}

#[derive(Error, Debug)]
pub enum BankError {
    #[error("Failed to read case files from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed case files: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn get_bank() -> Result<Vec<CaseFile>, BankError> {
    Ok(serde_json::from_str(DEFAULT_BANK)?)
}

pub fn get_bank_from_path(path: impl AsRef<Path>) -> Result<Vec<CaseFile>, BankError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| BankError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(serde_json::from_slice(&data)?)
}

pub mod payloads {
    //! Response bodies for the `/api` and `/health` endpoints.
    use super::*;

    pub const SUCCESS: &str = "SUCCESS";
    pub const HEALTHY: &str = "healthy";

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    #[serde(tag = "status", rename_all = "UPPERCASE")]
    pub enum Top10Response<'a> {
        Locked {
            message: String,
        },
        Open {
            data: Cow<'a, [CaseFile]>,
            message: String,
        },
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct StatusResponse {
        pub time_remaining: u64,
        pub is_revealed: bool,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct AckResponse {
        pub status: String,
        pub message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub new_reveal_time: Option<DateTime<Utc>>,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct HealthResponse {
        pub status: String,
        pub timestamp: DateTime<Utc>,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct ErrorResponse {
        pub status: String,
        pub message: String,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{payloads::Top10Response, *};

    #[test]
    fn test_default_bank() {
        let bank = get_bank().unwrap();

        assert_eq!(bank.len(), 10);
        assert_eq!(bank[0].team, "Debug Detectives");
        assert_eq!(bank[0].problem, "Campus waste management system");
        assert_eq!(bank[0].tech, vec!["Gemini AI", "Firebase", "React"]);
        assert_eq!(bank[9].team, "Investigation Unit");
        assert_eq!(bank[9].tech, vec!["GraphQL", "Neo4j", "TypeScript"]);
    }

    #[test]
    fn test_bank_from_path() {
        let path = std::env::temp_dir().join(format!("bank-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"[{"team": "Solo", "problem": "One case", "tech": []}]"#,
        )
        .unwrap();

        let bank = get_bank_from_path(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(
            bank,
            vec![CaseFile {
                team: "Solo".to_string(),
                problem: "One case".to_string(),
                tech: vec![],
            }]
        );
    }

    #[test]
    fn test_missing_path() {
        let err = get_bank_from_path("/nonexistent/cases.json").unwrap_err();
        assert!(matches!(err, BankError::Io { .. }));
    }

    #[test]
    fn test_malformed_bank() {
        let path = std::env::temp_dir().join(format!("bank-bad-{}.json", std::process::id()));
        fs::write(&path, r#"[{"team": "No problem field"}]"#).unwrap();

        let err = get_bank_from_path(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(err, BankError::Parse(_)));
    }

    #[test]
    fn test_locked_shape() {
        let locked = Top10Response::Locked {
            message: "sealed".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&locked).unwrap(),
            json!({"status": "LOCKED", "message": "sealed"})
        );
    }

    #[test]
    fn test_open_shape() {
        let bank = get_bank().unwrap();
        let open = Top10Response::Open {
            data: Cow::Borrowed(&bank[..1]),
            message: "revealed".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&open).unwrap(),
            json!({
                "status": "OPEN",
                "data": [{
                    "team": "Debug Detectives",
                    "problem": "Campus waste management system",
                    "tech": ["Gemini AI", "Firebase", "React"]
                }],
                "message": "revealed"
            })
        );
    }
}
