use std::sync::Arc;

use bank::{CaseFile, get_bank, get_bank_from_path};
use chrono::{DateTime, Duration, Utc};
use tracing::info;

use super::{config::Config, error::AppError, gate::RevealGate};

pub struct State {
    pub config: Config,
    pub gate: RevealGate,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>, AppError> {
        let cases = load_cases(&config)?;

        Ok(Self::with_cases(config, cases))
    }

    pub fn with_cases(config: Config, cases: Vec<CaseFile>) -> Arc<Self> {
        Self::started_at(config, cases, Utc::now())
    }

    /// Gate whose first deadline is `started + offset`.
    pub fn started_at(config: Config, cases: Vec<CaseFile>, started: DateTime<Utc>) -> Arc<Self> {
        let offset = Duration::seconds(i64::from(config.reveal_offset_secs.get()));
        let gate = RevealGate::new(started, offset, cases);

        Arc::new(Self { config, gate })
    }
}

fn load_cases(config: &Config) -> Result<Vec<CaseFile>, AppError> {
    let cases = match &config.cases_path {
        Some(path) => {
            info!("Loading case files from {}", path.display());
            get_bank_from_path(path)?
        }
        None => get_bank()?,
    };

    info!("Loaded {} case files", cases.len());
    Ok(cases)
}
