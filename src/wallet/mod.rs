pub mod migrations;
pub mod store;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Cabin, Program, ProgramKind, SearchOutcome, SearchType, TripRequest};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletRecord {
    pub name: String,
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: Option<ProgramKind>,
    #[serde(default)]
    pub balance: u64,
    #[serde(default)]
    pub expiry: Option<NaiveDate>,
}

impl WalletRecord {
    pub fn into_program(self) -> Program {
        let kind = self
            .kind
            .unwrap_or_else(|| ProgramKind::infer(&self.name));
        Program {
            name: self.name.trim().to_string(),
            kind,
            balance: self.balance,
            expiry: self.expiry,
        }
    }
}

pub fn into_programs(records: Vec<WalletRecord>) -> Vec<Program> {
    records
        .into_iter()
        .filter(|record| !record.name.trim().is_empty())
        .map(WalletRecord::into_program)
        .collect()
}

pub fn parse_wallet(raw: &str) -> anyhow::Result<Vec<Program>> {
    let records: Vec<WalletRecord> = serde_json::from_str(raw)?;
    Ok(into_programs(records))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRecord {
    pub fingerprint: String,
    pub searched_at: DateTime<Utc>,
    pub search_type: SearchType,
    pub origin: String,
    pub destination: String,
    pub cabin: Cabin,
    pub best_program: Option<String>,
    pub best_cents_per_point: Option<f64>,
    pub option_count: usize,
}

impl SearchRecord {
    pub fn from_outcome(trip: &TripRequest, outcome: &SearchOutcome, searched_at: DateTime<Utc>) -> Self {
        Self {
            fingerprint: outcome.fingerprint.clone(),
            searched_at,
            search_type: trip.search_type,
            origin: trip.origin.clone(),
            destination: trip.destination.clone(),
            cabin: trip.cabin,
            best_program: outcome.best.as_ref().map(|best| best.program.clone()),
            best_cents_per_point: outcome.best.as_ref().and_then(|best| best.cents_per_point),
            option_count: outcome.option_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::ProgramKind;
    use crate::wallet::parse_wallet;

    #[test]
    fn wallet_import_infers_missing_types() {
        let raw = r#"[
            {"name": "Chase Ultimate Rewards", "type": "card", "balance": 120000},
            {"name": "World of Hyatt", "balance": 40000, "expiry": "2026-06-30"},
            {"name": "  ", "balance": 5}
        ]"#;
        let programs = parse_wallet(raw).expect("wallet parses");
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].kind, ProgramKind::Card);
        assert_eq!(programs[1].kind, ProgramKind::Hotel);
        assert!(programs[1].expiry.is_some());
    }
}
