use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::types::{Cabin, Program, ProgramKind, SearchType, TripRequest};
use crate::wallet::migrations::BASE_MIGRATION;
use crate::wallet::SearchRecord;

const LAST_SEARCH_KEY: &str = "last_search";

pub struct WalletStore {
    conn: Connection,
}

impl WalletStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(BASE_MIGRATION)?;
        Ok(())
    }

    pub fn upsert_program(&self, program: &Program) -> Result<()> {
        self.conn.execute(
            r#"
INSERT INTO programs(name, kind, balance, expiry, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT(name) DO UPDATE SET
    kind = excluded.kind,
    balance = excluded.balance,
    expiry = excluded.expiry,
    updated_at = excluded.updated_at
"#,
            params![
                program.name,
                program.kind.as_slug(),
                i64::try_from(program.balance).unwrap_or(i64::MAX),
                program.expiry.map(|d| d.to_string()),
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }

    pub fn remove_program(&self, name: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM programs WHERE name = ?1", params![name])?;
        Ok(removed > 0)
    }

    pub fn list_programs(&self) -> Result<Vec<Program>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, kind, balance, expiry FROM programs ORDER BY name")?;
        let rows = stmt
            .query_map([], |row| row_to_program(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn import_json(&self, raw: &str) -> Result<usize> {
        let programs = crate::wallet::parse_wallet(raw)?;
        for program in &programs {
            self.upsert_program(program)?;
        }
        Ok(programs.len())
    }

    pub fn save_last_search(&self, trip: &TripRequest) -> Result<()> {
        self.conn.execute(
            r#"
INSERT INTO kv(key, value) VALUES (?1, ?2)
ON CONFLICT(key) DO UPDATE SET value = excluded.value
"#,
            params![LAST_SEARCH_KEY, serde_json::to_string(trip)?],
        )?;
        Ok(())
    }

    pub fn load_last_search(&self) -> Result<Option<TripRequest>> {
        let raw = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![LAST_SEARCH_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn insert_search(&self, record: &SearchRecord) -> Result<()> {
        self.conn.execute(
            r#"
INSERT INTO search_history(
    fingerprint, searched_at, search_type, origin, destination, cabin,
    best_program, best_cpp, option_count
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#,
            params![
                record.fingerprint,
                record.searched_at.to_rfc3339(),
                record.search_type.to_string(),
                record.origin,
                record.destination,
                record.cabin.as_slug(),
                record.best_program,
                record.best_cents_per_point,
                record.option_count as i64
            ],
        )?;
        Ok(())
    }

    pub fn load_history(&self, limit: usize) -> Result<Vec<SearchRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
SELECT fingerprint, searched_at, search_type, origin, destination, cabin,
       best_program, best_cpp, option_count
FROM search_history
ORDER BY searched_at DESC, id DESC
LIMIT ?1
"#,
        )?;
        let rows = stmt
            .query_map(params![limit as i64], |row| row_to_search_record(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn row_to_program(row: &rusqlite::Row<'_>) -> rusqlite::Result<Program> {
    let name: String = row.get(0)?;
    let kind_raw: String = row.get(1)?;
    let kind = kind_raw
        .parse::<ProgramKind>()
        .unwrap_or_else(|_| ProgramKind::infer(&name));
    let expiry = row
        .get::<_, Option<String>>(3)?
        .and_then(|raw| raw.parse::<NaiveDate>().ok());
    Ok(Program {
        name,
        kind,
        balance: row.get::<_, i64>(2)?.max(0) as u64,
        expiry,
    })
}

fn row_to_search_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<SearchRecord> {
    let searched_at_raw: String = row.get(1)?;
    let searched_at = DateTime::parse_from_rfc3339(&searched_at_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());
    let search_type = match row.get::<_, String>(2)?.as_str() {
        "hotel" => SearchType::Hotel,
        _ => SearchType::Flight,
    };
    let cabin = row
        .get::<_, String>(5)?
        .parse::<Cabin>()
        .unwrap_or_default();
    Ok(SearchRecord {
        fingerprint: row.get(0)?,
        searched_at,
        search_type,
        origin: row.get(3)?,
        destination: row.get(4)?,
        cabin,
        best_program: row.get(6)?,
        best_cents_per_point: row.get(7)?,
        option_count: row.get::<_, i64>(8)?.max(0) as usize,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};

    use crate::types::{Cabin, Program, ProgramKind, SearchType, TripRequest};
    use crate::wallet::store::WalletStore;
    use crate::wallet::SearchRecord;

    #[test]
    fn programs_upsert_list_and_remove() {
        let store = WalletStore::open_in_memory().expect("store");
        store
            .upsert_program(&Program::new("Chase Ultimate Rewards", ProgramKind::Card, 80_000))
            .expect("insert");
        store
            .upsert_program(&Program::new("Chase Ultimate Rewards", ProgramKind::Card, 95_000))
            .expect("update");
        store
            .upsert_program(
                &Program::new("Alaska Airlines Mileage Plan", ProgramKind::Airline, 30_000)
                    .with_expiry(NaiveDate::from_ymd_opt(2026, 2, 1).expect("date")),
            )
            .expect("insert");

        let programs = store.list_programs().expect("list");
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].name, "Alaska Airlines Mileage Plan");
        assert!(programs[0].expiry.is_some());
        assert_eq!(programs[1].balance, 95_000);

        assert!(store.remove_program("Alaska Airlines Mileage Plan").expect("remove"));
        assert!(!store.remove_program("Alaska Airlines Mileage Plan").expect("remove"));
        assert_eq!(store.list_programs().expect("list").len(), 1);
    }

    #[test]
    fn import_and_last_search_round_out_the_wallet() {
        let store = WalletStore::open_in_memory().expect("store");
        let count = store
            .import_json(r#"[{"name":"Delta SkyMiles","balance":42000}]"#)
            .expect("import");
        assert_eq!(count, 1);
        assert_eq!(store.list_programs().expect("list")[0].kind, ProgramKind::Airline);

        assert!(store.load_last_search().expect("load").is_none());
        let trip = TripRequest::flight(
            "JFK",
            "CDG",
            NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"),
            Cabin::Premium,
        );
        store.save_last_search(&trip).expect("save");
        assert_eq!(store.load_last_search().expect("load"), Some(trip));
    }

    #[test]
    fn history_returns_newest_first_with_limit() {
        let store = WalletStore::open_in_memory().expect("store");
        let now = Utc::now();
        for (idx, destination) in ["LHR", "HND", "FRA"].iter().enumerate() {
            store
                .insert_search(&SearchRecord {
                    fingerprint: format!("fp-{idx}"),
                    searched_at: now + Duration::minutes(idx as i64),
                    search_type: SearchType::Flight,
                    origin: "JFK".to_string(),
                    destination: destination.to_string(),
                    cabin: Cabin::Business,
                    best_program: Some("United MileagePlus".to_string()),
                    best_cents_per_point: Some(2.1),
                    option_count: 3,
                })
                .expect("insert");
        }
        let history = store.load_history(2).expect("history");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].destination, "FRA");
        assert_eq!(history[1].destination, "HND");
        assert_eq!(history[0].cabin, Cabin::Business);
    }
}
