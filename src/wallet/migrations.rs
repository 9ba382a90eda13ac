pub const BASE_MIGRATION: &str = r#"
CREATE TABLE IF NOT EXISTS programs (
    name TEXT PRIMARY KEY,
    kind TEXT NOT NULL,
    balance INTEGER NOT NULL,
    expiry TEXT,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS search_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fingerprint TEXT NOT NULL,
    searched_at TEXT NOT NULL,
    search_type TEXT NOT NULL,
    origin TEXT NOT NULL,
    destination TEXT NOT NULL,
    cabin TEXT NOT NULL,
    best_program TEXT,
    best_cpp REAL,
    option_count INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_search_history_searched
    ON search_history(searched_at DESC);
"#;
