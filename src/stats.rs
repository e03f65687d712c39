use crate::app_dirs::AppDirs;
use chrono::{DateTime, Local};
use rusqlite::{params, Connection, OptionalExtension, Result};
use std::path::{Path, PathBuf};

/// One completed round, as handed over by the app on completion.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub wpm: u32,
    pub accuracy: u32,
    pub timestamp: DateTime<Local>,
}

impl SessionRecord {
    pub fn now(wpm: u32, accuracy: u32) -> Self {
        Self {
            wpm,
            accuracy,
            timestamp: Local::now(),
        }
    }
}

/// Mean WPM for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAverage {
    /// `YYYY-MM-DD`
    pub date: String,
    pub avg_wpm: u32,
    pub sessions: u32,
}

/// Append-only store of finished sessions, backed by SQLite.
#[derive(Debug)]
pub struct StatsDb {
    conn: Connection,
}

impl StatsDb {
    /// Open (and if needed create) the database at the default location.
    pub fn new() -> Result<Self> {
        let db_path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("ember_stats.db"));
        Self::open(db_path)
    }

    /// Open a database at an explicit path. Tests point this at a tempdir.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {}", e)),
                )
            })?;
        }

        let conn = Connection::open(path)?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                wpm INTEGER NOT NULL,
                accuracy INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_sessions_created_at ON sessions(created_at)",
            [],
        )?;

        Ok(StatsDb { conn })
    }

    pub fn record_session(&self, record: &SessionRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO sessions (wpm, accuracy, created_at) VALUES (?1, ?2, ?3)",
            params![record.wpm, record.accuracy, record.timestamp.to_rfc3339()],
        )?;

        Ok(())
    }

    /// Highest WPM across all recorded sessions, 0 when none exist.
    pub fn best_wpm(&self) -> Result<u32> {
        let max: Option<i64> = self
            .conn
            .query_row("SELECT MAX(wpm) FROM sessions", [], |row| row.get(0))?;
        Ok(max.unwrap_or(0) as u32)
    }

    /// Highest accuracy across all recorded sessions, 0 when none exist.
    pub fn best_accuracy(&self) -> Result<u32> {
        let max: Option<i64> = self
            .conn
            .query_row("SELECT MAX(accuracy) FROM sessions", [], |row| row.get(0))?;
        Ok(max.unwrap_or(0) as u32)
    }

    /// Mean WPM per calendar day over the last `days` days, most recent
    /// day first. Days without sessions are simply absent.
    pub fn daily_averages(&self, days: u32) -> Result<Vec<DailyAverage>> {
        // created_at is RFC 3339, so the first ten characters are the
        // local calendar date and sort chronologically as text.
        let cutoff = (Local::now() - chrono::Duration::days(i64::from(days)))
            .format("%Y-%m-%d")
            .to_string();

        let mut stmt = self.conn.prepare(
            r#"
            SELECT
                substr(created_at, 1, 10) AS day,
                AVG(wpm) AS avg_wpm,
                COUNT(*) AS sessions
            FROM sessions
            WHERE substr(created_at, 1, 10) >= ?1
            GROUP BY day
            ORDER BY day DESC
            "#,
        )?;

        let rows = stmt.query_map([cutoff], |row| {
            let date: String = row.get(0)?;
            let avg_wpm: f64 = row.get(1)?;
            let sessions: i64 = row.get(2)?;

            Ok(DailyAverage {
                date,
                avg_wpm: avg_wpm.round() as u32,
                sessions: sessions as u32,
            })
        })?;

        let mut averages = Vec::new();
        for row in rows {
            averages.push(row?);
        }

        Ok(averages)
    }

    /// Timestamp of the most recent session, if any.
    pub fn last_session_at(&self) -> Result<Option<DateTime<Local>>> {
        let created_at: Option<String> = self
            .conn
            .query_row(
                "SELECT created_at FROM sessions ORDER BY created_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        Ok(created_at.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Local))
        }))
    }
}
