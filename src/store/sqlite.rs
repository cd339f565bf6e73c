//! SQLite-backed analysis repository.
//!
//! Single `analyses` table, schema bootstrapped at open. Timestamps are
//! stored as fixed-width RFC 3339 text so lexicographic order matches
//! chronological order; `detected_items` is stored as a JSON array.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::error::{HotDogError, Result};
use crate::model::{Analysis, AnalysisPage, NewAnalysis};
use crate::schema::HotDogCategory;
use crate::store::AnalysisRepository;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS analyses (
    id             TEXT PRIMARY KEY,
    image_url      TEXT NOT NULL,
    image_path     TEXT NOT NULL,
    is_hot_dog     INTEGER NOT NULL,
    confidence     REAL NOT NULL,
    category       TEXT NOT NULL,
    hot_dog_count  INTEGER NOT NULL,
    style          TEXT,
    reasoning      TEXT NOT NULL,
    detected_items TEXT NOT NULL,
    session_id     TEXT NOT NULL,
    created_at     TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_analyses_session
    ON analyses(session_id, created_at DESC);
";

const COLUMNS: &str = "id, image_url, image_path, is_hot_dog, confidence, category, \
     hot_dog_count, style, reasoning, detected_items, session_id, created_at";

pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

impl SqliteRepository {
    /// Opens (or creates) the database file and bootstraps the schema.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| HotDogError::Storage(format!("failed to open database: {}", e)))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| HotDogError::Storage(format!("failed to create schema: {}", e)))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| HotDogError::Storage("database connection lock poisoned".into()))
    }
}

/// Raw column values as SQLite hands them back, before domain conversion.
struct RawRow {
    id: String,
    image_url: String,
    image_path: String,
    is_hot_dog: i64,
    confidence: f64,
    category: String,
    hot_dog_count: i64,
    style: Option<String>,
    reasoning: String,
    detected_items: String,
    session_id: String,
    created_at: String,
}

impl RawRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawRow {
            id: row.get("id")?,
            image_url: row.get("image_url")?,
            image_path: row.get("image_path")?,
            is_hot_dog: row.get("is_hot_dog")?,
            confidence: row.get("confidence")?,
            category: row.get("category")?,
            hot_dog_count: row.get("hot_dog_count")?,
            style: row.get("style")?,
            reasoning: row.get("reasoning")?,
            detected_items: row.get("detected_items")?,
            session_id: row.get("session_id")?,
            created_at: row.get("created_at")?,
        })
    }

    fn into_analysis(self) -> Result<Analysis> {
        let category = HotDogCategory::parse(&self.category)
            .map_err(|_| HotDogError::Storage(format!("corrupt category '{}'", self.category)))?;
        let detected_items: Vec<String> = serde_json::from_str(&self.detected_items)
            .map_err(|e| HotDogError::Storage(format!("corrupt detected_items: {}", e)))?;
        let created_at = parse_timestamp(&self.created_at)?;
        let hot_dog_count = u32::try_from(self.hot_dog_count)
            .map_err(|_| HotDogError::Storage(format!("negative count {}", self.hot_dog_count)))?;

        Ok(Analysis {
            id: self.id,
            image_url: self.image_url,
            image_path: self.image_path,
            is_hot_dog: self.is_hot_dog != 0,
            confidence: self.confidence,
            category,
            hot_dog_count,
            style: self.style,
            reasoning: self.reasoning,
            detected_items,
            session_id: self.session_id,
            created_at,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| HotDogError::Storage(format!("invalid created_at '{}': {}", value, e)))
}

/// Fixed-width microsecond RFC 3339, so TEXT ordering is chronological.
fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn db_err(e: rusqlite::Error) -> HotDogError {
    HotDogError::Storage(e.to_string())
}

#[async_trait]
impl AnalysisRepository for SqliteRepository {
    async fn create(&self, record: NewAnalysis) -> Result<Analysis> {
        let id = Uuid::new_v4().to_string();
        // Round-trip through the stored text format so the returned record
        // is field-for-field equal to what a later read yields.
        let created_at_text = format_timestamp(Utc::now());
        let created_at = parse_timestamp(&created_at_text)?;
        let detected_items = serde_json::to_string(&record.verdict.detected_items)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO analyses (id, image_url, image_path, is_hot_dog, confidence, category, \
             hot_dog_count, style, reasoning, detected_items, session_id, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                id,
                record.image_url,
                record.image_path,
                record.verdict.is_hot_dog as i64,
                record.verdict.confidence,
                record.verdict.category.as_str(),
                record.verdict.hot_dog_count as i64,
                record.verdict.style,
                record.verdict.reasoning,
                detected_items,
                record.session_id,
                created_at_text,
            ],
        )
        .map_err(db_err)?;

        Ok(Analysis {
            id,
            image_url: record.image_url,
            image_path: record.image_path,
            is_hot_dog: record.verdict.is_hot_dog,
            confidence: record.verdict.confidence,
            category: record.verdict.category,
            hot_dog_count: record.verdict.hot_dog_count,
            style: record.verdict.style,
            reasoning: record.verdict.reasoning,
            detected_items: record.verdict.detected_items,
            session_id: record.session_id,
            created_at,
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Analysis> {
        let conn = self.conn()?;
        let raw = conn
            .query_row(
                &format!("SELECT {} FROM analyses WHERE id = ?1", COLUMNS),
                params![id],
                RawRow::read,
            )
            .optional()
            .map_err(db_err)?;

        match raw {
            Some(raw) => raw.into_analysis(),
            None => Err(HotDogError::NotFound(format!("analysis {}", id))),
        }
    }

    async fn list_by_session(
        &self,
        session_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<AnalysisPage> {
        let conn = self.conn()?;

        let total: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM analyses WHERE session_id = ?1",
                params![session_id],
                |row| row.get(0),
            )
            .map_err(db_err)?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM analyses WHERE session_id = ?1 \
                 ORDER BY created_at DESC, id LIMIT ?2 OFFSET ?3",
                COLUMNS
            ))
            .map_err(db_err)?;

        let raw_rows = stmt
            .query_map(
                params![session_id, limit as i64, offset as i64],
                RawRow::read,
            )
            .map_err(db_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_err)?;

        let items = raw_rows
            .into_iter()
            .map(RawRow::into_analysis)
            .collect::<Result<Vec<_>>>()?;

        Ok(AnalysisPage {
            items,
            total: total as u64,
        })
    }
}
