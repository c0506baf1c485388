#![cfg(feature = "server")]
use anyhow::Result;
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Row, Sqlite};
use std::str::FromStr;
use std::sync::Arc;

pub static GLOBAL_DB: OnceCell<Arc<Db>> = OnceCell::new();

pub fn resolve_db_url() -> String {
    use std::{env, fs, path::PathBuf};
    if let Ok(url) = env::var("DATABASE_URL") {
        return url;
    }
    // Place DB under project_root/data/data.db
    let root = env!("CARGO_MANIFEST_DIR");
    let mut path = PathBuf::from(root);
    path.push("data");
    let _ = fs::create_dir_all(&path);
    path.push("data.db");
    // SQLx expects absolute paths in the form sqlite:///abs/path
    let path_str = path.to_string_lossy();
    let trimmed = path_str
        .strip_prefix('/')
        .map(|s| s.to_string())
        .unwrap_or_else(|| path_str.to_string());
    format!("sqlite:///{}?mode=rwc", trimmed)
}

#[derive(Debug, Clone)]
pub struct Db {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct BatteryReportRow {
    #[allow(dead_code)]
    pub id: i64,
    pub level: f64,
    pub reported_at: DateTime<Utc>,
}

impl Db {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(3)
            .connect_with(opts)
            .await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS battery_report (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                level REAL NOT NULL,
                reported_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn insert_battery_report(
        &self,
        level: f64,
        reported_at: DateTime<Utc>,
    ) -> Result<i64> {
        let rec = sqlx::query(
            r#"INSERT INTO battery_report (level, reported_at) VALUES (?1, ?2)"#,
        )
        .bind(level)
        .bind(reported_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(rec.last_insert_rowid())
    }

    pub async fn recent_battery_reports(&self, limit: i64) -> Result<Vec<BatteryReportRow>> {
        let rows = sqlx::query(
            r#"SELECT id, level, reported_at
            FROM battery_report
            ORDER BY reported_at DESC
            LIMIT ?1"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for r in rows {
            let id: i64 = r.try_get("id")?;
            let level: f64 = r.try_get("level")?;
            let reported_at_str: String = r.try_get("reported_at")?;

            let reported_at = DateTime::parse_from_rfc3339(&reported_at_str)
                .map(|dt| dt.with_timezone(&Utc))?;

            out.push(BatteryReportRow {
                id,
                level,
                reported_at,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn insert_and_read_back_reports() {
        let db = Db::connect("sqlite::memory:").await.unwrap();
        let now = Utc::now();
        db.insert_battery_report(0.42, now - Duration::minutes(5))
            .await
            .unwrap();
        db.insert_battery_report(0.43, now).await.unwrap();

        let rows = db.recent_battery_reports(10).await.unwrap();
        assert_eq!(rows.len(), 2);
        // newest first
        assert!((rows[0].level - 0.43).abs() < 1e-9);
        assert!((rows[1].level - 0.42).abs() < 1e-9);
    }

    #[tokio::test]
    async fn recent_reports_honors_limit() {
        let db = Db::connect("sqlite::memory:").await.unwrap();
        let now = Utc::now();
        for i in 0..5 {
            db.insert_battery_report(0.1 * i as f64, now + Duration::seconds(i))
                .await
                .unwrap();
        }
        let rows = db.recent_battery_reports(3).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!((rows[0].level - 0.4).abs() < 1e-9);
    }
}
