//! Infrastructure implementation of the `AppCache` port.
//!
//! `SqliteAppCache` keeps installed-package metadata in an `apps` table.
//! Every call opens the database on a blocking thread via
//! `tokio::task::spawn_blocking`; nothing is held open between calls.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dockyard_common::AppRecord;
use rusqlite::{Connection, params};

use crate::application::ports::AppCache;
use crate::domain::package::ListedApp;

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "DOCKYARD_DB";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS apps (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT UNIQUE NOT NULL,
    version     TEXT,
    description TEXT,
    bucket      TEXT,
    installed   INTEGER DEFAULT 0,
    icon        TEXT,
    updated_at  DATETIME DEFAULT CURRENT_TIMESTAMP
);";

pub struct SqliteAppCache {
    path: PathBuf,
}

impl SqliteAppCache {
    /// Cache at `$DOCKYARD_DB`, or `~/.dockyard/apps.db`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        if let Ok(val) = std::env::var(DB_PATH_ENV) {
            return Ok(Self::with_path(PathBuf::from(val)));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self::with_path(home.join(".dockyard").join("apps.db")))
    }

    /// Cache at an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn open(path: &Path) -> Result<Connection> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("opening app cache {}", path.display()))?;
        conn.execute_batch(SCHEMA)
            .context("creating apps table")?;
        Ok(conn)
    }

    fn upsert_sync(path: &Path, apps: &[ListedApp]) -> Result<()> {
        let mut conn = Self::open(path)?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO apps (name, version, bucket, installed, updated_at)
                 VALUES (?1, ?2, ?3, 1, CURRENT_TIMESTAMP)
                 ON CONFLICT(name) DO UPDATE SET
                     version = excluded.version,
                     bucket = excluded.bucket,
                     installed = 1,
                     updated_at = CURRENT_TIMESTAMP",
            )?;
            for app in apps {
                stmt.execute(params![app.name, app.version, app.bucket])?;
            }
        }
        tx.commit().context("committing app cache update")?;
        Ok(())
    }

    fn set_installed_sync(path: &Path, name: &str, installed: bool) -> Result<()> {
        let conn = Self::open(path)?;
        conn.execute(
            "INSERT INTO apps (name, installed, updated_at)
             VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(name) DO UPDATE SET
                 installed = excluded.installed,
                 updated_at = CURRENT_TIMESTAMP",
            params![name, installed],
        )
        .with_context(|| format!("updating cache row for {name}"))?;
        Ok(())
    }

    fn installed_sync(path: &Path) -> Result<Vec<AppRecord>> {
        let conn = Self::open(path)?;
        let mut stmt = conn.prepare(
            "SELECT name, version, description, bucket, installed, icon, updated_at
             FROM apps WHERE installed = 1 ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(AppRecord {
                name: row.get(0)?,
                version: row.get(1)?,
                description: row.get(2)?,
                bucket: row.get(3)?,
                installed: row.get(4)?,
                icon: row.get(5)?,
                updated_at: row.get(6)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("reading app cache")
    }
}

impl AppCache for SqliteAppCache {
    async fn upsert_installed(&self, apps: &[ListedApp]) -> Result<()> {
        let path = self.path.clone();
        let apps = apps.to_vec();
        tokio::task::spawn_blocking(move || Self::upsert_sync(&path, &apps))
            .await
            .context("cache update task panicked")?
    }

    async fn set_installed(&self, name: &str, installed: bool) -> Result<()> {
        let path = self.path.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || Self::set_installed_sync(&path, &name, installed))
            .await
            .context("cache update task panicked")?
    }

    async fn installed(&self) -> Result<Vec<AppRecord>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::installed_sync(&path))
            .await
            .context("cache read task panicked")?
    }
}
