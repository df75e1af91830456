use std::collections::HashSet;

use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::{
    db::{
        helpers::{format_datetime, parse_datetime},
        models::AppRecord,
        Database,
    },
    models::AppMetadata,
    sources::{AppInfoReader, InactiveAppSource},
};

pub struct AppRepository<'a> {
    conn: &'a Connection,
}

fn row_to_app(row: &Row) -> Result<AppRecord> {
    Ok(AppRecord {
        package_name: row.get(0)?,
        app_name: row.get(1)?,
        icon_data_url: row.get(2)?,
        installed: row.get(3)?,
        holds_write_permission: row.get(4)?,
        has_health_data: row.get(5)?,
        updated_at: row
            .get::<_, Option<String>>(6)?
            .map(|raw| parse_datetime(&raw, "updated_at"))
            .transpose()?,
    })
}

impl<'a> AppRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert or refresh an app. Name and icon keep their stored values when
    /// the incoming record has none.
    pub fn upsert(&self, app: &AppRecord) -> Result<()> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = format_datetime(Utc::now());

        self.conn.execute(
            "INSERT INTO apps (id, package_name, app_name, icon_data_url, installed,
                               holds_write_permission, has_health_data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             ON CONFLICT(package_name) DO UPDATE SET
                 app_name = COALESCE(excluded.app_name, apps.app_name),
                 icon_data_url = COALESCE(excluded.icon_data_url, apps.icon_data_url),
                 installed = excluded.installed,
                 holds_write_permission = excluded.holds_write_permission,
                 has_health_data = excluded.has_health_data,
                 updated_at = excluded.updated_at",
            params![
                id,
                app.package_name,
                app.app_name,
                app.icon_data_url,
                app.installed,
                app.holds_write_permission,
                app.has_health_data,
                now,
            ],
        )?;
        Ok(())
    }

    pub fn get(&self, package_name: &str) -> Result<Option<AppRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT package_name, app_name, icon_data_url, installed,
                    holds_write_permission, has_health_data, updated_at
             FROM apps WHERE package_name = ?1",
        )?;

        let mut rows = stmt.query(params![package_name])?;
        match rows.next()? {
            Some(row) => Ok(Some(row_to_app(row)?)),
            None => Ok(None),
        }
    }

    pub fn is_installed(&self, package_name: &str) -> Result<bool> {
        let installed = self
            .conn
            .query_row(
                "SELECT installed FROM apps WHERE package_name = ?1",
                params![package_name],
                |row| row.get::<_, bool>(0),
            )
            .optional()?;
        Ok(installed.unwrap_or(false))
    }

    pub fn inactive_packages(&self) -> Result<HashSet<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT package_name FROM apps
             WHERE holds_write_permission = 0 AND has_health_data = 1",
        )?;

        let packages = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(packages)
    }
}

// Database async wrappers for app operations
impl Database {
    pub async fn upsert_app(&self, app: &AppRecord) -> Result<()> {
        let app = app.clone();
        self.execute(move |conn| AppRepository::new(conn).upsert(&app))
            .await
    }

    pub async fn get_app(&self, package_name: &str) -> Result<Option<AppRecord>> {
        let package_name = package_name.to_string();
        self.execute(move |conn| AppRepository::new(conn).get(&package_name))
            .await
    }
}

impl AppInfoReader for Database {
    /// Packages without a stored row resolve to their package name.
    async fn app_metadata(&self, package_name: &str) -> Result<AppMetadata> {
        Ok(match self.get_app(package_name).await? {
            Some(record) => record.metadata(),
            None => AppMetadata::unknown(package_name),
        })
    }

    async fn is_package_installed(&self, package_name: &str) -> Result<bool> {
        let package_name = package_name.to_string();
        self.execute(move |conn| AppRepository::new(conn).is_installed(&package_name))
            .await
    }
}

impl InactiveAppSource for Database {
    async fn inactive_packages(&self) -> Result<HashSet<String>> {
        self.execute(|conn| AppRepository::new(conn).inactive_packages())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("access.sqlite3")).unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn upsert_keeps_known_name_and_icon() {
        let (_dir, db) = open();
        let mut app = AppRecord::new("com.example.fit");
        app.app_name = Some("Fit".into());
        app.icon_data_url = Some("data:image/png;base64,AAAA".into());
        app.holds_write_permission = true;
        db.upsert_app(&app).await.unwrap();

        let mut refreshed = AppRecord::new("com.example.fit");
        refreshed.has_health_data = true;
        db.upsert_app(&refreshed).await.unwrap();

        let stored = db.get_app("com.example.fit").await.unwrap().unwrap();
        assert_eq!(stored.app_name.as_deref(), Some("Fit"));
        assert!(stored.icon_data_url.is_some());
        assert!(!stored.holds_write_permission);
        assert!(stored.has_health_data);
        assert!(stored.updated_at.is_some());
    }

    #[tokio::test]
    async fn metadata_falls_back_to_package_name() {
        let (_dir, db) = open();
        let metadata = db.app_metadata("com.example.unknown").await.unwrap();
        assert_eq!(metadata, AppMetadata::unknown("com.example.unknown"));
        assert!(!db.is_package_installed("com.example.unknown").await.unwrap());
    }

    #[tokio::test]
    async fn inactive_apps_lost_write_but_kept_data() {
        let (_dir, db) = open();

        let mut active = AppRecord::new("com.example.active");
        active.holds_write_permission = true;
        active.has_health_data = true;

        let mut inactive = AppRecord::new("com.example.inactive");
        inactive.installed = false;
        inactive.has_health_data = true;

        let reader_only = AppRecord::new("com.example.reader");

        for app in [&active, &inactive, &reader_only] {
            db.upsert_app(app).await.unwrap();
        }

        let packages = db.inactive_packages().await.unwrap();
        assert_eq!(
            packages,
            HashSet::from(["com.example.inactive".to_string()])
        );
        assert!(!db.is_package_installed("com.example.inactive").await.unwrap());
        assert!(db.is_package_installed("com.example.reader").await.unwrap());
    }
}
