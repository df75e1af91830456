use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::{
    db::{
        helpers::{
            data_types_from_json, data_types_to_json, format_datetime, parse_datetime,
            parse_operation,
        },
        Database,
    },
    models::AccessLogEntry,
    sources::AccessLogSource,
};

pub struct AccessLogRepository<'a> {
    conn: &'a Connection,
}

impl<'a> AccessLogRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, entry: &AccessLogEntry) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO access_logs (package_name, access_time, operation_type, data_types_json)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    entry.package_name,
                    format_datetime(entry.access_time),
                    entry.operation_type.as_str(),
                    data_types_to_json(&entry.data_types)?,
                ],
            )
            .with_context(|| format!("failed to insert access log for {}", entry.package_name))?;
        Ok(())
    }

    /// All entries, newest first. Rows written at the same instant come back
    /// in reverse insertion order.
    pub fn list_newest_first(&self) -> Result<Vec<AccessLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT package_name, access_time, operation_type, data_types_json
             FROM access_logs
             ORDER BY access_time DESC, id DESC",
        )?;

        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(AccessLogEntry::new(
                row.get::<_, String>(0)?,
                parse_datetime(&row.get::<_, String>(1)?, "access_time")?,
                parse_operation(&row.get::<_, String>(2)?)?,
                data_types_from_json(&row.get::<_, String>(3)?)?,
            ));
        }

        Ok(entries)
    }

    pub fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        self.conn
            .execute(
                "DELETE FROM access_logs WHERE access_time < ?1",
                params![format_datetime(cutoff)],
            )
            .context("failed to prune access logs")
    }
}

// Database async wrappers for access log operations
impl Database {
    pub async fn insert_access_logs(&self, entries: &[AccessLogEntry]) -> Result<()> {
        let entries = entries.to_vec();
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            {
                let repo = AccessLogRepository::new(&tx);
                for entry in &entries {
                    repo.insert(entry)?;
                }
            }
            tx.commit().context("failed to commit access logs")?;
            Ok(())
        })
        .await
    }

    pub async fn list_access_logs(&self) -> Result<Vec<AccessLogEntry>> {
        self.execute(|conn| AccessLogRepository::new(conn).list_newest_first())
            .await
    }

    /// Drop entries older than `cutoff`, returning how many were removed.
    pub async fn delete_access_logs_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        self.execute(move |conn| AccessLogRepository::new(conn).delete_before(cutoff))
            .await
    }
}

impl AccessLogSource for Database {
    async fn access_logs(&self) -> Result<Vec<AccessLogEntry>> {
        self.list_access_logs().await
    }
}
