//! Record store gateway: the only code that talks SQL.
//!
//! A [`HostStore`] owns one SQLite connection for the length of an
//! invocation. It is closed explicitly with [`HostStore::close`] on the
//! happy path and by `Drop` on every other.

pub mod codec;
pub mod query;
pub mod schema;

use std::net::IpAddr;

use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, Row};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::error::CoreError;

// ── Row shapes ──────────────────────────────────────────────────────

/// One host row exactly as stored. Every column is nullable at this layer;
/// the normalizer decides what a NULL means.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawHostRow {
    pub id: Option<i64>,
    pub fqdn: Option<String>,
    pub enabled: Option<i64>,
    pub features: Option<String>,
    pub ipaddr: Option<String>,
    pub label: Option<String>,
    pub groups: Option<String>,
    pub upd: Option<NaiveDateTime>,
}

impl RawHostRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            fqdn: row.get("fqdn")?,
            enabled: row.get("enabled")?,
            features: row.get("features")?,
            ipaddr: row.get("ipaddr")?,
            label: row.get("label")?,
            groups: row.get("groups")?,
            upd: row.get("upd")?,
        })
    }
}

/// A validated host ready to be written. `None` fields are left out of the
/// statement so the column default applies.
#[derive(Debug, Clone, PartialEq)]
pub struct HostInsert {
    pub fqdn: String,
    pub ipaddr: IpAddr,
    pub groups: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub label: Option<String>,
    pub enabled: Option<bool>,
}

impl HostInsert {
    fn columns(&self) -> (Vec<&'static str>, Vec<Value>) {
        let mut columns = vec!["fqdn", "ipaddr"];
        let mut values = vec![
            Value::Text(self.fqdn.clone()),
            Value::Text(self.ipaddr.to_string()),
        ];
        if let Some(ref groups) = self.groups {
            columns.push("groups");
            values.push(Value::Text(codec::join_list(groups)));
        }
        if let Some(ref features) = self.features {
            columns.push("features");
            values.push(Value::Text(codec::join_list(features)));
        }
        if let Some(ref label) = self.label {
            columns.push("label");
            values.push(Value::Text(label.clone()));
        }
        if let Some(enabled) = self.enabled {
            columns.push("enabled");
            values.push(Value::Integer(i64::from(enabled)));
        }
        (columns, values)
    }
}

// ── Store ───────────────────────────────────────────────────────────

pub struct HostStore {
    conn: Connection,
    table: String,
    location: String,
}

impl HostStore {
    /// Open an existing inventory database. Never creates the file.
    pub fn connect(config: &DatabaseConfig) -> Result<Self, CoreError> {
        query::validate_table_name(&config.table)?;
        let location = config.path.display().to_string();

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX
            | OpenFlags::SQLITE_OPEN_URI;
        let conn = Connection::open_with_flags(&config.path, flags).map_err(|e| {
            CoreError::ConnectionFailed {
                path: location.clone(),
                reason: e.to_string(),
            }
        })?;
        conn.busy_timeout(config.connect_timeout)?;

        let store = Self {
            conn,
            table: config.table.clone(),
            location,
        };
        store.ensure_table()?;

        info!(path = %store.location, table = %store.table, "connected to inventory database");
        Ok(store)
    }

    /// Create the database file (and parent directories) if needed and apply
    /// the schema. Safe to run against an existing inventory.
    pub fn create(config: &DatabaseConfig) -> Result<Self, CoreError> {
        query::validate_table_name(&config.table)?;
        let location = config.path.display().to_string();

        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::ConnectionFailed {
                path: location.clone(),
                reason: format!("create dir: {e}"),
            })?;
        }

        let conn = Connection::open(&config.path).map_err(|e| CoreError::ConnectionFailed {
            path: location.clone(),
            reason: e.to_string(),
        })?;
        conn.busy_timeout(config.connect_timeout)?;
        conn.execute_batch(schema::PRAGMAS)?;
        conn.execute_batch(&schema::create_table(&config.table))?;

        info!(path = %location, table = %config.table, "inventory database initialised");
        Ok(Self {
            conn,
            table: config.table.clone(),
            location,
        })
    }

    /// In-memory store with the schema applied (for testing).
    pub fn open_in_memory(table: &str) -> Result<Self, CoreError> {
        query::validate_table_name(table)?;
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(&schema::create_table(table))?;
        Ok(Self {
            conn,
            table: table.into(),
            location: ":memory:".into(),
        })
    }

    fn ensure_table(&self) -> Result<(), CoreError> {
        let count: i64 = self
            .conn
            .query_row(query::TABLE_EXISTS, [&self.table], |row| row.get(0))?;
        if count == 0 {
            return Err(CoreError::Store {
                message: format!("table '{}' does not exist in {}", self.table, self.location),
            });
        }
        Ok(())
    }

    /// Read every host row, ordered by id.
    pub fn fetch_hosts(&self) -> Result<Vec<RawHostRow>, CoreError> {
        let sql = query::select_hosts(&self.table);
        debug!(%sql, "fetching hosts");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], RawHostRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = rows.len(), "fetched host rows");
        Ok(rows)
    }

    /// Insert one host in a single statement and return its new id.
    pub fn insert_host(&self, host: &HostInsert) -> Result<i64, CoreError> {
        let (columns, values) = host.columns();
        let sql = query::insert_host(&self.table, &columns);
        debug!(%sql, fqdn = %host.fqdn, "inserting host");

        match self
            .conn
            .execute(&sql, rusqlite::params_from_iter(values.iter()))
        {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(CoreError::Conflict {
                    fqdn: host.fqdn.clone(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<(), CoreError> {
        let location = self.location;
        self.conn.close().map_err(|(_, e)| CoreError::from(e))?;
        debug!(path = %location, "inventory database closed");
        Ok(())
    }
}
