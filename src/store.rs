// Copyright (c) 2025 FinanceHub contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Document storage over SQLite: flat collections of JSON documents plus a
//! small settings table for user-level fields. The engine only ever sees
//! the typed `Ledger` snapshot produced by `load_ledger`.

use anyhow::Context;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::models::{
    AdvancePayment, Card, Expense, Income, Jar, Ledger, SalaryConfig,
};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("org.financehub", "FinanceHub", "financehub"));

pub mod collections {
    pub const INCOMES: &str = "incomes";
    pub const EXPENSES: &str = "expenses";
    pub const CARDS: &str = "cards";
    pub const JARS: &str = "jars";
    pub const ADVANCES: &str = "advance-payments";
    pub const CONFIG: &str = "config";
}

/// Settings key for the once-daily yield marker.
pub const YIELD_MARKER_KEY: &str = "last_yield_marker";
/// Document id of the salary singleton in the config collection.
pub const SALARY_DOC: &str = "salary";

pub fn db_path() -> anyhow::Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("financehub.sqlite"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open_default() -> anyhow::Result<Self> {
        let path = db_path()?;
        let store =
            Self::open_at(&path).with_context(|| format!("Open DB at {}", path.display()))?;
        Ok(store)
    }

    pub fn open_at(path: &std::path::Path) -> Result<Self> {
        let store = Store {
            conn: Connection::open(path)?,
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Store {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS documents(
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            body TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY(collection, id)
        );
        CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);

        CREATE TABLE IF NOT EXISTS settings(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
        )?;
        Ok(())
    }

    /// All documents of a collection, optionally ordered by a top-level
    /// field (ISO date strings order correctly lexicographically).
    pub fn list(
        &self,
        collection: &str,
        order_by: Option<(&str, Direction)>,
    ) -> Result<Vec<Document>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM documents WHERE collection=?1 ORDER BY id")?;
        let rows = stmt.query_map(params![collection], |r| {
            Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
        })?;
        let mut docs = Vec::new();
        for row in rows {
            let (id, body) = row?;
            match serde_json::from_str::<Value>(&body) {
                Ok(fields) => docs.push(Document { id, fields }),
                Err(e) => {
                    tracing::warn!(collection, id = %id, error = %e, "skipping unparseable document body");
                }
            }
        }
        if let Some((field, direction)) = order_by {
            docs.sort_by(|a, b| {
                let ord = compare_fields(a.fields.get(field), b.fields.get(field));
                match direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }
        Ok(docs)
    }

    /// Inserts a new document with a fresh id; stamps audit timestamps into
    /// the body (recorded on mutation, never used in business logic).
    pub fn create(&self, collection: &str, mut fields: Value) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let now = now_stamp();
        if let Some(map) = fields.as_object_mut() {
            map.insert("created_at".into(), Value::String(now.clone()));
            map.insert("updated_at".into(), Value::String(now));
        }
        self.conn.execute(
            "INSERT INTO documents(collection, id, body) VALUES (?1, ?2, ?3)",
            params![collection, id, fields.to_string()],
        )?;
        Ok(id)
    }

    /// Merges `fields` into an existing document and re-stamps
    /// `updated_at`. Unknown ids are an error.
    pub fn update(&self, collection: &str, id: &str, fields: Value) -> Result<()> {
        let Some(mut body) = self.get(collection, id)? else {
            return Err(Error::validation(format!(
                "no document '{}' in {}",
                id, collection
            )));
        };
        merge_into(&mut body, fields);
        if let Some(map) = body.as_object_mut() {
            map.insert("updated_at".into(), Value::String(now_stamp()));
        }
        self.conn.execute(
            "UPDATE documents SET body=?3, updated_at=datetime('now') WHERE collection=?1 AND id=?2",
            params![collection, id, body.to_string()],
        )?;
        Ok(())
    }

    pub fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let n = self.conn.execute(
            "DELETE FROM documents WHERE collection=?1 AND id=?2",
            params![collection, id],
        )?;
        if n == 0 {
            return Err(Error::validation(format!(
                "no document '{}' in {}",
                id, collection
            )));
        }
        Ok(())
    }

    pub fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection=?1 AND id=?2",
                params![collection, id],
                |r| r.get(0),
            )
            .optional()?;
        match body {
            Some(s) => Ok(Some(serde_json::from_str(&s).map_err(|e| Error::Malformed {
                collection: collection.to_string(),
                reason: e.to_string(),
            })?)),
            None => Ok(None),
        }
    }

    /// Writes a document at a known id, creating it if absent. With
    /// `merge`, existing fields not present in `fields` are kept.
    pub fn set(&self, collection: &str, id: &str, fields: Value, merge: bool) -> Result<()> {
        let existing = self.get(collection, id)?;
        let created = existing.as_ref().and_then(|v| v.get("created_at").cloned());
        let mut body = if merge {
            existing.unwrap_or(Value::Object(Default::default()))
        } else {
            Value::Object(Default::default())
        };
        merge_into(&mut body, fields);
        if let Some(map) = body.as_object_mut() {
            let now = now_stamp();
            map.insert(
                "created_at".into(),
                created.unwrap_or_else(|| Value::String(now.clone())),
            );
            map.insert("updated_at".into(), Value::String(now));
        }
        self.conn.execute(
            "INSERT INTO documents(collection, id, body) VALUES (?1, ?2, ?3)
             ON CONFLICT(collection, id) DO UPDATE SET body=excluded.body, updated_at=datetime('now')",
            params![collection, id, body.to_string()],
        )?;
        Ok(())
    }

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Full snapshot reload. Documents that fail to decode are skipped with
    /// a warning so one bad record cannot blank the dashboard.
    pub fn load_ledger(&self) -> Result<Ledger> {
        let incomes =
            self.decode_collection::<Income>(collections::INCOMES, Some(("date", Direction::Desc)))?;
        let expenses = self
            .decode_collection::<Expense>(collections::EXPENSES, Some(("date", Direction::Desc)))?;
        let cards = self.decode_collection::<Card>(collections::CARDS, None)?;
        let jars = self.decode_collection::<Jar>(collections::JARS, None)?;
        let advances = self.decode_collection::<AdvancePayment>(collections::ADVANCES, None)?;
        let salary = match self.get(collections::CONFIG, SALARY_DOC)? {
            Some(v) => match serde_json::from_value::<SalaryConfig>(v) {
                Ok(cfg) => Some(cfg),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed salary config");
                    None
                }
            },
            None => None,
        };
        Ok(Ledger {
            incomes,
            expenses,
            cards,
            jars,
            advances,
            salary,
        })
    }

    fn decode_collection<T: serde::de::DeserializeOwned + HasId>(
        &self,
        collection: &str,
        order_by: Option<(&str, Direction)>,
    ) -> Result<Vec<T>> {
        let mut out = Vec::new();
        for doc in self.list(collection, order_by)? {
            match serde_json::from_value::<T>(doc.fields) {
                Ok(mut record) => {
                    record.set_id(doc.id);
                    out.push(record);
                }
                Err(e) => {
                    tracing::warn!(collection, id = %doc.id, error = %e, "skipping malformed document");
                }
            }
        }
        Ok(out)
    }
}

/// Document ids live in the row key, not the body; decoded records get the
/// key patched in after deserialization.
pub trait HasId {
    fn set_id(&mut self, id: String);
}

macro_rules! has_id {
    ($($ty:ty),*) => {
        $(impl HasId for $ty {
            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        })*
    };
}

has_id!(Income, Expense, Card, Jar, AdvancePayment);

fn now_stamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn merge_into(target: &mut Value, source: Value) {
    if let (Some(map), Value::Object(src)) = (target.as_object_mut(), source) {
        for (k, v) in src {
            map.insert(k, v);
        }
    }
}

fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}
