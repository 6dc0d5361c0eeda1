use rusqlite::{params, types::Type, Connection};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

use crate::types::{Instituicao, InstituicaoFilter, Stored, Voluntario, VoluntarioFilter};

use super::{
    traits::{StorageRead, StorageWrite},
    StoreError, StoreResult,
};

const DB_SCHEMA_VERSION: i64 = 1;

const VOLUNTARIOS: &str = "voluntarios";
// Legacy collection spelling, kept to match the persisted-state layout.
const INSTITUICAOS: &str = "instituicaos";

/// Document store backed by a single SQLite file. Each collection is a table
/// with a database-assigned id and one flat JSON document per row. Every
/// operation opens its own connection.
#[derive(Clone)]
pub struct SqliteStorage {
    pub path: String,
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
        }
    }

    pub fn reset_all(&self) -> StoreResult<()> {
        if !std::path::Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    pub fn init(&self) -> StoreResult<()> {
        self.with_conn(|_conn| Ok(()))
    }

    fn with_conn<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        f(&conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        log::info!(
            "SQLite schema migration: {} -> {}",
            version,
            DB_SCHEMA_VERSION
        );

        if version == 0 {
            conn.execute_batch(
                r#"
            CREATE TABLE voluntarios (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                doc TEXT NOT NULL CHECK (json_valid(doc))
            );
            CREATE TABLE instituicaos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                doc TEXT NOT NULL CHECK (json_valid(doc))
            );
        "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}

fn map_doc_row<T: DeserializeOwned>(row: &rusqlite::Row<'_>) -> rusqlite::Result<Stored<T>> {
    let id: i64 = row.get(0)?;
    let doc: String = row.get(1)?;
    let record = serde_json::from_str(&doc)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(err)))?;
    Ok(Stored::new(id, record))
}

fn db_insert_doc<T: Serialize>(
    conn: &Connection,
    table: &str,
    record: T,
) -> StoreResult<Stored<T>> {
    let doc = serde_json::to_string(&record)?;
    conn.execute(
        &format!("INSERT INTO {table} (doc) VALUES (?1)"),
        params![doc],
    )?;
    Ok(Stored::new(conn.last_insert_rowid(), record))
}

fn db_list_docs<T: DeserializeOwned>(conn: &Connection, table: &str) -> StoreResult<Vec<Stored<T>>> {
    let mut stmt = conn.prepare(&format!("SELECT id, doc FROM {table} ORDER BY id"))?;
    let rows = stmt
        .query_map([], map_doc_row::<T>)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn db_find_docs<T: DeserializeOwned>(
    conn: &Connection,
    table: &str,
    matches: impl Fn(&T) -> bool,
) -> StoreResult<Vec<Stored<T>>> {
    let mut rows = db_list_docs(conn, table)?;
    rows.retain(|stored| matches(&stored.record));
    Ok(rows)
}

fn db_first_match<T: DeserializeOwned>(
    conn: &Connection,
    table: &str,
    matches: impl Fn(&T) -> bool,
) -> StoreResult<Stored<T>> {
    db_find_docs(conn, table, matches)?
        .into_iter()
        .next()
        .ok_or(StoreError::NotFound)
}

fn db_replace_doc<T: Serialize>(
    conn: &Connection,
    table: &str,
    id: i64,
    record: T,
) -> StoreResult<Stored<T>> {
    let doc = serde_json::to_string(&record)?;
    conn.execute(
        &format!("UPDATE {table} SET doc = ?1 WHERE id = ?2"),
        params![doc, id],
    )?;
    Ok(Stored::new(id, record))
}

fn db_count_docs(conn: &Connection, table: &str) -> StoreResult<u64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(count as u64)
}

fn with_immediate_tx<T>(
    conn: &Connection,
    f: impl FnOnce() -> StoreResult<T>,
) -> StoreResult<T> {
    conn.execute("BEGIN IMMEDIATE", [])?;
    match f() {
        Ok(value) => {
            conn.execute("COMMIT", [])?;
            Ok(value)
        }
        Err(err) => {
            let _ = conn.execute("ROLLBACK", []);
            Err(err)
        }
    }
}

fn db_update_one<T: Serialize + DeserializeOwned>(
    conn: &Connection,
    table: &str,
    matches: impl Fn(&T) -> bool,
    record: T,
) -> StoreResult<Stored<T>> {
    with_immediate_tx(conn, || {
        let current = db_first_match(conn, table, &matches)?;
        db_replace_doc(conn, table, current.id, record)
    })
}

fn db_delete_one<T: Serialize + DeserializeOwned>(
    conn: &Connection,
    table: &str,
    matches: impl Fn(&T) -> bool,
) -> StoreResult<Stored<T>> {
    with_immediate_tx(conn, || {
        let current = db_first_match::<T>(conn, table, &matches)?;
        conn.execute(
            &format!("DELETE FROM {table} WHERE id = ?1"),
            params![current.id],
        )?;
        Ok(current)
    })
}

fn db_modify_one<T: Serialize + DeserializeOwned>(
    conn: &Connection,
    table: &str,
    matches: impl Fn(&T) -> bool,
    mutate: impl FnOnce(&mut T),
) -> StoreResult<Stored<T>> {
    with_immediate_tx(conn, || {
        let mut current = db_first_match::<T>(conn, table, &matches)?;
        mutate(&mut current.record);
        db_replace_doc(conn, table, current.id, current.record)
    })
}

impl StorageRead for SqliteStorage {
    fn list_voluntarios(&self) -> StoreResult<Vec<Stored<Voluntario>>> {
        self.with_conn(|conn| db_list_docs(conn, VOLUNTARIOS))
    }

    fn find_voluntarios(&self, filter: &VoluntarioFilter) -> StoreResult<Vec<Stored<Voluntario>>> {
        self.with_conn(|conn| db_find_docs(conn, VOLUNTARIOS, |record| filter.matches(record)))
    }

    fn count_voluntarios(&self) -> StoreResult<u64> {
        self.with_conn(|conn| db_count_docs(conn, VOLUNTARIOS))
    }

    fn list_instituicoes(&self) -> StoreResult<Vec<Stored<Instituicao>>> {
        self.with_conn(|conn| db_list_docs(conn, INSTITUICAOS))
    }

    fn find_instituicoes(
        &self,
        filter: &InstituicaoFilter,
    ) -> StoreResult<Vec<Stored<Instituicao>>> {
        self.with_conn(|conn| db_find_docs(conn, INSTITUICAOS, |record| filter.matches(record)))
    }

    fn count_instituicoes(&self) -> StoreResult<u64> {
        self.with_conn(|conn| db_count_docs(conn, INSTITUICAOS))
    }
}

impl StorageWrite for SqliteStorage {
    fn insert_voluntario(&self, record: Voluntario) -> StoreResult<Stored<Voluntario>> {
        self.with_conn(|conn| db_insert_doc(conn, VOLUNTARIOS, record))
    }

    fn update_voluntario(
        &self,
        filter: &VoluntarioFilter,
        record: Voluntario,
    ) -> StoreResult<Stored<Voluntario>> {
        self.with_conn(|conn| {
            db_update_one(conn, VOLUNTARIOS, |r| filter.matches(r), record)
        })
    }

    fn delete_voluntario(&self, filter: &VoluntarioFilter) -> StoreResult<Stored<Voluntario>> {
        self.with_conn(|conn| {
            db_delete_one(conn, VOLUNTARIOS, |r: &Voluntario| filter.matches(r))
        })
    }

    fn insert_instituicao(&self, record: Instituicao) -> StoreResult<Stored<Instituicao>> {
        self.with_conn(|conn| db_insert_doc(conn, INSTITUICAOS, record))
    }

    fn update_instituicao(
        &self,
        filter: &InstituicaoFilter,
        record: Instituicao,
    ) -> StoreResult<Stored<Instituicao>> {
        self.with_conn(|conn| {
            db_update_one(conn, INSTITUICAOS, |r| filter.matches(r), record)
        })
    }

    fn delete_instituicao(&self, filter: &InstituicaoFilter) -> StoreResult<Stored<Instituicao>> {
        self.with_conn(|conn| {
            db_delete_one(conn, INSTITUICAOS, |r: &Instituicao| filter.matches(r))
        })
    }

    fn add_tarefa(
        &self,
        filter: &InstituicaoFilter,
        tarefa: &str,
    ) -> StoreResult<Stored<Instituicao>> {
        self.with_conn(|conn| {
            db_modify_one(
                conn,
                INSTITUICAOS,
                |r| filter.matches(r),
                |record: &mut Instituicao| record.push_tarefa(tarefa),
            )
        })
    }
}
