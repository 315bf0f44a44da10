//! users table queries.

use qgate_core::errors::StorageError;
use qgate_core::types::User;
use rusqlite::{params, Connection, OptionalExtension};

use crate::to_storage_err;

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO users (uuid, login, name, active) VALUES (?1, ?2, ?3, ?4)",
        params![user.uuid, user.login, user.name, user.active],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn get_user(conn: &Connection, uuid: &str) -> Result<Option<User>, StorageError> {
    conn.prepare_cached("SELECT uuid, login, name, active FROM users WHERE uuid = ?1")
        .and_then(|mut stmt| {
            stmt.query_row(params![uuid], |row| {
                Ok(User {
                    uuid: row.get(0)?,
                    login: row.get(1)?,
                    name: row.get(2)?,
                    active: row.get(3)?,
                })
            })
            .optional()
        })
        .map_err(to_storage_err)
}
