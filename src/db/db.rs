use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;

pub const DB_FILE_NAME: &str = "sidik.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new()
            .get_path(DB_FILE_NAME)
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        let conn = Connection::open(db_file_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        Ok(Db { conn })
    }
}
