//! SQLite storage for the local session.
//!
//! The session file holds a handful of key/value entries: the bearer
//! credential and the last-known user profile. Everything else lives on the
//! appointment service.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod session_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open session database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
