//! # scout-db
//!
//! libSQL paper store for Scout.
//!
//! Holds projects and their archived papers. Every paper read or write is
//! scoped by a project id, and the `(project_id, normalized_title)` unique
//! constraint makes archival an insert-or-ignore: racing inserts of the same
//! title resolve in the database, not in application code.
//!
//! The pipeline talks to the store through the [`PaperStore`] trait;
//! [`ScoutDb`] is the libSQL implementation.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
mod store;

pub use error::DatabaseError;
pub use store::{InsertOutcome, PaperStore};

use libsql::Builder;

/// Central database handle for all Scout library operations.
pub struct ScoutDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl ScoutDb {
    /// Open a local database at the given path, or `":memory:"` for tests.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Foreign keys are per-connection in SQLite; cascade deletes need them.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let scout_db = Self { db, conn };
        scout_db.run_migrations().await?;
        Ok(scout_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"pap-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
