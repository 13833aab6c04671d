//! Persistent session: bearer credential and last-known user profile.
//!
//! Entries survive process restarts and are removed on logout or when the
//! server rejects the credential with `401`.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use crate::{
    db::Database,
    error::{BookingError, Result},
    models::User,
};

/// Key of the bearer credential entry.
pub const TOKEN_KEY: &str = "access_token";

/// Key of the cached user profile entry (JSON).
pub const USER_KEY: &str = "user_data";

/// Handle to the session file. Cheap to clone; every operation opens its own
/// connection on the blocking pool.
#[derive(Debug, Clone)]
pub struct SessionStore {
    db_path: PathBuf,
}

impl SessionStore {
    /// Opens (creating if needed) the session file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::FileSystem` if the parent directory cannot be
    /// created, `BookingError::Database` if the schema cannot be initialized.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| BookingError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = Self { db_path };
        store.run(|_db| Ok(())).await?;
        Ok(store)
    }

    /// Default session file following the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/barberia/session.db`.
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("barberia")
            .place_data_file("session.db")
            .map_err(|e| BookingError::XdgDirectory(e.to_string()))
    }

    /// Location of the session file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// The stored bearer credential, if any.
    pub async fn token(&self) -> Result<Option<String>> {
        self.run(|db| db.get_entry(TOKEN_KEY)).await
    }

    /// Stores the bearer credential.
    pub async fn store_token(&self, token: &str) -> Result<()> {
        let token = token.to_string();
        self.run(move |db| db.put_entry(TOKEN_KEY, &token)).await
    }

    /// The last-known user profile, if any. A corrupt entry reads as absent.
    pub async fn user(&self) -> Result<Option<User>> {
        let raw = self.run(|db| db.get_entry(USER_KEY)).await?;
        Ok(raw.and_then(|json| match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!("Ignoring unreadable cached user profile: {e}");
                None
            }
        }))
    }

    /// Stores the user profile.
    pub async fn store_user(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.run(move |db| db.put_entry(USER_KEY, &json)).await
    }

    /// Removes the credential and the cached profile.
    pub async fn clear(&self) -> Result<()> {
        self.run(|db| db.remove_entries(&[TOKEN_KEY, USER_KEY])).await
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| BookingError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
