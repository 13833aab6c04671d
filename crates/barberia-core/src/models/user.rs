//! User and credential models.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::lenient_datetime;

/// A registered customer or administrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique identifier
    pub id: u64,

    /// Login and display name
    pub username: String,

    /// Contact email
    pub email: String,

    /// Registration time (server local time)
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime>,
}

/// Body of a successful `POST /token`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    /// Opaque bearer credential
    pub access_token: String,

    /// Token scheme, normally `bearer`
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Body of `POST /signup`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}
