//! # Account Models
//!
//! Login credentials and the create-admin payload. The session token
//! itself lives in the session service; nothing else about an admin is
//! persisted client-side.

use serde::{Deserialize, Serialize};

/// Login payload for `POST /login`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Payload for `POST /createAdmin`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
}

/// Login response envelope; the token is opaque to the client.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
