use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::errors::{Error, Result};

fn default_token_type() -> String {
    "Bearer".to_string()
}

fn default_expires_in() -> u64 {
    3600
}

/// Token as returned by the accounts service.
///
/// The issue time is not part of the response; [`crate::management::TokenStore`]
/// stamps it when the token is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
    /// Refresh responses may leave this out.
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
}

/// Query parameters of the single redirect request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackResult {
    pub code: Option<String>,
    pub state: String,
    /// Set by the accounts service when the user denied access.
    pub error: Option<String>,
}

impl CallbackResult {
    /// Returns the authorization code if the callback may be exchanged for a
    /// token: a code is present and the state echoes the one we sent.
    pub fn validated_code(&self, expected_state: &str) -> Result<&str> {
        if self.state != expected_state {
            return Err(Error::Auth("state mismatch".to_string()));
        }
        if let Some(reason) = &self.error {
            return Err(Error::Auth(format!("access denied ({})", reason)));
        }
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => Ok(code),
            _ => Err(Error::Auth("missing authorization code".to_string())),
        }
    }

    pub fn is_valid(&self, expected_state: &str) -> bool {
        self.validated_code(expected_state).is_ok()
    }
}

/// The subset of `GET /me` that is shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Body of `GET /me/player`. `device` is absent for some restricted sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    #[serde(default)]
    pub device: Option<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub id: Option<String>,
    pub is_active: bool,
    pub name: String,
}

#[derive(Tabled)]
pub struct DeviceTableRow {
    pub device: String,
    pub active: String,
    pub playing: String,
}

/// Body of `PUT /me/player/play`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRequest {
    pub uris: Vec<String>,
}
