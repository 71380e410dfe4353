use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while authorizing and talking to the Spotify API.
///
/// The orchestrator in [`crate::cli`] catches every variant and turns it into
/// a status line; nothing here is meant to reach the top of `main`.
#[derive(Debug, Error)]
pub enum Error {
    /// The callback carried no code, an `error` parameter, or a state that
    /// does not match the one sent with the authorization request.
    #[error("Authorization failed: {0}")]
    Auth(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Token refresh failed: {0}")]
    Refresh(String),

    #[error("Request to {endpoint} failed with status {status}")]
    Api { endpoint: String, status: StatusCode },

    #[error("Failed to open browser: {0}")]
    BrowserLaunch(String),

    #[error("No authorization callback received within {0:?}")]
    CallbackTimeout(Duration),

    #[error("Callback server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No access token available")]
    NotAuthenticated,
}

pub type Result<T> = std::result::Result<T, Error>;
