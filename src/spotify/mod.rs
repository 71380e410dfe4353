//! # Spotify Integration Module
//!
//! Clients for the two Spotify services forceplay talks to:
//!
//! - [`auth`] - the accounts service token endpoint. Trades an authorization
//!   code or a refresh token for an access token.
//! - [`player`] - the Web API. Reads the user profile and playback state and
//!   starts playback, refreshing the access token on demand.
//!
//! ```text
//! Orchestrator (cli::play)
//!          ↓
//!     ApiClient ──→ TokenStore
//!          ↓
//!   AuthCodeExchanger
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! Both clients share one [`reqwest::Client`] created by [`http_client`], so
//! every outbound request is bounded by the configured timeout.

use std::time::Duration;

use reqwest::Client;

use crate::errors::Result;

pub mod auth;
pub mod player;

/// Builds the HTTP client used for the token endpoint and the Web API.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
