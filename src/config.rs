//! Configuration management for forceplay.
//!
//! Client credentials and endpoints are read from environment variables,
//! optionally seeded from a `.env` file in the local data directory. The
//! values are collected once into a [`Config`] that is passed explicitly to
//! the authorization flow.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults for everything except the client credentials

use std::{env, path::PathBuf, time::Duration};

use reqwest::Url;

use crate::{
    Res,
    errors::{Error, Result},
    server,
};

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:5000/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_SCOPE: &str =
    "user-read-private user-modify-playback-state user-read-playback-state";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TRACK_URI: &str = "spotify:track:4z0PnuB07fxtVZZRWsCfxb";
pub const DEFAULT_CALLBACK_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives at `<data_local_dir>/forceplay/.env`:
/// - Linux: `~/.local/share/forceplay/.env`
/// - macOS: `~/Library/Application Support/forceplay/.env`
/// - Windows: `%LOCALAPPDATA%/forceplay/.env`
///
/// A missing file is not an error, credentials may come straight from the
/// environment. A file that exists but cannot be parsed is.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("forceplay/.env");
    path
}

/// Everything the authorization flow needs to know about the outside world.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    /// Must match the redirect URI registered for the Spotify application.
    pub redirect_uri: String,
    /// Loopback address the callback server binds to.
    pub server_address: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    /// Track forced onto the active device.
    pub track_uri: String,
    pub callback_timeout: Duration,
    pub http_timeout: Duration,
}

impl Config {
    /// Creates a configuration with the given credentials and the default
    /// Spotify endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Config {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            track_uri: DEFAULT_TRACK_URI.to_string(),
            callback_timeout: Duration::from_secs(DEFAULT_CALLBACK_TIMEOUT_SECS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Builds the configuration from environment variables.
    ///
    /// `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_API_AUTH_CLIENT_SECRET` are
    /// required. The remaining variables fall back to the defaults above:
    /// `SPOTIFY_API_REDIRECT_URI`, `SERVER_ADDRESS`, `SPOTIFY_API_AUTH_SCOPE`,
    /// `SPOTIFY_API_AUTH_URL`, `SPOTIFY_API_TOKEN_URL`, `SPOTIFY_API_URL`,
    /// `SPOTIFY_TARGET_TRACK_URI`, `CALLBACK_TIMEOUT_SECS` and
    /// `HTTP_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a credential is missing or blank, when a
    /// timeout is not a whole number of seconds, and when the redirect URI
    /// cannot be served by the callback server.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source, following the same
    /// rules as [`Config::from_env`]. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            var(key).ok_or_else(|| Error::Config(format!("{} must be set", key)))
        };
        let seconds_or = |key: &str, default: Duration| match var(key) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| Error::Config(format!("{} must be a number of seconds: {}", key, e))),
            None => Ok(default),
        };

        let defaults = Config::new(
            required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
        );

        let config = Config {
            redirect_uri: var("SPOTIFY_API_REDIRECT_URI").unwrap_or(defaults.redirect_uri),
            server_address: var("SERVER_ADDRESS").unwrap_or(defaults.server_address),
            scope: var("SPOTIFY_API_AUTH_SCOPE").unwrap_or(defaults.scope),
            auth_url: var("SPOTIFY_API_AUTH_URL").unwrap_or(defaults.auth_url),
            token_url: var("SPOTIFY_API_TOKEN_URL").unwrap_or(defaults.token_url),
            api_url: var("SPOTIFY_API_URL").unwrap_or(defaults.api_url),
            track_uri: var("SPOTIFY_TARGET_TRACK_URI").unwrap_or(defaults.track_uri),
            callback_timeout: seconds_or("CALLBACK_TIMEOUT_SECS", defaults.callback_timeout)?,
            http_timeout: seconds_or("HTTP_TIMEOUT_SECS", defaults.http_timeout)?,
            ..defaults
        };

        // fail early rather than after the user has granted consent
        config.callback_path()?;
        Ok(config)
    }

    /// Path component of the redirect URI, which is the only route the
    /// callback server answers on.
    pub fn callback_path(&self) -> Result<String> {
        let url = Url::parse(&self.redirect_uri).map_err(|e| {
            Error::Config(format!("invalid redirect URI {}: {}", self.redirect_uri, e))
        })?;
        let path = url.path().to_string();
        server::check_route_path(&path)?;
        Ok(path)
    }
}
