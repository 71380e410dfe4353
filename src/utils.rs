use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;

use crate::{
    config::Config,
    errors::{Error, Result},
    types::{DeviceTableRow, PlaybackState},
};

const STATE_LENGTH: usize = 32;

/// Generates the opaque `state` value sent with the authorization request
/// and expected back on the redirect.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// Builds the URL the user has to open to grant access.
pub fn build_authorize_url(config: &Config, state: &str) -> Result<Url> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("scope", config.scope.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid authorization URL {}: {}", config.auth_url, e)))
}

pub fn device_rows(playback: &PlaybackState) -> Vec<DeviceTableRow> {
    playback
        .device
        .iter()
        .map(|d| DeviceTableRow {
            device: d.name.clone(),
            active: yes_no(d.is_active),
            playing: yes_no(playback.is_playing),
        })
        .collect()
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}
