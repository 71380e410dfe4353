use std::collections::HashMap;

use forceplay::config::Config;
use forceplay::types::{Device, PlaybackState};
use forceplay::utils::*;

fn test_config() -> Config {
    Config::new("client-123", "secret-456")
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    // Should be exactly 32 characters
    assert_eq!(state.len(), 32);

    // Should contain only alphanumeric characters
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated states should be different
    assert_ne!(state, generate_state());
}

#[test]
fn test_build_authorize_url() {
    let config = test_config();
    let url = build_authorize_url(&config, "S1").unwrap();

    assert_eq!(url.scheme(), "https");
    assert_eq!(url.host_str(), Some("accounts.spotify.com"));
    assert_eq!(url.path(), "/authorize");

    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["client_id"], "client-123");
    assert_eq!(params["redirect_uri"], "http://127.0.0.1:5000/callback");
    assert_eq!(params["state"], "S1");
    assert_eq!(
        params["scope"],
        "user-read-private user-modify-playback-state user-read-playback-state"
    );

    // The client secret never ends up in the browser
    assert!(!url.as_str().contains("secret-456"));
}

#[test]
fn test_build_authorize_url_encodes_query() {
    let config = test_config();
    let url = build_authorize_url(&config, "S1").unwrap();

    // Spaces in the scope and the redirect URI must be escaped
    assert!(!url.as_str().contains(' '));
    assert!(url.as_str().contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A5000%2Fcallback"));
}

#[test]
fn test_build_authorize_url_rejects_invalid_endpoint() {
    let config = Config {
        auth_url: "not a url".to_string(),
        ..test_config()
    };
    assert!(build_authorize_url(&config, "S1").is_err());
}

#[test]
fn test_callback_path() {
    let config = test_config();
    assert_eq!(config.callback_path().unwrap(), "/callback");

    let config = Config {
        redirect_uri: "http://127.0.0.1:8888/auth/spotify".to_string(),
        ..test_config()
    };
    assert_eq!(config.callback_path().unwrap(), "/auth/spotify");

    let config = Config {
        redirect_uri: "::".to_string(),
        ..test_config()
    };
    assert!(config.callback_path().is_err());
}

#[test]
fn test_device_rows() {
    let playback = PlaybackState {
        is_playing: true,
        device: Some(Device {
            id: Some("dev-1".to_string()),
            is_active: true,
            name: "Kitchen".to_string(),
        }),
    };

    let rows = device_rows(&playback);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].device, "Kitchen");
    assert_eq!(rows[0].active, "yes");
    assert_eq!(rows[0].playing, "yes");

    // No device, no rows
    let playback = PlaybackState {
        is_playing: false,
        device: None,
    };
    assert!(device_rows(&playback).is_empty());
}

#[test]
fn test_callback_path_rejects_capture_segments() {
    let config = Config {
        redirect_uri: "http://127.0.0.1:5000/:cb".to_string(),
        ..test_config()
    };
    assert!(config.callback_path().is_err());
}
