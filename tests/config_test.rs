use std::collections::HashMap;
use std::time::Duration;

use forceplay::config::*;
use forceplay::errors::Error;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

const CREDENTIALS: [(&str, &str); 2] = [
    ("SPOTIFY_API_AUTH_CLIENT_ID", "cid"),
    ("SPOTIFY_API_AUTH_CLIENT_SECRET", "csecret"),
];

#[test]
fn test_defaults_with_credentials_only() {
    let config = Config::from_lookup(lookup_from(&CREDENTIALS)).unwrap();

    assert_eq!(config.client_id, "cid");
    assert_eq!(config.client_secret, "csecret");
    assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
    assert_eq!(config.server_address, DEFAULT_SERVER_ADDRESS);
    assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
    assert_eq!(config.track_uri, DEFAULT_TRACK_URI);
    assert_eq!(
        config.callback_timeout,
        Duration::from_secs(DEFAULT_CALLBACK_TIMEOUT_SECS)
    );
}

#[test]
fn test_overrides() {
    let mut pairs = CREDENTIALS.to_vec();
    pairs.extend([
        ("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/auth"),
        ("SERVER_ADDRESS", "127.0.0.1:8888"),
        ("SPOTIFY_TARGET_TRACK_URI", "spotify:track:other"),
        ("CALLBACK_TIMEOUT_SECS", " 15 "),
        ("HTTP_TIMEOUT_SECS", "5"),
    ]);

    let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
    assert_eq!(config.redirect_uri, "http://127.0.0.1:8888/auth");
    assert_eq!(config.server_address, "127.0.0.1:8888");
    assert_eq!(config.track_uri, "spotify:track:other");
    assert_eq!(config.callback_timeout, Duration::from_secs(15));
    assert_eq!(config.http_timeout, Duration::from_secs(5));
}

#[test]
fn test_missing_credentials() {
    let res = Config::from_lookup(lookup_from(&[("SPOTIFY_API_AUTH_CLIENT_ID", "cid")]));
    match res {
        Err(Error::Config(msg)) => assert!(msg.contains("SPOTIFY_API_AUTH_CLIENT_SECRET")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_blank_values_count_as_unset() {
    // A blank credential is as good as none
    let res = Config::from_lookup(lookup_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "   "),
        ("SPOTIFY_API_AUTH_CLIENT_SECRET", "csecret"),
    ]));
    assert!(matches!(res, Err(Error::Config(_))));

    // A blank optional value falls back to the default
    let mut pairs = CREDENTIALS.to_vec();
    pairs.extend([("SERVER_ADDRESS", ""), ("CALLBACK_TIMEOUT_SECS", " ")]);
    let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
    assert_eq!(config.server_address, DEFAULT_SERVER_ADDRESS);
    assert_eq!(
        config.callback_timeout,
        Duration::from_secs(DEFAULT_CALLBACK_TIMEOUT_SECS)
    );
}

#[test]
fn test_non_numeric_timeout() {
    let mut pairs = CREDENTIALS.to_vec();
    pairs.push(("CALLBACK_TIMEOUT_SECS", "two minutes"));

    match Config::from_lookup(lookup_from(&pairs)) {
        Err(Error::Config(msg)) => assert!(msg.contains("CALLBACK_TIMEOUT_SECS")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_unservable_redirect_path_is_rejected_up_front() {
    let mut pairs = CREDENTIALS.to_vec();
    pairs.push(("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:5000/:cb"));

    assert!(matches!(
        Config::from_lookup(lookup_from(&pairs)),
        Err(Error::Config(_))
    ));
}
