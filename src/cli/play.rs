use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    browser::Launcher,
    config::Config,
    errors::Result,
    info,
    management::TokenStore,
    server::CallbackServer,
    spotify::{self, auth::AuthCodeExchanger, player::ApiClient},
    success, utils, warning,
};

/// How a run of the flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The callback server could not start or no redirect arrived in time.
    CallbackFailed,
    /// The redirect had no code, reported an error or carried a foreign state.
    AuthorizationFailed,
    TokenExchangeFailed,
    NoActiveSession,
    PlaybackChanged,
    PlaybackUnchanged,
    /// Reading the playback state failed unexpectedly.
    PlaybackError,
}

/// Runs the authorization flow and takes over the active playback session.
///
/// 1. Generates a random `state` and builds the authorization URL
/// 2. Starts the callback server and opens the URL through `launcher`
/// 3. Waits for the redirect and validates code and state
/// 4. Exchanges the code for a token
/// 5. Prints the user's display name
/// 6. Plays the configured track if a playback session is active
///
/// Every failure is reported on stdout and ends the run with the matching
/// [`Outcome`]; no token exchange happens for a rejected redirect.
pub async fn play(config: &Config, launcher: &dyn Launcher) -> Outcome {
    let state = utils::generate_state();

    let auth_url = match utils::build_authorize_url(config, &state) {
        Ok(url) => url,
        Err(e) => {
            warning!("{}", e);
            return Outcome::CallbackFailed;
        }
    };
    let path = match config.callback_path() {
        Ok(path) => path,
        Err(e) => {
            warning!("{}", e);
            return Outcome::CallbackFailed;
        }
    };

    let mut server = CallbackServer::new(path, state.clone());
    if let Err(e) = server.start(&config.server_address).await {
        warning!(
            "Cannot start callback server on {}: {}",
            config.server_address,
            e
        );
        return Outcome::CallbackFailed;
    }

    match launcher.open(auth_url.as_str()) {
        Ok(()) => info!("Browser opened for authentication..."),
        Err(e) => warning!(
            "{}. Please navigate to the following URL manually:\n{}",
            e,
            auth_url
        ),
    }

    let pb = spinner("Waiting for authorization callback...");
    let callback = server.await_callback(config.callback_timeout).await;
    pb.finish_and_clear();

    let callback = match callback {
        Ok(callback) => callback,
        Err(e) => {
            warning!("{}", e);
            return Outcome::CallbackFailed;
        }
    };

    let code = match callback.validated_code(&state) {
        Ok(code) => code,
        Err(e) => {
            warning!("{}", e);
            return Outcome::AuthorizationFailed;
        }
    };

    let client = match spotify::http_client(config.http_timeout) {
        Ok(client) => client,
        Err(e) => {
            warning!("{}", e);
            return Outcome::TokenExchangeFailed;
        }
    };
    let exchanger = AuthCodeExchanger::new(client.clone(), config);

    let token = match exchanger.exchange_code(code, &config.redirect_uri).await {
        Ok(token) => token,
        Err(e) => {
            warning!("Failed to get access token. {}", e);
            return Outcome::TokenExchangeFailed;
        }
    };

    let mut store = TokenStore::new();
    store.set(token);
    success!("Authentication successful!");

    let mut api = ApiClient::new(client, &config.api_url, exchanger, store);

    match api.get_profile().await {
        Ok(profile) => success!(
            "Connected as: {}",
            profile.display_name.as_deref().unwrap_or("Unknown")
        ),
        Err(e) => warning!("Failed to get username. {}", e),
    }

    match manage_playback(&mut api, &config.track_uri).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warning!("Error managing playback: {}", e);
            Outcome::PlaybackError
        }
    }
}

async fn manage_playback(api: &mut ApiClient, track_uri: &str) -> Result<Outcome> {
    let Some(playback) = api.get_playback_state().await? else {
        info!("No active playback session found.");
        return Ok(Outcome::NoActiveSession);
    };

    let rows = utils::device_rows(&playback);
    if !rows.is_empty() {
        println!("{}", Table::new(rows));
    }

    if api.force_play(track_uri).await {
        success!("Changed playback.");
        Ok(Outcome::PlaybackChanged)
    } else {
        warning!("Failed to change playback.");
        Ok(Outcome::PlaybackUnchanged)
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
