use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::{
    errors::{Error, Result},
    management::TokenStore,
    spotify::auth::AuthCodeExchanger,
    types::{PlayRequest, PlaybackState, UserProfile},
    warning,
};

/// Authenticated client for the few Web API endpoints forceplay needs.
///
/// Owns the [`TokenStore`]. Before every request an expired token is
/// refreshed, and a `401 Unauthorized` answer triggers exactly one
/// refresh followed by one retry.
pub struct ApiClient {
    client: Client,
    api_url: String,
    exchanger: AuthCodeExchanger,
    store: TokenStore,
}

impl ApiClient {
    /// Creates a client for the Web API rooted at `api_url`.
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client, see [`crate::spotify::http_client`]
    /// * `api_url` - Base URL such as `https://api.spotify.com/v1`; a trailing
    ///   slash is ignored
    /// * `exchanger` - Used for refreshes when the token expires or is rejected
    /// * `store` - Usually already holds the token from the code exchange
    pub fn new(
        client: Client,
        api_url: impl Into<String>,
        exchanger: AuthCodeExchanger,
        store: TokenStore,
    ) -> Self {
        ApiClient {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            exchanger,
            store,
        }
    }

    /// Read access to the token currently used for requests.
    pub fn token_store(&self) -> &TokenStore {
        &self.store
    }

    /// Fetches the profile of the authorized user (`GET /me`).
    ///
    /// # Errors
    ///
    /// * [`Error::Refresh`] if no usable token could be obtained
    /// * [`Error::Api`] for any non-success status after the retry
    /// * [`Error::Http`] for transport failures and malformed bodies
    pub async fn get_profile(&mut self) -> Result<UserProfile> {
        let url = format!("{}/me", self.api_url);
        let response = self.send_authorized(|c| c.get(&url)).await?;

        if !response.status().is_success() {
            return Err(api_error("/me", response.status()));
        }
        Ok(response.json::<UserProfile>().await?)
    }

    /// Fetches the current playback state.
    ///
    /// Returns `Ok(None)` when the API answers `204 No Content`, which means
    /// the user has no active playback session.
    pub async fn get_playback_state(&mut self) -> Result<Option<PlaybackState>> {
        let url = format!("{}/me/player", self.api_url);
        let response = self.send_authorized(|c| c.get(&url)).await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<PlaybackState>().await?)),
            status => Err(api_error("/me/player", status)),
        }
    }

    /// Starts playing `track_uri` on the active device.
    ///
    /// Returns whether the API accepted the request. Failures to reach the
    /// API or to refresh the token are reported and count as not accepted.
    pub async fn force_play(&mut self, track_uri: &str) -> bool {
        let url = format!("{}/me/player/play", self.api_url);
        let body = PlayRequest {
            uris: vec![track_uri.to_string()],
        };

        match self.send_authorized(|c| c.put(&url).json(&body)).await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warning!("Play request failed: {}", e);
                false
            }
        }
    }

    async fn send_authorized<F>(&mut self, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let token = self.valid_access_token().await?;
        let response = build(&self.client).bearer_auth(token).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        // the token was rejected before its expiry, refresh once and retry once
        let token = self.refresh().await?;
        Ok(build(&self.client).bearer_auth(token).send().await?)
    }

    async fn valid_access_token(&mut self) -> Result<String> {
        if self.store.is_expired() {
            return self.refresh().await;
        }
        self.store
            .get()
            .map(|t| t.access_token.clone())
            .ok_or(Error::NotAuthenticated)
    }

    async fn refresh(&mut self) -> Result<String> {
        let Some(refresh_token) = self.store.refresh_token().map(str::to_string) else {
            self.store.clear();
            return Err(Error::Refresh("no refresh token available".to_string()));
        };

        match self.exchanger.refresh(&refresh_token).await {
            Ok(token) => {
                let access_token = token.access_token.clone();
                self.store.set_refreshed(token);
                Ok(access_token)
            }
            Err(e) => {
                self.store.clear();
                Err(e)
            }
        }
    }
}

fn api_error(endpoint: &str, status: StatusCode) -> Error {
    Error::Api {
        endpoint: endpoint.to_string(),
        status,
    }
}
