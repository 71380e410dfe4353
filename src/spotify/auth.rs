use reqwest::Client;

use crate::{
    config::Config,
    errors::{Error, Result},
    types::Token,
};

/// Client for the accounts service token endpoint.
///
/// Both grants send the client credentials in the form body, as the
/// authorization code flow with a client secret allows.
#[derive(Debug, Clone)]
pub struct AuthCodeExchanger {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl AuthCodeExchanger {
    /// Creates an exchanger for the token endpoint and credentials in `config`.
    pub fn new(client: Client, config: &Config) -> Self {
        AuthCodeExchanger {
            client,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// `redirect_uri` must be the exact value sent with the authorization
    /// request, the accounts service compares them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenExchange`] on transport failures, any non-success
    /// status and bodies that are not a token response.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<Token> {
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ])
        .await
        .map_err(Error::TokenExchange)
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The returned token may have no refresh token of its own; keeping the
    /// previous one is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Refresh`] with the same failure rules as
    /// [`AuthCodeExchanger::exchange_code`].
    pub async fn refresh(&self, refresh_token: &str) -> Result<Token> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ])
        .await
        .map_err(Error::Refresh)
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> std::result::Result<Token, String> {
        let res = self
            .client
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(format!("token endpoint responded with {}: {}", status, body));
        }

        res.json::<Token>()
            .await
            .map_err(|e| format!("malformed token response: {}", e))
    }
}
