use chrono::Utc;

use crate::types::Token;

/// Source of the current time in unix seconds.
///
/// [`TokenStore`] reads the time through this trait so expiry can be tested
/// without waiting.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// Wall clock backed by [`chrono::Utc`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        Utc::now().timestamp() as u64
    }
}

struct IssuedToken {
    token: Token,
    issued_at: u64,
}

/// Holds the one current token and decides when it has to be refreshed.
///
/// Tokens live only in memory for the lifetime of the process. A token is
/// always replaced as a whole; the only value carried over between tokens is
/// the refresh token, see [`TokenStore::set_refreshed`].
pub struct TokenStore {
    current: Option<IssuedToken>,
    clock: Box<dyn Clock>,
}

impl TokenStore {
    /// Creates an empty store that reads the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        TokenStore {
            current: None,
            clock: Box::new(clock),
        }
    }

    /// Replaces the current token and stamps it with the current time.
    ///
    /// `expires_in` is counted from this moment, not from when the token
    /// endpoint answered.
    pub fn set(&mut self, token: Token) {
        self.current = Some(IssuedToken {
            token,
            issued_at: self.clock.now(),
        });
    }

    /// Stores a token obtained with the refresh grant.
    ///
    /// The accounts service does not always rotate the refresh token. When the
    /// response leaves it out, the previous one stays valid and is kept.
    pub fn set_refreshed(&mut self, mut token: Token) {
        if token.refresh_token.is_none() {
            token.refresh_token = self.refresh_token().map(str::to_string);
        }
        self.set(token);
    }

    pub fn get(&self) -> Option<&Token> {
        self.current.as_ref().map(|c| &c.token)
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.get().and_then(|t| t.refresh_token.as_deref())
    }

    /// Unix time at which the current token stops being usable.
    ///
    /// Saturates at `u64::MAX` when the advertised lifetime is absurdly long.
    pub fn expires_at(&self) -> Option<u64> {
        self.current
            .as_ref()
            .map(|c| c.issued_at.saturating_add(c.token.expires_in))
    }

    /// True once the current time has reached `expires_at`, and whenever no
    /// token is held.
    pub fn is_expired(&self) -> bool {
        match self.expires_at() {
            Some(expires_at) => self.clock.now() >= expires_at,
            None => true,
        }
    }

    /// Discards the current token, after which [`TokenStore::is_expired`]
    /// reports true.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}
