use std::{io, net::SocketAddr, sync::Arc, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot},
};

use crate::{
    api::{self, CallbackContext},
    errors::{Error, Result},
    types::CallbackResult,
};

/// Lifecycle of a [`CallbackServer`]. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerPhase {
    /// Created, nothing bound yet.
    Idle,
    /// Listener bound, waiting for the redirect.
    Listening,
    /// The redirect path was hit and its result captured.
    Received,
    /// Listener released. Terminal.
    Closed,
}

/// Checks that `path` can be mounted as a plain, literal axum route.
///
/// axum panics on empty paths, paths without a leading `/`, segments starting
/// with `:` or `*`, and unbalanced braces, and treats `{name}` as a capture.
/// None of these make sense for a redirect URI, so they are rejected here
/// before anything is bound or shown to the user.
pub fn check_route_path(path: &str) -> Result<()> {
    let invalid = |reason: &str| Err(Error::Config(format!("redirect path {:?} {}", path, reason)));

    if !path.starts_with('/') {
        return invalid("must start with '/'");
    }
    if path.contains(['{', '}']) {
        return invalid("must not contain '{' or '}'");
    }
    if path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return invalid("must not have segments starting with ':' or '*'");
    }
    Ok(())
}

/// Loopback HTTP server that accepts exactly one OAuth redirect.
///
/// `Idle -> Listening` on [`CallbackServer::start`], then
/// `Received -> Closed` inside [`CallbackServer::await_callback`]. The
/// listener is owned by the server and released when the callback has been
/// answered, when the wait times out, and when the server is dropped.
pub struct CallbackServer {
    path: String,
    expected_state: String,
    listener: Option<TcpListener>,
    phase: ServerPhase,
}

impl CallbackServer {
    /// Creates an idle server answering on `path` and comparing the returned
    /// `state` against `expected_state`.
    pub fn new(path: impl Into<String>, expected_state: impl Into<String>) -> Self {
        CallbackServer {
            path: path.into(),
            expected_state: expected_state.into(),
            listener: None,
            phase: ServerPhase::Idle,
        }
    }

    pub fn phase(&self) -> ServerPhase {
        self.phase
    }

    /// Binds the listener and returns the address it is bound to.
    ///
    /// Passing port `0` picks a free port, which the tests rely on.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] if the path cannot be mounted as a literal route
    /// * [`Error::Server`] if the server was already started or the address
    ///   cannot be bound
    pub async fn start(&mut self, bind_address: &str) -> Result<SocketAddr> {
        if self.phase != ServerPhase::Idle {
            return Err(Error::Server(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "callback server was already started",
            )));
        }

        check_route_path(&self.path)?;

        let listener = TcpListener::bind(bind_address).await?;
        let addr = listener.local_addr()?;
        self.listener = Some(listener);
        self.phase = ServerPhase::Listening;
        Ok(addr)
    }

    /// Serves requests until the redirect path has been hit once or `timeout`
    /// elapses.
    ///
    /// The HTML answer is written before the listener shuts down. Requests to
    /// any other path get a `404` and keep the server waiting.
    pub async fn await_callback(&mut self, timeout: Duration) -> Result<CallbackResult> {
        let Some(listener) = self.listener.take() else {
            return Err(Error::Server(io::Error::new(
                io::ErrorKind::NotConnected,
                "callback server is not listening",
            )));
        };

        let (result_tx, result_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let context = CallbackContext {
            expected_state: self.expected_state.clone(),
            sender: Arc::new(Mutex::new(Some(result_tx))),
        };
        let app = Router::new()
            .route(&self.path, get(api::callback))
            .layer(Extension(context));

        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        let received = tokio::time::timeout(timeout, result_rx).await;
        if matches!(received, Ok(Ok(_))) {
            self.phase = ServerPhase::Received;
        }

        // graceful shutdown lets the in-flight answer reach the browser
        let _ = shutdown_tx.send(());
        let served = server.await;
        self.phase = ServerPhase::Closed;

        match received {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(_)) => Err(Error::Server(io::Error::other(
                "callback handler dropped without a result",
            ))),
            Err(_) => match served {
                Ok(Err(e)) => Err(Error::Server(e)),
                _ => Err(Error::CallbackTimeout(timeout)),
            },
        }
    }
}
