//! # API Module
//!
//! HTTP handler for the loopback server that receives the OAuth redirect.
//!
//! - [`callback`] - Reads `code`, `state` and `error` from the redirect
//!   request, hands them to the waiting flow and answers with a minimal HTML
//!   page telling the user whether authentication succeeded.
//!
//! The handler is mounted by [`crate::server::CallbackServer`] on the path of
//! the configured redirect URI.
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use forceplay::api::{callback, CallbackContext};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .layer(Extension(context));
//! ```

mod callback;

pub use callback::CallbackContext;
pub use callback::FAILURE_PAGE;
pub use callback::SUCCESS_PAGE;
pub use callback::callback;
