//! Forceplay Library
//!
//! This library implements a local OAuth 2.0 authorization code flow against
//! the Spotify accounts service and a small set of playback calls against the
//! Spotify Web API. It opens the browser for consent, receives the redirect on
//! a loopback listener, exchanges the code for a token and uses that token to
//! take over the user's active playback session.
//!
//! # Modules
//!
//! - `api` - HTTP handler for the local callback server
//! - `browser` - Opening the authorization URL in the user's browser
//! - `cli` - The orchestrated command-line flow
//! - `config` - Configuration loaded from `.env` files and the environment
//! - `errors` - Error type shared across the crate
//! - `management` - In-memory token lifecycle
//! - `server` - Single-shot loopback server for the OAuth redirect
//! - `spotify` - Token endpoint and Web API clients
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use forceplay::{browser::SystemBrowser, cli, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> forceplay::Res<()> {
//!     forceplay::config::load_env().await?;
//!     let config = Config::from_env()?;
//!     let outcome = cli::play(&config, &SystemBrowser).await;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod browser;
pub mod cli;
pub mod config;
pub mod errors;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for setup code that may fail in several
/// unrelated ways.
///
/// Operations inside the authorization flow return the typed
/// [`errors::Result`] instead; this alias is used at the outer edges where
/// any error is simply reported to the user.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Arguments
///
/// Takes the same arguments as [`format!`]: a format string followed by the
/// values to interpolate.
///
/// # Behavior
///
/// Writes `[o] <message>` to stdout, with the `o` in bold blue. Used for
/// progress steps such as opening the browser or waiting for the redirect.
///
/// # Example
///
/// ```
/// info!("Browser opened for authentication...");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Arguments
///
/// Takes the same arguments as [`format!`].
///
/// # Behavior
///
/// Writes `[✓] <message>` to stdout, with the checkmark in bold green.
///
/// # Example
///
/// ```
/// success!("Connected as: {}", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for failures that happen before the authorization flow starts,
/// such as missing credentials. Everything inside the flow is reported with
/// [`warning!`] and turned into an outcome instead.
///
/// # Arguments
///
/// Takes the same arguments as [`format!`].
///
/// # Behavior
///
/// Writes `[!] <message>` to stdout with the marker in bold red, then
/// terminates the process with exit code `1`. The macro never returns.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for every recoverable failure in the flow: a browser that cannot be
/// opened, a rejected callback, a failed token exchange or API call.
///
/// # Arguments
///
/// Takes the same arguments as [`format!`].
///
/// # Behavior
///
/// Writes `[!] <message>` to stdout with the marker in bold yellow and
/// returns normally, so the caller decides how to carry on.
///
/// # Example
///
/// ```
/// warning!("Failed to change playback.");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
