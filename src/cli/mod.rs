//! # CLI Module
//!
//! The user-facing flow of forceplay. [`play`] ties the pieces of the crate
//! together in a single straight-line run:
//!
//! ```text
//! build auth URL → open browser → wait for callback → exchange code
//!     → print profile → check playback → force play
//! ```
//!
//! Each step reports its result with the crate's output macros (`info!`,
//! `success!`, `warning!`) and a failed step ends the run early with an
//! [`Outcome`] describing where it stopped. Only setup failures in `main`
//! terminate the process.

mod play;

pub use play::Outcome;
pub use play::play;
