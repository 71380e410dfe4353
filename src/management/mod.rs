mod auth;

pub use auth::Clock;
pub use auth::SystemClock;
pub use auth::TokenStore;
