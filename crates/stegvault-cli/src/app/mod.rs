//! Application-level helpers for the StegVault CLI.
//!
//! - **context**: `AppContext` bundles CLI args with lazily loaded config
//! - **passphrase**: passphrase source resolution and strength policy
//! - **secret**: reading the secret to back up

mod context;
pub mod passphrase;
pub mod secret;

pub use context::AppContext;
