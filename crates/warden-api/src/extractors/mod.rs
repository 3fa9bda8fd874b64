//! Axum extractors for request handling
//!
//! Custom extractors for validated bodies and query strings, and typed path
//! parameters.

mod path;
mod validated;

pub use path::{GuildPath, PunishmentPath, WalletPath};
pub use validated::{ValidatedJson, ValidatedQuery};
