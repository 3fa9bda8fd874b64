//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod config;
pub mod health;
pub mod punishments;
pub mod reconciler;
pub mod wallets;
