//! # warden-db
//!
//! Database layer implementing repository traits with SQLite via SQLx.
//!
//! ## Overview
//!
//! This crate provides SQLite implementations for the repository traits
//! defined in `warden-core`. It handles:
//!
//! - Connection pool management
//! - Schema creation and in-place upgrades of existing `data.sqlite` files
//! - Database models with SQLx `FromRow` derives
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warden_db::{create_pool, schema, DatabaseConfig, SqliteWalletRepository};
//! use warden_core::WalletRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     schema::migrate(&pool).await?;
//!     let wallets = SqliteWalletRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_memory_pool, create_pool, DatabaseConfig, SqlitePool};
pub use repositories::{SqliteGuildConfigRepository, SqlitePunishmentRepository, SqliteWalletRepository};
