//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! the SeaORM/Postgres content store, JWT + Argon2 identity services,
//! and the imgbb image host client.

pub mod auth;
pub mod database;
pub mod images;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, connect};
pub use images::{ImgbbClient, ImgbbConfig};
