//! The content store: SeaORM entities and repository implementations.

mod connections;
pub mod entity;
mod repos;

pub use connections::{DatabaseConfig, connect};
pub use repos::{PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository};

#[cfg(test)]
mod tests;
