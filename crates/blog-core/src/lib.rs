//! # Blog Core
//!
//! The domain layer of the blog platform.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the filter/sort engine, form validation, and the access guard.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::RepoError;
