//! # Blog Shared
//!
//! Request/response types shared between the API server and Rust clients.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
