//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
pub mod images;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use images::{ImageFile, ImageHost, ImageHostError};
pub use repository::{BaseRepository, CategoryRepository, PostRepository, UserRepository};
