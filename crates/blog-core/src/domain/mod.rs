//! Domain entities and pure domain logic.

mod category;
mod post;
mod user;

pub mod filter;
pub mod guard;

pub use category::Category;
pub use post::Post;
pub use user::{Role, User};
