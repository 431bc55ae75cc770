//! SeaORM entities mirroring the store's collections.

pub mod category;
pub mod post;
pub mod user;
