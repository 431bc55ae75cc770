//! Image host client.

mod imgbb;

pub use imgbb::{ImgbbClient, ImgbbConfig};
