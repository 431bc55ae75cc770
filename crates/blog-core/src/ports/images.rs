//! Image host port.
//!
//! A single operation: submit a file, get back a publicly retrievable URL.
//! Size and MIME constraints are enforced by the caller before upload
//! (see `validation::validate_image`). A failed upload is terminal for
//! the attempt; nothing is retried and no cleanup is possible.

use async_trait::async_trait;
use thiserror::Error;

/// An image file staged for upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ImageHostError {
    #[error("Image host request failed: {0}")]
    Transport(String),

    #[error("Image host rejected the upload: {0}")]
    Rejected(String),
}

/// External image hosting service.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload an image and return its public URL.
    async fn upload(&self, image: &ImageFile) -> Result<String, ImageHostError>;
}
