//! imgbb upload client.
//!
//! Single operation: POST the file as multipart form data, read back the
//! public URL. Failures are terminal for the attempt; the caller decides
//! whether the surrounding write proceeds (it must not).

use async_trait::async_trait;
use serde::Deserialize;

use blog_core::ports::{ImageFile, ImageHost, ImageHostError};

/// imgbb client configuration.
#[derive(Debug, Clone)]
pub struct ImgbbConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl ImgbbConfig {
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("IMGBB_API_KEY").ok()?;
        Some(Self {
            endpoint: std::env::var("IMGBB_ENDPOINT")
                .unwrap_or_else(|_| "https://api.imgbb.com/1/upload".to_string()),
            api_key,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ImgbbResponse {
    #[serde(default)]
    success: bool,
    data: Option<ImgbbData>,
}

#[derive(Debug, Deserialize)]
struct ImgbbData {
    url: String,
}

/// HTTP client for the imgbb v1 upload API.
pub struct ImgbbClient {
    http: reqwest::Client,
    config: ImgbbConfig,
}

impl ImgbbClient {
    pub fn new(config: ImgbbConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ImageHost for ImgbbClient {
    async fn upload(&self, image: &ImageFile) -> Result<String, ImageHostError> {
        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| ImageHostError::Rejected(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .text("key", self.config.api_key.clone())
            .part("image", part);

        let response = self
            .http
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ImageHostError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ImageHostError::Rejected(format!(
                "status {}",
                response.status()
            )));
        }

        let body: ImgbbResponse = response
            .json()
            .await
            .map_err(|e| ImageHostError::Transport(e.to_string()))?;

        match body.data {
            Some(data) if body.success => {
                tracing::debug!(url = %data.url, "Image uploaded");
                Ok(data.url)
            }
            _ => Err(ImageHostError::Rejected(
                "upload reported failure".to_string(),
            )),
        }
    }
}
