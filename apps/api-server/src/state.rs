//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{
    CategoryRepository, ImageHost, PasswordService, PostRepository, TokenService, UserRepository,
};
use blog_infra::database::{
    PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository,
};
use blog_infra::{Argon2PasswordService, ImgbbClient, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    /// Absent when no image host is configured; attachments are then rejected.
    pub images: Option<Arc<dyn ImageHost>>,
}

impl AppState {
    /// Build the application state from configuration.
    pub async fn new(config: &AppConfig) -> Result<Self, String> {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| "DATABASE_URL not set".to_string())?;

        let db = blog_infra::connect(db_config)
            .await
            .map_err(|e| format!("database connection failed: {e}"))?;

        let images: Option<Arc<dyn ImageHost>> = match &config.imgbb {
            Some(imgbb) => Some(Arc::new(ImgbbClient::new(imgbb.clone()))),
            None => {
                tracing::warn!(
                    "IMGBB_API_KEY not set. Image attachments will be rejected."
                );
                None
            }
        };

        tracing::info!("Application state initialized");

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db)),
            tokens: Arc::new(JwtTokenService::from_env()),
            passwords: Arc::new(Argon2PasswordService::new()),
            images,
        })
    }
}
