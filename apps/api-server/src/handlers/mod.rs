//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod categories;
mod health;
mod posts;
mod profile;
mod users;

use actix_web::web;

use blog_core::ports::{ImageFile, ImageHost};
use blog_core::validation;
use blog_shared::dto::ImageAttachment;

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Posts
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/mine", web::get().to(posts::mine))
                    .route("/{id}", web::get().to(posts::detail))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            )
            // Categories
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list))
                    .route("", web::post().to(categories::create))
                    .route("/{id}", web::put().to(categories::update))
                    .route("/{id}", web::delete().to(categories::delete)),
            )
            // Public user profiles
            .service(web::scope("/users").route("/{id}", web::get().to(users::profile)))
            // Profile
            .service(
                web::scope("/profile")
                    .route("", web::put().to(profile::update))
                    .route("/password", web::put().to(profile::change_password)),
            )
            // Admin
            .service(
                web::scope("/admin")
                    .route("/posts", web::get().to(admin::list_posts))
                    .route("/posts/{id}/publish", web::post().to(admin::toggle_publish))
                    .route("/users", web::get().to(admin::list_users))
                    .route("/users/{id}/role", web::put().to(admin::change_role))
                    .route("/stats", web::get().to(admin::stats)),
            ),
    );
}

/// Resolve an optional inline attachment into a hosted image URL.
///
/// The attachment is validated locally first; only then is the upload
/// attempted. Any failure aborts the caller's document write: either a
/// validation error or an upstream error, never a partial post.
pub(crate) async fn resolve_attachment(
    host: Option<&dyn ImageHost>,
    attachment: Option<&ImageAttachment>,
    max_bytes: usize,
) -> AppResult<Option<String>> {
    let Some(attachment) = attachment else {
        return Ok(None);
    };

    let image = ImageFile {
        file_name: attachment.file_name.clone(),
        content_type: attachment.content_type.clone(),
        bytes: attachment.data.clone(),
    };

    validation::validate_image(&image, max_bytes).map_err(|e| AppError::Validation(vec![e]))?;

    let host = host.ok_or_else(|| AppError::Upstream("no image host configured".to_string()))?;

    let url = host
        .upload(&image)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Some(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use blog_core::ports::ImageHostError;
    use blog_core::validation::MAX_POST_IMAGE_BYTES;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHost {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ImageHost for CountingHost {
        async fn upload(&self, _image: &ImageFile) -> Result<String, ImageHostError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ImageHostError::Transport("connection reset".to_string()))
            } else {
                Ok("https://img.example/pic.png".to_string())
            }
        }
    }

    fn attachment(size: usize) -> ImageAttachment {
        ImageAttachment {
            file_name: "pic.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![0u8; size],
        }
    }

    #[tokio::test]
    async fn no_attachment_is_a_no_op() {
        let host = CountingHost {
            calls: AtomicUsize::new(0),
            fail: false,
        };
        let url = resolve_attachment(Some(&host), None, MAX_POST_IMAGE_BYTES)
            .await
            .unwrap();
        assert!(url.is_none());
        assert_eq!(host.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oversized_attachment_rejected_before_any_network_call() {
        let host = CountingHost {
            calls: AtomicUsize::new(0),
            fail: false,
        };
        let six_mb = attachment(6 * 1024 * 1024);
        let result =
            resolve_attachment(Some(&host), Some(&six_mb), MAX_POST_IMAGE_BYTES).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(host.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upload_failure_surfaces_as_upstream_error() {
        let host = CountingHost {
            calls: AtomicUsize::new(0),
            fail: true,
        };
        let small = attachment(1024);
        let result = resolve_attachment(Some(&host), Some(&small), MAX_POST_IMAGE_BYTES).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
        assert_eq!(host.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn successful_upload_returns_hosted_url() {
        let host = CountingHost {
            calls: AtomicUsize::new(0),
            fail: false,
        };
        let small = attachment(1024);
        let url = resolve_attachment(Some(&host), Some(&small), MAX_POST_IMAGE_BYTES)
            .await
            .unwrap();
        assert_eq!(url.as_deref(), Some("https://img.example/pic.png"));
    }
}
