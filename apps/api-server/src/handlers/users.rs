//! Public user profile handler.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{Post, User};
use blog_shared::dto::UserProfileResponse;

use crate::handlers::auth::user_response;
use crate::handlers::posts::post_response;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Drafts never leak onto a public profile; the author list is already
/// newest first from the store.
fn profile_response(user: &User, posts: &[Post]) -> UserProfileResponse {
    UserProfileResponse {
        user: user_response(user),
        posts: posts
            .iter()
            .filter(|post| post.published)
            .map(post_response)
            .collect(),
    }
}

/// GET /api/users/{id} - public profile: the user's info plus their
/// published posts.
pub async fn profile(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;

    let posts = state.posts.find_by_author(id).await?;

    Ok(HttpResponse::Ok().json(profile_response(&user, &posts)))
}
