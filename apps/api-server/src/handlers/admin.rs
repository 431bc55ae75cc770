//! Admin moderation handlers. Every route here runs the access guard's
//! admin check; under-privileged callers are turned away first.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blog_core::domain::Role;
use blog_core::domain::filter::{self, ModerationStats, StatusFilter};
use blog_shared::dto::{ChangeRoleRequest, PostResponse, StatsResponse, UserResponse};

use crate::handlers::auth::user_response;
use crate::handlers::posts::post_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ModerationQuery {
    pub status: Option<StatusFilter>,
    #[serde(default)]
    pub search: String,
}

#[derive(Debug, Serialize)]
pub struct ModerationResponse {
    pub posts: Vec<PostResponse>,
    pub stats: ModerationStats,
}

/// GET /api/admin/posts - every post regardless of status, with the
/// status facet and search applied in memory.
pub async fn list_posts(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<ModerationQuery>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let query = query.into_inner();

    let all = state.posts.list_all().await?;
    let filtered = filter::apply_admin(&all, query.status.unwrap_or_default(), &query.search);

    Ok(HttpResponse::Ok().json(ModerationResponse {
        posts: filtered.iter().map(post_response).collect(),
        stats: filter::moderation_stats(&all),
    }))
}

/// POST /api/admin/posts/{id}/publish - toggle the publish flag.
pub async fn toggle_publish(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let id = path.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    post.published = !post.published;
    post.touch();

    let saved = state.posts.save(post).await?;
    tracing::info!(post_id = %id, published = saved.published, "Publish flag toggled");

    Ok(HttpResponse::Ok().json(post_response(&saved)))
}

/// GET /api/admin/users
pub async fn list_users(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    identity.require_admin()?;

    let users = state.users.list().await?;

    Ok(HttpResponse::Ok().json(users.iter().map(user_response).collect::<Vec<_>>()))
}

/// PUT /api/admin/users/{id}/role
pub async fn change_role(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<ChangeRoleRequest>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let id = path.into_inner();

    let role: Role = body
        .role
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;

    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;

    user.role = role;
    user.updated_at = chrono::Utc::now();

    let saved = state.users.save(user).await?;
    tracing::info!(user_id = %id, role = saved.role.as_str(), "Role changed");

    Ok(HttpResponse::Ok().json(user_response(&saved)))
}

/// GET /api/admin/stats - site-wide totals.
pub async fn stats(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    identity.require_admin()?;

    let total_posts = state.posts.count().await?;
    let total_users = state.users.count().await?;
    let total_categories = state.categories.count().await?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        total_posts,
        total_users,
        total_categories,
    }))
}
