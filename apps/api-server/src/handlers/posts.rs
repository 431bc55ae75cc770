//! Post handlers: the public filtered listing, detail, authoring, and
//! the author dashboard.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use blog_core::domain::filter::{self, PostFilter};
use blog_core::domain::{Post, guard};
use blog_core::validation::{
    MAX_POST_IMAGE_BYTES, PostForm, parse_tags, validate_post,
};
use blog_shared::dto::{MyPostsResponse, PostListResponse, PostRequest, PostResponse};

use crate::handlers::resolve_attachment;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(super) fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title.clone(),
        content: post.content.clone(),
        author_id: post.author_id,
        author_name: post.author_name.clone(),
        category_id: post.category_id,
        category_name: post.category_name.clone(),
        published: post.published,
        tags: post.tags.clone(),
        image_url: post.image_url.clone(),
        views: post.views,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: String,
    pub category: Option<Uuid>,
    /// Comma-separated tag list.
    pub tags: Option<String>,
    pub sort: Option<String>,
}

/// GET /api/posts - the public, filtered, sorted listing.
///
/// The full published candidate list is fetched once and the filter
/// engine derives the view in memory; both totals are returned so a
/// client can tell "no matches" from "no content".
pub async fn list(state: web::Data<AppState>, query: web::Query<ListQuery>) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    let sort = query
        .sort
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(AppError::BadRequest)?
        .unwrap_or_default();

    let spec = PostFilter {
        search: query.search,
        category: query.category,
        tags: query.tags.as_deref().map(parse_tags).unwrap_or_default(),
        sort,
    };

    let candidates = state.posts.list_published().await?;
    let filtered = filter::apply(&candidates, &spec);
    let (featured, recent) = filter::featured_split(&filtered);

    Ok(HttpResponse::Ok().json(PostListResponse {
        featured: featured.iter().map(post_response).collect(),
        recent: recent.iter().map(post_response).collect(),
        total_results: filtered.len(),
        total_posts: candidates.len(),
    }))
}

/// GET /api/posts/{id}
///
/// Published posts are public; drafts are visible only to their author
/// and admins. A visible read bumps the persisted view counter.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .filter(|post| guard::can_view_post(identity.viewer(), post))
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    // Best effort: a failed counter bump must not fail the read.
    if let Err(e) = state.posts.increment_views(id).await {
        tracing::warn!(post_id = %id, "Failed to bump view counter: {e}");
    } else {
        post.views += 1;
    }

    Ok(HttpResponse::Ok().json(post_response(&post)))
}

/// POST /api/posts
///
/// Validates, then uploads the attachment (if any), then writes the
/// document. An upload failure aborts the write; no partial post exists.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validate_post(&PostForm {
        title: &req.title,
        content: &req.content,
        category_id: &req.category_id,
        tags: &req.tags,
        image_url: req.image_url.as_deref(),
    })?;

    let category_id: Uuid = req
        .category_id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid category id".to_string()))?;

    let category = state
        .categories
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {category_id} not found")))?;

    let author = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let uploaded = resolve_attachment(
        state.images.as_deref(),
        req.image.as_ref(),
        MAX_POST_IMAGE_BYTES,
    )
    .await?;

    let image_url = uploaded.or(req.image_url.filter(|u| !u.is_empty()));

    let post = Post::new(
        author.id,
        author.display_name,
        category.id,
        category.name,
        req.title,
        req.content,
        req.published,
        parse_tags(&req.tags),
        image_url,
    );

    let saved = state.posts.save(post).await?;
    tracing::info!(post_id = %saved.id, "Post created");

    Ok(HttpResponse::Created().json(post_response(&saved)))
}

/// PUT /api/posts/{id} - author only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    // Redirect non-owners away before touching the payload.
    if !guard::can_edit_post(identity.viewer(), &post) {
        return Err(AppError::Forbidden);
    }

    validate_post(&PostForm {
        title: &req.title,
        content: &req.content,
        category_id: &req.category_id,
        tags: &req.tags,
        image_url: req.image_url.as_deref(),
    })?;

    let category_id: Uuid = req
        .category_id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid category id".to_string()))?;

    if category_id != post.category_id {
        let category = state
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {category_id} not found")))?;
        post.category_id = category.id;
        post.category_name = category.name;
    }

    let uploaded = resolve_attachment(
        state.images.as_deref(),
        req.image.as_ref(),
        MAX_POST_IMAGE_BYTES,
    )
    .await?;

    post.title = req.title;
    post.content = req.content;
    post.published = req.published;
    post.tags = parse_tags(&req.tags);
    post.image_url = uploaded.or(req.image_url.filter(|u| !u.is_empty()));
    post.touch();

    let saved = state.posts.save(post).await?;

    Ok(HttpResponse::Ok().json(post_response(&saved)))
}

/// DELETE /api/posts/{id} - author or admin.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    if !guard::can_delete_post(identity.viewer(), &post) {
        return Err(AppError::Forbidden);
    }

    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/posts/mine - the author dashboard list.
pub async fn mine(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.find_by_author(identity.user_id).await?;

    let published = posts.iter().filter(|p| p.published).count();
    let drafts = posts.len() - published;

    Ok(HttpResponse::Ok().json(MyPostsResponse {
        posts: posts.iter().map(post_response).collect(),
        published,
        drafts,
    }))
}
