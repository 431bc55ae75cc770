//! Category handlers. Listing is public; everything else is admin-only.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::Category;
use blog_core::validation::{CategoryForm, validate_category};
use blog_shared::dto::{CategoryRequest, CategoryResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn category_response(category: &Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name.clone(),
        description: category.description.clone(),
        created_by: category.created_by,
        created_at: category.created_at,
    }
}

/// GET /api/categories - public, ordered by name.
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;

    Ok(HttpResponse::Ok().json(
        categories
            .iter()
            .map(category_response)
            .collect::<Vec<_>>(),
    ))
}

/// POST /api/categories - admin only.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let req = body.into_inner();

    validate_category(&CategoryForm {
        name: &req.name,
        description: &req.description,
    })?;

    let category = Category::new(req.name, req.description, identity.user_id);
    let saved = state.categories.save(category).await?;

    Ok(HttpResponse::Created().json(category_response(&saved)))
}

/// PUT /api/categories/{id} - admin only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let id = path.into_inner();
    let req = body.into_inner();

    validate_category(&CategoryForm {
        name: &req.name,
        description: &req.description,
    })?;

    let mut category = state
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {id} not found")))?;

    category.name = req.name;
    category.description = req.description;

    let saved = state.categories.save(category).await?;

    Ok(HttpResponse::Ok().json(category_response(&saved)))
}

/// DELETE /api/categories/{id} - admin only.
///
/// Deleting an id that is already gone still succeeds; the store treats
/// it as done and the client's optimistic removal stands.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let id = path.into_inner();

    state.categories.delete(id).await?;

    Ok(HttpResponse::NoContent().finish())
}
