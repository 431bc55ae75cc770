//! Profile handlers: editing the caller's own profile and password.

use actix_web::{HttpResponse, web};

use blog_core::validation::{
    MAX_AVATAR_BYTES, PasswordChangeForm, ProfileForm, validate_password_change, validate_profile,
};
use blog_shared::dto::{ChangePasswordRequest, UpdateProfileRequest};

use crate::handlers::auth::user_response;
use crate::handlers::resolve_attachment;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// PUT /api/profile
///
/// Avatar uploads follow the same sequencing as post images: validate
/// locally, upload, only then write the profile.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validate_profile(&ProfileForm {
        display_name: &req.display_name,
        bio: &req.bio,
    })?;

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let uploaded =
        resolve_attachment(state.images.as_deref(), req.avatar.as_ref(), MAX_AVATAR_BYTES)
            .await?;

    user.display_name = req.display_name;
    user.bio = if req.bio.is_empty() { None } else { Some(req.bio) };
    if let Some(url) = uploaded {
        user.avatar_url = Some(url);
    }
    user.updated_at = chrono::Utc::now();

    let saved = state.users.save(user).await?;

    Ok(HttpResponse::Ok().json(user_response(&saved)))
}

/// PUT /api/profile/password
///
/// The current password is re-verified against the stored hash before
/// any change is applied.
pub async fn change_password(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validate_password_change(&PasswordChangeForm {
        current_password: &req.current_password,
        new_password: &req.new_password,
        confirm_password: &req.confirm_password,
    })?;

    let mut user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let current_ok = state
        .passwords
        .verify(&req.current_password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !current_ok {
        return Err(AppError::Unauthorized);
    }

    user.password_hash = state
        .passwords
        .hash(&req.new_password)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    user.updated_at = chrono::Utc::now();

    state.users.save(user).await?;
    tracing::info!(user_id = %identity.user_id, "Password changed");

    Ok(HttpResponse::NoContent().finish())
}
