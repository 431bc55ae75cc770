//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// An image file carried inline with a form submission.
/// Validated locally (size, MIME) before any upload is attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Request to create or update a post. `tags` is the raw comma-separated
/// input; it is parsed into a tag list at submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    /// Raw category selection; validated as required, then parsed as an id.
    pub category_id: String,
    pub tags: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image: Option<ImageAttachment>,
}

/// A post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub published: bool,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The public post listing: the filtered view split for presentation,
/// plus the counts a client needs to tell "no matches" from "no content".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub featured: Vec<PostResponse>,
    pub recent: Vec<PostResponse>,
    /// Matches after filtering.
    pub total_results: usize,
    /// Published posts before filtering.
    pub total_posts: usize,
}

/// The author's own posts plus dashboard counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyPostsResponse {
    pub posts: Vec<PostResponse>,
    pub published: usize,
    pub drafts: usize,
}

/// Request to create or update a category (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user's public profile: their info plus their published posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub user: UserResponse,
    pub posts: Vec<PostResponse>,
}

/// Request to edit the caller's own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: Option<ImageAttachment>,
}

/// Request to change the caller's password. The current password is
/// re-verified before the change is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Request to change a user's role (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: String,
}

/// Site-wide totals for the admin dashboard and home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_posts: u64,
    pub total_users: u64,
    pub total_categories: u64,
}
