use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// Deleting an id that no longer exists is not an error; the store treats
/// it as already done.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update). Last write wins; there is no
    /// conflict detection between concurrent sessions.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// All users, newest first. Used by the admin user list.
    async fn list(&self) -> Result<Vec<User>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}

/// Post repository. Stored timestamps are normalized to `DateTime<Utc>`
/// on read by the implementation.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All published posts, newest first. The public candidate list fed
    /// to the filter engine.
    async fn list_published(&self) -> Result<Vec<Post>, RepoError>;

    /// Every post regardless of status, newest first. Admin only.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// All posts by one author, newest first. Drives the dashboard.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Bump the persisted view counter for a post.
    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// All categories ordered by name.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}
