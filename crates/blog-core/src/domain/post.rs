use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a user-authored content document with publish status.
///
/// Author and category names are denormalized onto the post so list views
/// render without joins. Invariant: `updated_at >= created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post. Starts unpublished unless the author opts in.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        author_id: Uuid,
        author_name: String,
        category_id: Uuid,
        category_name: String,
        title: String,
        content: String,
        published: bool,
        tags: Vec<String>,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            author_name,
            category_id,
            category_name,
            title,
            content,
            published,
            tags,
            image_url,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump `updated_at` after a mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// True if the post was created on the given day (UTC).
    pub fn created_on(&self, day: DateTime<Utc>) -> bool {
        self.created_at.date_naive() == day.date_naive()
    }
}
