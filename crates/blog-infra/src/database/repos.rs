//! Postgres repository implementations.
//!
//! Writes are last-write-wins: `save` upserts by primary key with no
//! conflict detection between sessions. Deleting a missing id succeeds
//! silently.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use blog_core::domain::{Category, Post, User};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CategoryRepository, PostRepository, UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

fn map_err(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

macro_rules! impl_base_repository {
    ($repo:ident, $domain:ty, $entity:ident, $module:ident) => {
        pub struct $repo {
            db: DbConn,
        }

        impl $repo {
            pub fn new(db: DbConn) -> Self {
                Self { db }
            }
        }

        #[async_trait]
        impl BaseRepository<$domain, Uuid> for $repo {
            async fn find_by_id(&self, id: Uuid) -> Result<Option<$domain>, RepoError> {
                let result = $entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(map_err)?;

                Ok(result.map(Into::into))
            }

            async fn save(&self, entity: $domain) -> Result<$domain, RepoError> {
                let exists = $entity::find_by_id(entity.id)
                    .one(&self.db)
                    .await
                    .map_err(map_err)?
                    .is_some();

                let active: $module::ActiveModel = entity.into();
                let model = if exists {
                    active.update(&self.db).await.map_err(map_err)?
                } else {
                    active.insert(&self.db).await.map_err(map_err)?
                };

                Ok(model.into())
            }

            async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
                // 0 rows affected means the entity was already gone; not an error.
                $entity::delete_by_id(id)
                    .exec(&self.db)
                    .await
                    .map_err(map_err)?;

                Ok(())
            }
        }
    };
}

impl_base_repository!(PostgresUserRepository, User, UserEntity, user);
impl_base_repository!(PostgresPostRepository, Post, PostEntity, post);
impl_base_repository!(PostgresCategoryRepository, Category, CategoryEntity, category);

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        UserEntity::find().count(&self.db).await.map_err(map_err)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Published.eq(true))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError> {
        PostEntity::update_many()
            .col_expr(post::Column::Views, Expr::col(post::Column::Views).add(1))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_err)?;

        Ok(())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find().count(&self.db).await.map_err(map_err)
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        CategoryEntity::find().count(&self.db).await.map_err(map_err)
    }
}
