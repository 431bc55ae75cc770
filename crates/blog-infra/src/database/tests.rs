use crate::database::entity::{category, post, user};
use crate::database::repos::{
    PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository,
};
use blog_core::domain::{Post, Role, User};
use blog_core::ports::{BaseRepository, CategoryRepository, PostRepository, UserRepository};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

fn post_model(title: &str, published: bool) -> post::Model {
    let now = chrono::Utc::now();
    post::Model {
        id: uuid::Uuid::new_v4(),
        author_id: uuid::Uuid::new_v4(),
        author_name: "Alice".to_owned(),
        category_id: uuid::Uuid::new_v4(),
        category_name: "General".to_owned(),
        title: title.to_owned(),
        content: "Content".to_owned(),
        published,
        tags: vec!["rust".to_owned()],
        image_url: None,
        views: 0,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn find_post_by_id_maps_to_domain() {
    let model = post_model("Test Post", true);
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.tags, vec!["rust".to_owned()]);
}

#[tokio::test]
async fn list_published_maps_all_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            post_model("First", true),
            post_model("Second", true),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.list_published().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "First");
}

#[tokio::test]
async fn find_user_by_email_parses_role() {
    let now = chrono::Utc::now();
    let model = user::Model {
        id: uuid::Uuid::new_v4(),
        email: "admin@example.com".to_owned(),
        display_name: "Admin".to_owned(),
        role: "admin".to_owned(),
        password_hash: "hash".to_owned(),
        avatar_url: None,
        bio: None,
        created_at: now.into(),
        updated_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user: User = repo
        .find_by_email("admin@example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.display_name, "Admin");
}

#[tokio::test]
async fn find_by_author_includes_drafts() {
    let author_id = uuid::Uuid::new_v4();
    let mut published = post_model("Published", true);
    published.author_id = author_id;
    let mut draft = post_model("Draft", false);
    draft.author_id = author_id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![published, draft]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_by_author(author_id).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.author_id == author_id));
}

#[tokio::test]
async fn delete_missing_category_is_silent() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);

    assert!(repo.delete(uuid::Uuid::new_v4()).await.is_ok());
}

#[tokio::test]
async fn increment_views_issues_update() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.increment_views(uuid::Uuid::new_v4()).await.is_ok());
}

#[tokio::test]
async fn category_list_is_ordered_query() {
    let now = chrono::Utc::now();
    let model = category::Model {
        id: uuid::Uuid::new_v4(),
        name: "Cooking".to_owned(),
        description: "Food posts".to_owned(),
        created_by: uuid::Uuid::new_v4(),
        created_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);

    let categories = repo.list().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Cooking");
}
