#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use quill_core::domain::{Category, User};
    use quill_core::ports::{CategoryRepository, UserRepository};

    use crate::database::entity::{category, user};
    use crate::database::postgres_repo::{PostgresCategoryRepository, PostgresUserRepository};

    #[tokio::test]
    async fn test_find_user_by_email() {
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: user_id,
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
                password_hash: "$argon2id$stub".to_owned(),
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let result: Option<User> = repo.find_by_email("ada@example.com").await.unwrap();

        assert!(result.is_some());
        let user = result.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.name, "Ada");
    }

    #[tokio::test]
    async fn test_find_category_by_id() {
        let category_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![category::Model {
                id: category_id,
                name: "Systems".to_owned(),
            }]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let result: Option<Category> = repo.find_by_id(category_id).await.unwrap();

        assert_eq!(
            result.map(|c| c.name),
            Some("Systems".to_owned())
        );
    }

    #[tokio::test]
    async fn test_find_missing_category() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<category::Model>::new()])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let result = repo.find_by_id(uuid::Uuid::new_v4()).await.unwrap();

        assert!(result.is_none());
    }
}
