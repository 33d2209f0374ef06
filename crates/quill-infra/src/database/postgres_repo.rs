//! PostgreSQL repository implementations.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, JoinType, LoaderTrait,
    PaginatorTrait, QueryFilter, QuerySelect, RelationTrait, TransactionTrait,
};
use uuid::Uuid;

use quill_core::domain::{
    Author, Category, CategoryWithPostCount, Post, PostStatus, Tag, TagWithPostCount, User,
};
use quill_core::error::RepoError;
use quill_core::ports::{
    CategoryRepository, DeleteGuard, PostRepository, TagRepository, UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};

fn query_err(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

fn constraint_or_query_err(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

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
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(query_err)?;

        Ok(count > 0)
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let active_model: user::ActiveModel = entity.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(constraint_or_query_err)?;

        Ok(model.into())
    }
}

/// PostgreSQL category repository.
pub struct PostgresCategoryRepository {
    db: DbConn,
}

impl PostgresCategoryRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_all_with_post_counts(&self) -> Result<Vec<CategoryWithPostCount>, RepoError> {
        let categories = CategoryEntity::find()
            .all(&self.db)
            .await
            .map_err(query_err)?;

        // Published posts grouped by category, one query for all rows.
        let counts: Vec<(Uuid, i64)> = PostEntity::find()
            .select_only()
            .column(post::Column::CategoryId)
            .column_as(post::Column::Id.count(), "post_count")
            .filter(post::Column::Status.eq(post::PostStatus::Published))
            .group_by(post::Column::CategoryId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(query_err)?;
        let counts: HashMap<Uuid, i64> = counts.into_iter().collect();

        Ok(categories
            .into_iter()
            .map(|model| {
                let post_count = counts.get(&model.id).copied().unwrap_or(0) as u64;
                CategoryWithPostCount {
                    category: model.into(),
                    post_count,
                }
            })
            .collect())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepoError> {
        let count = CategoryEntity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(category::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .count(&self.db)
            .await
            .map_err(query_err)?;

        Ok(count > 0)
    }

    async fn save(&self, entity: Category) -> Result<Category, RepoError> {
        let active_model: category::ActiveModel = entity.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(constraint_or_query_err)?;

        Ok(model.into())
    }

    async fn delete_guarded(&self, id: Uuid) -> Result<DeleteGuard, RepoError> {
        // Reference check and delete share one transaction so a concurrent
        // post creation cannot slip in between.
        let txn = self.db.begin().await.map_err(query_err)?;

        if CategoryEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(query_err)?
            .is_none()
        {
            txn.commit().await.map_err(query_err)?;
            return Ok(DeleteGuard::Missing);
        }

        let referencing = PostEntity::find()
            .filter(post::Column::CategoryId.eq(id))
            .count(&txn)
            .await
            .map_err(query_err)?;
        if referencing > 0 {
            txn.commit().await.map_err(query_err)?;
            return Ok(DeleteGuard::Referenced);
        }

        CategoryEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(query_err)?;
        txn.commit().await.map_err(query_err)?;

        Ok(DeleteGuard::Removed)
    }
}

/// PostgreSQL tag repository.
pub struct PostgresTagRepository {
    db: DbConn,
}

impl PostgresTagRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_all_with_post_counts(&self) -> Result<Vec<TagWithPostCount>, RepoError> {
        let tags = TagEntity::find().all(&self.db).await.map_err(query_err)?;

        let counts: Vec<(Uuid, i64)> = PostTagEntity::find()
            .select_only()
            .column(post_tag::Column::TagId)
            .column_as(post_tag::Column::PostId.count(), "post_count")
            .join(JoinType::InnerJoin, post_tag::Relation::Post.def())
            .filter(post::Column::Status.eq(post::PostStatus::Published))
            .group_by(post_tag::Column::TagId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(query_err)?;
        let counts: HashMap<Uuid, i64> = counts.into_iter().collect();

        Ok(tags
            .into_iter()
            .map(|model| {
                let post_count = counts.get(&model.id).copied().unwrap_or(0) as u64;
                TagWithPostCount {
                    tag: model.into(),
                    post_count,
                }
            })
            .collect())
    }

    async fn find_by_names(&self, names: &BTreeSet<String>) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Name.is_in(names.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_all_by_ids(&self, ids: &BTreeSet<Uuid>) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn save_all(&self, tags: Vec<Tag>) -> Result<Vec<Tag>, RepoError> {
        if tags.is_empty() {
            return Ok(tags);
        }

        let active_models: Vec<tag::ActiveModel> =
            tags.iter().cloned().map(Into::into).collect();
        TagEntity::insert_many(active_models)
            .exec(&self.db)
            .await
            .map_err(constraint_or_query_err)?;

        // Ids are generated client-side, so the input already is the result.
        Ok(tags)
    }

    async fn delete_guarded(&self, id: Uuid) -> Result<DeleteGuard, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        if TagEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(query_err)?
            .is_none()
        {
            txn.commit().await.map_err(query_err)?;
            return Ok(DeleteGuard::Missing);
        }

        let referencing = PostTagEntity::find()
            .filter(post_tag::Column::TagId.eq(id))
            .count(&txn)
            .await
            .map_err(query_err)?;
        if referencing > 0 {
            txn.commit().await.map_err(query_err)?;
            return Ok(DeleteGuard::Referenced);
        }

        TagEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(query_err)?;
        txn.commit().await.map_err(query_err)?;

        Ok(DeleteGuard::Removed)
    }
}

/// PostgreSQL post repository. Rows are flat; the aggregate (author, category,
/// tags) is hydrated with the loader API.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn hydrate(&self, models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
        let authors = models
            .load_one(UserEntity, &self.db)
            .await
            .map_err(query_err)?;
        let categories = models
            .load_one(CategoryEntity, &self.db)
            .await
            .map_err(query_err)?;
        let tags = models
            .load_many_to_many(TagEntity, PostTagEntity, &self.db)
            .await
            .map_err(query_err)?;

        models
            .into_iter()
            .zip(authors)
            .zip(categories)
            .zip(tags)
            .map(|(((model, author), category), post_tags)| {
                let author = author
                    .ok_or_else(|| RepoError::Query("post row without author".to_string()))?;
                let category = category
                    .ok_or_else(|| RepoError::Query("post row without category".to_string()))?;

                Ok(Post {
                    id: model.id,
                    title: model.title,
                    content: model.content,
                    status: model.status.into(),
                    author: Author {
                        id: author.id,
                        name: author.name,
                    },
                    category: category.into(),
                    tags: post_tags.into_iter().map(Into::into).collect(),
                    reading_time: model.reading_time,
                    created_at: model.created_at.into(),
                    updated_at: model.updated_at.into(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        let mut posts = self.hydrate(vec![model]).await?;
        Ok(posts.pop())
    }

    async fn find_published(
        &self,
        category_id: Option<Uuid>,
        tag_id: Option<Uuid>,
    ) -> Result<Vec<Post>, RepoError> {
        let mut query =
            PostEntity::find().filter(post::Column::Status.eq(post::PostStatus::Published));

        if let Some(id) = category_id {
            query = query.filter(post::Column::CategoryId.eq(id));
        }
        if let Some(id) = tag_id {
            query = query
                .join(JoinType::InnerJoin, post::Relation::PostTags.def())
                .filter(post_tag::Column::TagId.eq(id));
        }

        let models = query.all(&self.db).await.map_err(query_err)?;
        self.hydrate(models).await
    }

    async fn find_by_author_and_status(
        &self,
        author_id: Uuid,
        status: PostStatus,
    ) -> Result<Vec<Post>, RepoError> {
        let status: post::PostStatus = status.into();
        let models = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .filter(post::Column::Status.eq(status))
            .all(&self.db)
            .await
            .map_err(query_err)?;

        self.hydrate(models).await
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        let exists = PostEntity::find_by_id(entity.id)
            .one(&txn)
            .await
            .map_err(query_err)?
            .is_some();

        let active_model: post::ActiveModel = entity.clone().into();
        if exists {
            active_model.update(&txn).await.map_err(query_err)?;
        } else {
            active_model
                .insert(&txn)
                .await
                .map_err(constraint_or_query_err)?;
        }

        // Replace the tag associations wholesale.
        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(entity.id))
            .exec(&txn)
            .await
            .map_err(query_err)?;
        if !entity.tags.is_empty() {
            let links: Vec<post_tag::ActiveModel> = entity
                .tags
                .iter()
                .map(|t| post_tag::ActiveModel {
                    post_id: sea_orm::Set(entity.id),
                    tag_id: sea_orm::Set(t.id),
                })
                .collect();
            PostTagEntity::insert_many(links)
                .exec(&txn)
                .await
                .map_err(query_err)?;
        }

        txn.commit().await.map_err(query_err)?;
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
