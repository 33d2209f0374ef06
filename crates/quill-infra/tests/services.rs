//! Service-level tests: the core services wired to the in-memory store with
//! the real Argon2 hasher and JWT token service.

use std::collections::BTreeSet;
use std::sync::Arc;

use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{Author, CreatePostRequest, PostStatus, Tag, UpdatePostRequest, User};
use quill_core::ports::{TagRepository, TokenService, UserRepository};
use quill_core::services::{AuthenticationService, CategoryService, PostService, TagService};
use quill_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use quill_infra::database::InMemoryStore;

fn auth_service(store: &Arc<InMemoryStore>) -> AuthenticationService {
    AuthenticationService::new(
        store.clone(),
        Arc::new(Argon2PasswordService::new()),
        Arc::new(JwtTokenService::new(JwtConfig::new("test-secret"))),
    )
}

struct Services {
    categories: Arc<CategoryService>,
    tags: Arc<TagService>,
    posts: PostService,
}

fn content_services(store: &Arc<InMemoryStore>) -> Services {
    let categories = Arc::new(CategoryService::new(store.clone()));
    let tags = Arc::new(TagService::new(store.clone()));
    let posts = PostService::new(store.clone(), categories.clone(), tags.clone());
    Services {
        categories,
        tags,
        posts,
    }
}

async fn seed_author(store: &Arc<InMemoryStore>, name: &str, email: &str) -> Author {
    let user = User::new(name.to_string(), email.to_string(), "hash".to_string());
    let repo: Arc<dyn UserRepository> = store.clone();
    repo.save(user).await.unwrap().as_author()
}

fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

fn create_request(category_id: Uuid, tag_ids: BTreeSet<Uuid>, status: PostStatus) -> CreatePostRequest {
    CreatePostRequest {
        title: "A title".to_string(),
        content: words(10),
        category_id,
        tag_ids,
        status,
    }
}

// --- authentication -------------------------------------------------------

#[tokio::test]
async fn register_authenticate_token_round_trip() {
    let store = Arc::new(InMemoryStore::new());
    let auth = auth_service(&store);

    auth.register("Ada", "ada@example.com", "correct horse battery")
        .await
        .unwrap();

    let identity = auth
        .authenticate("ada@example.com", "correct horse battery")
        .await
        .unwrap();
    let token = auth.generate_token(&identity).unwrap();
    let resolved = auth.validate_token(&token).await.unwrap();

    assert_eq!(resolved.email, "ada@example.com");
    assert_eq!(resolved.id, identity.id);
    assert_eq!(auth.token_expires_in(), 86400);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let store = Arc::new(InMemoryStore::new());
    let auth = auth_service(&store);

    auth.register("Ada", "ada@example.com", "correct horse battery")
        .await
        .unwrap();

    let wrong_password = auth.authenticate("ada@example.com", "nope").await;
    let unknown_email = auth.authenticate("ghost@example.com", "nope").await;

    assert!(matches!(wrong_password, Err(DomainError::Unauthenticated)));
    assert!(matches!(unknown_email, Err(DomainError::Unauthenticated)));
}

#[tokio::test]
async fn duplicate_registration_conflicts_and_keeps_one_user() {
    let store = Arc::new(InMemoryStore::new());
    let auth = auth_service(&store);

    auth.register("Ada", "ada@example.com", "first password")
        .await
        .unwrap();
    let second = auth
        .register("Imposter", "ada@example.com", "other password")
        .await;

    assert!(matches!(second, Err(DomainError::Conflict(_))));

    // The surviving row is the first registration.
    let identity = auth
        .authenticate("ada@example.com", "first password")
        .await
        .unwrap();
    assert_eq!(identity.name, "Ada");
}

#[tokio::test]
async fn expired_token_is_unauthenticated() {
    let store = Arc::new(InMemoryStore::new());
    let mut config = JwtConfig::new("test-secret");
    config.ttl_seconds = -10;
    let auth = AuthenticationService::new(
        store.clone(),
        Arc::new(Argon2PasswordService::new()),
        Arc::new(JwtTokenService::new(config)),
    );

    auth.register("Ada", "ada@example.com", "correct horse battery")
        .await
        .unwrap();
    let identity = auth
        .authenticate("ada@example.com", "correct horse battery")
        .await
        .unwrap();
    let token = auth.generate_token(&identity).unwrap();

    let result = auth.validate_token(&token).await;

    assert!(matches!(result, Err(DomainError::Unauthenticated)));
}

#[tokio::test]
async fn token_for_unknown_subject_is_unauthenticated() {
    let store = Arc::new(InMemoryStore::new());
    let auth = auth_service(&store);

    // Validly signed, but the subject never registered.
    let tokens = JwtTokenService::new(JwtConfig::new("test-secret"));
    let token = tokens.issue("ghost@example.com").unwrap();

    let result = auth.validate_token(&token).await;

    assert!(matches!(result, Err(DomainError::Unauthenticated)));
}

// --- categories -----------------------------------------------------------

#[tokio::test]
async fn category_names_are_unique_case_insensitively() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);

    services.categories.create("Systems").await.unwrap();
    let duplicate = services.categories.create("sYsTeMs").await;

    assert!(matches!(duplicate, Err(DomainError::Conflict(_))));
    assert_eq!(services.categories.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn category_delete_is_guarded_by_post_association() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);
    let author = seed_author(&store, "Ada", "ada@example.com").await;

    let category = services.categories.create("Systems").await.unwrap();
    let post = services
        .posts
        .create_post(
            author,
            create_request(category.id, BTreeSet::new(), PostStatus::Published),
        )
        .await
        .unwrap();

    let guarded = services.categories.delete(category.id).await;
    assert!(matches!(guarded, Err(DomainError::Conflict(_))));

    services.posts.delete_post(post.id).await.unwrap();
    services.categories.delete(category.id).await.unwrap();
    assert!(services.categories.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_missing_category_is_a_no_op() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);

    services.categories.delete(Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn category_list_counts_published_posts_only() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);
    let author = seed_author(&store, "Ada", "ada@example.com").await;

    let category = services.categories.create("Systems").await.unwrap();
    services
        .posts
        .create_post(
            author.clone(),
            create_request(category.id, BTreeSet::new(), PostStatus::Published),
        )
        .await
        .unwrap();
    services
        .posts
        .create_post(
            author,
            create_request(category.id, BTreeSet::new(), PostStatus::Draft),
        )
        .await
        .unwrap();

    let listing = services.categories.list().await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].post_count, 1);
}

// --- tags -----------------------------------------------------------------

#[tokio::test]
async fn bulk_tag_creation_is_idempotent_on_overlap() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);

    let first = services
        .tags
        .create_many(BTreeSet::from(["A".to_string(), "B".to_string()]))
        .await
        .unwrap();
    assert_eq!(first.len(), 2);

    let second = services
        .tags
        .create_many(BTreeSet::from(["A".to_string(), "C".to_string()]))
        .await
        .unwrap();

    // Union of the new "C" and the pre-existing "A".
    assert_eq!(second.len(), 2);

    let all = services.tags.list().await.unwrap();
    let mut names: Vec<String> = all.into_iter().map(|t| t.tag.name).collect();
    names.sort();
    assert_eq!(names, ["A", "B", "C"]);
}

#[tokio::test]
async fn tag_name_dedup_happens_at_bulk_creation_only() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);

    services
        .tags
        .create_many(BTreeSet::from(["rust".to_string()]))
        .await
        .unwrap();

    // The repository itself carries no name constraint; a duplicate written
    // directly is accepted.
    let repo: Arc<dyn TagRepository> = store.clone();
    repo.save_all(vec![Tag::new("rust".to_string())])
        .await
        .unwrap();

    assert_eq!(services.tags.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn batch_tag_lookup_is_all_or_nothing() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);

    let created = services
        .tags
        .create_many(BTreeSet::from(["rust".to_string()]))
        .await
        .unwrap();

    let mut ids: BTreeSet<Uuid> = created.iter().map(|t| t.id).collect();
    services.tags.get_by_ids(&ids).await.unwrap();

    ids.insert(Uuid::new_v4());
    let result = services.tags.get_by_ids(&ids).await;

    assert!(matches!(result, Err(DomainError::NotFound(msg))
        if msg == "Not all specified tag IDs exist"));
}

#[tokio::test]
async fn tag_delete_is_guarded_by_post_association() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);
    let author = seed_author(&store, "Ada", "ada@example.com").await;

    let category = services.categories.create("Systems").await.unwrap();
    let tag = services
        .tags
        .create_many(BTreeSet::from(["rust".to_string()]))
        .await
        .unwrap()
        .remove(0);

    let post = services
        .posts
        .create_post(
            author,
            create_request(
                category.id,
                BTreeSet::from([tag.id]),
                PostStatus::Published,
            ),
        )
        .await
        .unwrap();

    let guarded = services.tags.delete(tag.id).await;
    assert!(matches!(guarded, Err(DomainError::Conflict(_))));

    services.posts.delete_post(post.id).await.unwrap();
    services.tags.delete(tag.id).await.unwrap();
    assert!(services.tags.list().await.unwrap().is_empty());
}

// --- posts ----------------------------------------------------------------

#[tokio::test]
async fn listing_restricts_to_published_and_intersects_filters() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);
    let author = seed_author(&store, "Ada", "ada@example.com").await;

    let c1 = services.categories.create("Systems").await.unwrap();
    let c2 = services.categories.create("Culture").await.unwrap();
    let tags = services
        .tags
        .create_many(BTreeSet::from(["t1".to_string(), "t2".to_string()]))
        .await
        .unwrap();
    let t1 = tags.iter().find(|t| t.name == "t1").unwrap().clone();
    let t2 = tags.iter().find(|t| t.name == "t2").unwrap().clone();

    let p1 = services
        .posts
        .create_post(
            author.clone(),
            create_request(c1.id, BTreeSet::from([t1.id]), PostStatus::Published),
        )
        .await
        .unwrap();
    services
        .posts
        .create_post(
            author.clone(),
            create_request(c2.id, BTreeSet::from([t2.id]), PostStatus::Published),
        )
        .await
        .unwrap();
    services
        .posts
        .create_post(
            author,
            create_request(c1.id, BTreeSet::from([t1.id]), PostStatus::Draft),
        )
        .await
        .unwrap();

    let unfiltered = services.posts.get_all_posts(None, None).await.unwrap();
    assert_eq!(unfiltered.len(), 2);

    let both = services
        .posts
        .get_all_posts(Some(c1.id), Some(t1.id))
        .await
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].id, p1.id);

    let mismatched = services
        .posts
        .get_all_posts(Some(c2.id), Some(t1.id))
        .await
        .unwrap();
    assert!(mismatched.is_empty());

    let by_category = services
        .posts
        .get_all_posts(Some(c1.id), None)
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
}

#[tokio::test]
async fn listing_with_unknown_filter_reference_fails() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);

    let category = services
        .posts
        .get_all_posts(Some(Uuid::new_v4()), None)
        .await;
    assert!(matches!(category, Err(DomainError::NotFound(msg))
        if msg == "Category not found"));

    let tag = services.posts.get_all_posts(None, Some(Uuid::new_v4())).await;
    assert!(matches!(tag, Err(DomainError::NotFound(msg))
        if msg == "No tag was found"));
}

#[tokio::test]
async fn drafts_stay_reachable_by_direct_id() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);
    let author = seed_author(&store, "Ada", "ada@example.com").await;

    let category = services.categories.create("Systems").await.unwrap();
    let draft = services
        .posts
        .create_post(
            author,
            create_request(category.id, BTreeSet::new(), PostStatus::Draft),
        )
        .await
        .unwrap();

    let fetched = services.posts.get_post(draft.id).await.unwrap();
    assert_eq!(fetched.status, PostStatus::Draft);
}

#[tokio::test]
async fn draft_listing_is_scoped_to_the_author() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);
    let ada = seed_author(&store, "Ada", "ada@example.com").await;
    let brian = seed_author(&store, "Brian", "brian@example.com").await;

    let category = services.categories.create("Systems").await.unwrap();
    services
        .posts
        .create_post(
            ada.clone(),
            create_request(category.id, BTreeSet::new(), PostStatus::Draft),
        )
        .await
        .unwrap();
    services
        .posts
        .create_post(
            brian,
            create_request(category.id, BTreeSet::new(), PostStatus::Draft),
        )
        .await
        .unwrap();

    let drafts = services.posts.get_draft_posts(ada.id).await.unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].author.id, ada.id);
}

#[tokio::test]
async fn reading_time_is_derived_from_content() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);
    let author = seed_author(&store, "Ada", "ada@example.com").await;

    let category = services.categories.create("Systems").await.unwrap();

    let mut req = create_request(category.id, BTreeSet::new(), PostStatus::Published);
    req.content = words(600);
    let long = services
        .posts
        .create_post(author.clone(), req)
        .await
        .unwrap();
    assert_eq!(long.reading_time, 3);

    let mut req = create_request(category.id, BTreeSet::new(), PostStatus::Published);
    req.content = String::new();
    let empty = services.posts.create_post(author, req).await.unwrap();
    assert_eq!(empty.reading_time, 0);
}

#[tokio::test]
async fn create_post_with_unknown_tag_persists_nothing() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);
    let author = seed_author(&store, "Ada", "ada@example.com").await;

    let category = services.categories.create("Systems").await.unwrap();
    let result = services
        .posts
        .create_post(
            author,
            create_request(
                category.id,
                BTreeSet::from([Uuid::new_v4()]),
                PostStatus::Published,
            ),
        )
        .await;

    assert!(matches!(result, Err(DomainError::NotFound(_))));
    assert!(services.posts.get_all_posts(None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_of_missing_post_fails_without_side_effects() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);

    let category = services.categories.create("Systems").await.unwrap();
    let result = services
        .posts
        .update_post(
            Uuid::new_v4(),
            UpdatePostRequest {
                title: "t".to_string(),
                content: "c".to_string(),
                category_id: category.id,
                tag_ids: BTreeSet::new(),
                status: PostStatus::Published,
            },
        )
        .await;

    assert!(matches!(result, Err(DomainError::NotFound(msg))
        if msg == "Post does not exist"));
    assert!(services.posts.get_all_posts(None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_replaces_tags_and_keeps_author_and_reading_time() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);
    let author = seed_author(&store, "Ada", "ada@example.com").await;

    let category = services.categories.create("Systems").await.unwrap();
    let tags = services
        .tags
        .create_many(BTreeSet::from(["t1".to_string(), "t2".to_string()]))
        .await
        .unwrap();
    let t1 = tags.iter().find(|t| t.name == "t1").unwrap().clone();
    let t2 = tags.iter().find(|t| t.name == "t2").unwrap().clone();

    let mut req = create_request(category.id, BTreeSet::from([t1.id]), PostStatus::Draft);
    req.content = words(600);
    let post = services.posts.create_post(author.clone(), req).await.unwrap();
    assert_eq!(post.reading_time, 3);

    let updated = services
        .posts
        .update_post(
            post.id,
            UpdatePostRequest {
                title: "New title".to_string(),
                // Much shorter content: reading_time still keeps its
                // creation-time value.
                content: words(5),
                category_id: category.id,
                tag_ids: BTreeSet::from([t2.id]),
                status: PostStatus::Published,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "New title");
    assert_eq!(updated.status, PostStatus::Published);
    assert_eq!(updated.author.id, author.id);
    assert_eq!(updated.tag_ids(), BTreeSet::from([t2.id]));
    assert_eq!(updated.reading_time, 3);
}

#[tokio::test]
async fn delete_post_requires_existing_id_and_spares_references() {
    let store = Arc::new(InMemoryStore::new());
    let services = content_services(&store);
    let author = seed_author(&store, "Ada", "ada@example.com").await;

    let category = services.categories.create("Systems").await.unwrap();
    let tag = services
        .tags
        .create_many(BTreeSet::from(["rust".to_string()]))
        .await
        .unwrap()
        .remove(0);
    let post = services
        .posts
        .create_post(
            author,
            create_request(
                category.id,
                BTreeSet::from([tag.id]),
                PostStatus::Published,
            ),
        )
        .await
        .unwrap();

    services.posts.delete_post(post.id).await.unwrap();

    // Category and tag survive the post.
    services.categories.get_by_id(category.id).await.unwrap();
    services.tags.get_by_id(tag.id).await.unwrap();

    let again = services.posts.delete_post(post.id).await;
    assert!(matches!(again, Err(DomainError::NotFound(_))));
}
