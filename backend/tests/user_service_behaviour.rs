//! Behavioural tests for `UserService` over the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use rstest::{fixture, rstest};
use serde_json::json;
use tokio::sync::Barrier;

use userapp::domain::ports::{
    UserManagement, UserPersistenceError, UserRepository, UserServiceError,
};
use userapp::domain::{EmailAddress, User, UserId, UserService};
use userapp::outbound::memory::InMemoryUserRepository;

type Service = UserService<InMemoryUserRepository>;

#[fixture]
fn service() -> Service {
    UserService::new(Arc::new(InMemoryUserRepository::new()))
}

fn user(email: &str) -> User {
    User::from_email(email)
}

fn email(value: &str) -> EmailAddress {
    EmailAddress::new(value)
}

#[rstest]
#[tokio::test]
async fn lifecycle_scenario(service: Service) {
    let created = service.create(user("a@x.com")).await.expect("create");
    let id = created.id().expect("assigned id").clone();
    assert_eq!(created.email(), &email("a@x.com"));

    let duplicate = service.create(user("a@x.com")).await;
    assert_eq!(
        duplicate,
        Err(UserServiceError::DuplicateEmail {
            email: email("a@x.com")
        })
    );
    assert_eq!(service.get_all().await.expect("list").len(), 1);

    let updated = service
        .update(id.clone(), user("b@x.com"))
        .await
        .expect("update");
    assert_eq!(updated.id(), Some(&id));
    assert_eq!(updated.email(), &email("b@x.com"));

    service.delete(&id).await.expect("delete");
    assert_eq!(service.get_by_id(&id).await.expect("lookup"), None);
}

#[rstest]
#[tokio::test]
async fn created_user_is_found_by_its_id(service: Service) {
    let created = service.create(user("a@x.com")).await.expect("create");
    let id = created.id().expect("assigned id");

    let found = service.get_by_id(id).await.expect("lookup").expect("present");
    assert_eq!(found.email(), &email("a@x.com"));
}

#[rstest]
#[tokio::test]
async fn unused_id_is_absent_and_deletable(service: Service) {
    let missing = UserId::new("never-issued").expect("valid id");

    assert_eq!(service.get_by_id(&missing).await.expect("lookup"), None);
    service
        .delete(&missing)
        .await
        .expect("deleting an absent id succeeds");
}

#[rstest]
#[tokio::test]
async fn update_replaces_the_whole_document(service: Service) {
    let mut original = serde_json::Map::new();
    original.insert("name".to_owned(), json!("Ada"));
    original.insert("role".to_owned(), json!("admin"));
    let created = service
        .create(user("a@x.com").with_attributes(original).expect("attributes"))
        .await
        .expect("create");
    let id = created.id().expect("assigned id").clone();

    let mut replacement = serde_json::Map::new();
    replacement.insert("name".to_owned(), json!("Grace"));
    service
        .update(
            id.clone(),
            user("a@x.com")
                .with_attributes(replacement)
                .expect("attributes"),
        )
        .await
        .expect("update");

    let stored = service
        .get_by_id(&id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(stored.attributes().get("name"), Some(&json!("Grace")));
    assert!(stored.attributes().get("role").is_none());
}

#[rstest]
#[tokio::test]
async fn update_with_unknown_id_inserts(service: Service) {
    let id = UserId::new("chosen-by-caller").expect("valid id");

    let saved = service
        .update(id.clone(), user("a@x.com"))
        .await
        .expect("update");

    assert_eq!(saved.id(), Some(&id));
    assert!(service.get_by_id(&id).await.expect("lookup").is_some());
}

#[rstest]
#[tokio::test]
async fn update_does_not_recheck_email_uniqueness(service: Service) {
    service.create(user("a@x.com")).await.expect("create a");
    let second = service.create(user("b@x.com")).await.expect("create b");
    let second_id = second.id().expect("assigned id").clone();

    service
        .update(second_id, user("a@x.com"))
        .await
        .expect("update to a taken email succeeds");

    let holders = service
        .get_all()
        .await
        .expect("list")
        .iter()
        .filter(|stored| stored.email() == &email("a@x.com"))
        .count();
    assert_eq!(holders, 2);
}

/// Holds each caller after its existence check until both callers have
/// checked.
struct GatedRepository {
    inner: InMemoryUserRepository,
    gate: Barrier,
}

#[async_trait]
impl UserRepository for GatedRepository {
    async fn save(&self, user: User) -> Result<User, UserPersistenceError> {
        self.inner.save(user).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.inner.find_all().await
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        self.inner.delete_by_id(id).await
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let exists = self.inner.exists_by_email(email).await?;
        self.gate.wait().await;
        Ok(exists)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_creates_with_one_email_can_both_succeed() {
    let repo = Arc::new(GatedRepository {
        inner: InMemoryUserRepository::new(),
        gate: Barrier::new(2),
    });
    let service = Arc::new(UserService::new(Arc::clone(&repo)));

    let first = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.create(user("race@x.com")).await }
    });
    let second = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.create(user("race@x.com")).await }
    });

    let first = first.await.expect("task completes");
    let second = second.await.expect("task completes");
    assert!(first.is_ok(), "first create passes the check");
    assert!(second.is_ok(), "second create passes the check");

    let stored = repo.inner.find_all().await.expect("list");
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|u| u.email() == &email("race@x.com")));
}
