//! Tests for the account service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
use crate::test_support::clock::{FixtureClock, fixture_instant};

const HASH: &str = "$2b$12$abcdefghijklmnopqrstuuABCDEFGHIJKLMNOPQRSTUVWXYZ01234";
const OTHER_HASH: &str = "$2y$10$zyxwvutsrqponmlkjihgfeZYXWVUTSRQPONMLKJIHGFEDCBA98765";

fn stored_user(id: i64, email: &str) -> User {
    User::new(
        UserId::new(id).expect("valid id"),
        NewUser {
            email: Email::new(email).expect("valid email"),
            password_hash: PasswordHash::new(HASH).expect("valid hash"),
            created_at: fixture_instant(),
        },
    )
}

fn service(
    repo: MockUserRepository,
    hasher: MockPasswordHasher,
) -> UserService<MockUserRepository, MockPasswordHasher> {
    UserService::new(
        Arc::new(repo),
        Arc::new(hasher),
        FixtureClock::default().shared(),
    )
}

#[fixture]
fn idle_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_encode().times(0);
    hasher
}

#[rstest]
#[tokio::test]
async fn create_user_hashes_and_persists() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_email()
        .times(1)
        .return_once(|_| Ok(false));
    repo.expect_insert()
        .withf(|draft| {
            draft.email.value() == "ada@example.com"
                && draft.password_hash.value() == HASH
                && draft.created_at == fixture_instant()
        })
        .times(1)
        .return_once(|draft| Ok(User::new(UserId::new(1).expect("valid id"), draft.clone())));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_encode()
        .withf(|raw| raw == "correct horse")
        .times(1)
        .return_once(|_| Ok(HASH.to_owned()));

    let user = service(repo, hasher)
        .create_user(
            Some("ada@example.com".to_owned()),
            Some("correct horse".to_owned()),
        )
        .await
        .expect("user created");

    assert_eq!(user.id().get(), 1);
    assert_eq!(user.email().value(), "ada@example.com");
    assert_eq!(user.created_at(), fixture_instant());
}

#[rstest]
#[tokio::test]
async fn create_user_rejects_invalid_email_before_storage(idle_hasher: MockPasswordHasher) {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_email().times(0);
    repo.expect_insert().times(0);

    let err = service(repo, idle_hasher)
        .create_user(Some("not-an-email".to_owned()), Some("secret1".to_owned()))
        .await
        .expect_err("invalid email");

    assert_eq!(err.code(), ErrorCode::DomainValidation);
    assert_eq!(err.message(), "Invalid email format");
}

#[rstest]
#[case(Some("secret1".to_owned()))]
#[case(Some("123".to_owned()))]
#[case(None)]
#[tokio::test]
async fn duplicate_email_wins_over_password_checks(
    idle_hasher: MockPasswordHasher,
    #[case] password: Option<String>,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_email()
        .times(1)
        .return_once(|_| Ok(true));
    repo.expect_insert().times(0);

    let err = service(repo, idle_hasher)
        .create_user(Some("ada@example.com".to_owned()), password)
        .await
        .expect_err("email taken");

    assert_eq!(err.code(), ErrorCode::AlreadyExists);
    assert_eq!(err.message(), "User with email=ada@example.com already exists");
}

#[rstest]
#[tokio::test]
async fn short_password_is_rejected_before_hashing(idle_hasher: MockPasswordHasher) {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_email()
        .times(1)
        .return_once(|_| Ok(false));
    repo.expect_insert().times(0);

    let err = service(repo, idle_hasher)
        .create_user(Some("ada@example.com".to_owned()), Some("12345".to_owned()))
        .await
        .expect_err("short password");

    assert_eq!(err.code(), ErrorCode::BusinessRuleViolation);
    assert_eq!(err.message(), "Password must be at least 6 characters long");
}

#[rstest]
#[tokio::test]
async fn malformed_hasher_output_is_a_validation_failure() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_email()
        .times(1)
        .return_once(|_| Ok(false));
    repo.expect_insert().times(0);

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_encode()
        .times(1)
        .return_once(|_| Ok("md5:deadbeef".to_owned()));

    let err = service(repo, hasher)
        .create_user(Some("ada@example.com".to_owned()), Some("secret1".to_owned()))
        .await
        .expect_err("bad hash");

    assert_eq!(err.code(), ErrorCode::DomainValidation);
    assert_eq!(
        err.message(),
        "PasswordHash value must be a valid BCrypt hash"
    );
}

#[rstest]
#[tokio::test]
async fn hasher_failure_is_internal() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_email()
        .times(1)
        .return_once(|_| Ok(false));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_encode()
        .times(1)
        .return_once(|_| Err(PasswordHasherError::hashing("cost out of range")));

    let err = service(repo, hasher)
        .create_user(Some("ada@example.com".to_owned()), Some("secret1".to_owned()))
        .await
        .expect_err("hasher failed");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn insert_race_on_email_maps_to_already_exists() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_email()
        .times(1)
        .return_once(|_| Ok(false));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(UserRepositoryError::duplicate_email("ada@example.com")));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_encode()
        .times(1)
        .return_once(|_| Ok(HASH.to_owned()));

    let err = service(repo, hasher)
        .create_user(Some("ada@example.com".to_owned()), Some("secret1".to_owned()))
        .await
        .expect_err("lost the race");

    assert_eq!(err.code(), ErrorCode::AlreadyExists);
}

#[rstest]
#[case(None, "ID is <null>")]
#[case(Some(0), "ID is less than 1")]
#[tokio::test]
async fn get_user_validates_id_first(
    idle_hasher: MockPasswordHasher,
    #[case] id: Option<i64>,
    #[case] message: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(0);

    let err = service(repo, idle_hasher)
        .get_user(id)
        .await
        .expect_err("invalid id");

    assert_eq!(err.code(), ErrorCode::BusinessRuleViolation);
    assert_eq!(err.message(), message);
}

#[rstest]
#[tokio::test]
async fn get_user_reports_missing_user(idle_hasher: MockPasswordHasher) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let err = service(repo, idle_hasher)
        .get_user(Some(7))
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User id=7 not found");
}

#[rstest]
#[tokio::test]
async fn list_users_returns_repository_rows(idle_hasher: MockPasswordHasher) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_all().times(1).return_once(|| {
        Ok(vec![
            stored_user(1, "ada@example.com"),
            stored_user(2, "grace@example.com"),
        ])
    });

    let users = service(repo, idle_hasher)
        .list_users()
        .await
        .expect("users listed");

    assert_eq!(users.len(), 2);
    assert_eq!(users[1].email().value(), "grace@example.com");
}

#[rstest]
#[tokio::test]
async fn change_email_checks_uniqueness_then_saves(idle_hasher: MockPasswordHasher) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user(3, "old@example.com"))));
    repo.expect_exists_by_email()
        .withf(|email| email.value() == "new@example.com")
        .times(1)
        .return_once(|_| Ok(false));
    repo.expect_save()
        .withf(|user| user.email().value() == "new@example.com")
        .times(1)
        .return_once(|user| Ok(user.clone()));

    let user = service(repo, idle_hasher)
        .change_email(Some(3), Some("new@example.com".to_owned()))
        .await
        .expect("email changed");

    assert_eq!(user.email().value(), "new@example.com");
}

#[rstest]
#[tokio::test]
async fn change_email_to_taken_address_conflicts(idle_hasher: MockPasswordHasher) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user(3, "old@example.com"))));
    repo.expect_exists_by_email()
        .times(1)
        .return_once(|_| Ok(true));
    repo.expect_save().times(0);

    let err = service(repo, idle_hasher)
        .change_email(Some(3), Some("taken@example.com".to_owned()))
        .await
        .expect_err("taken");

    assert_eq!(err.code(), ErrorCode::AlreadyExists);
}

#[rstest]
#[tokio::test]
async fn change_email_on_missing_user_is_not_found(idle_hasher: MockPasswordHasher) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_exists_by_email().times(0);

    let err = service(repo, idle_hasher)
        .change_email(Some(9), Some("new@example.com".to_owned()))
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn change_password_stores_new_hash() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user(4, "ada@example.com"))));
    repo.expect_save()
        .withf(|user| user.password_hash().value() == OTHER_HASH)
        .times(1)
        .return_once(|user| Ok(user.clone()));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_encode()
        .times(1)
        .return_once(|_| Ok(OTHER_HASH.to_owned()));

    let user = service(repo, hasher)
        .change_password(Some(4), Some("new secret".to_owned()))
        .await
        .expect("password changed");

    assert_eq!(user.password_hash().value(), OTHER_HASH);
}

#[rstest]
#[tokio::test]
async fn delete_user_requires_existing_row(idle_hasher: MockPasswordHasher) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_delete_by_id().times(0);

    let err = service(repo, idle_hasher)
        .delete_user(Some(5))
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User id=5 not found");
}

#[rstest]
#[tokio::test]
async fn delete_user_removes_existing_row(idle_hasher: MockPasswordHasher) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_user(5, "ada@example.com"))));
    repo.expect_delete_by_id()
        .withf(|id| id.get() == 5)
        .times(1)
        .return_once(|_| Ok(()));

    service(repo, idle_hasher)
        .delete_user(Some(5))
        .await
        .expect("deleted");
}

#[rstest]
#[tokio::test]
async fn repository_failures_are_internal(idle_hasher: MockPasswordHasher) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_all()
        .times(1)
        .return_once(|| Err(UserRepositoryError::connection("lock poisoned")));

    let err = service(repo, idle_hasher)
        .list_users()
        .await
        .expect_err("storage failed");

    assert_eq!(err.code(), ErrorCode::InternalError);
}
