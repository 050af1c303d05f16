//! Tests for the in-process store and its repositories.

use chrono::Duration;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    NoteRepository, NoteRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::value::{Email, EncryptedContent, EncryptedTitle, PasswordHash};
use crate::domain::{NewNote, NewUser, OwnedResource, User, UserId};
use crate::test_support::clock::fixture_instant;

const HASH: &str = "$2b$12$abcdefghijklmnopqrstuuABCDEFGHIJKLMNOPQRSTUVWXYZ01234";

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: Email::new(email).expect("valid email"),
        password_hash: PasswordHash::new(HASH).expect("valid hash"),
        created_at: fixture_instant(),
    }
}

fn new_note(owner_id: UserId, uuid: Uuid) -> NewNote {
    NewNote {
        uuid,
        owner_id,
        title: EncryptedTitle::new(vec![0x41]).expect("valid title"),
        content: EncryptedContent::new(vec![0x42]).expect("valid content"),
        created_at: fixture_instant(),
    }
}

#[fixture]
fn store() -> MemoryStore {
    MemoryStore::new()
}

async fn seeded_user(store: &MemoryStore, email: &str) -> User {
    store
        .user_repository()
        .insert(&new_user(email))
        .await
        .expect("user inserted")
}

#[rstest]
#[tokio::test]
async fn insert_assigns_sequential_ids(store: MemoryStore) {
    let first = seeded_user(&store, "a@example.com").await;
    let second = seeded_user(&store, "b@example.com").await;

    assert_eq!(first.id().get(), 1);
    assert_eq!(second.id().get(), 2);

    let all = store.user_repository().find_all().await.expect("listed");
    assert_eq!(all, vec![first, second]);
}

#[rstest]
#[tokio::test]
async fn email_index_is_unique(store: MemoryStore) {
    seeded_user(&store, "a@example.com").await;
    let users = store.user_repository();

    let err = users
        .insert(&new_user("a@example.com"))
        .await
        .expect_err("duplicate email");
    assert_eq!(err, UserRepositoryError::duplicate_email("a@example.com"));

    let all = users.find_all().await.expect("listed");
    assert_eq!(all.len(), 1);
}

#[rstest]
#[tokio::test]
async fn save_moves_email_index(store: MemoryStore) {
    let mut user = seeded_user(&store, "old@example.com").await;
    let users = store.user_repository();

    user.change_email(Email::new("new@example.com").expect("valid email"));
    users.save(&user).await.expect("saved");

    let old = Email::new("old@example.com").expect("valid email");
    let new = Email::new("new@example.com").expect("valid email");
    assert!(!users.exists_by_email(&old).await.expect("lookup"));
    assert!(users.exists_by_email(&new).await.expect("lookup"));
}

#[rstest]
#[tokio::test]
async fn save_rejects_email_held_by_another_user(store: MemoryStore) {
    seeded_user(&store, "taken@example.com").await;
    let mut user = seeded_user(&store, "mine@example.com").await;

    user.change_email(Email::new("taken@example.com").expect("valid email"));
    let err = store
        .user_repository()
        .save(&user)
        .await
        .expect_err("email taken");

    assert!(matches!(err, UserRepositoryError::DuplicateEmail { .. }));
}

#[rstest]
#[tokio::test]
async fn note_insert_requires_owner_and_unique_uuid(store: MemoryStore) {
    let notes = store.note_repository();
    let uuid = Uuid::new_v4();
    let ghost = UserId::new(99).expect("valid id");

    let err = notes
        .insert(&new_note(ghost, uuid))
        .await
        .expect_err("missing owner");
    assert_eq!(err, NoteRepositoryError::missing_owner(99_i64));

    let owner = seeded_user(&store, "a@example.com").await;
    let created = notes
        .insert(&new_note(owner.id(), uuid))
        .await
        .expect("inserted");
    assert_eq!(created.uuid(), uuid);
    assert_eq!(created.updated_at(), None);

    let err = notes
        .insert(&new_note(owner.id(), uuid))
        .await
        .expect_err("duplicate uuid");
    assert_eq!(err, NoteRepositoryError::duplicate_uuid(uuid));
}

#[rstest]
#[tokio::test]
async fn save_persists_mutable_columns_only(store: MemoryStore) {
    let owner = seeded_user(&store, "a@example.com").await;
    let notes = store.note_repository();
    let uuid = Uuid::new_v4();
    let mut note = notes
        .insert(&new_note(owner.id(), uuid))
        .await
        .expect("inserted");

    let stamped = fixture_instant() + Duration::hours(1);
    note.change_title(EncryptedTitle::new(vec![0x01, 0x02]).expect("valid title"));
    note.touch(stamped);
    notes.save(&note).await.expect("saved");

    let reloaded = notes
        .find_by_uuid(&uuid)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(reloaded.title().value(), &vec![0x01, 0x02]);
    assert_eq!(reloaded.updated_at(), Some(stamped));
    assert_eq!(reloaded.created_at(), fixture_instant());
}

#[rstest]
#[tokio::test]
async fn notes_are_listed_per_owner_in_creation_order(store: MemoryStore) {
    let ada = seeded_user(&store, "ada@example.com").await;
    let grace = seeded_user(&store, "grace@example.com").await;
    let notes = store.note_repository();

    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    notes
        .insert(&new_note(ada.id(), first))
        .await
        .expect("inserted");
    notes
        .insert(&new_note(grace.id(), Uuid::new_v4()))
        .await
        .expect("inserted");
    notes
        .insert(&new_note(ada.id(), second))
        .await
        .expect("inserted");

    let listed: Vec<Uuid> = notes
        .find_all_by_owner(ada.id())
        .await
        .expect("listed")
        .iter()
        .map(|note| note.uuid())
        .collect();
    assert_eq!(listed, vec![first, second]);
}

#[rstest]
#[tokio::test]
async fn deleting_a_user_cascades_to_notes(store: MemoryStore) {
    let owner = seeded_user(&store, "a@example.com").await;
    let notes = store.note_repository();
    let uuid = Uuid::new_v4();
    notes
        .insert(&new_note(owner.id(), uuid))
        .await
        .expect("inserted");

    store
        .user_repository()
        .delete_by_id(owner.id())
        .await
        .expect("deleted");

    assert_eq!(notes.find_by_uuid(&uuid).await.expect("lookup"), None);
    let email = Email::new("a@example.com").expect("valid email");
    assert!(
        !store
            .user_repository()
            .exists_by_email(&email)
            .await
            .expect("lookup")
    );
}

#[rstest]
#[tokio::test]
async fn deleting_a_note_frees_its_uuid(store: MemoryStore) {
    let owner = seeded_user(&store, "a@example.com").await;
    let notes = store.note_repository();
    let uuid = Uuid::new_v4();
    let note = notes
        .insert(&new_note(owner.id(), uuid))
        .await
        .expect("inserted");

    notes.delete(&note).await.expect("deleted");
    assert_eq!(notes.find_by_uuid(&uuid).await.expect("lookup"), None);
    notes
        .insert(&new_note(owner.id(), uuid))
        .await
        .expect("uuid reusable");
}

#[rstest]
#[tokio::test]
async fn corrupt_rows_surface_as_query_errors(store: MemoryStore) {
    let owner = seeded_user(&store, "a@example.com").await;
    let uuid = Uuid::new_v4();
    store
        .transact(NoteRepositoryError::connection, |tables| {
            let id = tables.next_note_id();
            tables.notes.insert(
                id,
                rows::NoteRow {
                    id,
                    uuid,
                    owner_id: owner.id().get(),
                    title: Some(Vec::new()),
                    content: None,
                    created_at: fixture_instant(),
                    updated_at: None,
                },
            );
            tables.notes_by_uuid.insert(uuid, id);
            Ok(())
        })
        .expect("raw row inserted");

    let err = store
        .note_repository()
        .find_by_uuid(&uuid)
        .await
        .expect_err("corrupt row");
    assert_eq!(
        err,
        NoteRepositoryError::query("corrupt notes.title: EncryptedTitle data is <empty>")
    );
}
