//! Tests for the user entity.

use super::*;
use crate::domain::ErrorCode;
use chrono::TimeZone;
use rstest::{fixture, rstest};

const HASH_A: &str = "$2b$12$abcdefghijklmnopqrstuuABCDEFGHIJKLMNOPQRSTUVWXYZ01234";
const HASH_B: &str = "$2y$10$zyxwvutsrqponmlkjihgfeZYXWVUTSRQPONMLKJIHGFEDCBA98765";

#[fixture]
fn user() -> User {
    User::new(
        UserId::new(1).expect("valid id"),
        NewUser {
            email: Email::new("ada@example.com").expect("valid email"),
            password_hash: PasswordHash::new(HASH_A).expect("valid hash"),
            created_at: Utc
                .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
                .single()
                .expect("valid timestamp"),
        },
    )
}

#[rstest]
#[case(0)]
#[case(-5)]
fn non_positive_ids_are_rejected(#[case] raw: i64) {
    let err = UserId::new(raw).expect_err("non-positive id");
    assert_eq!(err.code(), ErrorCode::BusinessRuleViolation);
    assert_eq!(err.message(), "ID is less than 1");
}

#[rstest]
fn user_id_serialises_as_number() {
    let id = UserId::new(42).expect("valid id");
    assert_eq!(serde_json::to_value(id).expect("serialise"), 42);
    assert!(serde_json::from_value::<UserId>(serde_json::json!(0)).is_err());
}

#[rstest]
fn change_email_replaces_value(mut user: User) {
    let replacement = Email::new("lovelace@example.com").expect("valid email");
    user.change_email(replacement.clone());
    assert_eq!(user.email(), &replacement);
    assert_eq!(user.id().get(), 1);
}

#[rstest]
fn change_password_replaces_hash(mut user: User) {
    let replacement = PasswordHash::new(HASH_B).expect("valid hash");
    user.change_password(replacement.clone());
    assert_eq!(user.password_hash(), &replacement);
}

#[rstest]
fn debug_output_never_contains_hash(user: User) {
    let debug = format!("{user:?}");
    assert!(!debug.contains(HASH_A));
    assert!(debug.contains("ada@example.com"));
}
