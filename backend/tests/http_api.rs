//! Full-stack HTTP tests: real handlers, services, store and bcrypt hasher.

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use notevault::outbound::hashing::{BcryptPasswordHasher, MIN_BCRYPT_COST};
use notevault::outbound::memory::MemoryStore;
use notevault::server::{build_app, build_http_state};
use notevault::test_support::clock::FixtureClock;
use serde_json::{Value, json};

const NOTE_UUID: &str = "2f1c4b7e-9a0d-4e55-b1c3-000000000042";

fn app_state() -> web::Data<notevault::inbound::http::state::HttpState> {
    let hasher = BcryptPasswordHasher::new(MIN_BCRYPT_COST).expect("valid cost");
    web::Data::new(build_http_state(
        &MemoryStore::new(),
        hasher,
        FixtureClock::default().shared(),
    ))
}

async fn send(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

fn register(email: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({"email": email, "password": "correct horse"}))
}

#[actix_web::test]
async fn account_and_note_lifecycle() {
    let app = actix_test::init_service(build_app(app_state())).await;

    let (status, ada) = send(&app, register("ada@example.com")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(ada.get("passwordHash").is_none());
    let ada_id = ada["id"].as_i64().expect("numeric id");

    let (status, note) = send(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/notes/{ada_id}"))
            .set_json(json!({
                "uuid": NOTE_UUID,
                "encryptedTitle": "QQ==",
                "encryptedContent": "QQ=="
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(note["ownerId"], json!(ada_id));
    assert_eq!(note["encryptedTitle"], json!("QQ=="));
    assert_eq!(note["updatedAt"], Value::Null);

    let (status, updated) = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/notes/{ada_id}/{NOTE_UUID}/content"))
            .set_json(json!({"encryptedNewContent": "AQID"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["encryptedContent"], json!("AQID"));
    assert_eq!(updated["encryptedTitle"], json!("QQ=="));
    assert!(updated["updatedAt"].is_string());

    let (status, listed) = send(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/v1/notes/{ada_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let (status, _) = send(
        &app,
        actix_test::TestRequest::delete().uri(&format!("/api/v1/notes/{ada_id}/{NOTE_UUID}")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        actix_test::TestRequest::delete().uri(&format!("/api/v1/notes/{ada_id}/{NOTE_UUID}")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("not_found"));
}

#[actix_web::test]
async fn stranger_requests_are_forbidden() {
    let app = actix_test::init_service(build_app(app_state())).await;
    let (_, ada) = send(&app, register("ada@example.com")).await;
    let (_, mallory) = send(&app, register("mallory@example.com")).await;
    let ada_id = ada["id"].as_i64().expect("numeric id");
    let mallory_id = mallory["id"].as_i64().expect("numeric id");

    send(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/notes/{ada_id}"))
            .set_json(json!({
                "uuid": NOTE_UUID,
                "encryptedTitle": "QQ==",
                "encryptedContent": "QQ=="
            })),
    )
    .await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/v1/notes/{mallory_id}/{NOTE_UUID}")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        json!(format!("Permission denied for user with ID: {mallory_id}"))
    );
}

#[actix_web::test]
async fn client_errors_are_reported_with_their_category() {
    let app = actix_test::init_service(build_app(app_state())).await;

    let (status, body) = send(&app, register("not-an-email")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("domain_validation"));
    assert_eq!(body["message"], json!("Invalid email format"));

    send(&app, register("ada@example.com")).await;
    let (status, body) = send(&app, register("ada@example.com")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!("already_exists"));

    let (status, body) = send(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"email": "grace@example.com", "password": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("Password must be at least 6 characters long")
    );

    let (status, body) = send(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/notes/0"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("ID is less than 1"));
}
