//! Account HTTP handlers.
//!
//! ```text
//! POST   /api/v1/users
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}/email
//! PUT    /api/v1/users/{id}/password
//! DELETE /api/v1/users/{id}
//! ```
//!
//! Responses never carry the password hash.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Request payload for registering an account.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequestBody {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse")]
    pub password: Option<String>,
}

/// Request payload for replacing an account email.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmailRequestBody {
    #[schema(example = "ada@example.org")]
    pub new_email: Option<String>,
}

/// Request payload for replacing an account password.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequestBody {
    pub new_password: Option<String>,
}

/// Account representation returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<User> for UserResponseBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id().get(),
            email: user.email().value().clone(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

fn path_id(raw: &str) -> Result<Option<i64>, Error> {
    parse_id(raw, FieldName::new("id")).map(Some)
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequestBody,
    responses(
        (status = 201, description = "Account created", body = UserResponseBody),
        (status = 400, description = "Invalid email or password", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequestBody>,
) -> ApiResult<HttpResponse> {
    let CreateUserRequestBody { email, password } = payload.into_inner();
    let user = state.users.create_user(email, password).await?;
    Ok(HttpResponse::Created().json(UserResponseBody::from(user)))
}

/// List every account.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Accounts", body = [UserResponseBody]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<UserResponseBody>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(
        users.into_iter().map(UserResponseBody::from).collect(),
    ))
}

/// Fetch one account.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account", body = UserResponseBody),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Unknown account", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let id = path_id(&path)?;
    let user = state.users_query.get_user(id).await?;
    Ok(web::Json(UserResponseBody::from(user)))
}

/// Replace the account email.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/email",
    params(("id" = i64, Path, description = "Account id")),
    request_body = UpdateEmailRequestBody,
    responses(
        (status = 200, description = "Account updated", body = UserResponseBody),
        (status = 400, description = "Invalid id or email", body = Error),
        (status = 404, description = "Unknown account", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "changeUserEmail"
)]
#[put("/users/{id}/email")]
pub async fn change_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmailRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let id = path_id(&path)?;
    let user = state
        .users
        .change_email(id, payload.into_inner().new_email)
        .await?;
    Ok(web::Json(UserResponseBody::from(user)))
}

/// Replace the account password.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/password",
    params(("id" = i64, Path, description = "Account id")),
    request_body = UpdatePasswordRequestBody,
    responses(
        (status = 200, description = "Account updated", body = UserResponseBody),
        (status = 400, description = "Invalid id or password", body = Error),
        (status = 404, description = "Unknown account", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "changeUserPassword"
)]
#[put("/users/{id}/password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePasswordRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let id = path_id(&path)?;
    let user = state
        .users
        .change_password(id, payload.into_inner().new_password)
        .await?;
    Ok(web::Json(UserResponseBody::from(user)))
}

/// Delete the account together with its notes.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Unknown account", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path_id(&path)?;
    state.users.delete_user(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
