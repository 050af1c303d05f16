//! Encrypted note HTTP handlers.
//!
//! ```text
//! POST   /api/v1/notes/{userId}
//! GET    /api/v1/notes/{userId}
//! GET    /api/v1/notes/{userId}/{uuid}
//! PUT    /api/v1/notes/{userId}/{uuid}
//! PUT    /api/v1/notes/{userId}/{uuid}/title
//! PUT    /api/v1/notes/{userId}/{uuid}/content
//! DELETE /api/v1/notes/{userId}/{uuid}
//! ```
//!
//! Blobs travel as standard Base64 in both directions. The path `userId` is
//! the already-authenticated caller; ownership is enforced by the domain.

use actix_web::{HttpResponse, delete, get, post, put, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::NoteChange;
use crate::domain::{Error, Note, OwnedResource};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, parse_uuid};

/// Request payload for creating a note.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequestBody {
    #[schema(format = "uuid")]
    pub uuid: String,
    #[schema(format = "byte", example = "QQ==")]
    pub encrypted_title: Option<String>,
    #[schema(format = "byte", example = "Qg==")]
    pub encrypted_content: Option<String>,
}

/// Request payload replacing both encrypted fields.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequestBody {
    #[schema(format = "byte")]
    pub encrypted_new_title: Option<String>,
    #[schema(format = "byte")]
    pub encrypted_new_content: Option<String>,
}

/// Request payload replacing the encrypted title.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteTitleRequestBody {
    #[schema(format = "byte")]
    pub encrypted_new_title: Option<String>,
}

/// Request payload replacing the encrypted content.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteContentRequestBody {
    #[schema(format = "byte")]
    pub encrypted_new_content: Option<String>,
}

/// Note representation returned to its owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponseBody {
    #[schema(format = "uuid")]
    pub uuid: String,
    pub owner_id: i64,
    #[schema(format = "byte")]
    pub encrypted_title: String,
    #[schema(format = "byte")]
    pub encrypted_content: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: Option<String>,
}

impl From<Note> for NoteResponseBody {
    fn from(note: Note) -> Self {
        Self {
            uuid: note.uuid().to_string(),
            owner_id: note.owner_id().get(),
            encrypted_title: STANDARD.encode(note.title()),
            encrypted_content: STANDARD.encode(note.content()),
            created_at: note.created_at().to_rfc3339(),
            updated_at: note.updated_at().map(|at| at.to_rfc3339()),
        }
    }
}

fn owner_path(raw: &str) -> Result<Option<i64>, Error> {
    parse_id(raw, FieldName::new("userId")).map(Some)
}

fn note_path(path: web::Path<(String, String)>) -> Result<(Option<i64>, Uuid), Error> {
    let (user_id, uuid) = path.into_inner();
    Ok((
        owner_path(&user_id)?,
        parse_uuid(&uuid, FieldName::new("uuid"))?,
    ))
}

/// Store a new encrypted note for the caller.
#[utoipa::path(
    post,
    path = "/api/v1/notes/{userId}",
    params(("userId" = i64, Path, description = "Calling account id")),
    request_body = CreateNoteRequestBody,
    responses(
        (status = 201, description = "Note created", body = NoteResponseBody),
        (status = 400, description = "Invalid id or payload", body = Error),
        (status = 404, description = "Unknown account", body = Error),
        (status = 409, description = "Note uuid already used", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "createNote"
)]
#[post("/notes/{userId}")]
pub async fn create_note(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CreateNoteRequestBody>,
) -> ApiResult<HttpResponse> {
    let owner_id = owner_path(&path)?;
    let CreateNoteRequestBody {
        uuid,
        encrypted_title,
        encrypted_content,
    } = payload.into_inner();
    let uuid = parse_uuid(&uuid, FieldName::new("uuid"))?;
    let note = state
        .notes
        .create_note(owner_id, uuid, encrypted_title, encrypted_content)
        .await?;
    Ok(HttpResponse::Created().json(NoteResponseBody::from(note)))
}

/// List the caller's notes.
#[utoipa::path(
    get,
    path = "/api/v1/notes/{userId}",
    params(("userId" = i64, Path, description = "Calling account id")),
    responses(
        (status = 200, description = "Notes", body = [NoteResponseBody]),
        (status = 400, description = "Invalid id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes/{userId}")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<NoteResponseBody>>> {
    let owner_id = owner_path(&path)?;
    let notes = state.notes_query.list_notes(owner_id).await?;
    Ok(web::Json(
        notes.into_iter().map(NoteResponseBody::from).collect(),
    ))
}

/// Fetch one of the caller's notes.
#[utoipa::path(
    get,
    path = "/api/v1/notes/{userId}/{uuid}",
    params(
        ("userId" = i64, Path, description = "Calling account id"),
        ("uuid" = Uuid, Path, description = "Note uuid")
    ),
    responses(
        (status = 200, description = "Note", body = NoteResponseBody),
        (status = 400, description = "Invalid id or uuid", body = Error),
        (status = 403, description = "Note owned by another account", body = Error),
        (status = 404, description = "Unknown note", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "getNote"
)]
#[get("/notes/{userId}/{uuid}")]
pub async fn get_note(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<NoteResponseBody>> {
    let (owner_id, uuid) = note_path(path)?;
    let note = state.notes_query.get_note(owner_id, uuid).await?;
    Ok(web::Json(NoteResponseBody::from(note)))
}

async fn apply_change(
    state: &HttpState,
    path: web::Path<(String, String)>,
    change: NoteChange,
) -> ApiResult<web::Json<NoteResponseBody>> {
    let (owner_id, uuid) = note_path(path)?;
    let note = state.notes.update_note(owner_id, uuid, change).await?;
    Ok(web::Json(NoteResponseBody::from(note)))
}

/// Replace both encrypted fields of a note.
#[utoipa::path(
    put,
    path = "/api/v1/notes/{userId}/{uuid}",
    params(
        ("userId" = i64, Path, description = "Calling account id"),
        ("uuid" = Uuid, Path, description = "Note uuid")
    ),
    request_body = UpdateNoteRequestBody,
    responses(
        (status = 200, description = "Note updated", body = NoteResponseBody),
        (status = 400, description = "Invalid id, uuid or payload", body = Error),
        (status = 403, description = "Note owned by another account", body = Error),
        (status = 404, description = "Unknown note", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "updateNote"
)]
#[put("/notes/{userId}/{uuid}")]
pub async fn update_note(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateNoteRequestBody>,
) -> ApiResult<web::Json<NoteResponseBody>> {
    let UpdateNoteRequestBody {
        encrypted_new_title,
        encrypted_new_content,
    } = payload.into_inner();
    let change = NoteChange::TitleAndContent {
        title: encrypted_new_title,
        content: encrypted_new_content,
    };
    apply_change(&state, path, change).await
}

/// Replace the encrypted title of a note.
#[utoipa::path(
    put,
    path = "/api/v1/notes/{userId}/{uuid}/title",
    params(
        ("userId" = i64, Path, description = "Calling account id"),
        ("uuid" = Uuid, Path, description = "Note uuid")
    ),
    request_body = UpdateNoteTitleRequestBody,
    responses(
        (status = 200, description = "Note updated", body = NoteResponseBody),
        (status = 400, description = "Invalid id, uuid or payload", body = Error),
        (status = 403, description = "Note owned by another account", body = Error),
        (status = 404, description = "Unknown note", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "updateNoteTitle"
)]
#[put("/notes/{userId}/{uuid}/title")]
pub async fn update_note_title(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateNoteTitleRequestBody>,
) -> ApiResult<web::Json<NoteResponseBody>> {
    let change = NoteChange::Title(payload.into_inner().encrypted_new_title);
    apply_change(&state, path, change).await
}

/// Replace the encrypted content of a note.
#[utoipa::path(
    put,
    path = "/api/v1/notes/{userId}/{uuid}/content",
    params(
        ("userId" = i64, Path, description = "Calling account id"),
        ("uuid" = Uuid, Path, description = "Note uuid")
    ),
    request_body = UpdateNoteContentRequestBody,
    responses(
        (status = 200, description = "Note updated", body = NoteResponseBody),
        (status = 400, description = "Invalid id, uuid or payload", body = Error),
        (status = 403, description = "Note owned by another account", body = Error),
        (status = 404, description = "Unknown note", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "updateNoteContent"
)]
#[put("/notes/{userId}/{uuid}/content")]
pub async fn update_note_content(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateNoteContentRequestBody>,
) -> ApiResult<web::Json<NoteResponseBody>> {
    let change = NoteChange::Content(payload.into_inner().encrypted_new_content);
    apply_change(&state, path, change).await
}

/// Delete one of the caller's notes.
#[utoipa::path(
    delete,
    path = "/api/v1/notes/{userId}/{uuid}",
    params(
        ("userId" = i64, Path, description = "Calling account id"),
        ("uuid" = Uuid, Path, description = "Note uuid")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 400, description = "Invalid id or uuid", body = Error),
        (status = 403, description = "Note owned by another account", body = Error),
        (status = 404, description = "Unknown note", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[delete("/notes/{userId}/{uuid}")]
pub async fn delete_note(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (owner_id, uuid) = note_path(path)?;
    state.notes.delete_note(owner_id, uuid).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "notes_tests.rs"]
mod tests;
