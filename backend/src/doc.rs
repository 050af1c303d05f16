//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every account and note endpoint from the inbound
//! layer together with their request, response and error schemas. The
//! generated document backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::notes::{
    CreateNoteRequestBody, NoteResponseBody, UpdateNoteContentRequestBody, UpdateNoteRequestBody,
    UpdateNoteTitleRequestBody,
};
use crate::inbound::http::users::{
    CreateUserRequestBody, UpdateEmailRequestBody, UpdatePasswordRequestBody, UserResponseBody,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notevault API",
        description = "Accounts and owner-scoped notes encrypted on the client.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::change_email,
        crate::inbound::http::users::change_password,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::notes::create_note,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::notes::get_note,
        crate::inbound::http::notes::update_note,
        crate::inbound::http::notes::update_note_title,
        crate::inbound::http::notes::update_note_content,
        crate::inbound::http::notes::delete_note,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CreateUserRequestBody,
        UpdateEmailRequestBody,
        UpdatePasswordRequestBody,
        UserResponseBody,
        CreateNoteRequestBody,
        UpdateNoteRequestBody,
        UpdateNoteTitleRequestBody,
        UpdateNoteContentRequestBody,
        NoteResponseBody,
    )),
    tags(
        (name = "users", description = "Account lifecycle"),
        (name = "notes", description = "Encrypted notes owned by an account")
    )
)]
pub struct ApiDoc;
