//! Server construction and route wiring.

mod state_builders;

pub use state_builders::build_http_state;

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::error::json_error_config;
use crate::inbound::http::notes::{
    create_note, delete_note, get_note, list_notes, update_note, update_note_content,
    update_note_title,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{
    change_email, change_password, create_user, delete_user, get_user, list_users,
};

/// Register every REST endpoint under `/api/v1`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(create_user)
            .service(list_users)
            .service(get_user)
            .service(change_email)
            .service(change_password)
            .service(delete_user)
            .service(create_note)
            .service(list_notes)
            .service(get_note)
            .service(update_note)
            .service(update_note_title)
            .service(update_note_content)
            .service(delete_note),
    );
}

/// Assemble the Actix application around shared handler state.
pub fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .app_data(json_error_config())
        .configure(configure_api);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app
}

/// Construct an Actix HTTP server bound to `bind_addr`.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(bind_addr: SocketAddr, http_state: HttpState) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();
    info!(%bind_addr, "http server listening");
    Ok(server)
}
