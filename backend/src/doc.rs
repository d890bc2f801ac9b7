//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every complaint-board and auth endpoint, the shared
//! error schema, and the session cookie security scheme. Debug builds serve
//! the generated document at `/api-docs/openapi.json`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Complaint, Error, ErrorCode};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::complaints::{BoardResponse, FilterRequest, SubmitComplaintRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the complaint board API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Complaint board API",
        description = "Community complaint board: submit complaints, browse them ranked by \
                       popularity, filter by department, and like them once per request."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::complaints::list_complaints,
        crate::inbound::http::complaints::filter_complaints,
        crate::inbound::http::complaints::get_complaint,
        crate::inbound::http::complaints::submit_complaint,
        crate::inbound::http::complaints::like_complaint,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Complaint,
        BoardResponse,
        SubmitComplaintRequest,
        FilterRequest,
        LoginRequest,
        Error,
        ErrorCode,
    ))
)]
pub struct ApiDoc;
