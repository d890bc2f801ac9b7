//! Complaint board API handlers.
//!
//! ```text
//! GET  /api/v1/complaints
//! POST /api/v1/complaints
//! POST /api/v1/complaints/filter {"deptValue":"CS"}
//! GET  /api/v1/complaints/{id}
//! POST /api/v1/complaints/{id}/like
//! ```
//!
//! Browsing and filtering stay ungated; submission and likes pass through
//! the session gate. Responses carry an `authenticated` flag so the
//! presentation layer can adapt without a second round trip.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::{
    Complaint, ComplaintId, ComplaintSubmission, Error, SubmissionValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Submission payload for `POST /api/v1/complaints`.
///
/// Field names follow the presentation layer's hyphenated conventions;
/// intake maps them onto the canonical complaint fields.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SubmitComplaintRequest {
    /// Submitter display name.
    pub name: String,
    /// Submitter registration code.
    #[serde(rename = "register-no")]
    pub register_no: String,
    /// Department the complaint targets.
    pub department: String,
    /// Descriptive complaint category.
    #[serde(rename = "type-of-complaint")]
    pub type_of_complaint: String,
    /// Free-form complaint body.
    pub complaint: String,
}

impl TryFrom<SubmitComplaintRequest> for ComplaintSubmission {
    type Error = SubmissionValidationError;

    fn try_from(value: SubmitComplaintRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.name,
            &value.register_no,
            &value.department,
            &value.type_of_complaint,
            &value.complaint,
        )
    }
}

/// Filter payload for `POST /api/v1/complaints/filter`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct FilterRequest {
    /// Department to narrow to, or `"all"` for the whole board.
    #[serde(rename = "deptValue")]
    pub dept_value: String,
}

/// Board view returned by the list and filter endpoints.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    /// Complaints ranked by likes descending.
    pub complaints: Vec<Complaint>,
    /// Whether the caller holds an authenticated session.
    pub authenticated: bool,
}

fn map_submission_validation_error(err: SubmissionValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": "empty_field" }))
}

/// Treat malformed identifier text as a missing record at the boundary.
fn parse_complaint_id(raw: &str) -> Result<ComplaintId, Error> {
    ComplaintId::parse(raw).map_err(|error| {
        debug!(raw, %error, "rejecting malformed complaint id");
        Error::not_found(format!("no complaint with id {raw}"))
    })
}

/// Browse the board ranked by popularity.
#[utoipa::path(
    get,
    path = "/api/v1/complaints",
    responses(
        (status = 200, description = "Ranked board", body = BoardResponse),
        (status = 503, description = "Complaint store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "listComplaints",
    security([])
)]
#[get("/complaints")]
pub async fn list_complaints(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<BoardResponse>> {
    let authenticated = session.principal_id()?.is_some();
    let complaints = state.board.ranked().await?;
    Ok(web::Json(BoardResponse {
        complaints,
        authenticated,
    }))
}

/// Browse the board narrowed to one department.
#[utoipa::path(
    post,
    path = "/api/v1/complaints/filter",
    request_body = FilterRequest,
    responses(
        (status = 200, description = "Filtered board", body = BoardResponse),
        (status = 503, description = "Complaint store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "filterComplaints",
    security([])
)]
#[post("/complaints/filter")]
pub async fn filter_complaints(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<FilterRequest>,
) -> ApiResult<web::Json<BoardResponse>> {
    let authenticated = session.principal_id()?.is_some();
    let complaints = state.board.filtered(&payload.dept_value).await?;
    Ok(web::Json(BoardResponse {
        complaints,
        authenticated,
    }))
}

/// Fetch a single complaint.
#[utoipa::path(
    get,
    path = "/api/v1/complaints/{id}",
    params(("id" = String, Path, description = "Complaint identifier")),
    responses(
        (status = 200, description = "Complaint", body = Complaint),
        (status = 404, description = "Unknown or malformed id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "getComplaint",
    security([])
)]
#[get("/complaints/{id}")]
pub async fn get_complaint(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Complaint>> {
    let id = parse_complaint_id(&path.into_inner())?;
    let complaint = state.board.complaint(&id).await?;
    Ok(web::Json(complaint))
}

/// Submit a new complaint. Requires an authenticated session.
#[utoipa::path(
    post,
    path = "/api/v1/complaints",
    request_body = SubmitComplaintRequest,
    responses(
        (status = 201, description = "Complaint stored", body = Complaint),
        (status = 400, description = "Missing or blank field", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Complaint store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "submitComplaint"
)]
#[post("/complaints")]
pub async fn submit_complaint(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<SubmitComplaintRequest>,
) -> ApiResult<HttpResponse> {
    let subject = session.principal_id()?;
    state.gate.authorize(subject.as_ref()).await.require()?;

    let submission = ComplaintSubmission::try_from(payload.into_inner())
        .map_err(map_submission_validation_error)?;
    let stored = state.board.submit(&submission).await?;
    Ok(HttpResponse::Created().json(stored))
}

/// Like a complaint. Requires an authenticated session.
#[utoipa::path(
    post,
    path = "/api/v1/complaints/{id}/like",
    params(("id" = String, Path, description = "Complaint identifier")),
    responses(
        (status = 204, description = "Like recorded"),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown or malformed id", body = Error),
        (status = 503, description = "Complaint store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "likeComplaint"
)]
#[post("/complaints/{id}/like")]
pub async fn like_complaint(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let subject = session.principal_id()?;
    state.gate.authorize(subject.as_ref()).await.require()?;

    let id = parse_complaint_id(&path.into_inner())?;
    state.board.like(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    //! Handler coverage over the in-memory adapters.
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse as TestResponse, test, web};

    use super::*;
    use crate::domain::PrincipalId;
    use crate::inbound::http::test_utils::{seeded_state, test_session_middleware};

    fn request_body(dept: &str) -> serde_json::Value {
        json!({
            "name": "Asha",
            "register-no": "20CS117",
            "department": dept,
            "type-of-complaint": "Infrastructure",
            "complaint": "The third-floor lab projector is broken."
        })
    }

    fn test_app(
        state: HttpState,
        principal: PrincipalId,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .route(
                "/test-login",
                web::get().to(move |session: SessionContext| {
                    let principal = principal.clone();
                    async move {
                        session.persist_principal(&principal)?;
                        Ok::<_, Error>(TestResponse::Ok())
                    }
                }),
            )
            .service(
                web::scope("/api/v1")
                    .service(list_complaints)
                    .service(filter_complaints)
                    .service(get_complaint)
                    .service(submit_complaint)
                    .service(like_complaint),
            )
    }

    async fn login_cookie<S>(app: &S) -> actix_web::cookie::Cookie<'static>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
    {
        let res =
            test::call_service(app, test::TestRequest::get().uri("/test-login").to_request()).await;
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn anonymous_submission_is_denied() {
        let (state, principal) = seeded_state();
        let app = test::init_service(test_app(state, principal)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints")
                .set_json(request_body("CS"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn submitted_complaint_appears_on_board() {
        let (state, principal) = seeded_state();
        let app = test::init_service(test_app(state, principal)).await;
        let cookie = login_cookie(&app).await;

        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints")
                .cookie(cookie.clone())
                .set_json(request_body("CS"))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let stored: Complaint = test::read_body_json(created).await;
        assert_eq!(stored.likes(), 0);

        let board_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/complaints")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(board_res.status(), StatusCode::OK);
        let board: BoardResponse = test::read_body_json(board_res).await;
        assert!(board.authenticated);
        assert_eq!(board.complaints.len(), 1);
        assert_eq!(board.complaints[0].id(), stored.id());
    }

    #[actix_web::test]
    async fn blank_field_is_rejected_with_details() {
        let (state, principal) = seeded_state();
        let app = test::init_service(test_app(state, principal)).await;
        let cookie = login_cookie(&app).await;

        let mut body = request_body("CS");
        body["register-no"] = json!("   ");
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints")
                .cookie(cookie)
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let error: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(error["details"]["field"], "registerNo");
    }

    #[actix_web::test]
    async fn likes_reorder_the_board() {
        let (state, principal) = seeded_state();
        let app = test::init_service(test_app(state, principal)).await;
        let cookie = login_cookie(&app).await;

        let mut ids = Vec::new();
        for dept in ["CS", "EE"] {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/v1/complaints")
                    .cookie(cookie.clone())
                    .set_json(request_body(dept))
                    .to_request(),
            )
            .await;
            let stored: Complaint = test::read_body_json(res).await;
            ids.push(stored.id().clone());
        }

        // Like B once so it overtakes A.
        let like_uri = format!("/api/v1/complaints/{}/like", ids[1]);
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&like_uri)
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let board_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/complaints").to_request(),
        )
        .await;
        let board: BoardResponse = test::read_body_json(board_res).await;
        assert!(!board.authenticated);
        assert_eq!(board.complaints[0].id(), &ids[1]);
        assert_eq!(board.complaints[0].likes(), 1);
    }

    #[actix_web::test]
    async fn liking_missing_or_malformed_ids_is_not_found() {
        let (state, principal) = seeded_state();
        let app = test::init_service(test_app(state, principal)).await;
        let cookie = login_cookie(&app).await;

        // Malformed text and a well-formed but unknown id both read as 404.
        for raw in ["not-a-uuid", "3fa85f64-5717-4562-b3fc-2c963f66afa6"] {
            let uri = format!("/api/v1/complaints/{raw}/like");
            let res = test::call_service(
                &app,
                test::TestRequest::post().uri(&uri).cookie(cookie.clone()).to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "id: {raw}");
        }
    }

    #[actix_web::test]
    async fn filter_narrows_without_requiring_login() {
        let (state, principal) = seeded_state();
        let app = test::init_service(test_app(state, principal)).await;
        let cookie = login_cookie(&app).await;

        for dept in ["CS", "EE"] {
            let _res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/v1/complaints")
                    .cookie(cookie.clone())
                    .set_json(request_body(dept))
                    .to_request(),
            )
            .await;
        }

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints/filter")
                .set_json(json!({ "deptValue": "CS" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let board: BoardResponse = test::read_body_json(res).await;
        assert_eq!(board.complaints.len(), 1);
        assert_eq!(board.complaints[0].department(), "CS");

        let all = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints/filter")
                .set_json(json!({ "deptValue": "all" }))
                .to_request(),
        )
        .await;
        let board: BoardResponse = test::read_body_json(all).await;
        assert_eq!(board.complaints.len(), 2);
    }

    #[actix_web::test]
    async fn single_complaint_lookup_round_trips() {
        let (state, principal) = seeded_state();
        let app = test::init_service(test_app(state, principal)).await;
        let cookie = login_cookie(&app).await;

        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/complaints")
                .cookie(cookie)
                .set_json(request_body("CS"))
                .to_request(),
        )
        .await;
        let stored: Complaint = test::read_body_json(created).await;

        let uri = format!("/api/v1/complaints/{}", stored.id());
        let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let fetched: Complaint = test::read_body_json(res).await;
        assert_eq!(fetched, stored);
    }
}
