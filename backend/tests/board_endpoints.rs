//! End-to-end board behaviour over the in-memory adapters.
//!
//! Drives the real login endpoint rather than planting sessions directly, so
//! the cookie round trip, the session gate, and the board ranking are all
//! exercised together.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::json;

use backend::domain::Complaint;
use backend::inbound::http::auth::{login, logout};
use backend::inbound::http::complaints::{
    BoardResponse, filter_complaints, get_complaint, like_complaint, list_complaints,
    submit_complaint,
};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::identity::InMemoryIdentityProvider;
use backend::outbound::persistence::InMemoryComplaintRepository;

const EMAIL: &str = "asha@campus.example";
const PASSWORD: &str = "correct horse battery staple";

fn board_state() -> HttpState {
    let identity = InMemoryIdentityProvider::new();
    identity
        .register(EMAIL, PASSWORD, "Asha")
        .expect("seed account");
    HttpState::new(
        Arc::new(InMemoryComplaintRepository::new()),
        Arc::new(identity),
    )
}

fn board_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(HealthState::new()))
        .service(
            web::scope("/api/v1")
                .wrap(session)
                .service(login)
                .service(logout)
                .service(list_complaints)
                .service(submit_complaint)
                .service(filter_complaints)
                .service(get_complaint)
                .service(like_complaint),
        )
        .service(ready)
        .service(live)
}

async fn log_in<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": EMAIL, "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

async fn submit<S>(app: &S, cookie: &Cookie<'static>, dept: &str, text: &str) -> Complaint
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/complaints")
            .cookie(cookie.clone())
            .set_json(json!({
                "name": "Asha",
                "register-no": "20CS117",
                "department": dept,
                "type-of-complaint": "Infrastructure",
                "complaint": text
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    test::read_body_json(res).await
}

async fn like<S>(app: &S, cookie: &Cookie<'static>, complaint: &Complaint)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let uri = format!("/api/v1/complaints/{}/like", complaint.id());
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&uri)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn likes_drive_the_board_ordering() {
    let app = test::init_service(board_app(board_state())).await;
    let cookie = log_in(&app).await;

    let first = submit(&app, &cookie, "CS", "Lab projector is broken.").await;
    let second = submit(&app, &cookie, "EE", "Hostel wifi drops every evening.").await;

    like(&app, &cookie, &second).await;
    like(&app, &cookie, &second).await;
    like(&app, &cookie, &first).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/complaints")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let board: BoardResponse = test::read_body_json(res).await;
    assert!(board.authenticated);
    assert_eq!(
        board
            .complaints
            .iter()
            .map(|c| c.id().clone())
            .collect::<Vec<_>>(),
        vec![second.id().clone(), first.id().clone()]
    );
    assert_eq!(board.complaints[0].likes(), 2);
    assert_eq!(board.complaints[1].likes(), 1);
}

#[actix_web::test]
async fn filter_is_open_to_anonymous_browsers() {
    let app = test::init_service(board_app(board_state())).await;
    let cookie = log_in(&app).await;

    submit(&app, &cookie, "CS", "Lab projector is broken.").await;
    submit(&app, &cookie, "EE", "Hostel wifi drops every evening.").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/complaints/filter")
            .set_json(json!({ "deptValue": "EE" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let board: BoardResponse = test::read_body_json(res).await;
    assert!(!board.authenticated);
    assert_eq!(board.complaints.len(), 1);
    assert_eq!(board.complaints[0].department(), "EE");
}

#[actix_web::test]
async fn logout_revokes_write_access() {
    let app = test::init_service(board_app(board_state())).await;
    let cookie = log_in(&app).await;

    submit(&app, &cookie, "CS", "Lab projector is broken.").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    // The logout response rewrites the cookie; the old value no longer
    // resolves to a principal.
    let stale = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/complaints")
            .cookie(
                res.response()
                    .cookies()
                    .find(|c| c.name() == "session")
                    .map(Cookie::into_owned)
                    .unwrap_or(cookie),
            )
            .set_json(json!({
                "name": "Asha",
                "register-no": "20CS117",
                "department": "CS",
                "type-of-complaint": "Infrastructure",
                "complaint": "Second attempt."
            }))
            .to_request(),
    )
    .await;
    assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn wrong_credentials_are_rejected() {
    let app = test::init_service(board_app(board_state())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": EMAIL, "password": "guessing" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn health_probes_are_unauthenticated() {
    let app = test::init_service(board_app(board_state())).await;

    let live_res =
        test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request()).await;
    assert_eq!(live_res.status(), StatusCode::OK);

    // Readiness stays negative until the bootstrap marks it.
    let ready_res =
        test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(ready_res.status(), StatusCode::SERVICE_UNAVAILABLE);
}
