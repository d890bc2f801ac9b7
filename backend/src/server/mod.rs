//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use actix_web::{HttpResponse, get};
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::{ComplaintRepository, IdentityProvider};
use backend::inbound::http::auth::{login, logout};
use backend::inbound::http::complaints::{
    filter_complaints, get_complaint, like_complaint, list_complaints, submit_complaint,
};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::identity::{HttpIdentityProvider, InMemoryIdentityProvider};
use backend::outbound::persistence::{
    DbPool, DieselComplaintRepository, InMemoryComplaintRepository,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;

use std::sync::Arc;
use tracing::{info, warn};

/// Serve the generated OpenAPI document for local tooling.
#[cfg(debug_assertions)]
#[get("/api-docs/openapi.json")]
async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Build the complaint store from configuration.
///
/// Uses the PostgreSQL-backed store when `DATABASE_URL` is set, otherwise an
/// in-memory store that loses data on restart.
///
/// # Errors
/// Returns [`std::io::Error`] when the connection pool cannot be built.
async fn build_complaint_store(
    config: &ServerConfig,
) -> std::io::Result<Arc<dyn ComplaintRepository>> {
    match &config.database_url {
        Some(url) => {
            let pool = DbPool::connect(url)
                .await
                .map_err(|error| {
                    std::io::Error::other(format!("database pool setup failed: {error}"))
                })?;
            info!("using PostgreSQL complaint store");
            Ok(Arc::new(DieselComplaintRepository::new(pool)))
        }
        None => {
            warn!("DATABASE_URL not set; complaints are kept in memory only");
            Ok(Arc::new(InMemoryComplaintRepository::new()))
        }
    }
}

/// Build the identity provider from configuration.
///
/// Talks to the external provider when `IDENTITY_PROVIDER_URL` is set,
/// otherwise falls back to an in-memory fixture account for local runs.
fn build_identity_provider(config: &ServerConfig) -> std::io::Result<Arc<dyn IdentityProvider>> {
    match &config.identity_provider_url {
        Some(base) => {
            let provider = HttpIdentityProvider::new(base.clone()).map_err(|error| {
                std::io::Error::other(format!("identity client setup failed: {error}"))
            })?;
            info!(url = %base, "using external identity provider");
            Ok(Arc::new(provider))
        }
        None => {
            let provider = InMemoryIdentityProvider::new();
            provider
                .register("dev@localhost", "password", "Dev User")
                .map_err(|error| {
                    std::io::Error::other(format!("fixture account setup failed: {error}"))
                })?;
            warn!("IDENTITY_PROVIDER_URL not set; using fixture account dev@localhost");
            Ok(Arc::new(provider))
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(logout)
        .service(list_complaints)
        .service(submit_complaint)
        .service(filter_complaints)
        .service(get_complaint)
        .service(like_complaint);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(openapi_json);
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when adapter setup, binding the socket, or
/// starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let store = build_complaint_store(&config).await?;
    let identity = build_identity_provider(&config)?;
    let http_state = web::Data::new(HttpState::new(store, identity));
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        database_url: _,
        identity_provider_url: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
