//! Cookie session wrapper for the HTTP handlers.
//!
//! The session stores exactly one thing, the principal id text; whether that
//! id still names a live principal is the session gate's decision. Handlers
//! therefore read a typed `Option<PrincipalId>` and never touch raw session
//! keys.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, PrincipalId};

pub(crate) const PRINCIPAL_ID_KEY: &str = "principal_id";

/// Typed view over the caller's cookie session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record the authenticated principal as the session subject.
    pub fn persist_principal(&self, id: &PrincipalId) -> Result<(), Error> {
        self.0
            .insert(PRINCIPAL_ID_KEY, id.as_ref())
            .map_err(|error| Error::internal(format!("session write failed: {error}")))
    }

    /// Read the session subject, if any.
    ///
    /// Malformed id text in the cookie reads as an anonymous session rather
    /// than an error; the gate then denies any mutating call.
    pub fn principal_id(&self) -> Result<Option<PrincipalId>, Error> {
        let raw = self
            .0
            .get::<String>(PRINCIPAL_ID_KEY)
            .map_err(|error| Error::internal(format!("session read failed: {error}")))?;
        let Some(text) = raw else {
            return Ok(None);
        };
        match PrincipalId::parse(&text) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                tracing::warn!(%error, "rejecting malformed session subject");
                Ok(None)
            }
        }
    }

    /// Drop the session entirely, logging the caller out.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
