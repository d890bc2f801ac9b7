//! Reqwest-backed identity provider adapter.
//!
//! Owns transport details only: request serialisation, timeout and HTTP
//! error mapping, and JSON decoding into domain identity types. The provider
//! contract is two endpoints:
//!
//! ```text
//! POST {base}/sessions            {"email","password"} -> 200 {"principalId"} | 401
//! GET  {base}/principals/{id}                          -> 200 {"principalId","displayName"} | 404
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{LoginCredentials, Principal, PrincipalId};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct SessionRequestDto<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponseDto {
    principal_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrincipalDto {
    principal_id: String,
    display_name: String,
}

/// Identity provider adapter speaking HTTP+JSON to the external service.
pub struct HttpIdentityProvider {
    client: Client,
    base: Url,
}

impl HttpIdentityProvider {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(mut base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        // Relative joins drop the last path segment unless the base path
        // ends in a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityProviderError> {
        self.base
            .join(path)
            .map_err(|error| IdentityProviderError::protocol(format!("bad endpoint path: {error}")))
    }
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::transport(error.to_string())
}

fn unexpected_status(status: StatusCode) -> IdentityProviderError {
    IdentityProviderError::protocol(format!("unexpected provider status {status}"))
}

fn parse_principal_id(raw: &str) -> Result<PrincipalId, IdentityProviderError> {
    PrincipalId::parse(raw).map_err(|error| {
        IdentityProviderError::protocol(format!("provider returned invalid principal id: {error}"))
    })
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn resolve(
        &self,
        id: &PrincipalId,
    ) -> Result<Option<Principal>, IdentityProviderError> {
        let url = self.endpoint(&format!("principals/{id}"))?;
        let response = self.client.get(url).send().await.map_err(map_transport_error)?;

        match response.status() {
            StatusCode::OK => {
                let dto: PrincipalDto = response.json().await.map_err(map_transport_error)?;
                let principal_id = parse_principal_id(&dto.principal_id)?;
                Ok(Some(Principal::new(principal_id, dto.display_name)))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(unexpected_status(status)),
        }
    }

    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<PrincipalId>, IdentityProviderError> {
        let url = self.endpoint("sessions")?;
        let response = self
            .client
            .post(url)
            .json(&SessionRequestDto {
                email: credentials.email(),
                password: credentials.password(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        match response.status() {
            StatusCode::OK => {
                let dto: SessionResponseDto = response.json().await.map_err(map_transport_error)?;
                Ok(Some(parse_principal_id(&dto.principal_id)?))
            }
            StatusCode::UNAUTHORIZED => Ok(None),
            status => Err(unexpected_status(status)),
        }
    }
}
