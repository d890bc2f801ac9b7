//! Server configuration read from the environment.
//!
//! Keeps env parsing out of `main` so the bootstrap stays a wiring exercise.
//! Release builds require a session key file; debug builds may fall back to
//! an ephemeral key so local runs need no secrets.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::Key;
use tracing::warn;
use url::Url;

const BIND_ADDR_ENV: &str = "BIND_ADDR";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const IDENTITY_PROVIDER_URL_ENV: &str = "IDENTITY_PROVIDER_URL";
const SESSION_KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const SESSION_ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const SESSION_COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_PATH: &str = "/var/run/secrets/session_key";

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    /// Session cookie signing/encryption key.
    pub key: Key,
    /// Whether the session cookie carries the `Secure` flag.
    pub cookie_secure: bool,
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string; in-memory store when absent.
    pub database_url: Option<String>,
    /// Identity provider base URL; in-memory fixture when absent.
    pub identity_provider_url: Option<Url>,
}

impl ServerConfig {
    /// Assemble configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when a value fails to parse or, outside
    /// debug builds, when the session key cannot be read.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr: SocketAddr = env::var(BIND_ADDR_ENV)
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse()
            .map_err(|error| {
                std::io::Error::other(format!("invalid {BIND_ADDR_ENV}: {error}"))
            })?;

        let identity_provider_url = match env::var(IDENTITY_PROVIDER_URL_ENV) {
            Ok(raw) => Some(raw.parse::<Url>().map_err(|error| {
                std::io::Error::other(format!("invalid {IDENTITY_PROVIDER_URL_ENV}: {error}"))
            })?),
            Err(_) => None,
        };

        let cookie_secure = match env::var(SESSION_COOKIE_SECURE_ENV) {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                std::io::Error::other(format!(
                    "invalid {SESSION_COOKIE_SECURE_ENV}: expected a boolean, got {raw:?}"
                ))
            })?,
            Err(_) => true,
        };

        Ok(Self {
            key: session_key()?,
            cookie_secure,
            bind_addr,
            database_url: env::var(DATABASE_URL_ENV).ok(),
            identity_provider_url,
        })
    }
}

/// Interpret a boolean environment value. `None` means unrecognised text.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn session_key() -> std::io::Result<Key> {
    let key_path = env::var(SESSION_KEY_FILE_ENV)
        .unwrap_or_else(|_| DEFAULT_SESSION_KEY_PATH.to_owned());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(error) => {
            let allow_dev = env::var(SESSION_ALLOW_EPHEMERAL_ENV).ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, %error, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {error}"
                )))
            }
        }
    }
}
