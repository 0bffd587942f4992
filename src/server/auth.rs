//! HTTP Basic authentication against the configured account table

use super::AppState;
use crate::config::{SecretString, UserConfig};
use crate::domain::{ReportError, Result};
use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::ExposeSecret;
use serde_json::json;
use std::collections::HashMap;

const REALM: &str = "Basic realm=\"farmu-reports\", charset=\"UTF-8\"";

/// Accounts allowed to call the report endpoints
#[derive(Debug, Clone, Default)]
pub struct UserTable {
    users: HashMap<String, SecretString>,
}

impl UserTable {
    pub fn from_config(users: &[UserConfig]) -> Self {
        Self {
            users: users
                .iter()
                .map(|u| (u.username.clone(), u.password.clone()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Checks an `Authorization` header value, returning the username
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Authentication`] when the header is not a
    /// well-formed Basic credential or does not match an account.
    pub fn verify(&self, header: &str) -> Result<String> {
        let encoded = header
            .strip_prefix("Basic ")
            .ok_or_else(|| ReportError::Authentication("unsupported scheme".to_string()))?;

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| ReportError::Authentication("invalid base64 credentials".to_string()))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| ReportError::Authentication("credentials are not UTF-8".to_string()))?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or_else(|| ReportError::Authentication("malformed credentials".to_string()))?;

        let matches = self.users.get(username).is_some_and(|expected| {
            let expected: &str = expected.expose_secret().as_ref();
            constant_time_eq(expected.as_bytes(), password.as_bytes())
        });

        if matches {
            Ok(username.to_string())
        } else {
            Err(ReportError::Authentication(format!(
                "invalid credentials for '{username}'"
            )))
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Middleware rejecting requests without valid Basic credentials
pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let Some(header) = header else {
        return unauthorized();
    };

    match state.users.verify(header) {
        Ok(username) => {
            tracing::debug!(user = %username, path = %request.uri().path(), "Authenticated request");
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %request.uri().path(), "Rejected credentials");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    let mut response = (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Credenciales inválidas"})),
    )
        .into_response();
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static(REALM));
    response
}
