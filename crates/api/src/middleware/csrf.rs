//! Double-submit CSRF protection.
//!
//! Safe requests get a signed token in the `kanji_csrf` cookie (minted when
//! absent or invalid) and can read it through the [`CsrfToken`] extractor to
//! embed it in forms. State-changing requests must echo the cookie's token in
//! the `X-CSRF-Token` header or, for urlencoded forms, the `csrf_token` field.
//!
//! Only layered when the environment enforces CSRF.

use std::convert::Infallible;

use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, FromRequestParts, Request, State};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use axum::Form;
use kanji_core::error::CoreError;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

pub const CSRF_COOKIE: &str = "kanji_csrf";
pub const CSRF_HEADER: &str = "x-csrf-token";
pub const CSRF_FORM_FIELD: &str = "csrf_token";

/// Largest urlencoded body buffered to look for the form field.
const MAX_FORM_BYTES: usize = 64 * 1024;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The request's CSRF token, for embedding in rendered forms.
///
/// Empty when CSRF protection is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrfToken(pub String);

impl CsrfToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CsrfToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<CsrfToken>().cloned().unwrap_or_default())
    }
}

#[derive(Deserialize)]
struct CsrfFormField {
    csrf_token: Option<String>,
}

/// Middleware enforcing the double-submit check.
pub async fn csrf_protect(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let cookie_token =
        cookie_value(request.headers(), CSRF_COOKIE).filter(|token| state.csrf.verify(token));

    if is_safe_method(request.method()) {
        let (token, fresh) = match cookie_token {
            Some(token) => (token, false),
            None => (state.csrf.mint(), true),
        };
        request.extensions_mut().insert(CsrfToken(token.clone()));

        let mut response = next.run(request).await;
        if fresh {
            let cookie = set_cookie_value(&token, state.config.app_env.secure_cookies());
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => tracing::error!(error = %e, "Failed to encode CSRF cookie"),
            }
        }
        return Ok(response);
    }

    let Some(cookie_token) = cookie_token else {
        return Err(forbidden("CSRF cookie missing or invalid"));
    };

    let (mut request, submitted) = submitted_token(request).await?;
    let valid = submitted
        .as_deref()
        .is_some_and(|submitted| state.csrf.matches(&cookie_token, submitted));
    if !valid {
        return Err(forbidden("CSRF token missing or invalid"));
    }

    request.extensions_mut().insert(CsrfToken(cookie_token));
    Ok(next.run(request).await)
}

fn forbidden(reason: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(reason.to_string()))
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE)
}

/// Value of cookie `name` from any `Cookie` header.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

fn set_cookie_value(token: &str, secure: bool) -> String {
    let mut cookie = format!("{CSRF_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Token from the header, else from an urlencoded body (which is buffered and
/// put back for the handler).
async fn submitted_token(request: Request) -> Result<(Request, Option<String>), AppError> {
    if let Some(token) = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        let token = token.to_string();
        return Ok((request, Some(token)));
    }

    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));
    if !is_form {
        return Ok((request, None));
    }

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|_| AppError::PayloadTooLarge("Form body too large".into()))?;
    let token = form_token(bytes.clone()).await;

    Ok((Request::from_parts(parts, Body::from(bytes)), token))
}

async fn form_token(bytes: Bytes) -> Option<String> {
    let request = Request::builder()
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(Body::from(bytes))
        .ok()?;
    let Form(field) = Form::<CsrfFormField>::from_request(request, &()).await.ok()?;
    field.csrf_token.filter(|token| !token.is_empty())
}
