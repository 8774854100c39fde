//! Caller identity carried out-of-band in request headers.
//!
//! Authentication is out of scope; the `X-User` / `X-Role` headers are
//! trusted as-is. The role only gates journal-listing visibility.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

pub const USER_HEADER: &str = "x-user";
pub const ROLE_HEADER: &str = "x-role";

const ADMIN_ROLE: &str = "ADMIN";

/// The acting user and role behind a request.
#[derive(Debug, Clone)]
pub struct Actor {
    pub username: String,
    pub role: String,
}

impl Actor {
    /// Whether this role sees every journal entry (compared
    /// case-insensitively).
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case(ADMIN_ROLE)
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = header_value(parts, USER_HEADER)?;
        let role = header_value(parts, ROLE_HEADER)?;
        Ok(Self { username, role })
    }
}

fn header_value(parts: &Parts, name: &str) -> Result<String, AppError> {
    let value = parts
        .headers
        .get(name)
        .ok_or_else(|| AppError::BadRequest(format!("Missing {name} header")))?
        .to_str()
        .map_err(|_| AppError::BadRequest(format!("Invalid {name} header")))?
        .trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("Missing {name} header")));
    }
    Ok(value.to_string())
}
