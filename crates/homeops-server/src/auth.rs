//! Auth gate middleware.
//!
//! Validates the `X-API-Key` header against the configured admin key
//! before any handler or adapter runs. The comparison is constant-time
//! so a mismatch never leaks secret content through timing. `/health`
//! is mounted outside this layer and needs no credential.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use homeops_core::GatewayError;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware enforcing the shared-secret gate on every `/v1` route.
pub async fn require_admin_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    let key_present = presented.is_some();

    let authorized = presented
        .is_some_and(|key| constant_time_eq(key.as_bytes(), state.config.admin_key.as_bytes()));

    if authorized {
        return next.run(request).await;
    }

    // Never echo the presented key.
    tracing::warn!(
        path = %request.uri().path(),
        key_present,
        "rejected request at auth gate"
    );
    ApiError(GatewayError::Unauthorized).into_response()
}

/// Constant-time byte comparison.
///
/// The length check short-circuits, which reveals only the secret's
/// length class; the content comparison always walks both slices fully.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut acc = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        acc |= x ^ y;
    }
    acc == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_slices_match() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_different_content_rejected() {
        assert!(!constant_time_eq(b"secret", b"secreT"));
        assert!(!constant_time_eq(b"secret", b"tercse"));
    }

    #[test]
    fn test_different_length_rejected() {
        assert!(!constant_time_eq(b"secret", b"secre"));
        assert!(!constant_time_eq(b"secret", b"secrets"));
        assert!(!constant_time_eq(b"", b"x"));
    }
}
