use serde::Serialize;
use tracing::error;

use crate::error::ApiError;

/// Fixed permissive CORS header set attached to every response.
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
    ("Access-Control-Allow-Credentials", "true"),
];

/// Transport-agnostic response envelope. Frontends copy `status`,
/// [`CORS_HEADERS`] and `body` onto their own response types.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Serialize `body` into an envelope. A serialization failure degrades to a
/// 500 envelope instead of panicking.
pub fn api_response<T: Serialize + ?Sized>(status: u16, body: &T) -> ApiResponse {
    match serde_json::to_string(body) {
        Ok(json) => ApiResponse { status, body: json },
        Err(err) => {
            error!(%err, "Failed to serialize response body");
            let fallback = ApiError::Internal(err.to_string());
            ApiResponse {
                status: fallback.status(),
                body: format!("{{\"message\":\"{fallback}\"}}"),
            }
        }
    }
}

/// Error envelope: the taxonomy's status plus its message, verbatim.
pub fn error_response(err: &ApiError) -> ApiResponse {
    api_response(err.status(), &serde_json::json!({ "message": err.to_string() }))
}
