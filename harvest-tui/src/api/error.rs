use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by any [`super::TimeTrackingService`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("authentication failed, check account id and access token")]
    AuthenticationFailed,
    #[error("rate limited by Harvest{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<u64> },
    #[error("network error: {0}")]
    NetworkOrTimeout(String),
    #[error("unexpected response: {0}")]
    MalformedResponse(String),
    #[error("{message}")]
    RemoteRejected { status: u16, message: String },
    #[error("not found")]
    NotFound,
    #[error("Harvest server error ({status})")]
    ServerError { status: u16 },
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(", retry in {}s", secs),
        None => String::new(),
    }
}

impl ApiError {
    /// Map a non-success HTTP status (plus the response body, if any) to an error kind.
    pub fn from_status(status: StatusCode, retry_after: Option<u64>, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::AuthenticationFailed,
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited { retry_after },
            StatusCode::NOT_FOUND => ApiError::NotFound,
            s if s.is_server_error() => ApiError::ServerError { status: s.as_u16() },
            s => ApiError::RemoteRejected {
                status: s.as_u16(),
                message: rejection_message(s, body),
            },
        }
    }
}

/// Harvest reports business errors as `{"message": "..."}` or
/// `{"error": "...", "error_description": "..."}`.
fn rejection_message(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = parsed.as_ref().and_then(|json| {
        json.get("message")
            .or_else(|| json.get("error_description"))
            .or_else(|| json.get("error"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
    });
    message.unwrap_or_else(|| {
        format!(
            "request rejected ({})",
            status.canonical_reason().unwrap_or("client error")
        )
    })
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::MalformedResponse(e.to_string())
        } else {
            ApiError::NetworkOrTimeout(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::MalformedResponse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses() {
        assert_eq!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, None, ""),
            ApiError::AuthenticationFailed
        );
        assert_eq!(
            ApiError::from_status(StatusCode::FORBIDDEN, None, ""),
            ApiError::AuthenticationFailed
        );
    }

    #[test]
    fn test_rate_limit_keeps_retry_after() {
        let err = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, Some(15), "");
        assert_eq!(err, ApiError::RateLimited { retry_after: Some(15) });
        assert_eq!(err.to_string(), "rate limited by Harvest, retry in 15s");
    }

    #[test]
    fn test_business_rejection_uses_body_message() {
        let err = ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            None,
            r#"{"message":"Entry is locked"}"#,
        );
        assert_eq!(
            err,
            ApiError::RemoteRejected {
                status: 422,
                message: "Entry is locked".to_string()
            }
        );
    }

    #[test]
    fn test_rejection_without_body() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, None, "<html>");
        assert_eq!(err.to_string(), "request rejected (Bad Request)");
    }

    #[test]
    fn test_not_found_and_server_error() {
        assert_eq!(
            ApiError::from_status(StatusCode::NOT_FOUND, None, ""),
            ApiError::NotFound
        );
        assert_eq!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, None, ""),
            ApiError::ServerError { status: 502 }
        );
    }
}
