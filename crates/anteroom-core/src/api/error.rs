use thiserror::Error;

/// Maximum length for response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Errors surfaced by the auth client.
///
/// Transport failures and non-2xx statuses are `Network`/`Status`; a body
/// that does not match the expected schema is `Decoding`. Nothing is
/// retried internally, errors propagate unchanged to the caller.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to decode response: {0}")]
    Decoding(#[from] serde_json::Error),

    #[error("Token storage failed: {0}")]
    Storage(#[source] anyhow::Error),
}

impl ApiError {
    /// Truncate a response body to keep error messages bounded.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..end],
            body.len()
        )
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        ApiError::Status {
            status,
            body: Self::truncate_body(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_body_kept_verbatim() {
        let err = ApiError::from_status(reqwest::StatusCode::UNAUTHORIZED, "bad credentials");
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
                assert_eq!(body, "bad credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_long_body_truncated_on_char_boundary() {
        // Three-byte chars put the cap mid-character, forcing the boundary walk
        let body = "€".repeat(MAX_ERROR_BODY_LENGTH);
        let err = ApiError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &body);
        match err {
            ApiError::Status { body, .. } => {
                assert!(body.contains("truncated"));
                assert!(body.len() < MAX_ERROR_BODY_LENGTH + 64);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
