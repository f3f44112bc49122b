//! Failure taxonomy for API calls.

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Non-2xx response carrying a human readable `detail`.
    #[error("{0}")]
    Rejected(String),

    /// Non-2xx response without a usable `detail`.
    #[error("API responded with status {0}")]
    Status(u16),

    /// The request never produced a response.
    #[error("Network request failed: {0}")]
    Transport(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body.
    ///
    /// Only a JSON object whose `detail` is a string counts as a server
    /// message; validation payloads (`detail` as a list) fall back to the
    /// status code.
    pub fn from_failure(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body).ok().and_then(|value| {
            value
                .get("detail")
                .and_then(Value::as_str)
                .map(str::to_string)
        });

        match detail {
            Some(message) if !message.is_empty() => ApiError::Rejected(message),
            _ => ApiError::Status(status),
        }
    }

    /// Message shown to the user: the server's `detail` verbatim when there
    /// is one, the caller's fallback otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected(detail) => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_surfaced_verbatim() {
        let err = ApiError::from_failure(500, r#"{"detail": "スクレイピングに失敗しました"}"#);
        assert_eq!(err, ApiError::Rejected("スクレイピングに失敗しました".into()));
        assert_eq!(err.user_message("fallback"), "スクレイピングに失敗しました");
    }

    #[test]
    fn missing_detail_uses_fallback() {
        let err = ApiError::from_failure(502, r#"{"error": "bad gateway"}"#);
        assert_eq!(err, ApiError::Status(502));
        assert_eq!(err.user_message("結果の生成に失敗しました"), "結果の生成に失敗しました");
    }

    #[test]
    fn non_json_body_uses_fallback() {
        let err = ApiError::from_failure(503, "<html>Service Unavailable</html>");
        assert_eq!(err.user_message("fallback"), "fallback");
    }

    #[test]
    fn validation_list_detail_is_not_a_message() {
        let body = r#"{"detail": [{"loc": ["body", "birthdate"], "msg": "field required"}]}"#;
        let err = ApiError::from_failure(422, body);
        assert_eq!(err, ApiError::Status(422));
    }

    #[test]
    fn transport_errors_use_fallback() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.user_message("相性診断に失敗しました"), "相性診断に失敗しました");
    }
}
