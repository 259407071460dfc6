use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by `ApiClient`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Session expired, please sign in again")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Endpoint not found")]
    NotFound,

    #[error("Uploaded file is too large")]
    PayloadTooLarge,

    #[error("{0}")]
    Validation(String),

    #[error("Internal server error")]
    Internal,

    #[error("Bad gateway")]
    BadGateway,

    #[error("Service temporarily unavailable")]
    Unavailable,

    #[error("Gateway timeout")]
    GatewayTimeout,

    #[error("Request failed ({0}): {1}")]
    Status(u16, String),

    #[error("Request timed out, check the network connection")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to serialize request: {0}")]
    Serialize(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Maps a non-2xx response to an error. `body` is the parsed JSON body,
    /// or `Value::Null` when it was empty or not JSON.
    pub fn from_status(status: u16, body: &Value) -> Self {
        match status {
            400 => ApiError::BadRequest(
                server_message(body).unwrap_or_else(|| "Invalid request parameters".to_string()),
            ),
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            413 => ApiError::PayloadTooLarge,
            422 => ApiError::Validation(validation_message(body)),
            500 => ApiError::Internal,
            502 => ApiError::BadGateway,
            503 => ApiError::Unavailable,
            504 => ApiError::GatewayTimeout,
            _ => ApiError::Status(
                status,
                server_message(body).unwrap_or_else(|| format!("Request failed ({})", status)),
            ),
        }
    }

    /// HTTP status behind this error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest(_) => Some(400),
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden => Some(403),
            ApiError::NotFound => Some(404),
            ApiError::PayloadTooLarge => Some(413),
            ApiError::Validation(_) => Some(422),
            ApiError::Internal => Some(500),
            ApiError::BadGateway => Some(502),
            ApiError::Unavailable => Some(503),
            ApiError::GatewayTimeout => Some(504),
            ApiError::Status(code, _) => Some(*code),
            _ => None,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s >= 500)
    }
}

/// `message`, or a string `detail` (FastAPI's `HTTPException`)
fn server_message(body: &Value) -> Option<String> {
    ["message", "detail"]
        .iter()
        .filter_map(|field| body.get(*field).and_then(|v| v.as_str()))
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

/// FastAPI validation errors come as `detail: [{ "msg": ... }, ...]`.
fn validation_message(body: &Value) -> String {
    if let Some(items) = body.get("detail").and_then(|d| d.as_array()) {
        let msgs: Vec<&str> = items
            .iter()
            .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
            .collect();
        if !msgs.is_empty() {
            return msgs.join(", ");
        }
    }
    server_message(body).unwrap_or_else(|| "Data validation failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bad_request_prefers_server_message() {
        let err = ApiError::from_status(400, &json!({"detail": "Invalid project status"}));
        assert_eq!(err, ApiError::BadRequest("Invalid project status".into()));
        let err = ApiError::from_status(400, &Value::Null);
        assert_eq!(err.to_string(), "Invalid request parameters");
    }

    #[test]
    fn test_validation_joins_detail_messages() {
        let body = json!({"detail": [
            {"loc": ["body", "name"], "msg": "field required"},
            {"loc": ["body", "unit"], "msg": "ensure this value has at least 1 characters"}
        ]});
        assert_eq!(
            ApiError::from_status(422, &body).to_string(),
            "field required, ensure this value has at least 1 characters"
        );
        assert_eq!(
            ApiError::from_status(422, &json!({})).to_string(),
            "Data validation failed"
        );
    }

    #[test]
    fn test_fixed_status_mapping() {
        assert_eq!(ApiError::from_status(401, &Value::Null), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(413, &Value::Null), ApiError::PayloadTooLarge);
        assert_eq!(ApiError::from_status(504, &Value::Null), ApiError::GatewayTimeout);
        assert_eq!(
            ApiError::from_status(418, &Value::Null),
            ApiError::Status(418, "Request failed (418)".into())
        );
    }

    #[test]
    fn test_server_error_classification() {
        assert!(ApiError::Internal.is_server_error());
        assert!(ApiError::Status(507, String::new()).is_server_error());
        assert!(!ApiError::NotFound.is_server_error());
        assert!(!ApiError::Timeout.is_server_error());
        assert!(!ApiError::Network("offline".into()).is_server_error());
    }
}
