use serde_json::Value;
use thiserror::Error;

/// Message shown for every transport-level failure
pub const UNREACHABLE_MESSAGE: &str = "No se pudo conectar con el servidor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Non-2xx response
    Http,
    /// fetch rejected (offline, DNS, CORS)
    Network,
    Timeout,
    Cancelled,
    /// Response body did not match the expected shape
    Decode,
    /// Rejected client-side before any request was sent
    Validation,
}

/// Normalized API failure. `status` is 0 for everything that is not an HTTP response.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: u16,
    pub message: String,
    pub raw: Option<Value>,
    pub url: Option<String>,
}

impl ApiError {
    /// Builds the error for a non-2xx response.
    ///
    /// The message prefers `title`, `detail`, `message` or `error` from a JSON
    /// body, then a short plain-text body, then the status line.
    pub fn http(status: u16, status_text: &str, raw: Option<Value>, url: &str) -> Self {
        let message = raw
            .as_ref()
            .and_then(message_from_body)
            .unwrap_or_else(|| status_line(status, status_text));

        Self {
            kind: ApiErrorKind::Http,
            status,
            message,
            raw,
            url: Some(url.to_string()),
        }
    }

    pub fn network(url: &str, detail: impl std::fmt::Display) -> Self {
        log::warn!("network failure for {}: {}", url, detail);
        Self {
            kind: ApiErrorKind::Network,
            status: 0,
            message: UNREACHABLE_MESSAGE.to_string(),
            raw: None,
            url: Some(url.to_string()),
        }
    }

    pub fn timeout(url: &str, timeout_ms: u32) -> Self {
        Self {
            kind: ApiErrorKind::Timeout,
            status: 0,
            message: format!(
                "El servidor no respondió en {} segundos",
                timeout_ms.div_ceil(1000)
            ),
            raw: None,
            url: Some(url.to_string()),
        }
    }

    pub fn cancelled(url: &str) -> Self {
        Self {
            kind: ApiErrorKind::Cancelled,
            status: 0,
            message: "Solicitud cancelada".to_string(),
            raw: None,
            url: Some(url.to_string()),
        }
    }

    pub fn decode(url: &str, detail: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            status: 0,
            message: format!("Respuesta inesperada del servidor: {}", detail),
            raw: None,
            url: Some(url.to_string()),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Validation,
            status: 0,
            message: message.into(),
            raw: None,
            url: None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Http && self.status == 401
    }

    /// True when the request never produced an HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            ApiErrorKind::Network | ApiErrorKind::Timeout | ApiErrorKind::Cancelled
        )
    }

    /// Message the backend put in the error body, if any
    pub fn backend_message(&self) -> Option<String> {
        self.raw.as_ref().and_then(message_from_body)
    }
}

fn status_line(status: u16, status_text: &str) -> String {
    let status_text = status_text.trim();
    if status_text.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {} {}", status, status_text)
    }
}

const MESSAGE_FIELDS: [&str; 4] = ["title", "detail", "message", "error"];
const MAX_TEXT_MESSAGE: usize = 300;

/// First non-empty human-readable message in an error body
pub fn message_from_body(body: &Value) -> Option<String> {
    match body {
        Value::Object(map) => MESSAGE_FIELDS.iter().find_map(|field| {
            map.get(*field).and_then(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                // `{"error": {"message": ".."}}`
                Value::Object(_) => message_from_body(v),
                _ => None,
            })
        }),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() || text.len() > MAX_TEXT_MESSAGE || text.starts_with('<') {
                None
            } else {
                Some(text.to_string())
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_field_priority() {
        let body = json!({"message": "m", "title": "t", "error": "e"});
        assert_eq!(message_from_body(&body).as_deref(), Some("t"));

        let body = json!({"error": "e", "detail": ""});
        assert_eq!(message_from_body(&body).as_deref(), Some("e"));

        let body = json!({"error": {"message": "anidado"}});
        assert_eq!(message_from_body(&body).as_deref(), Some("anidado"));
    }

    #[test]
    fn test_http_error_falls_back_to_status_line() {
        let err = ApiError::http(500, "Internal Server Error", Some(json!({"code": 9})), "/api/x");
        assert_eq!(err.message, "HTTP 500 Internal Server Error");
        assert_eq!(err.status, 500);
        assert_eq!(err.url.as_deref(), Some("/api/x"));

        let err = ApiError::http(502, "", None, "/api/x");
        assert_eq!(err.message, "HTTP 502");
    }

    #[test]
    fn test_plain_text_body_is_used_when_short() {
        let err = ApiError::http(400, "Bad Request", Some(json!("Stock insuficiente")), "/api/ventas");
        assert_eq!(err.message, "Stock insuficiente");

        let html = json!("<html><body>Bad gateway</body></html>");
        let err = ApiError::http(502, "Bad Gateway", Some(html), "/api/ventas");
        assert_eq!(err.message, "HTTP 502 Bad Gateway");
    }

    #[test]
    fn test_unauthorized_and_transport_flags() {
        let err = ApiError::http(401, "Unauthorized", None, "/auth/me");
        assert!(err.is_unauthorized());
        assert!(!err.is_transport());

        let err = ApiError::timeout("/auth/me", 30_000);
        assert_eq!(err.status, 0);
        assert!(err.is_transport());
        assert!(!err.message.is_empty());
        assert!(!err.is_unauthorized());
    }
}
