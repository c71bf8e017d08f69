use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Successful response body as received
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 204 or blank body
    Empty,
    Json(Value),
    /// Body that is not valid JSON
    Text(String),
}

impl Payload {
    pub fn from_body(status: u16, body: String) -> Self {
        if status == 204 || body.trim().is_empty() {
            return Payload::Empty;
        }
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(body),
        }
    }

    /// Body as a JSON value; text becomes a JSON string
    pub fn into_value(self) -> Value {
        match self {
            Payload::Empty => Value::Null,
            Payload::Json(value) => value,
            Payload::Text(text) => Value::String(text),
        }
    }

    /// Decodes into `T`. An empty payload decodes as JSON `null`, so `()`,
    /// `Option<_>` and `serde_json::Value` accept it.
    pub fn decode<T: DeserializeOwned>(self, url: &str) -> Result<T, ApiError> {
        serde_json::from_value(self.into_value()).map_err(|e| ApiError::decode(url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
    }

    #[test]
    fn test_no_content_decodes_to_unit_and_none() {
        assert_eq!(Payload::from_body(204, String::new()), Payload::Empty);
        assert_eq!(Payload::from_body(200, "  ".into()), Payload::Empty);

        let unit: Result<(), _> = Payload::Empty.decode("/x");
        assert!(unit.is_ok());
        let row: Option<Row> = Payload::Empty.decode("/x").unwrap();
        assert_eq!(row, None);
    }

    #[test]
    fn test_204_ignores_body() {
        assert_eq!(Payload::from_body(204, "{\"id\":1}".into()), Payload::Empty);
    }

    #[test]
    fn test_json_and_text_fallback() {
        let payload = Payload::from_body(200, r#"{"id": 5}"#.into());
        assert_eq!(payload, Payload::Json(json!({"id": 5})));
        let row: Row = payload.decode("/x").unwrap();
        assert_eq!(row, Row { id: 5 });

        let payload = Payload::from_body(200, "ok".into());
        assert_eq!(payload, Payload::Text("ok".into()));
        let text: String = payload.decode("/x").unwrap();
        assert_eq!(text, "ok");
    }

    #[test]
    fn test_shape_mismatch_is_decode_error() {
        let err = Payload::Json(json!({"name": "x"}))
            .decode::<Row>("/api/productos")
            .unwrap_err();
        assert_eq!(err.kind, super::super::ApiErrorKind::Decode);
        assert_eq!(err.url.as_deref(), Some("/api/productos"));
    }
}
