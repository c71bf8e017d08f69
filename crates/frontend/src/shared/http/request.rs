use serde::Serialize;
use serde_json::Value;
use web_sys::FormData;

use super::cancel::CancelToken;
use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Serialized to JSON on send
    Json(Value),
    /// Sent verbatim
    Text(String),
    /// Multipart payload, sent as-is so the browser sets the boundary
    Form(FormData),
}

/// Body in its wire form
#[derive(Debug, Clone)]
pub enum WireBody {
    Text(String),
    Form(FormData),
}

/// Description of one API call, independent of how it is sent
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Relative path (joined to the API base) or absolute URL
    pub path: String,
    pub body: Option<RequestBody>,
    pub headers: Vec<(String, String)>,
    pub cancel: Option<CancelToken>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
            cancel: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::validation(format!("No se pudo serializar la solicitud: {}", e)))?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    pub fn form(mut self, form: FormData) -> Self {
        self.body = Some(RequestBody::Form(form));
        self
    }

    /// Appends `?query` (or `&query`) serialized with `serde_qs`; empty queries add nothing
    pub fn query<Q: Serialize>(mut self, query: &Q) -> Result<Self, ApiError> {
        let qs = serde_qs::to_string(query)
            .map_err(|e| ApiError::validation(format!("Filtro inválido: {}", e)))?;
        if !qs.is_empty() {
            let sep = if self.path.contains('?') { '&' } else { '?' };
            self.path.push(sep);
            self.path.push_str(&qs);
        }
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Header lookup, case-insensitive on the name
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header_value(name).is_some()
    }

    /// JSON body, when the request carries one
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            Some(RequestBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    /// Headers and body exactly as they go on the wire.
    ///
    /// GET drops any body. JSON bodies get `Content-Type: application/json`
    /// unless the caller already chose a content type; form payloads never get
    /// one.
    pub fn wire_parts(&self) -> (Vec<(String, String)>, Option<WireBody>) {
        let mut headers = self.headers.clone();

        if self.method == HttpMethod::Get {
            return (headers, None);
        }

        let body = match &self.body {
            None => None,
            Some(RequestBody::Form(form)) => Some(WireBody::Form(form.clone())),
            Some(RequestBody::Text(text)) => Some(WireBody::Text(text.clone())),
            Some(RequestBody::Json(value)) => {
                if !self.has_header("content-type") {
                    headers.push(("Content-Type".to_string(), "application/json".to_string()));
                }
                Some(WireBody::Text(value.to_string()))
            }
        };

        (headers, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content_type(headers: &[(String, String)]) -> Vec<&str> {
        headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = ApiRequest::post("/api/productos")
            .json(&json!({"nombre": "Cemento"}))
            .unwrap();
        let (headers, body) = request.wire_parts();
        assert_eq!(content_type(&headers), vec!["application/json"]);
        match body {
            Some(WireBody::Text(text)) => {
                let parsed: Value = serde_json::from_str(&text).unwrap();
                assert_eq!(parsed, json!({"nombre": "Cemento"}));
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn test_explicit_content_type_wins() {
        let request = ApiRequest::put("/api/productos/1")
            .header("content-type", "application/merge-patch+json")
            .json(&json!({"nombre": "Cal"}))
            .unwrap();
        let (headers, _) = request.wire_parts();
        assert_eq!(content_type(&headers), vec!["application/merge-patch+json"]);
    }

    #[test]
    fn test_get_never_carries_body() {
        let request = ApiRequest::get("/api/productos")
            .json(&json!({"ignored": true}))
            .unwrap();
        let (headers, body) = request.wire_parts();
        assert!(body.is_none());
        assert!(content_type(&headers).is_empty());
    }

    #[test]
    fn test_text_body_sent_verbatim() {
        let request = ApiRequest::post("/api/notas").text("hola");
        let (headers, body) = request.wire_parts();
        assert!(content_type(&headers).is_empty());
        assert!(matches!(body, Some(WireBody::Text(ref t)) if t == "hola"));
    }

    #[test]
    fn test_query_serialization() {
        #[derive(Serialize)]
        struct Filter {
            #[serde(skip_serializing_if = "Option::is_none")]
            buscar: Option<String>,
            pagina: usize,
        }

        let request = ApiRequest::get("/api/clientes")
            .query(&Filter { buscar: Some("andes".into()), pagina: 2 })
            .unwrap();
        assert_eq!(request.path, "/api/clientes?buscar=andes&pagina=2");

        let request = ApiRequest::get("/api/clientes?orden=nombre")
            .query(&Filter { buscar: None, pagina: 1 })
            .unwrap();
        assert_eq!(request.path, "/api/clientes?orden=nombre&pagina=1");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = ApiRequest::get("/x").header("Authorization", "Bearer a");
        assert!(request.has_header("authorization"));
        assert_eq!(request.header_value("AUTHORIZATION"), Some("Bearer a"));
    }
}
