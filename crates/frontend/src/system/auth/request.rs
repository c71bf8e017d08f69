//! Authenticated request hook.
//!
//! Every feature hook owns one [`AuthedClient`]: it injects the bearer token,
//! tracks `loading`/`error` for that hook instance and reports 401 responses to
//! the session. Load failures land in `error`; failed row actions land in
//! `action_error` so the table stays visible.

use async_trait::async_trait;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::rc::Rc;

use super::context::use_session;
use crate::shared::http::{fetch, ApiError, ApiErrorKind, ApiRequest, Payload, Transport};

/// Adds `Authorization: Bearer <token>` unless the caller set one
pub fn authorize(request: ApiRequest, token: Option<&str>) -> ApiRequest {
    match token {
        Some(token) if !request.has_header("authorization") => {
            request.header("Authorization", format!("Bearer {}", token))
        }
        _ => request,
    }
}

/// Loading and last errors of one hook instance
#[derive(Clone, Copy)]
pub struct RequestStatus {
    in_flight: RwSignal<u32>,
    pub error: RwSignal<Option<ApiError>>,
    pub action_error: RwSignal<Option<ApiError>>,
}

impl RequestStatus {
    pub fn new() -> Self {
        Self {
            in_flight: RwSignal::new(0),
            error: RwSignal::new(None),
            action_error: RwSignal::new(None),
        }
    }

    /// True until the last overlapping call settles
    pub fn loading(&self) -> bool {
        self.in_flight.get() > 0
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.with(|e| e.as_ref().map(|e| e.message.clone()))
    }

    pub fn action_error_message(&self) -> Option<String> {
        self.action_error.with(|e| e.as_ref().map(|e| e.message.clone()))
    }

    fn enter(&self) -> InFlight {
        self.in_flight.update(|n| *n += 1);
        InFlight(self.in_flight)
    }

    /// Clears `slot`, runs `work` and stores its failure in `slot`
    async fn record<T>(
        &self,
        slot: RwSignal<Option<ApiError>>,
        work: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        slot.try_set(None);
        let _in_flight = self.enter();
        let result = work.await;
        if let Err(err) = &result {
            if err.kind != ApiErrorKind::Cancelled {
                slot.try_set(Some(err.clone()));
            }
        }
        result
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Decrements the in-flight counter on drop, whatever the outcome
struct InFlight(RwSignal<u32>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.try_update(|n| *n = n.saturating_sub(1));
    }
}

#[derive(Clone, Copy)]
pub struct AuthedClient {
    transport: StoredValue<Rc<dyn Transport>, LocalStorage>,
    token: Signal<Option<String>>,
    pub status: RequestStatus,
    on_unauthorized: Option<Callback<()>>,
}

impl AuthedClient {
    pub fn new(
        transport: Rc<dyn Transport>,
        token: Signal<Option<String>>,
        on_unauthorized: Option<Callback<()>>,
    ) -> Self {
        Self {
            transport: StoredValue::new_local(transport),
            token,
            status: RequestStatus::new(),
            on_unauthorized,
        }
    }

    pub fn loading(&self) -> bool {
        self.status.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.status.error_message()
    }

    pub fn action_error(&self) -> Option<String> {
        self.status.action_error_message()
    }

    pub fn clear_action_error(&self) {
        self.status.action_error.set(None);
    }

    /// Runs a load; any failure, decoding included, becomes `error`
    pub async fn track<T>(
        &self,
        work: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        self.status.record(self.status.error, work).await
    }

    /// Runs a row action; a failure becomes `action_error`
    pub async fn track_action<T>(
        &self,
        work: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        self.status.record(self.status.action_error, work).await
    }

    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.track(fetch(self, request)).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: impl Into<String>) -> Result<T, ApiError> {
        self.call(ApiRequest::get(path)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: impl Into<String>,
        body: &B,
    ) -> Result<T, ApiError> {
        let path = path.into();
        self.track(async { fetch(self, ApiRequest::post(path).json(body)?).await })
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: impl Into<String>,
        body: &B,
    ) -> Result<T, ApiError> {
        let path = path.into();
        self.track(async { fetch(self, ApiRequest::put(path).json(body)?).await })
            .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: impl Into<String>,
        body: &B,
    ) -> Result<T, ApiError> {
        let path = path.into();
        self.track(async { fetch(self, ApiRequest::patch(path).json(body)?).await })
            .await
    }

    pub async fn del<T: DeserializeOwned>(&self, path: impl Into<String>) -> Result<T, ApiError> {
        self.call(ApiRequest::delete(path)).await
    }
}

#[async_trait(?Send)]
impl Transport for AuthedClient {
    async fn send(&self, request: ApiRequest) -> Result<Payload, ApiError> {
        let _in_flight = self.status.enter();
        let request = authorize(request, self.token.get_untracked().as_deref());
        let transport = self.transport.get_value();

        let result = transport.send(request).await;
        if let Err(err) = &result {
            if err.is_unauthorized() {
                if let Some(handler) = self.on_unauthorized {
                    handler.run(());
                }
            }
        }
        result
    }
}

/// New hook instance bound to the current session
pub fn use_api() -> AuthedClient {
    let session = use_session();
    let tokens = session.tokens;
    let on_unauthorized = Callback::new(move |_: ()| session.expire());
    AuthedClient::new(
        Rc::new(session.http()),
        Signal::derive(move || tokens.token()),
        Some(on_unauthorized),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::components::list_state::{list_view, ListView};
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use contracts::system::users::User;
    use futures::executor::block_on;
    use serde_json::{json, Value};

    fn client(mock: &Rc<MockTransport>, token: Option<&str>) -> AuthedClient {
        AuthedClient::new(
            mock.clone(),
            Signal::stored(token.map(str::to_string)),
            None,
        )
    }

    #[test]
    fn test_bearer_injected() {
        let request = authorize(ApiRequest::get("/api/productos"), Some("abc"));
        assert_eq!(request.header_value("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn test_no_token_no_header() {
        let request = authorize(ApiRequest::get("/api/productos"), None);
        assert!(!request.has_header("authorization"));
    }

    #[test]
    fn test_explicit_header_wins() {
        let request = ApiRequest::get("/api/productos").header("authorization", "Bearer other");
        let request = authorize(request, Some("abc"));
        let values: Vec<_> = request
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("authorization"))
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(values, vec!["Bearer other"]);
    }

    #[test]
    fn test_call_sends_bearer_and_decodes() {
        let mock = Rc::new(MockTransport::new());
        mock.reply_json(json!({"ok": true}));
        let api = client(&mock, Some("abc"));
        let body: Value = block_on(api.get("/auth/users")).unwrap();
        assert_eq!(body, json!({"ok": true}));
        let sent = mock.requests();
        assert_eq!(sent[0].header_value("Authorization"), Some("Bearer abc"));
        assert!(!api.loading());
        assert_eq!(api.error(), None);
    }

    #[test]
    fn test_http_failure_recorded_and_returned() {
        let mock = Rc::new(MockTransport::new());
        mock.reply_status(500, json!({"message": "Fallo interno"}));
        let api = client(&mock, None);
        let err = block_on(api.get::<Value>("/api/clientes")).unwrap_err();
        assert_eq!(err.status, 500);
        assert_eq!(api.error().as_deref(), Some("Fallo interno"));
        assert!(!api.loading());
    }

    #[test]
    fn test_decode_failure_recorded() {
        let mock = Rc::new(MockTransport::new());
        mock.reply_json(json!({"unexpected": "shape"}));
        let api = client(&mock, None);
        let result = block_on(api.get::<Vec<User>>("/auth/users"));
        assert_eq!(result.unwrap_err().kind, ApiErrorKind::Decode);
        assert!(api.error().is_some());
        assert!(!api.loading());
    }

    #[test]
    fn test_tracked_feature_call_records_decode_failure() {
        let mock = Rc::new(MockTransport::new());
        mock.reply_json(json!({"unexpected": "shape"}));
        let api = client(&mock, None);
        let result = block_on(api.track(crate::system::users::api::fetch_users(&api)));
        assert!(result.is_err());
        let view = list_view(api.loading(), api.error(), false, false);
        assert!(matches!(view, ListView::Error(_)));
    }

    #[test]
    fn test_error_cleared_when_next_call_starts() {
        let mock = Rc::new(MockTransport::new());
        mock.reply_status(500, json!({"message": "Fallo"}));
        mock.reply_json(json!([]));
        let api = client(&mock, None);
        assert!(block_on(api.get::<Value>("/api/bodegas")).is_err());
        assert!(api.error().is_some());
        assert!(block_on(api.get::<Value>("/api/bodegas")).is_ok());
        assert_eq!(api.error(), None);
    }

    #[test]
    fn test_action_failure_kept_apart_from_load_error() {
        let mock = Rc::new(MockTransport::new());
        mock.reply_status(409, json!({"message": "No permitido"}));
        let api = client(&mock, None);
        let result = block_on(api.track_action(crate::shared::http::execute(
            &api,
            ApiRequest::patch("/auth/users/1/estado"),
        )));
        assert!(result.is_err());
        assert_eq!(api.action_error().as_deref(), Some("No permitido"));
        assert_eq!(api.error(), None);
        api.clear_action_error();
        assert_eq!(api.action_error(), None);
    }

    #[test]
    fn test_overlapping_calls_keep_loading() {
        let status = RequestStatus::new();
        let first = status.enter();
        let second = status.enter();
        drop(first);
        assert!(status.loading());
        drop(second);
        assert!(!status.loading());
    }

    #[test]
    fn test_unauthorized_runs_handler() {
        let mock = Rc::new(MockTransport::new());
        mock.reply_status(401, json!({"message": "Token expirado"}));
        let expired = RwSignal::new(false);
        let api = AuthedClient::new(
            mock.clone(),
            Signal::stored(Some("old".to_string())),
            Some(Callback::new(move |_: ()| expired.set(true))),
        );
        let err = block_on(api.get::<Value>("/api/productos")).unwrap_err();
        assert!(err.is_unauthorized());
        assert!(expired.get_untracked());
        assert_eq!(mock.calls(), vec![(HttpMethod::Get, "/api/productos".to_string())]);
    }
}
