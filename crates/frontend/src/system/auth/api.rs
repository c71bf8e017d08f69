use async_trait::async_trait;
use contracts::system::auth::{ChangePasswordRequest, LoginRequest, LoginResponse, Profile};

use crate::shared::http::{execute, fetch, ApiError, ApiRequest, Transport};

/// Backend auth endpoints used by the session
#[async_trait(?Send)]
pub trait AuthBackend {
    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
    /// `GET /auth/me`
    async fn me(&self, token: &str) -> Result<Profile, ApiError>;
    /// `POST /auth/logout`
    async fn logout(&self, token: Option<&str>) -> Result<(), ApiError>;
    /// `POST /auth/change-password`
    async fn change_password(
        &self,
        token: &str,
        request: &ChangePasswordRequest,
    ) -> Result<(), ApiError>;
}

fn bearer(request: ApiRequest, token: &str) -> ApiRequest {
    request.header("Authorization", format!("Bearer {}", token))
}

/// [`AuthBackend`] over any transport. Deliberately not the authenticated
/// client: a 401 here is an answer, not a session expiry.
pub struct HttpAuthBackend<T: Transport> {
    transport: T,
}

impl<T: Transport> HttpAuthBackend<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait(?Send)]
impl<T: Transport> AuthBackend for HttpAuthBackend<T> {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        fetch(&self.transport, ApiRequest::post("/auth/login").json(request)?).await
    }

    async fn me(&self, token: &str) -> Result<Profile, ApiError> {
        fetch(&self.transport, bearer(ApiRequest::get("/auth/me"), token)).await
    }

    async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
        let request = ApiRequest::post("/auth/logout");
        let request = match token {
            Some(token) => bearer(request, token),
            None => request,
        };
        execute(&self.transport, request).await
    }

    async fn change_password(
        &self,
        token: &str,
        request: &ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        let request = bearer(ApiRequest::post("/auth/change-password"), token).json(request)?;
        execute(&self.transport, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_me_sends_bearer() {
        let mock = MockTransport::new();
        mock.reply_json(json!({"id": 3, "nombre": "Ana", "correo": "ana@x.ec", "rol": "Vendedor"}));
        let backend = HttpAuthBackend::new(mock);

        let profile = block_on(backend.me("t1")).unwrap();
        assert_eq!(profile.rol, "Vendedor");

        let sent = backend.transport.requests();
        assert_eq!(sent[0].path, "/auth/me");
        assert_eq!(sent[0].header_value("authorization"), Some("Bearer t1"));
    }

    #[test]
    fn test_login_posts_credentials() {
        let mock = MockTransport::new();
        mock.reply_json(json!({"token": "abc"}));
        let backend = HttpAuthBackend::new(mock);

        let response = block_on(backend.login(&LoginRequest {
            correo: "ana@x.ec".into(),
            password: "secreto".into(),
        }))
        .unwrap();
        assert_eq!(response.token, "abc");
        assert!(response.user.is_none());
        assert_eq!(
            backend.transport.calls(),
            vec![(HttpMethod::Post, "/auth/login".to_string())]
        );
        assert_eq!(
            backend.transport.last_body(),
            Some(json!({"correo": "ana@x.ec", "password": "secreto"}))
        );
    }

    #[test]
    fn test_logout_without_token_has_no_header() {
        let backend = HttpAuthBackend::new(MockTransport::new());
        block_on(backend.logout(None)).unwrap();
        assert!(!backend.transport.requests()[0].has_header("Authorization"));
    }
}
