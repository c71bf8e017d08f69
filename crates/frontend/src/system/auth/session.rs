//! Session state machine.
//!
//! ```text
//! Initial ──token──▶ Validating ──me ok──▶ Authenticated
//!    │                   └──me failed──▶ Unauthenticated (token discarded)
//!    └──no token──────────────────────▶ Unauthenticated
//! ```
//!
//! Functions here take the backend and token persistence as traits and return
//! the next [`SessionState`]; the context only stores the result.

use contracts::shared::validation::{validate_login, validate_password, FieldErrors};
use contracts::system::auth::{ChangePasswordRequest, LoginRequest, Profile};
use thiserror::Error;

use super::api::AuthBackend;
use super::storage::TokenPersistence;
use crate::shared::http::error::UNREACHABLE_MESSAGE;
use crate::shared::http::ApiError;

pub const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub me: Option<Profile>,
    pub token: Option<String>,
    /// False only while a persisted token is being validated
    pub ready: bool,
}

impl SessionState {
    pub fn validating(token: String) -> Self {
        Self {
            me: None,
            token: Some(token),
            ready: false,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            me: None,
            token: None,
            ready: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.me.is_some() && self.token.is_some()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.me.as_ref().is_some_and(|p| p.has_role(role))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoginError {
    #[error("{}", .0.summary())]
    Validation(FieldErrors),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{}", UNREACHABLE_MESSAGE)]
    Unreachable,
}

impl From<ApiError> for LoginError {
    fn from(err: ApiError) -> Self {
        if err.is_transport() {
            LoginError::Unreachable
        } else {
            LoginError::InvalidCredentials(
                err.backend_message()
                    .unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PasswordChangeError {
    #[error("{}", .0.summary())]
    Validation(FieldErrors),
    #[error("La sesión no está activa")]
    NotAuthenticated,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Startup: validate a persisted token, if any
pub async fn restore(backend: &dyn AuthBackend, tokens: &dyn TokenPersistence) -> SessionState {
    revalidate(backend, tokens, tokens.current()).await
}

/// Validates `token` with `GET /auth/me`. A rejected token is discarded.
pub async fn revalidate(
    backend: &dyn AuthBackend,
    tokens: &dyn TokenPersistence,
    token: Option<String>,
) -> SessionState {
    let Some(token) = token else {
        return SessionState::anonymous();
    };

    match backend.me(&token).await {
        Ok(profile) => {
            log::info!("session restored for {}", profile.correo);
            SessionState {
                me: Some(profile),
                token: Some(token),
                ready: true,
            }
        }
        Err(err) => {
            log::info!("stored token rejected ({}), discarding", err.status);
            tokens.clear();
            SessionState::anonymous()
        }
    }
}

/// Validates locally, then authenticates. The current state is untouched on error.
pub async fn login(
    backend: &dyn AuthBackend,
    tokens: &dyn TokenPersistence,
    correo: &str,
    password: &str,
) -> Result<SessionState, LoginError> {
    let correo = correo.trim();
    validate_login(correo, password).map_err(LoginError::Validation)?;

    let response = backend
        .login(&LoginRequest {
            correo: correo.to_string(),
            password: password.to_string(),
        })
        .await?;

    tokens.save(&response.token);

    let me = match response.user {
        Some(profile) => Some(profile),
        None => match backend.me(&response.token).await {
            Ok(profile) => Some(profile),
            Err(err) => {
                log::warn!("profile fetch after login failed: {}", err);
                None
            }
        },
    };

    log::info!("logged in as {}", correo);
    Ok(SessionState {
        me,
        token: Some(response.token),
        ready: true,
    })
}

/// Best-effort server logout; local state is cleared regardless
pub async fn logout(backend: &dyn AuthBackend, tokens: &dyn TokenPersistence) -> SessionState {
    let token = tokens.current();
    if let Err(err) = backend.logout(token.as_deref()).await {
        log::debug!("logout call failed, ignoring: {}", err);
    }
    tokens.clear();
    log::info!("logged out");
    SessionState::anonymous()
}

/// Server rejected the token (401) or another tab removed it
pub fn expire(tokens: &dyn TokenPersistence) -> SessionState {
    tokens.clear();
    log::info!("session expired");
    SessionState::anonymous()
}

pub fn validate_password_change(current: &str, new: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.check(
        "current_password",
        validate_password(current, "La contraseña actual"),
    );
    errors.check("new_password", validate_password(new, "La nueva contraseña"));
    if current == new {
        errors.check(
            "new_password",
            Err("La nueva contraseña debe ser distinta de la actual".to_string()),
        );
    }
    errors.into_result()
}

pub async fn change_password(
    backend: &dyn AuthBackend,
    state: &SessionState,
    current: &str,
    new: &str,
) -> Result<(), PasswordChangeError> {
    validate_password_change(current, new).map_err(PasswordChangeError::Validation)?;
    let token = state
        .token
        .as_deref()
        .ok_or(PasswordChangeError::NotAuthenticated)?;
    backend
        .change_password(
            token,
            &ChangePasswordRequest {
                current_password: current.to_string(),
                new_password: new.to_string(),
            },
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use crate::system::auth::api::HttpAuthBackend;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryTokens(RefCell<Option<String>>);

    impl MemoryTokens {
        fn with(token: &str) -> Self {
            Self(RefCell::new(Some(token.to_string())))
        }
    }

    impl TokenPersistence for MemoryTokens {
        fn current(&self) -> Option<String> {
            self.0.borrow().clone()
        }
        fn save(&self, token: &str) {
            *self.0.borrow_mut() = Some(token.to_string());
        }
        fn clear(&self) {
            *self.0.borrow_mut() = None;
        }
    }

    fn ana() -> serde_json::Value {
        json!({"id": 1, "nombre": "Ana", "correo": "ana@profitup.ec", "rol": "Administrador"})
    }

    fn backend() -> HttpAuthBackend<MockTransport> {
        HttpAuthBackend::new(MockTransport::new())
    }

    #[test]
    fn test_restore_without_token_skips_network() {
        let b = backend();
        let state = block_on(restore(&b, &MemoryTokens::default()));
        assert_eq!(state, SessionState::anonymous());
        assert_eq!(b.transport().request_count(), 0);
    }

    #[test]
    fn test_restore_valid_token() {
        let b = backend();
        b.transport().reply_json(ana());
        let tokens = MemoryTokens::with("t1");
        let state = block_on(restore(&b, &tokens));
        assert!(state.ready);
        assert!(state.is_authenticated());
        assert_eq!(state.token.as_deref(), Some("t1"));
    }

    #[test]
    fn test_restore_rejected_token_is_discarded() {
        let b = backend();
        b.transport().reply_status(401, json!({"message": "Token expirado"}));
        let tokens = MemoryTokens::with("stale");
        let state = block_on(restore(&b, &tokens));
        assert!(state.ready);
        assert!(!state.is_authenticated());
        assert_eq!(tokens.current(), None);
    }

    #[test]
    fn test_short_password_fails_without_network() {
        let b = backend();
        let tokens = MemoryTokens::default();
        let err = block_on(login(&b, &tokens, "ana@profitup.ec", "123")).unwrap_err();
        match err {
            LoginError::Validation(errors) => assert_eq!(
                errors.get("password"),
                Some("La contraseña debe tener al menos 6 caracteres")
            ),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(b.transport().request_count(), 0);
    }

    #[test]
    fn test_rejected_login_uses_backend_message() {
        let b = backend();
        b.transport().reply_status(401, json!({"message": "Credenciales inválidas"}));
        let tokens = MemoryTokens::default();
        let err = block_on(login(&b, &tokens, "ana@profitup.ec", "secreto")).unwrap_err();
        assert_eq!(
            err,
            LoginError::InvalidCredentials("Credenciales inválidas".to_string())
        );
        assert_eq!(tokens.current(), None);
    }

    #[test]
    fn test_rejected_login_without_message() {
        let b = backend();
        b.transport().reply_status(400, json!({}));
        let err = block_on(login(&b, &MemoryTokens::default(), "ana@profitup.ec", "secreto"))
            .unwrap_err();
        assert_eq!(err.to_string(), INVALID_CREDENTIALS);
    }

    #[test]
    fn test_unreachable_login() {
        let b = backend();
        b.transport().fail_network();
        let err = block_on(login(&b, &MemoryTokens::default(), "ana@profitup.ec", "secreto"))
            .unwrap_err();
        assert_eq!(err, LoginError::Unreachable);
        assert_eq!(err.to_string(), "No se pudo conectar con el servidor");
    }

    #[test]
    fn test_login_with_inline_profile() {
        let b = backend();
        b.transport().reply_json(json!({"token": "t9", "usuario": ana()}));
        let tokens = MemoryTokens::default();
        let state = block_on(login(&b, &tokens, " ana@profitup.ec ", "secreto")).unwrap();
        assert!(state.is_authenticated());
        assert_eq!(tokens.current().as_deref(), Some("t9"));
        assert_eq!(b.transport().request_count(), 1);
    }

    #[test]
    fn test_login_profile_fetch_failure_keeps_token() {
        let b = backend();
        b.transport()
            .reply_json(json!({"token": "t9"}))
            .reply_status(500, json!({}));
        let tokens = MemoryTokens::default();
        let state = block_on(login(&b, &tokens, "ana@profitup.ec", "secreto")).unwrap();
        assert_eq!(state.token.as_deref(), Some("t9"));
        assert!(state.me.is_none());
        assert!(!state.is_authenticated());
        assert_eq!(tokens.current().as_deref(), Some("t9"));
        assert_eq!(
            b.transport().calls(),
            vec![
                (HttpMethod::Post, "/auth/login".to_string()),
                (HttpMethod::Get, "/auth/me".to_string()),
            ]
        );
    }

    #[test]
    fn test_logout_clears_even_when_call_fails() {
        let b = backend();
        b.transport().fail_network();
        let tokens = MemoryTokens::with("t1");
        let state = block_on(logout(&b, &tokens));
        assert_eq!(state, SessionState::anonymous());
        assert_eq!(tokens.current(), None);
    }

    #[test]
    fn test_has_role() {
        let mut state = SessionState::anonymous();
        assert!(!state.has_role("Vendedor"));
        state.me = Some(Profile {
            id: 2,
            nombre: "Luis".into(),
            correo: "luis@profitup.ec".into(),
            rol: "Bodeguero".into(),
            estado: None,
        });
        assert!(state.has_role("Bodeguero"));
        assert!(!state.has_role("Vendedor"));
    }

    #[test]
    fn test_password_change_validation() {
        let errors = validate_password_change("secreto", "secreto").unwrap_err();
        assert!(errors.get("new_password").is_some());
        assert!(validate_password_change("secreto", "nuevo12").is_ok());

        let b = backend();
        let state = SessionState::anonymous();
        let err = block_on(change_password(&b, &state, "secreto", "nuevo12")).unwrap_err();
        assert_eq!(err, PasswordChangeError::NotAuthenticated);
        assert_eq!(b.transport().request_count(), 0);
    }
}
