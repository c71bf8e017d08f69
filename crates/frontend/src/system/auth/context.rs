use contracts::system::auth::Profile;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

use super::api::{AuthBackend, HttpAuthBackend};
use super::session::{self, LoginError, PasswordChangeError, SessionState};
use super::storage::TokenStore;
use crate::shared::api_utils::AppConfig;
use crate::shared::http::HttpClient;

/// Session shared through context
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: RwSignal<SessionState>,
    pub tokens: TokenStore,
    http: StoredValue<HttpClient>,
    backend: StoredValue<Rc<dyn AuthBackend>, LocalStorage>,
}

impl SessionContext {
    pub fn new(config: &AppConfig, tokens: TokenStore) -> Self {
        let http = HttpClient::from_config(config);
        let backend: Rc<dyn AuthBackend> = Rc::new(HttpAuthBackend::new(http.clone()));
        let initial = match tokens.token_untracked() {
            Some(token) => SessionState::validating(token),
            None => SessionState::anonymous(),
        };
        Self {
            state: RwSignal::new(initial),
            tokens,
            http: StoredValue::new(http),
            backend: StoredValue::new_local(backend),
        }
    }

    pub fn http(&self) -> HttpClient {
        self.http.get_value()
    }

    pub fn me(&self) -> Option<Profile> {
        self.state.with(|s| s.me.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.state.with(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn ready(&self) -> bool {
        self.state.with(|s| s.ready)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.state.with(|s| s.has_role(role))
    }

    /// Validates the persisted token, if any
    pub fn restore(&self) {
        let ctx = *self;
        spawn_local(async move {
            let backend = ctx.backend.get_value();
            let next = session::restore(&*backend, &ctx.tokens).await;
            ctx.state.try_set(next);
        });
    }

    pub async fn login(&self, correo: &str, password: &str) -> Result<(), LoginError> {
        let backend = self.backend.get_value();
        let next = session::login(&*backend, &self.tokens, correo, password).await?;
        self.state.set(next);
        Ok(())
    }

    pub fn logout(&self) {
        let ctx = *self;
        spawn_local(async move {
            let backend = ctx.backend.get_value();
            let next = session::logout(&*backend, &ctx.tokens).await;
            ctx.state.try_set(next);
        });
    }

    pub fn expire(&self) {
        if self.state.with_untracked(|s| s.token.is_some() || s.me.is_some()) {
            self.state.set(session::expire(&self.tokens));
        }
    }

    pub async fn change_password(&self, current: &str, new: &str) -> Result<(), PasswordChangeError> {
        let backend = self.backend.get_value();
        let state = self.state.get_untracked();
        session::change_password(&*backend, &state, current, new).await
    }

    /// Another tab changed the token: drop the session or re-validate
    fn on_external_token(&self, token: Option<String>) {
        let current = self.state.with_untracked(|s| s.token.clone());
        if token == current {
            return;
        }
        match token {
            None => self.expire(),
            Some(token) => {
                let ctx = *self;
                spawn_local(async move {
                    let backend = ctx.backend.get_value();
                    let next = session::revalidate(&*backend, &ctx.tokens, Some(token)).await;
                    ctx.state.try_set(next);
                });
            }
        }
    }
}

/// Provides [`SessionContext`] and starts session restore
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let tokens = use_context::<TokenStore>().unwrap_or_else(|| TokenStore::init(&config));
    let ctx = SessionContext::new(&config, tokens);

    ctx.restore();
    tokens.subscribe(move |token| ctx.on_external_token(token));

    provide_context(ctx);

    children()
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("AuthProvider not found in component tree")
}
