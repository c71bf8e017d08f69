use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::AppConfig;
use crate::shared::confirm::{ConfirmHost, ConfirmService};
use crate::system::auth::context::AuthProvider;
use crate::system::auth::storage::TokenStore;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    log::debug!("API base: {}", config.api_base);

    provide_context(TokenStore::init(&config));
    provide_context(config);
    provide_context(AppGlobalContext::new());
    provide_context(ConfirmService::new());

    view! {
        <ConfigProvider>
            <AuthProvider>
                <AppShell />
                <ConfirmHost />
            </AuthProvider>
        </ConfigProvider>
    }
}
