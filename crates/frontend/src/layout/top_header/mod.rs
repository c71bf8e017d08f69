//! Top bar: navigation toggle, expiration bell, signed-in user, password
//! change and logout.

use crate::domain::a006_expiration::ui::bell::ExpirationBell;
use crate::layout::global_context::use_global_context;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use crate::system::pages::change_password::ChangePasswordForm;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let session = use_session();
    let changing_password = RwSignal::new(false);

    let is_sidebar_visible = move || ctx.left_open.get();

    let user_name = move || {
        session
            .me()
            .map(|p| format!("{} ({})", p.nombre, p.rol))
            .unwrap_or_default()
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar navegación" } else { "Mostrar navegación" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"ProfitUp Manager"</span>
            </div>

            <div class="top-header__actions">
                <ExpirationBell />

                <div class="top-header__user">
                    {icon("user")}
                    <span>{user_name}</span>
                </div>

                <button
                    class="top-header__icon-btn"
                    on:click=move |_| changing_password.set(true)
                    title="Cambiar contraseña"
                >
                    {icon("key")}
                </button>

                <button class="top-header__icon-btn" on:click=move |_| session.logout() title="Cerrar sesión">
                    {icon("log-out")}
                </button>
            </div>

            <Show when=move || changing_password.get()>
                <ChangePasswordForm on_close=Callback::new(move |_| changing_password.set(false)) />
            </Show>
        </div>
    }
}
