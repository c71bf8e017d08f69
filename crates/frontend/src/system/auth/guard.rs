use leptos::prelude::*;

use super::context::use_session;

/// Renders children only for an authenticated session
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=|| view! { <div class="guard-message">"Inicie sesión para continuar."</div> }
        >
            {children()}
        </Show>
    }
}

/// Renders children only when the current user holds `role`
/// (administrators pass every check)
#[component]
pub fn RequireRole(#[prop(into)] role: String, children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let allowed = move || session.is_authenticated() && session.has_role(&role);

    view! {
        <Show
            when=allowed
            fallback=|| view! { <div class="guard-message">"No tiene permisos para ver esta sección."</div> }
        >
            {children()}
        </Show>
    }
}
