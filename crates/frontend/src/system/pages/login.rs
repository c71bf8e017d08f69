use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::context::use_session;
use crate::system::auth::session::LoginError;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();

    let correo = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let field_errors = RwSignal::new(FieldErrors::new());
    let error_message = RwSignal::new(None::<String>);
    let is_loading = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let correo_val = correo.get_untracked();
        let password_val = password.get_untracked();

        is_loading.set(true);
        error_message.set(None);
        field_errors.set(FieldErrors::new());

        spawn_local(async move {
            match session.login(&correo_val, &password_val).await {
                Ok(()) => {
                    password.try_set(String::new());
                }
                Err(LoginError::Validation(errors)) => {
                    field_errors.try_set(errors);
                }
                Err(e) => {
                    error_message.try_set(Some(e.to_string()));
                }
            }
            is_loading.try_set(false);
        });
    };

    let field_error = move |field: &'static str| {
        move || field_errors.with(|e| e.get(field).map(str::to_string))
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"ProfitUp Manager"</h1>
                <h2>"Iniciar sesión"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message" role="alert">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit novalidate>
                    <div class="form-group">
                        <label for="correo">"Correo"</label>
                        <input
                            type="email"
                            id="correo"
                            placeholder="usuario@empresa.com"
                            autocomplete="username"
                            prop:value=move || correo.get()
                            on:input=move |ev| correo.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                        {move || field_error("correo")().map(|msg| view! { <div class="field-error">{msg}</div> })}
                    </div>

                    <div class="form-group">
                        <label for="password">"Contraseña"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                        {move || field_error("password")().map(|msg| view! { <div class="field-error">{msg}</div> })}
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Ingresando..." } else { "Ingresar" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
