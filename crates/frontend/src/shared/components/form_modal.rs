use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use std::future::Future;

use crate::shared::http::ApiError;
use crate::shared::icons::icon;

/// Runs a confirmed save. `Ok(true)` closes the form, `Ok(false)` (declined)
/// keeps it open, an error goes to the banner.
pub fn submit_form<F, Fut>(
    saving: RwSignal<bool>,
    error: RwSignal<Option<String>>,
    on_done: Callback<()>,
    action: F,
) where
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<bool, ApiError>> + 'static,
{
    saving.set(true);
    error.set(None);
    spawn_local(async move {
        match action().await {
            Ok(true) => on_done.run(()),
            Ok(false) => {}
            Err(e) => {
                error.try_set(Some(e.message));
            }
        }
        saving.try_set(false);
    });
}

/// Create/edit dialog: header with close control, form body, cancel/save footer.
///
/// Closes on an overlay click only when both press and release happen on the
/// overlay itself, so selecting text inside the form never dismisses it.
#[component]
pub fn FormModal(
    #[prop(into)] title: String,
    on_close: Callback<()>,
    on_submit: Callback<()>,
    #[prop(into)] saving: Signal<bool>,
    /// Banner above the fields (backend errors)
    #[prop(into)]
    error: Signal<Option<String>>,
    #[prop(optional, into)] submit_text: Option<String>,
    children: Children,
) -> impl IntoView {
    let submit_text = submit_text.unwrap_or_else(|| "Guardar".to_string());
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    let close_deferred = move || {
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    view! {
        <div
            class="modal-overlay"
            style="z-index: 1000;"
            on:mousedown=move |ev| overlay_mouse_down.set(is_direct_overlay_event(&ev))
            on:click=move |ev| {
                let should_close = overlay_mouse_down.get_untracked()
                    && is_direct_overlay_event(&ev)
                    && !saving.get_untracked();
                overlay_mouse_down.set(false);
                if should_close {
                    close_deferred();
                }
            }
        >
            <form
                class="modal"
                style="position: relative;"
                role="dialog"
                aria-modal="true"
                novalidate
                on:submit=move |ev: ev::SubmitEvent| {
                    ev.prevent_default();
                    if !saving.get_untracked() {
                        on_submit.run(());
                    }
                }
            >
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <button
                        type="button"
                        class="button button--icon modal__close"
                        aria-label="Cerrar"
                        on:click=move |_| close_deferred()
                    >
                        {icon("x")}
                    </button>
                </div>

                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                    {children()}
                </div>

                <div class="modal-footer">
                    <button
                        type="button"
                        class="button button--secondary"
                        on:click=move |_| close_deferred()
                        disabled=move || saving.get()
                    >
                        "Cancelar"
                    </button>
                    <button
                        type="submit"
                        class="button button--primary"
                        disabled=move || saving.get()
                    >
                        {move || if saving.get() { "Guardando...".to_string() } else { submit_text.clone() }}
                    </button>
                </div>
            </form>
        </div>
    }
}
