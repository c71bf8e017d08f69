use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent};

use super::{use_confirm, ConfirmService};
use crate::shared::icons::icon;

/// Page state saved while the dialog is open
struct ScrollLock {
    previous_overflow: String,
    previous_focus: Option<HtmlElement>,
}

impl ScrollLock {
    fn acquire() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let body = document.body()?;
        let previous_overflow = body.style().get_property_value("overflow").unwrap_or_default();
        let _ = body.style().set_property("overflow", "hidden");
        let previous_focus = document
            .active_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        Some(Self {
            previous_overflow,
            previous_focus,
        })
    }

    fn release(self) {
        if let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        {
            let style = body.style();
            let _ = if self.previous_overflow.is_empty() {
                style.remove_property("overflow").map(|_| ())
            } else {
                style.set_property("overflow", &self.previous_overflow)
            };
        }
        if let Some(el) = self.previous_focus {
            let _ = el.focus();
        }
    }
}

/// Answer on the next tick so the element that dispatched the click is not
/// unmounted during its own event. The answer targets the request shown at
/// click time.
fn answer_deferred(svc: ConfirmService, answer: bool) {
    let Some(id) = svc.current_id() else {
        return;
    };
    spawn_local(async move {
        TimeoutFuture::new(0).await;
        svc.resolve_request(id, answer);
    });
}

/// Renders the pending confirmation, if any. Must be mounted exactly once.
#[component]
pub fn ConfirmHost() -> impl IntoView {
    let svc = use_confirm();
    let confirm_ref = NodeRef::<html::Button>::new();
    let lock = StoredValue::new_local(None::<ScrollLock>);

    // Escape answers "no"
    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                if keyboard_event.key() == "Escape" && svc.is_open() {
                    answer_deferred(svc, false);
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            // ConfirmHost lives as long as the app; keep the closure alive.
            closure.forget();
        }
    });

    // Scroll lock and focus follow the open state
    Effect::new(move |_| {
        let open = svc.is_open();
        if open {
            if lock.with_value(Option::is_none) {
                lock.set_value(ScrollLock::acquire());
            }
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                if let Some(button) = confirm_ref.get_untracked() {
                    let _ = button.focus();
                }
            });
        } else if let Some(saved) = lock.try_update_value(Option::take).flatten() {
            saved.release();
        }
    });

    on_cleanup(move || {
        svc.dismiss();
        if let Some(saved) = lock.try_update_value(Option::take).flatten() {
            saved.release();
        }
    });

    let overlay_mouse_down = RwSignal::new(false);
    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    view! {
        {move || {
            svc.current().map(|options| {
                let tone_class = options.tone.css_class();
                view! {
                    <div
                        class="modal-overlay confirm-overlay"
                        style="z-index: 2000;"
                        on:mousedown=move |ev| overlay_mouse_down.set(is_direct_overlay_event(&ev))
                        on:click=move |ev| {
                            let direct = overlay_mouse_down.get_untracked() && is_direct_overlay_event(&ev);
                            overlay_mouse_down.set(false);
                            if direct {
                                answer_deferred(svc, false);
                            }
                        }
                    >
                        <div
                            class=format!("modal confirm {}", tone_class)
                            role="alertdialog"
                            aria-modal="true"
                            aria-labelledby="confirm-title"
                            aria-describedby="confirm-message"
                        >
                            <div class="modal-header">
                                <h2 class="modal-title" id="confirm-title">{options.title.clone()}</h2>
                                <button
                                    class="button button--icon modal__close"
                                    aria-label="Cerrar"
                                    on:click=move |_| answer_deferred(svc, false)
                                >
                                    {icon("x")}
                                </button>
                            </div>
                            <div class="modal-body">
                                <p id="confirm-message">{options.message.clone()}</p>
                            </div>
                            <div class="modal-footer">
                                <button
                                    class="button button--secondary"
                                    on:click=move |_| answer_deferred(svc, false)
                                >
                                    {options.cancel_text.clone()}
                                </button>
                                <button
                                    node_ref=confirm_ref
                                    class=format!("button button--primary {}", tone_class)
                                    on:click=move |_| answer_deferred(svc, true)
                                >
                                    {options.confirm_text.clone()}
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })
        }}
    }
}
