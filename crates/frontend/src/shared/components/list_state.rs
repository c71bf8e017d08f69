use leptos::prelude::*;
use thaw::Spinner;

use crate::shared::icons::icon;
use crate::system::auth::request::AuthedClient;

/// Which one of the mutually exclusive list states to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Error(String),
    Empty,
    Rows,
}

/// Loading wins over an error, which wins over the empty state.
/// Rows already on screen stay visible while a reload is in flight.
pub fn list_view(loading: bool, error: Option<String>, loaded: bool, has_rows: bool) -> ListView {
    if let Some(message) = error {
        if !loading {
            return ListView::Error(message);
        }
    }
    match (loading, has_rows, loaded) {
        (_, true, _) => ListView::Rows,
        (true, false, _) | (false, false, false) => ListView::Loading,
        (false, false, true) => ListView::Empty,
    }
}

/// Wraps a table with loading / error / empty handling
#[component]
pub fn ListStatus(
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] loaded: Signal<bool>,
    #[prop(into)] has_rows: Signal<bool>,
    #[prop(optional, into)] empty_text: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let empty_text = empty_text.unwrap_or_else(|| "No hay registros".to_string());
    let state = Memo::new(move |_| list_view(loading.get(), error.get(), loaded.get(), has_rows.get()));

    move || match state.get() {
        ListView::Loading => view! {
            <div class="list-state list-state--loading">
                <Spinner />
                <span>"Cargando..."</span>
            </div>
        }
        .into_any(),
        ListView::Error(message) => view! {
            <div class="alert alert--error" role="alert">{message}</div>
        }
        .into_any(),
        ListView::Empty => view! {
            <div class="list-state list-state--empty">{empty_text.clone()}</div>
        }
        .into_any(),
        ListView::Rows => children().into_any(),
    }
}

/// Failed row action, shown above the table until dismissed or the next action
#[component]
pub fn ActionErrorBanner(api: AuthedClient) -> impl IntoView {
    move || {
        api.action_error().map(|message| {
            view! {
                <div class="alert alert--error alert--inline" role="alert">
                    <span>{message}</span>
                    <button class="alert__close" title="Cerrar" on:click=move |_| api.clear_action_error()>
                        {icon("x")}
                    </button>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_are_exclusive() {
        assert_eq!(list_view(true, None, false, false), ListView::Loading);
        assert_eq!(list_view(false, None, false, false), ListView::Loading);
        assert_eq!(list_view(false, None, true, false), ListView::Empty);
        assert_eq!(list_view(false, None, true, true), ListView::Rows);
        assert_eq!(
            list_view(false, Some("x".into()), true, true),
            ListView::Error("x".into())
        );
    }

    #[test]
    fn test_reload_keeps_rows() {
        assert_eq!(list_view(true, None, true, true), ListView::Rows);
        assert_eq!(list_view(true, Some("old".into()), true, false), ListView::Loading);
    }
}
