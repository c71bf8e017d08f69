use leptos::prelude::*;
use thaw::*;

/// Title row of a list page: heading, optional row count, action buttons
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    /// Rendered as a badge next to the title
    #[prop(optional, into)]
    count: Option<Signal<usize>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h1 class="page__title">{title}</h1>
                {count.map(|n| view! { <Badge>{move || n.get().to_string()}</Badge> })}
            </div>
            <div class="page__header-right">{children()}</div>
        </div>
    }
}

/// "Actualizar" button disabled while `loading`
#[component]
pub fn RefreshButton(#[prop(into)] loading: Signal<bool>, on_click: Callback<()>) -> impl IntoView {
    view! {
        <Button
            appearance=ButtonAppearance::Secondary
            on_click=move |_| on_click.run(())
            disabled=Signal::derive(move || loading.get())
        >
            {crate::shared::icons::icon("refresh")}
            " Actualizar"
        </Button>
    }
}
