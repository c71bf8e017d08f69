use crate::shared::icons::icon;
use leptos::prelude::*;

/// Whether a next page may exist. Without a reported total a full page
/// means there could be more.
pub fn has_next_page(page: usize, page_size: usize, rows: usize, total: Option<usize>) -> bool {
    match total {
        Some(total) => page * page_size < total,
        None => page_size > 0 && rows >= page_size,
    }
}

/// Previous/next controls for backend-paged lists (pages start at 1)
#[component]
pub fn PaginationControls(
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] has_next: Signal<bool>,
    /// Row count reported by the backend, when known
    #[prop(into)]
    total: Signal<Option<usize>>,
    on_page_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let current = page.get_untracked();
                    if current > 1 {
                        on_page_change.run(current - 1);
                    }
                }
                disabled=move || page.get() <= 1
                title="Página anterior"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || match total.get() {
                    Some(count) => format!("Página {} ({} registros)", page.get(), count),
                    None => format!("Página {}", page.get()),
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(page.get_untracked() + 1)
                disabled=move || !has_next.get()
                title="Página siguiente"
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_next_page() {
        assert!(has_next_page(1, 50, 50, None));
        assert!(!has_next_page(1, 50, 12, None));
        assert!(has_next_page(1, 50, 50, Some(51)));
        assert!(!has_next_page(2, 50, 1, Some(51)));
    }
}
