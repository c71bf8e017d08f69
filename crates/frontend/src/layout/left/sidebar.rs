//! Sidebar with the pages the signed-in role may open, grouped by area

use crate::layout::global_context::{use_global_context, visible_pages, Page};
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use leptos::prelude::*;

struct MenuGroup {
    label: &'static str,
    pages: &'static [Page],
}

static MENU: [MenuGroup; 4] = [
    MenuGroup {
        label: "Comercial",
        pages: &[Page::Reports, Page::Sales, Page::Clients],
    },
    MenuGroup {
        label: "Inventario",
        pages: &[Page::Products, Page::Inventory, Page::Warehouses, Page::Expirations],
    },
    MenuGroup {
        label: "Compras",
        pages: &[Page::PurchaseOrders, Page::Providers],
    },
    MenuGroup {
        label: "Administración",
        pages: &[Page::Users],
    },
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_global_context();
    let session = use_session();

    let allowed = Memo::new(move |_| visible_pages(|role| session.has_role(role)));

    let group_view = move |group: &'static MenuGroup| {
        let items = move || {
            allowed.with(|pages| {
                group
                    .pages
                    .iter()
                    .copied()
                    .filter(|p| pages.contains(p))
                    .collect::<Vec<_>>()
            })
        };
        view! {
            <Show when=move || !items().is_empty()>
                <div class="app-sidebar__group">
                    <div class="app-sidebar__group-label">{group.label}</div>
                    {move || {
                        items()
                            .into_iter()
                            .map(|page| {
                                view! {
                                    <div
                                        class="app-sidebar__item"
                                        class:app-sidebar__item--active=move || ctx.active.get() == Some(page)
                                        on:click=move |_| ctx.open(page)
                                    >
                                        <div class="app-sidebar__item-content">
                                            {icon(page.icon())}
                                            <span>{page.label()}</span>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        }
    };

    view! {
        <div class="app-sidebar__content">
            {MENU.iter().map(group_view).collect_view()}
        </div>
    }
}
