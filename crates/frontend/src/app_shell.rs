//! Auth gate and main layout.
//!
//! `AppShell` waits for session restore, then shows `LoginPage` or
//! `MainLayout`; `MainLayout` renders the active page inside the shell.

use crate::dashboards::ReportsDashboard;
use crate::domain::a001_client::ui::list::ClientsListPage;
use crate::domain::a002_provider::ui::list::ProvidersListPage;
use crate::domain::a003_product::ui::list::ProductsListPage;
use crate::domain::a004_warehouse::ui::list::WarehousesListPage;
use crate::domain::a005_inventory::ui::stock::InventoryPage;
use crate::domain::a006_expiration::ui::documents::ExpirationDocumentsPage;
use crate::domain::a007_purchase_order::ui::list::PurchaseOrdersPage;
use crate::domain::a008_sale::ui::list::SalesPage;
use crate::layout::global_context::{use_global_context, visible_pages, Page};
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::system::auth::context::use_session;
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::login::LoginPage;
use crate::system::users::ui::list::UsersListPage;
use leptos::prelude::*;

fn page_view(page: Page) -> AnyView {
    match page {
        Page::Reports => view! { <ReportsDashboard /> }.into_any(),
        Page::Sales => view! { <SalesPage /> }.into_any(),
        Page::Clients => view! { <ClientsListPage /> }.into_any(),
        Page::Products => view! { <ProductsListPage /> }.into_any(),
        Page::Inventory => view! { <InventoryPage /> }.into_any(),
        Page::Warehouses => view! { <WarehousesListPage /> }.into_any(),
        Page::PurchaseOrders => view! { <PurchaseOrdersPage /> }.into_any(),
        Page::Providers => view! { <ProvidersListPage /> }.into_any(),
        Page::Expirations => view! { <ExpirationDocumentsPage /> }.into_any(),
        Page::Users => view! { <UsersListPage /> }.into_any(),
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_global_context();
    let session = use_session();

    ctx.init_router_integration();

    // a page the role cannot open falls back to the first one it can
    Effect::new(move |_| {
        let allowed = visible_pages(|role| session.has_role(role));
        let current = ctx.active.get();
        if current.map_or(true, |p| !allowed.contains(&p)) {
            if let Some(first) = allowed.first() {
                ctx.open(*first);
            }
        }
    });

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <RequireAuth>
                        {move || match ctx.active.get() {
                            Some(page) => page_view(page),
                            None => view! { <div class="guard-message">"Sin secciones disponibles para su rol."</div> }.into_any(),
                        }}
                    </RequireAuth>
                }
                .into_any()
            }
        />
    }
}

#[component]
pub fn AppShell() -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.ready()
            fallback=|| view! { <div class="app-loading">"Cargando..."</div> }
        >
            <Show
                when=move || session.is_authenticated()
                fallback=|| view! { <LoginPage /> }
            >
                <MainLayout />
            </Show>
        </Show>
    }
}
