use contracts::system::auth::{ROLE_ADMIN, ROLE_SELLER, ROLE_WAREHOUSE};
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Every page reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Reports,
    Sales,
    Clients,
    Products,
    Inventory,
    Warehouses,
    PurchaseOrders,
    Providers,
    Expirations,
    Users,
}

impl Page {
    pub const ALL: [Page; 10] = [
        Page::Reports,
        Page::Sales,
        Page::Clients,
        Page::Products,
        Page::Inventory,
        Page::Warehouses,
        Page::PurchaseOrders,
        Page::Providers,
        Page::Expirations,
        Page::Users,
    ];

    /// Value of `?active=` in the address bar
    pub fn key(self) -> &'static str {
        match self {
            Page::Reports => "reportes",
            Page::Sales => "ventas",
            Page::Clients => "clientes",
            Page::Products => "productos",
            Page::Inventory => "inventario",
            Page::Warehouses => "bodegas",
            Page::PurchaseOrders => "ordenes-compra",
            Page::Providers => "proveedores",
            Page::Expirations => "vencimientos",
            Page::Users => "usuarios",
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Reports => "Reportes",
            Page::Sales => "Ventas",
            Page::Clients => "Clientes",
            Page::Products => "Productos",
            Page::Inventory => "Inventario",
            Page::Warehouses => "Bodegas",
            Page::PurchaseOrders => "Órdenes de compra",
            Page::Providers => "Proveedores",
            Page::Expirations => "Vencimientos",
            Page::Users => "Usuarios",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Page::Reports => "bar-chart",
            Page::Sales => "orders",
            Page::Clients => "customers",
            Page::Products => "products",
            Page::Inventory => "inventory",
            Page::Warehouses => "warehouse",
            Page::PurchaseOrders => "purchases",
            Page::Providers => "suppliers",
            Page::Expirations => "calendar",
            Page::Users => "users",
        }
    }

    /// Roles that see the page; administrators see everything
    pub fn roles(self) -> &'static [&'static str] {
        match self {
            Page::Reports | Page::Users => &[ROLE_ADMIN],
            Page::Sales | Page::Clients => &[ROLE_SELLER],
            Page::Warehouses | Page::PurchaseOrders | Page::Providers => &[ROLE_WAREHOUSE],
            Page::Products | Page::Inventory | Page::Expirations => &[ROLE_SELLER, ROLE_WAREHOUSE],
        }
    }

    pub fn allowed_for(self, has_role: impl Fn(&str) -> bool) -> bool {
        self.roles().iter().any(|r| has_role(*r))
    }
}

/// Pages visible to a session, in sidebar order
pub fn visible_pages(has_role: impl Fn(&str) -> bool) -> Vec<Page> {
    Page::ALL
        .into_iter()
        .filter(|p| p.allowed_for(&has_role))
        .collect()
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Option<Page>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    pub fn open(&self, page: Page) {
        self.active.set(Some(page));
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
    }

    /// Restores the page from `?active=` and keeps the address bar in sync
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(page) = params.get("active").and_then(|k| Page::from_key(k)) {
            self.open(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(page) = this.active.get() else {
                return;
            };
            let query = serde_qs::to_string(&HashMap::from([("active", page.key())]))
                .unwrap_or_default();
            let new_url = format!("?{}", query);
            let current = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role_check(rol: &'static str) -> impl Fn(&str) -> bool {
        move |r: &str| rol == ROLE_ADMIN || r == rol
    }

    #[test]
    fn test_page_keys_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_key(page.key()), Some(page));
        }
        assert_eq!(Page::from_key("desconocida"), None);
    }

    #[test]
    fn test_seller_navigation() {
        let pages = visible_pages(role_check(ROLE_SELLER));
        assert!(pages.contains(&Page::Sales));
        assert!(pages.contains(&Page::Inventory));
        assert!(!pages.contains(&Page::Users));
        assert!(!pages.contains(&Page::PurchaseOrders));
    }

    #[test]
    fn test_admin_sees_everything() {
        assert_eq!(visible_pages(role_check(ROLE_ADMIN)).len(), Page::ALL.len());
    }
}
