use contracts::domain::a008_sale::aggregate::{NewSale, Sale};
use contracts::domain::common::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a008_sale::api::{create_sale, fetch_sales};
use crate::shared::confirm::{gated, use_confirm, ConfirmOptions, ConfirmService, Tone};
use crate::shared::http::ApiError;
use crate::shared::resource::ResourceList;
use crate::system::auth::request::{use_api, AuthedClient};

#[derive(Clone, Copy)]
pub struct SalesHook {
    pub api: AuthedClient,
    pub list: ResourceList<Sale>,
    pub query: RwSignal<ListQuery>,
    pub total: RwSignal<Option<usize>>,
    confirm: ConfirmService,
}

pub fn use_sales() -> SalesHook {
    SalesHook {
        api: use_api(),
        list: ResourceList::new(),
        query: RwSignal::new(ListQuery::default()),
        total: RwSignal::new(None),
        confirm: use_confirm(),
    }
}

impl SalesHook {
    pub fn load(&self) {
        let this = *self;
        let query = self.query.get_untracked();
        spawn_local(async move {
            match this.api.track(fetch_sales(&this.api, &query)).await {
                Ok(page) => {
                    this.total.try_set(page.total);
                    this.list.set(page.rows);
                }
                Err(e) => log::warn!("sales load failed: {}", e),
            }
        });
    }

    pub fn go_to_page(&self, page: usize) {
        self.query.update(|q| q.page = page.max(1));
        self.load();
    }

    /// `Ok(false)` when the user declined. Stock is checked by the backend.
    pub async fn create(&self, dto: NewSale, client: &str, total: f64) -> Result<bool, ApiError> {
        let decision = self.confirm.confirm(
            ConfirmOptions::new(
                "Registrar venta",
                format!("¿Registrar la venta a «{}» por {:.2}?", client, total),
            )
            .confirm_text("Registrar")
            .tone(Tone::Brand),
        );
        let api = self.api;
        let Some(created) = gated(decision, || create_sale(&api, &dto)).await else {
            return Ok(false);
        };
        match created? {
            Some(sale) => {
                // newest first
                self.list.items.update(|rows| rows.insert(0, sale));
                self.total.try_update(|t| {
                    if let Some(t) = t {
                        *t += 1;
                    }
                });
            }
            None => self.load(),
        }
        Ok(true)
    }
}
