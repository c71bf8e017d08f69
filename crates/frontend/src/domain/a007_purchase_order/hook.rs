use contracts::domain::a007_purchase_order::aggregate::{NewPurchaseOrder, OrderStatus, PurchaseOrder};
use contracts::domain::common::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a007_purchase_order::api::{create_order, fetch_orders, set_order_status, ORDERS};
use crate::shared::confirm::{gated, use_confirm, ConfirmOptions, ConfirmService, Tone};
use crate::shared::http::ApiError;
use crate::shared::resource::ResourceList;
use crate::system::auth::request::{use_api, AuthedClient};

/// Button text and prompt tone for a status move
pub fn transition_action(next: OrderStatus) -> (&'static str, Tone) {
    match next {
        OrderStatus::Recibida => ("Recibir", Tone::Warning),
        OrderStatus::Anulada => ("Anular", Tone::Danger),
        OrderStatus::Pendiente => ("Reabrir", Tone::Brand),
    }
}

#[derive(Clone, Copy)]
pub struct PurchaseOrdersHook {
    pub api: AuthedClient,
    pub list: ResourceList<PurchaseOrder>,
    pub query: RwSignal<ListQuery>,
    pub total: RwSignal<Option<usize>>,
    confirm: ConfirmService,
}

pub fn use_purchase_orders() -> PurchaseOrdersHook {
    PurchaseOrdersHook {
        api: use_api(),
        list: ResourceList::new(),
        query: RwSignal::new(ListQuery::default()),
        total: RwSignal::new(None),
        confirm: use_confirm(),
    }
}

impl PurchaseOrdersHook {
    pub fn load(&self) {
        let this = *self;
        let query = self.query.get_untracked();
        spawn_local(async move {
            match this.api.track(fetch_orders(&this.api, &query)).await {
                Ok(page) => {
                    this.total.try_set(page.total);
                    this.list.set(page.rows);
                }
                Err(e) => log::warn!("{} load failed: {}", ORDERS.base, e),
            }
        });
    }

    pub fn filter_status(&self, status: Option<OrderStatus>) {
        self.query.update(|q| {
            q.status = status.and_then(|s| {
                serde_json::to_value(s)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
            });
            q.page = 1;
        });
        self.load();
    }

    pub fn go_to_page(&self, page: usize) {
        self.query.update(|q| q.page = page.max(1));
        self.load();
    }

    pub fn change_status(&self, order: PurchaseOrder, next: OrderStatus) {
        let this = *self;
        let (verb, tone) = transition_action(next);
        let provider = order.proveedor.clone().unwrap_or_else(|| order.proveedor_id.to_string());
        let decision = self.confirm.confirm(
            ConfirmOptions::new(
                format!("{} orden", verb),
                format!(
                    "¿{} la orden #{} de {}? Pasará a estado {}.",
                    verb,
                    order.id,
                    provider,
                    next.label()
                ),
            )
            .confirm_text(verb)
            .tone(tone),
        );
        spawn_local(async move {
            match this
                .api
                .track_action(set_order_status(&this.api, decision, &order, next))
                .await
            {
                Ok(Some(estado)) => this.list.patch(order.id, |o| o.estado = estado),
                Ok(None) => {}
                Err(e) => log::warn!("order {} status change failed: {}", order.id, e),
            }
        });
    }

    /// `Ok(false)` when the user declined
    pub async fn create(&self, dto: NewPurchaseOrder, provider: &str) -> Result<bool, ApiError> {
        let decision = self.confirm.confirm(
            ConfirmOptions::new(
                "Crear orden de compra",
                format!(
                    "¿Registrar la orden a «{}» con {} línea(s)?",
                    provider,
                    dto.lineas.len()
                ),
            )
            .confirm_text("Crear")
            .tone(Tone::Brand),
        );
        let client = self.api;
        let Some(created) = gated(decision, || create_order(&client, &dto)).await else {
            return Ok(false);
        };
        match created? {
            Some(order) => {
                self.list.upsert(order);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_action_tones() {
        assert_eq!(transition_action(OrderStatus::Recibida), ("Recibir", Tone::Warning));
        assert_eq!(transition_action(OrderStatus::Anulada).1, Tone::Danger);
    }
}
