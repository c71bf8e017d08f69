use contracts::domain::a005_inventory::aggregate::{
    AssignProduct, Quantity, QuantityKey, StockQuery, StockRow,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::confirm::{use_confirm, ConfirmOptions, ConfirmService, Tone};
use crate::shared::http::ApiError;
use crate::system::auth::request::{use_api, AuthedClient};

/// Stock lines keyed by product and warehouse, plus the access flag of the
/// selected warehouse
#[derive(Clone, Copy)]
pub struct InventoryHook {
    pub api: AuthedClient,
    pub rows: RwSignal<Vec<StockRow>>,
    pub loaded: RwSignal<bool>,
    pub query: RwSignal<StockQuery>,
    /// `None` until checked or when no warehouse is selected
    pub access: RwSignal<Option<bool>>,
    confirm: ConfirmService,
}

pub fn use_inventory() -> InventoryHook {
    InventoryHook {
        api: use_api(),
        rows: RwSignal::new(Vec::new()),
        loaded: RwSignal::new(false),
        query: RwSignal::new(StockQuery::default()),
        access: RwSignal::new(None),
        confirm: use_confirm(),
    }
}

impl InventoryHook {
    pub fn load(&self) {
        let this = *self;
        let query = self.query.get_untracked();
        spawn_local(async move {
            match this.api.track(api::fetch_stock(&this.api, &query)).await {
                Ok(rows) => {
                    this.rows.try_set(rows);
                    this.loaded.try_set(true);
                }
                Err(e) => log::warn!("stock load failed: {}", e),
            }
        });
    }

    pub fn select_warehouse(&self, bodega: Option<i64>) {
        self.query.update(|q| q.warehouse_id = bodega);
        self.access.set(None);
        self.load();

        if let Some(bodega) = bodega {
            let this = *self;
            spawn_local(async move {
                match api::fetch_access(&this.api, bodega).await {
                    Ok(access) => {
                        this.access.try_set(Some(access.allowed));
                    }
                    Err(e) => log::warn!("access check for warehouse {} failed: {}", bodega, e),
                }
            });
        }
    }

    /// Current quantity straight from the backend
    pub async fn quantity(&self, row: &StockRow) -> Result<Quantity, ApiError> {
        let key = QuantityKey {
            producto_id: row.producto_id,
            bodega_id: row.bodega_id,
        };
        api::fetch_quantity(&self.api, &key).await
    }

    /// `Ok(false)` when declined; the line is patched in place on success
    pub async fn set_quantity(&self, row: &StockRow, cantidad: f64) -> Result<bool, ApiError> {
        let quantity = Quantity {
            producto_id: row.producto_id,
            bodega_id: row.bodega_id,
            cantidad,
        };
        let decision = self.confirm.confirm(
            ConfirmOptions::new(
                "Ajustar cantidad",
                format!(
                    "¿Cambiar la cantidad de {} en {} de {} a {}?",
                    row.producto, row.bodega, row.cantidad, cantidad
                ),
            )
            .confirm_text("Ajustar")
            .tone(Tone::Warning),
        );
        if !api::set_quantity(&self.api, decision, &quantity).await? {
            return Ok(false);
        }
        self.rows.update(|rows| {
            api::patch_quantity(rows, &quantity);
        });
        Ok(true)
    }

    /// Reloads the stock after a confirmed assignment
    pub async fn assign(&self, dto: AssignProduct, label: &str) -> Result<bool, ApiError> {
        let decision = self.confirm.confirm(
            ConfirmOptions::new("Asignar producto", format!("¿Asignar {}?", label))
                .confirm_text("Asignar")
                .tone(Tone::Brand),
        );
        if !api::assign_product(&self.api, decision, &dto).await? {
            return Ok(false);
        }
        self.load();
        Ok(true)
    }
}
