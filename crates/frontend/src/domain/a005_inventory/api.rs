use contracts::domain::a005_inventory::aggregate::{
    AssignProduct, Quantity, QuantityKey, StockQuery, StockRow, WarehouseAccess,
};
use std::future::Future;

use crate::shared::api_utils::segment;
use crate::shared::confirm::gated;
use crate::shared::http::{execute, fetch, ApiError, ApiRequest, Transport};

const BASE: &str = "/api/inventario";

pub async fn fetch_stock(t: &dyn Transport, query: &StockQuery) -> Result<Vec<StockRow>, ApiError> {
    fetch(t, ApiRequest::get(format!("{}/stock", BASE)).query(query)?).await
}

/// `Ok(false)` when declined
pub async fn assign_product(
    t: &dyn Transport,
    decision: impl Future<Output = bool>,
    dto: &AssignProduct,
) -> Result<bool, ApiError> {
    let request = ApiRequest::post(format!("{}/asignar", BASE)).json(dto)?;
    match gated(decision, move || execute(t, request)).await {
        None => Ok(false),
        Some(result) => result.map(|()| true),
    }
}

pub async fn fetch_quantity(t: &dyn Transport, key: &QuantityKey) -> Result<Quantity, ApiError> {
    fetch(t, ApiRequest::get(format!("{}/cantidad", BASE)).query(key)?).await
}

pub async fn set_quantity(
    t: &dyn Transport,
    decision: impl Future<Output = bool>,
    quantity: &Quantity,
) -> Result<bool, ApiError> {
    let request = ApiRequest::put(format!("{}/cantidad", BASE)).json(quantity)?;
    match gated(decision, move || execute(t, request)).await {
        None => Ok(false),
        Some(result) => result.map(|()| true),
    }
}

/// Whether the current user may operate on `bodega`
pub async fn fetch_access(t: &dyn Transport, bodega: i64) -> Result<WarehouseAccess, ApiError> {
    fetch(t, ApiRequest::get(format!("{}/acceso/{}", BASE, segment(bodega)))).await
}

/// Writes a new quantity into the matching stock line
pub fn patch_quantity(rows: &mut [StockRow], quantity: &Quantity) -> bool {
    match rows
        .iter_mut()
        .find(|r| r.producto_id == quantity.producto_id && r.bodega_id == quantity.bodega_id)
    {
        Some(row) => {
            row.cantidad = quantity.cantidad;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use futures::executor::block_on;
    use futures::future::ready;
    use serde_json::json;

    fn line(producto_id: i64, bodega_id: i64, cantidad: f64) -> StockRow {
        StockRow {
            producto_id,
            producto: format!("P{}", producto_id),
            bodega_id,
            bodega: format!("B{}", bodega_id),
            cantidad,
            minimo: Some(5.0),
        }
    }

    #[test]
    fn test_stock_query_string() {
        let mock = MockTransport::new();
        mock.reply_json(json!([
            {"productoId": 1, "producto": "Cemento", "bodegaId": 2, "bodega": "Matriz", "cantidad": 3, "stockMinimo": 5}
        ]));
        let query = StockQuery {
            warehouse_id: Some(2),
            search: None,
        };
        let rows = block_on(fetch_stock(&mock, &query)).unwrap();
        assert!(rows[0].is_low());
        assert_eq!(
            mock.calls(),
            vec![(HttpMethod::Get, "/api/inventario/stock?bodega=2".to_string())]
        );
    }

    #[test]
    fn test_quantity_lookup() {
        let mock = MockTransport::new();
        mock.reply_json(json!({"productoId": 1, "bodegaId": 2, "cantidad": 14.5}));
        let key = QuantityKey {
            producto_id: 1,
            bodega_id: 2,
        };
        let q = block_on(fetch_quantity(&mock, &key)).unwrap();
        assert_eq!(q.cantidad, 14.5);
        assert_eq!(
            mock.calls(),
            vec![(
                HttpMethod::Get,
                "/api/inventario/cantidad?producto=1&bodega=2".to_string()
            )]
        );
    }

    #[test]
    fn test_set_quantity_gated() {
        let mock = MockTransport::new();
        let q = Quantity {
            producto_id: 1,
            bodega_id: 2,
            cantidad: 20.0,
        };
        assert_eq!(block_on(set_quantity(&mock, ready(false), &q)), Ok(false));
        assert_eq!(mock.request_count(), 0);

        assert_eq!(block_on(set_quantity(&mock, ready(true), &q)), Ok(true));
        assert_eq!(
            mock.calls(),
            vec![(HttpMethod::Put, "/api/inventario/cantidad".to_string())]
        );
        assert_eq!(
            mock.last_body(),
            Some(json!({"productoId": 1, "bodegaId": 2, "cantidad": 20.0}))
        );
    }

    #[test]
    fn test_assign_and_access() {
        let mock = MockTransport::new();
        mock.reply_empty().reply_json(json!({"tieneAcceso": false}));
        let dto = AssignProduct {
            producto_id: 4,
            bodega_id: 2,
        };
        assert_eq!(block_on(assign_product(&mock, ready(true), &dto)), Ok(true));
        let access = block_on(fetch_access(&mock, 2)).unwrap();
        assert!(!access.allowed);
        assert_eq!(
            mock.calls(),
            vec![
                (HttpMethod::Post, "/api/inventario/asignar".to_string()),
                (HttpMethod::Get, "/api/inventario/acceso/2".to_string()),
            ]
        );
    }

    #[test]
    fn test_patch_quantity_matches_both_keys() {
        let mut rows = vec![line(1, 2, 3.0), line(1, 3, 8.0)];
        let q = Quantity {
            producto_id: 1,
            bodega_id: 3,
            cantidad: 1.0,
        };
        assert!(patch_quantity(&mut rows, &q));
        assert_eq!(rows[0].cantidad, 3.0);
        assert_eq!(rows[1].cantidad, 1.0);
        assert!(rows[1].is_low());
    }
}
