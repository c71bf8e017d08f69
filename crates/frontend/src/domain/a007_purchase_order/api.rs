use contracts::domain::a007_purchase_order::aggregate::{NewPurchaseOrder, OrderStatus, PurchaseOrder};
use contracts::domain::common::ListQuery;
use std::future::Future;

use crate::shared::http::{ApiError, Transport};
use crate::shared::registry::{Endpoint, ListPage};
use crate::shared::resource::change_status;

pub const ORDERS: Endpoint = Endpoint::paged("/api/ordenes-compra");

pub async fn fetch_orders(
    t: &dyn Transport,
    query: &ListQuery,
) -> Result<ListPage<PurchaseOrder>, ApiError> {
    ORDERS.list(t, query).await
}

pub async fn create_order(
    t: &dyn Transport,
    dto: &NewPurchaseOrder,
) -> Result<Option<PurchaseOrder>, ApiError> {
    ORDERS.create(t, dto).await
}

/// Only moves allowed by [`OrderStatus::transitions`] reach the backend
pub async fn set_order_status(
    t: &dyn Transport,
    decision: impl Future<Output = bool>,
    order: &PurchaseOrder,
    next: OrderStatus,
) -> Result<Option<OrderStatus>, ApiError> {
    if !order.estado.transitions().contains(&next) {
        return Err(ApiError::validation(format!(
            "La orden {} ya está {}",
            order.id,
            order.estado.label().to_lowercase()
        )));
    }
    change_status(t, decision, format!("{}/estado", ORDERS.item(order.id)), next).await
}

/// Sum of `cantidad * costo_unitario`, shown before the backend totals it
pub fn order_total(dto: &NewPurchaseOrder) -> f64 {
    dto.lineas
        .iter()
        .map(|l| l.cantidad * l.costo_unitario)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use contracts::domain::a007_purchase_order::aggregate::OrderLine;
    use futures::executor::block_on;
    use futures::future::ready;
    use serde_json::json;

    fn order(estado: OrderStatus) -> PurchaseOrder {
        PurchaseOrder {
            id: 7,
            proveedor_id: 2,
            proveedor: Some("Distribuidora Norte".to_string()),
            fecha: "2024-06-01".to_string(),
            total: 100.0,
            estado,
            lineas: Vec::new(),
        }
    }

    #[test]
    fn test_receive_pending_order() {
        let mock = MockTransport::new();
        let next = block_on(set_order_status(
            &mock,
            ready(true),
            &order(OrderStatus::Pendiente),
            OrderStatus::Recibida,
        ))
        .unwrap();
        assert_eq!(next, Some(OrderStatus::Recibida));
        assert_eq!(
            mock.calls(),
            vec![(HttpMethod::Patch, "/api/ordenes-compra/7/estado".to_string())]
        );
        assert_eq!(mock.last_body(), Some(json!({"estado": "RECIBIDA"})));
    }

    #[test]
    fn test_final_order_rejected_locally() {
        let mock = MockTransport::new();
        let err = block_on(set_order_status(
            &mock,
            ready(true),
            &order(OrderStatus::Anulada),
            OrderStatus::Recibida,
        ))
        .unwrap_err();
        assert_eq!(err.status, 0);
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_create_sends_lines() {
        let mock = MockTransport::new();
        let dto = NewPurchaseOrder {
            proveedor_id: 2,
            bodega_id: 1,
            lineas: vec![OrderLine {
                producto_id: 9,
                cantidad: 10.0,
                costo_unitario: 2.5,
            }],
        };
        assert_eq!(order_total(&dto), 25.0);
        let created = block_on(create_order(&mock, &dto)).unwrap();
        assert_eq!(created, None);
        assert_eq!(
            mock.last_body(),
            Some(json!({
                "proveedorId": 2,
                "bodegaId": 1,
                "lineas": [{"productoId": 9, "cantidad": 10.0, "costoUnitario": 2.5}]
            }))
        );
    }

    #[test]
    fn test_list_with_status_filter() {
        let mock = MockTransport::new();
        mock.reply_json(json!([
            {"id": 1, "proveedorId": 2, "fecha": "2024-06-01", "total": 10, "estado": "PENDIENTE"}
        ]));
        let query = ListQuery {
            status: Some("PENDIENTE".to_string()),
            ..ListQuery::default()
        };
        let page = block_on(fetch_orders(&mock, &query)).unwrap();
        assert_eq!(page.rows[0].estado, OrderStatus::Pendiente);
        assert_eq!(
            mock.calls()[0].1,
            "/api/ordenes-compra?estado=PENDIENTE&pagina=1&tamano=50"
        );
    }
}
