use contracts::domain::a008_sale::aggregate::{NewSale, Sale};
use contracts::domain::common::ListQuery;

use crate::shared::http::{ApiError, Transport};
use crate::shared::registry::{Endpoint, ListPage};

pub const SALES: Endpoint = Endpoint::paged("/api/ventas");

pub async fn fetch_sales(t: &dyn Transport, query: &ListQuery) -> Result<ListPage<Sale>, ApiError> {
    SALES.list(t, query).await
}

pub async fn create_sale(t: &dyn Transport, dto: &NewSale) -> Result<Option<Sale>, ApiError> {
    SALES.create(t, dto).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use contracts::domain::a008_sale::aggregate::SaleLine;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_fetch_sales_paged() {
        let mock = MockTransport::new();
        mock.reply_json(json!({
            "contenido": [{"id": 3, "clienteId": 5, "cliente": "Ana Ruiz", "fecha": "2024-06-02", "total": 45.5}],
            "total": 31
        }));
        let page = block_on(fetch_sales(&mock, &ListQuery::default().with_search("ruiz"))).unwrap();
        assert_eq!(page.rows[0].cliente.as_deref(), Some("Ana Ruiz"));
        assert_eq!(page.total, Some(31));
        assert_eq!(
            mock.calls(),
            vec![(
                HttpMethod::Get,
                "/api/ventas?buscar=ruiz&pagina=1&tamano=50".to_string()
            )]
        );
    }

    #[test]
    fn test_create_sale_body() {
        let mock = MockTransport::new();
        mock.reply_json(json!({"id": 8, "clienteId": 5, "fecha": "2024-06-02", "total": 12.0}));
        let dto = NewSale {
            cliente_id: 5,
            bodega_id: 1,
            lineas: vec![SaleLine {
                producto_id: 2,
                cantidad: 3.0,
                precio_unitario: 4.0,
            }],
        };
        let sale = block_on(create_sale(&mock, &dto)).unwrap();
        assert_eq!(sale.map(|s| s.id), Some(8));
        assert_eq!(mock.calls()[0], (HttpMethod::Post, "/api/ventas".to_string()));
        assert_eq!(
            mock.last_body(),
            Some(json!({
                "clienteId": 5,
                "bodegaId": 1,
                "lineas": [{"productoId": 2, "cantidad": 3.0, "precioUnitario": 4.0}]
            }))
        );
    }

    #[test]
    fn test_insufficient_stock_message() {
        let mock = MockTransport::new();
        mock.reply_status(409, json!({"message": "Stock insuficiente para Tornillo"}));
        let dto = NewSale {
            cliente_id: 5,
            bodega_id: 1,
            lineas: Vec::new(),
        };
        let err = block_on(create_sale(&mock, &dto)).unwrap_err();
        assert_eq!(err.status, 409);
        assert_eq!(err.message, "Stock insuficiente para Tornillo");
    }
}
