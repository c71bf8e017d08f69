use contracts::domain::a003_product::aggregate::Product;

use crate::shared::registry::{Endpoint, RegistryHook};

pub const PRODUCTS: Endpoint = Endpoint::paged("/api/productos");

pub fn use_products() -> RegistryHook<Product> {
    RegistryHook::new(PRODUCTS, "producto")
}

/// Price shown in tables, two decimals
pub fn format_price(value: f64) -> String {
    format!("$ {:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_product::aggregate::ProductDto;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use futures::executor::block_on;
    use futures::future::ready;
    use serde_json::json;

    #[test]
    fn test_created_product_echoed() {
        let mock = MockTransport::new();
        mock.reply_json(json!({
            "id": 31, "codigo": "P-031", "nombre": "Cemento 50kg",
            "precioCompra": 7.5, "precioVenta": 9.25, "estado": "ACTIVO"
        }));
        let dto = ProductDto {
            codigo: "P-031".into(),
            nombre: "Cemento 50kg".into(),
            precio_compra: 7.5,
            precio_venta: 9.25,
            ..Default::default()
        };
        let created: Option<Product> = block_on(PRODUCTS.create(&mock, &dto)).unwrap();
        assert_eq!(created.map(|p| p.id), Some(31));
        assert_eq!(mock.last_body().unwrap()["precioVenta"], json!(9.25));
    }

    #[test]
    fn test_delete_conflict_surfaces_message() {
        let mock = MockTransport::new();
        mock.reply_status(409, json!({"detail": "El producto tiene movimientos"}));
        let err = block_on(PRODUCTS.delete(&mock, ready(true), 31)).unwrap_err();
        assert_eq!(err.status, 409);
        assert_eq!(err.message, "El producto tiene movimientos");
        assert_eq!(
            mock.calls(),
            vec![(HttpMethod::Delete, "/api/productos/31".to_string())]
        );
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(9.5), "$ 9.50");
    }
}
