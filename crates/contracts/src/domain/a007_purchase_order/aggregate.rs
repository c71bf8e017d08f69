use serde::{Deserialize, Serialize};

use crate::domain::common::HasId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pendiente,
    Recibida,
    Anulada,
}

impl OrderStatus {
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pendiente => "Pendiente",
            OrderStatus::Recibida => "Recibida",
            OrderStatus::Anulada => "Anulada",
        }
    }

    /// Received and cancelled orders are final
    pub fn transitions(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pendiente => &[OrderStatus::Recibida, OrderStatus::Anulada],
            OrderStatus::Recibida | OrderStatus::Anulada => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "productoId", alias = "producto_id")]
    pub producto_id: i64,
    pub cantidad: f64,
    #[serde(rename = "costoUnitario", alias = "costo_unitario")]
    pub costo_unitario: f64,
}

/// Purchase order header (`/api/ordenes-compra`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: i64,
    #[serde(alias = "proveedorId")]
    pub proveedor_id: i64,
    #[serde(default)]
    pub proveedor: Option<String>,
    pub fecha: String,
    pub total: f64,
    pub estado: OrderStatus,
    #[serde(default)]
    pub lineas: Vec<OrderLine>,
}

impl HasId for PurchaseOrder {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPurchaseOrder {
    #[serde(rename = "proveedorId")]
    pub proveedor_id: i64,
    #[serde(rename = "bodegaId")]
    pub bodega_id: i64,
    pub lineas: Vec<OrderLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_and_transitions() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Recibida).unwrap(),
            "\"RECIBIDA\""
        );
        assert_eq!(OrderStatus::Pendiente.transitions().len(), 2);
        assert!(OrderStatus::Anulada.transitions().is_empty());
    }

    #[test]
    fn test_order_decodes_camel_case() {
        let order: PurchaseOrder = serde_json::from_str(
            r#"{"id": 1, "proveedorId": 4, "fecha": "2024-06-01", "total": 250.0, "estado": "PENDIENTE",
                "lineas": [{"productoId": 9, "cantidad": 10, "costoUnitario": 25}]}"#,
        )
        .unwrap();
        assert_eq!(order.proveedor_id, 4);
        assert_eq!(order.lineas[0].costo_unitario, 25.0);
    }
}
