use serde::{Deserialize, Serialize};

use crate::domain::common::HasId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    #[serde(rename = "productoId", alias = "producto_id")]
    pub producto_id: i64,
    pub cantidad: f64,
    #[serde(rename = "precioUnitario", alias = "precio_unitario")]
    pub precio_unitario: f64,
}

/// Registered sale (`/api/ventas`). Totals come from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    #[serde(alias = "clienteId")]
    pub cliente_id: i64,
    #[serde(default)]
    pub cliente: Option<String>,
    pub fecha: String,
    pub total: f64,
    #[serde(default)]
    pub lineas: Vec<SaleLine>,
}

impl HasId for Sale {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    #[serde(rename = "clienteId")]
    pub cliente_id: i64,
    #[serde(rename = "bodegaId")]
    pub bodega_id: i64,
    pub lineas: Vec<SaleLine>,
}
