use serde::{Deserialize, Serialize};

/// One product/warehouse stock line (`GET /api/inventario/stock`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRow {
    #[serde(alias = "productoId")]
    pub producto_id: i64,
    pub producto: String,
    #[serde(alias = "bodegaId")]
    pub bodega_id: i64,
    pub bodega: String,
    pub cantidad: f64,
    #[serde(default, alias = "stockMinimo")]
    pub minimo: Option<f64>,
}

impl StockRow {
    /// Backend-provided minimum reached; no minimum means never low
    pub fn is_low(&self) -> bool {
        self.minimo.map(|m| self.cantidad <= m).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockQuery {
    #[serde(rename = "bodega", skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<i64>,
    #[serde(rename = "buscar", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Links a product to a warehouse (`POST /api/inventario/asignar`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignProduct {
    #[serde(rename = "productoId")]
    pub producto_id: i64,
    #[serde(rename = "bodegaId")]
    pub bodega_id: i64,
}

/// Query/response of `/api/inventario/cantidad`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(rename = "productoId", alias = "producto_id")]
    pub producto_id: i64,
    #[serde(rename = "bodegaId", alias = "bodega_id")]
    pub bodega_id: i64,
    pub cantidad: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityKey {
    #[serde(rename = "producto")]
    pub producto_id: i64,
    #[serde(rename = "bodega")]
    pub bodega_id: i64,
}

/// `GET /api/inventario/acceso/{bodega}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarehouseAccess {
    #[serde(alias = "tieneAcceso", alias = "permitido")]
    pub allowed: bool,
}
