use serde::{Deserialize, Serialize};

use crate::domain::common::{HasId, RecordStatus, Registry};
use crate::shared::validation::{FieldErrors, ValidationRules};

/// Catalog row (`/api/productos`). Prices are computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub codigo: String,
    pub nombre: String,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub unidad: Option<String>,
    #[serde(alias = "precioCompra")]
    pub precio_compra: f64,
    #[serde(alias = "precioVenta")]
    pub precio_venta: f64,
    #[serde(default)]
    pub estado: RecordStatus,
}

impl HasId for Product {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Registry for Product {
    fn status(&self) -> RecordStatus {
        self.estado
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.estado = status;
    }

    fn display_name(&self) -> &str {
        &self.nombre
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub codigo: String,
    pub nombre: String,
    pub categoria: Option<String>,
    pub unidad: Option<String>,
    #[serde(rename = "precioCompra")]
    pub precio_compra: f64,
    #[serde(rename = "precioVenta")]
    pub precio_venta: f64,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        Self {
            id: Some(p.id),
            codigo: p.codigo.clone(),
            nombre: p.nombre.clone(),
            categoria: p.categoria.clone(),
            unidad: p.unidad.clone(),
            precio_compra: p.precio_compra,
            precio_venta: p.precio_venta,
        }
    }
}

impl ProductDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "codigo",
            ValidationRules::required()
                .with_max_length(30)
                .validate_string(&self.codigo, "El código"),
        );
        errors.check(
            "nombre",
            ValidationRules::required()
                .with_max_length(150)
                .validate_string(&self.nombre, "El nombre"),
        );
        let price = ValidationRules::required().with_min(0.0);
        errors.check(
            "precioCompra",
            price.validate_number(self.precio_compra, "El precio de compra"),
        );
        errors.check(
            "precioVenta",
            price.validate_number(self.precio_venta, "El precio de venta"),
        );
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let dto = ProductDto {
            codigo: "P-001".into(),
            nombre: "Cemento 50kg".into(),
            precio_compra: 7.5,
            precio_venta: -1.0,
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.get("precioVenta").is_some());
        assert!(errors.get("precioCompra").is_none());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(ProductDto {
            codigo: "P-1".into(),
            nombre: "Clavos".into(),
            precio_compra: 1.0,
            precio_venta: 2.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["precioVenta"], 2.0);
        assert!(json.get("id").is_none());
    }
}
