use serde::{Deserialize, Serialize};

use crate::domain::common::{HasId, RecordStatus, Registry};
use crate::shared::validation::{FieldErrors, ValidationRules};

/// Warehouse row (`/api/bodegas`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default)]
    pub responsable: Option<String>,
    #[serde(default)]
    pub estado: RecordStatus,
}

impl HasId for Warehouse {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Registry for Warehouse {
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
pub struct WarehouseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    pub ubicacion: Option<String>,
    pub responsable: Option<String>,
}

impl From<&Warehouse> for WarehouseDto {
    fn from(w: &Warehouse) -> Self {
        Self {
            id: Some(w.id),
            nombre: w.nombre.clone(),
            ubicacion: w.ubicacion.clone(),
            responsable: w.responsable.clone(),
        }
    }
}

impl WarehouseDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "nombre",
            ValidationRules::required()
                .with_max_length(100)
                .validate_string(&self.nombre, "El nombre"),
        );
        errors.into_result()
    }
}
