use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::HasId;

/// Upcoming or past document expiration (`GET /api/vencimientos/alertas`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationAlert {
    pub id: i64,
    pub documento: String,
    #[serde(default)]
    pub entidad: Option<String>,
    #[serde(alias = "fechaVencimiento")]
    pub fecha_vencimiento: NaiveDate,
}

/// Tracked document (`/api/vencimientos/documentos`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationDocument {
    pub id: i64,
    pub nombre: String,
    pub tipo: String,
    #[serde(default)]
    pub entidad: Option<String>,
    #[serde(alias = "fechaEmision", default)]
    pub fecha_emision: Option<NaiveDate>,
    #[serde(alias = "fechaVencimiento")]
    pub fecha_vencimiento: NaiveDate,
}

impl HasId for ExpirationDocument {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpirationDocument {
    pub nombre: String,
    pub tipo: String,
    pub entidad: Option<String>,
    #[serde(rename = "fechaEmision")]
    pub fecha_emision: Option<NaiveDate>,
    #[serde(rename = "fechaVencimiento")]
    pub fecha_vencimiento: NaiveDate,
}
