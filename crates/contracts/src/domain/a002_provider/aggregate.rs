use serde::{Deserialize, Serialize};

use crate::domain::common::{HasId, RecordStatus, Registry};
use crate::shared::validation::{FieldErrors, ValidationRules};

/// Provider registry row (`/api/proveedores`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: i64,
    #[serde(alias = "razonSocial")]
    pub razon_social: String,
    pub ruc: String,
    #[serde(default)]
    pub contacto: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub estado: RecordStatus,
}

impl HasId for Provider {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Registry for Provider {
    fn status(&self) -> RecordStatus {
        self.estado
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.estado = status;
    }

    fn display_name(&self) -> &str {
        &self.razon_social
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "razonSocial")]
    pub razon_social: String,
    pub ruc: String,
    pub contacto: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<String>,
}

impl From<&Provider> for ProviderDto {
    fn from(p: &Provider) -> Self {
        Self {
            id: Some(p.id),
            razon_social: p.razon_social.clone(),
            ruc: p.ruc.clone(),
            contacto: p.contacto.clone(),
            correo: p.correo.clone(),
            telefono: p.telefono.clone(),
        }
    }
}

impl ProviderDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "razonSocial",
            ValidationRules::required()
                .with_max_length(200)
                .validate_string(&self.razon_social, "La razón social"),
        );
        errors.check("ruc", validate_ruc(&self.ruc));
        errors.check(
            "correo",
            ValidationRules::none()
                .with_email()
                .validate_string(self.correo.as_deref().unwrap_or(""), "El correo"),
        );
        errors.into_result()
    }
}

fn validate_ruc(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.len() != 13 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err("El RUC debe tener 13 dígitos".to_string());
    }
    Ok(())
}
