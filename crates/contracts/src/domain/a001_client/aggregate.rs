use serde::{Deserialize, Serialize};

use crate::domain::common::{HasId, RecordStatus, Registry};
use crate::shared::validation::{FieldErrors, ValidationRules};

/// Client registry row (`/api/clientes`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub nombre: String,
    /// RUC or national id
    pub documento: String,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub estado: RecordStatus,
}

impl HasId for Client {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Registry for Client {
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

/// Create/update form payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    pub documento: String,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
}

impl From<&Client> for ClientDto {
    fn from(c: &Client) -> Self {
        Self {
            id: Some(c.id),
            nombre: c.nombre.clone(),
            documento: c.documento.clone(),
            correo: c.correo.clone(),
            telefono: c.telefono.clone(),
            direccion: c.direccion.clone(),
        }
    }
}

impl ClientDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "nombre",
            ValidationRules::required()
                .with_max_length(150)
                .validate_string(&self.nombre, "El nombre"),
        );
        errors.check("documento", validate_document(&self.documento));
        errors.check(
            "correo",
            ValidationRules::none()
                .with_email()
                .validate_string(self.correo.as_deref().unwrap_or(""), "El correo"),
        );
        errors.into_result()
    }
}

/// Cedula (10 digits) or RUC (13 digits)
pub fn validate_document(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("El documento es obligatorio".to_string());
    }
    if !value.chars().all(|c| c.is_ascii_digit()) || !matches!(value.len(), 10 | 13) {
        return Err("El documento debe tener 10 o 13 dígitos".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lengths() {
        assert!(validate_document("0102030405").is_ok());
        assert!(validate_document("0102030405001").is_ok());
        assert!(validate_document("01020304").is_err());
        assert!(validate_document("01020304AB").is_err());
    }

    #[test]
    fn test_client_form() {
        let dto = ClientDto {
            nombre: "Comercial Andes".into(),
            documento: "0102030405".into(),
            correo: Some("no-es-correo".into()),
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.get("correo").is_some());
        assert!(errors.get("nombre").is_none());
    }
}
