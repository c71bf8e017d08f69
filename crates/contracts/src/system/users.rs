use serde::{Deserialize, Serialize};

use crate::domain::common::HasId;
use crate::shared::validation::{validate_password, FieldErrors, ValidationRules};

/// Account status as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
    Paused,
}

impl UserStatus {
    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Paused,
            UserStatus::Paused => UserStatus::Active,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserStatus::Active => "Activo",
            UserStatus::Paused => "Pausado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub nombre: String,
    pub correo: String,
    pub rol: String,
    pub estado: UserStatus,
    #[serde(default, alias = "createdAt", alias = "creadoEn")]
    pub creado_en: Option<String>,
    #[serde(default, alias = "ultimoAcceso")]
    pub ultimo_acceso: Option<String>,
}

impl HasId for User {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub nombre: String,
    pub correo: String,
    pub password: String,
    pub rol: String,
}

impl CreateUserDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "nombre",
            ValidationRules::required().validate_string(&self.nombre, "El nombre"),
        );
        errors.check(
            "correo",
            ValidationRules::required()
                .with_email()
                .validate_string(&self.correo, "El correo"),
        );
        errors.check("password", validate_password(&self.password, "La contraseña"));
        errors.check(
            "rol",
            ValidationRules::required().validate_string(&self.rol, "El rol"),
        );
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserDto {
    pub nombre: String,
    pub correo: String,
}

impl UpdateUserDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            "nombre",
            ValidationRules::required().validate_string(&self.nombre, "El nombre"),
        );
        errors.check(
            "correo",
            ValidationRules::required()
                .with_email()
                .validate_string(&self.correo, "El correo"),
        );
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleChange {
    pub rol: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&UserStatus::Paused).unwrap(),
            "\"PAUSED\""
        );
        let user: User = serde_json::from_str(
            r#"{"id":3,"nombre":"Luis","correo":"l@p.ec","rol":"Vendedor","estado":"ACTIVE","createdAt":"2024-05-01"}"#,
        )
        .unwrap();
        assert_eq!(user.estado, UserStatus::Active);
        assert_eq!(user.creado_en.as_deref(), Some("2024-05-01"));
    }
}
