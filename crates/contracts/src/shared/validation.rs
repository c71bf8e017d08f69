//! Client-side field validation rules.
//!
//! Forms validate before any network call and render the messages inline next
//! to the offending field.

use std::collections::BTreeMap;

/// Validation rules for a field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub email: bool,
}

impl ValidationRules {
    /// No constraints
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            email: false,
        }
    }

    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    pub const fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub const fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub const fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub const fn with_email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Validate a string value against the rules.
    ///
    /// Optional empty values pass every other rule.
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            if self.required {
                return Err(format!("{} es obligatorio", field_label));
            }
            return Ok(());
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!(
                    "{} debe tener al menos {} caracteres",
                    field_label, min
                ));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!(
                    "{} no debe superar {} caracteres",
                    field_label, max
                ));
            }
        }

        if self.email && !is_valid_email(trimmed) {
            return Err(format!("{} no tiene un formato válido", field_label));
        }

        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{} debe ser un número", field_label));
        }
        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{} debe ser mayor o igual a {}", field_label, min));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{} debe ser menor o igual a {}", field_label, max));
            }
        }
        Ok(())
    }
}

/// Minimal shape check: `local@domain.tld`, no spaces
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

/// Field name -> message, rendered inline by forms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the first failure for `field`
    pub fn check(&mut self, field: &'static str, result: Result<(), String>) {
        if let Err(message) = result {
            self.0.entry(field).or_insert(message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&&'static str, &String)> {
        self.0.iter()
    }

    /// All messages joined, for banner display
    pub fn summary(&self) -> String {
        self.0.values().cloned().collect::<Vec<_>>().join(". ")
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Login form: `correo` must look like an email, password at least 6 chars
pub fn validate_login(correo: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.check(
        "correo",
        ValidationRules::required()
            .with_email()
            .validate_string(correo, "El correo"),
    );
    errors.check("password", validate_password(password, "La contraseña"));
    errors.into_result()
}

pub fn validate_password(password: &str, label: &str) -> Result<(), String> {
    ValidationRules::required()
        .with_min_length(PASSWORD_MIN_LENGTH)
        .validate_string(password, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_mentions_minimum() {
        let errors = validate_login("a@b.com", "short").unwrap_err();
        assert!(errors.get("correo").is_none());
        assert_eq!(
            errors.get("password"),
            Some("La contraseña debe tener al menos 6 caracteres")
        );
    }

    #[test]
    fn test_valid_login() {
        assert!(validate_login("a@b.com", "secret1").is_ok());
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("ventas@profitup.ec"));
        assert!(!is_valid_email("ventas@profitup"));
        assert!(!is_valid_email("@profitup.ec"));
        assert!(!is_valid_email("ven tas@profitup.ec"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn test_optional_empty_passes() {
        let rules = ValidationRules::none().with_email().with_min_length(3);
        assert!(rules.validate_string("  ", "Correo").is_ok());
    }

    #[test]
    fn test_numeric_range() {
        let rules = ValidationRules::required().with_min(0.0);
        assert!(rules.validate_number(0.0, "Precio").is_ok());
        assert_eq!(
            rules.validate_number(-1.0, "Precio"),
            Err("Precio debe ser mayor o igual a 0".to_string())
        );
        assert!(rules.validate_number(f64::NAN, "Precio").is_err());
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.check("nombre", Err("primero".into()));
        errors.check("nombre", Err("segundo".into()));
        assert_eq!(errors.get("nombre"), Some("primero"));
    }
}
