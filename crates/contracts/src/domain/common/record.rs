use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identity used to patch a single row after a mutation
pub trait HasId {
    fn id(&self) -> i64;
}

/// Registry rows with an `estado` that can be toggled and a name for prompts
pub trait Registry: HasId {
    fn status(&self) -> RecordStatus;
    fn set_status(&mut self, status: RecordStatus);
    fn display_name(&self) -> &str;
}

/// Lifecycle status shared by registry records (clients, providers, products, warehouses)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecordStatus {
    #[default]
    #[serde(rename = "ACTIVO", alias = "activo", alias = "Activo")]
    Active,
    #[serde(rename = "INACTIVO", alias = "inactivo", alias = "Inactivo")]
    Inactive,
}

impl RecordStatus {
    pub fn toggled(self) -> Self {
        match self {
            RecordStatus::Active => RecordStatus::Inactive,
            RecordStatus::Inactive => RecordStatus::Active,
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, RecordStatus::Active)
    }

    pub fn label(self) -> &'static str {
        match self {
            RecordStatus::Active => "Activo",
            RecordStatus::Inactive => "Inactivo",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of every `PATCH .../{id}/estado` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange<S> {
    pub estado: S,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&RecordStatus::Inactive).unwrap(),
            "\"INACTIVO\""
        );
        let parsed: RecordStatus = serde_json::from_str("\"activo\"").unwrap();
        assert_eq!(parsed, RecordStatus::Active);
    }

    #[test]
    fn test_toggled() {
        assert_eq!(RecordStatus::Active.toggled(), RecordStatus::Inactive);
        assert_eq!(RecordStatus::Inactive.toggled(), RecordStatus::Active);
    }
}
