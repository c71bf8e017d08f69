use serde::{Deserialize, Serialize};

/// Query string of paginated list endpoints (`?buscar=..&pagina=..&tamano=..`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "buscar", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "pagina")]
    pub page: usize,
    #[serde(rename = "tamano")]
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            page: 1,
            page_size: 50,
        }
    }
}

impl ListQuery {
    /// Search text trimmed; blank input clears the filter
    pub fn with_search(mut self, text: &str) -> Self {
        let text = text.trim();
        self.search = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        self
    }
}
