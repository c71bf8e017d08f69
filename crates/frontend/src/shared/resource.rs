//! List state shared by the feature hooks.
//!
//! Rows are replaced wholesale on reload; after a successful mutation only the
//! row with the matching id is patched.

use contracts::domain::common::{HasId, StatusChange};
use leptos::prelude::*;
use serde::Serialize;
use std::future::Future;

use crate::shared::confirm::gated;
use crate::shared::http::{execute, ApiError, ApiRequest, Transport};

/// Applies `patch` to the row with `id`. Returns false when no row matched.
pub fn patch_row<T: HasId>(rows: &mut [T], id: i64, patch: impl FnOnce(&mut T)) -> bool {
    match rows.iter_mut().find(|r| r.id() == id) {
        Some(row) => {
            patch(row);
            true
        }
        None => false,
    }
}

/// Swaps in `row` for the one with the same id, or appends it
pub fn upsert_row<T: HasId>(rows: &mut Vec<T>, row: T) {
    match rows.iter_mut().find(|r| r.id() == row.id()) {
        Some(existing) => *existing = row,
        None => rows.push(row),
    }
}

pub fn remove_row<T: HasId>(rows: &mut Vec<T>, id: i64) -> bool {
    let before = rows.len();
    rows.retain(|r| r.id() != id);
    rows.len() != before
}

/// Reactive rows of one resource
pub struct ResourceList<T: Send + Sync + 'static> {
    pub items: RwSignal<Vec<T>>,
    pub loaded: RwSignal<bool>,
}

impl<T: Send + Sync + 'static> Clone for ResourceList<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ResourceList<T> {}

impl<T: HasId + Clone + Send + Sync + 'static> ResourceList<T> {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            loaded: RwSignal::new(false),
        }
    }

    pub fn set(&self, rows: Vec<T>) {
        self.items.set(rows);
        self.loaded.set(true);
    }

    pub fn patch(&self, id: i64, patch: impl FnOnce(&mut T)) {
        self.items.update(|rows| {
            if !patch_row(rows, id, patch) {
                log::debug!("row {} not in list, nothing patched", id);
            }
        });
    }

    pub fn upsert(&self, row: T) {
        self.items.update(|rows| upsert_row(rows, row));
    }

    pub fn remove(&self, id: i64) {
        self.items.update(|rows| {
            remove_row(rows, id);
        });
    }

    pub fn find(&self, id: i64) -> Option<T> {
        self.items.with(|rows| rows.iter().find(|r| r.id() == id).cloned())
    }

    /// Loaded and without rows; drives the empty state
    pub fn is_empty(&self) -> bool {
        self.loaded.get() && self.items.with(Vec::is_empty)
    }
}

impl<T: HasId + Clone + Send + Sync + 'static> Default for ResourceList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// `PATCH {path}` with `{"estado": next}` once `decision` says yes.
///
/// `Ok(None)` means the user declined and nothing was sent.
pub async fn change_status<S: Serialize>(
    transport: &dyn Transport,
    decision: impl Future<Output = bool>,
    path: String,
    next: S,
) -> Result<Option<S>, ApiError> {
    let request = ApiRequest::patch(path).json(&StatusChange { estado: &next })?;
    match gated(decision, move || execute(transport, request)).await {
        None => Ok(None),
        Some(result) => result.map(|()| Some(next)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use contracts::domain::common::RecordStatus;
    use futures::executor::block_on;
    use futures::future::ready;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: &'static str,
    }

    impl HasId for Row {
        fn id(&self) -> i64 {
            self.id
        }
    }

    fn rows() -> Vec<Row> {
        vec![Row { id: 1, name: "a" }, Row { id: 2, name: "b" }]
    }

    #[test]
    fn test_patch_row_touches_only_match() {
        let mut list = rows();
        assert!(patch_row(&mut list, 2, |r| r.name = "z"));
        assert_eq!(list[0].name, "a");
        assert_eq!(list[1].name, "z");
        assert!(!patch_row(&mut list, 9, |r| r.name = "x"));
    }

    #[test]
    fn test_upsert_and_remove() {
        let mut list = rows();
        upsert_row(&mut list, Row { id: 1, name: "c" });
        upsert_row(&mut list, Row { id: 3, name: "d" });
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].name, "c");

        assert!(remove_row(&mut list, 2));
        assert!(!remove_row(&mut list, 2));
        assert_eq!(list.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_change_status_declined_sends_nothing() {
        let mock = MockTransport::new();
        let result = block_on(change_status(
            &mock,
            ready(false),
            "/api/clientes/4/estado".to_string(),
            RecordStatus::Inactive,
        ));
        assert_eq!(result, Ok(None));
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_change_status_confirmed_patches() {
        let mock = MockTransport::new();
        mock.reply_empty();
        let result = block_on(change_status(
            &mock,
            ready(true),
            "/api/clientes/4/estado".to_string(),
            RecordStatus::Inactive,
        ));
        assert_eq!(result, Ok(Some(RecordStatus::Inactive)));
        assert_eq!(
            mock.calls(),
            vec![(HttpMethod::Patch, "/api/clientes/4/estado".to_string())]
        );
        assert_eq!(mock.last_body(), Some(json!({"estado": "INACTIVO"})));
    }

    #[test]
    fn test_change_status_failure_surfaces() {
        let mock = MockTransport::new();
        mock.reply_status(409, json!({"message": "Cliente con ventas abiertas"}));
        let result = block_on(change_status(
            &mock,
            ready(true),
            "/api/clientes/4/estado".to_string(),
            RecordStatus::Inactive,
        ));
        let err = result.unwrap_err();
        assert_eq!(err.status, 409);
        assert_eq!(err.message, "Cliente con ventas abiertas");
    }
}
