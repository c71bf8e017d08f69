//! Registries that share one REST shape under a base path: list, detail,
//! create, update, `PATCH {id}/estado` and optionally `DELETE {id}`.
//!
//! Clients, providers, products and warehouses are all driven by
//! [`RegistryHook`]; each domain module only names its [`Endpoint`].

use contracts::domain::common::{ListQuery, RecordStatus, Registry};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::shared::api_utils::segment;
use crate::shared::confirm::{gated, use_confirm, ConfirmOptions, ConfirmService, Tone};
use crate::shared::http::{execute, fetch, ApiError, ApiRequest, Transport};
use crate::shared::resource::{change_status, ResourceList};
use crate::system::auth::request::{use_api, AuthedClient};

/// List responses come either as a bare array or as a page object
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Rows(Vec<T>),
    Page {
        #[serde(alias = "content", alias = "items", alias = "data")]
        contenido: Vec<T>,
        #[serde(default, alias = "totalElements", alias = "total_elements")]
        total: Option<usize>,
    },
}

/// One page of rows; `total` only when the backend reports it
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    pub total: Option<usize>,
}

impl<T> From<ListBody<T>> for ListPage<T> {
    fn from(body: ListBody<T>) -> Self {
        match body {
            ListBody::Rows(rows) => Self { rows, total: None },
            ListBody::Page { contenido, total } => Self {
                rows: contenido,
                total,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub base: &'static str,
    /// List requests carry a [`ListQuery`]
    pub paged: bool,
}

impl Endpoint {
    pub const fn paged(base: &'static str) -> Self {
        Self { base, paged: true }
    }

    pub const fn plain(base: &'static str) -> Self {
        Self { base, paged: false }
    }

    pub fn item(&self, id: i64) -> String {
        format!("{}/{}", self.base, segment(id))
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        t: &dyn Transport,
        query: &ListQuery,
    ) -> Result<ListPage<T>, ApiError> {
        let mut request = ApiRequest::get(self.base);
        if self.paged {
            request = request.query(query)?;
        }
        let body: ListBody<T> = fetch(t, request).await?;
        Ok(body.into())
    }

    pub async fn get<T: DeserializeOwned>(&self, t: &dyn Transport, id: i64) -> Result<T, ApiError> {
        fetch(t, ApiRequest::get(self.item(id))).await
    }

    /// The created row when the backend echoes it
    pub async fn create<T: DeserializeOwned, D: Serialize>(
        &self,
        t: &dyn Transport,
        dto: &D,
    ) -> Result<Option<T>, ApiError> {
        fetch(t, ApiRequest::post(self.base).json(dto)?).await
    }

    pub async fn update<T: DeserializeOwned, D: Serialize>(
        &self,
        t: &dyn Transport,
        id: i64,
        dto: &D,
    ) -> Result<Option<T>, ApiError> {
        fetch(t, ApiRequest::put(self.item(id)).json(dto)?).await
    }

    pub async fn set_status(
        &self,
        t: &dyn Transport,
        decision: impl Future<Output = bool>,
        id: i64,
        next: RecordStatus,
    ) -> Result<Option<RecordStatus>, ApiError> {
        change_status(t, decision, format!("{}/estado", self.item(id)), next).await
    }

    /// `Ok(false)` when declined
    pub async fn delete(
        &self,
        t: &dyn Transport,
        decision: impl Future<Output = bool>,
        id: i64,
    ) -> Result<bool, ApiError> {
        let request = ApiRequest::delete(self.item(id));
        match gated(decision, move || execute(t, request)).await {
            None => Ok(false),
            Some(result) => result.map(|()| true),
        }
    }
}

const OPTIONS_PAGE_SIZE: usize = 500;

/// Rows, filter and mutations of one registry page
pub struct RegistryHook<T: Send + Sync + 'static> {
    pub api: AuthedClient,
    pub list: ResourceList<T>,
    pub query: RwSignal<ListQuery>,
    pub total: RwSignal<Option<usize>>,
    endpoint: Endpoint,
    /// Lowercase singular used in prompts ("cliente")
    noun: &'static str,
    confirm: ConfirmService,
}

impl<T: Send + Sync + 'static> Clone for RegistryHook<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for RegistryHook<T> {}

impl<T> RegistryHook<T>
where
    T: Registry + DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn new(endpoint: Endpoint, noun: &'static str) -> Self {
        Self {
            api: use_api(),
            list: ResourceList::new(),
            query: RwSignal::new(ListQuery::default()),
            total: RwSignal::new(None),
            endpoint,
            noun,
            confirm: use_confirm(),
        }
    }

    pub fn load(&self) {
        let this = *self;
        let query = self.query.get_untracked();
        spawn_local(async move {
            match this.api.track(this.endpoint.list::<T>(&this.api, &query)).await {
                Ok(page) => {
                    this.total.try_set(page.total);
                    this.list.set(page.rows);
                }
                Err(e) => log::warn!("{} load failed: {}", this.endpoint.base, e),
            }
        });
    }

    /// Server-side `estado` filter; `None` lists every row
    pub fn filter_status(&self, status: Option<RecordStatus>) {
        self.query.update(|q| {
            q.status = status.map(|s| match s {
                RecordStatus::Active => "ACTIVO".to_string(),
                RecordStatus::Inactive => "INACTIVO".to_string(),
            });
            q.page = 1;
        });
        self.load();
    }

    /// Active rows for pickers, in one large page
    pub fn load_options(&self) {
        self.query.set(ListQuery {
            status: Some("ACTIVO".to_string()),
            page_size: OPTIONS_PAGE_SIZE,
            ..ListQuery::default()
        });
        self.load();
    }

    pub fn go_to_page(&self, page: usize) {
        self.query.update(|q| q.page = page.max(1));
        self.load();
    }

    /// Fresh copy of one row, also patched into the list
    pub async fn fetch_one(&self, id: i64) -> Result<T, ApiError> {
        let row: T = self.api.track_action(self.endpoint.get(&self.api, id)).await?;
        self.list.upsert(row.clone());
        Ok(row)
    }

    pub fn toggle_status(&self, row: T) {
        let this = *self;
        let next = row.status().toggled();
        let verb = if next.is_active() { "Activar" } else { "Desactivar" };
        let decision = self.confirm.confirm(
            ConfirmOptions::new(
                format!("{} {}", verb, self.noun),
                format!("¿Cambiar el estado de «{}» a {}?", row.display_name(), next.label()),
            )
            .confirm_text(verb)
            .tone(Tone::Warning),
        );
        let id = row.id();
        spawn_local(async move {
            if let Ok(Some(estado)) = this
                .api
                .track_action(this.endpoint.set_status(&this.api, decision, id, next))
                .await
            {
                this.list.patch(id, |r| r.set_status(estado));
            }
        });
    }

    /// `Ok(false)` when the user declined
    pub async fn create<D: Serialize>(&self, dto: D, name: &str) -> Result<bool, ApiError> {
        let decision = self.confirm.confirm(
            ConfirmOptions::new(
                format!("Crear {}", self.noun),
                format!("¿Registrar «{}»?", name),
            )
            .confirm_text("Crear")
            .tone(Tone::Brand),
        );
        let client = self.api;
        let endpoint = self.endpoint;
        let Some(created) = gated(decision, || endpoint.create::<T, D>(&client, &dto)).await else {
            return Ok(false);
        };
        match created? {
            Some(row) => self.list.upsert(row),
            None => self.load(),
        }
        Ok(true)
    }

    pub async fn update<D: Serialize>(&self, id: i64, dto: D, name: &str) -> Result<bool, ApiError> {
        let decision = self.confirm.confirm(
            ConfirmOptions::new("Guardar cambios", format!("¿Guardar los datos de «{}»?", name))
                .confirm_text("Guardar"),
        );
        let client = self.api;
        let endpoint = self.endpoint;
        let Some(updated) = gated(decision, || endpoint.update::<T, D>(&client, id, &dto)).await
        else {
            return Ok(false);
        };
        match updated? {
            Some(row) => self.list.upsert(row),
            None => self.load(),
        }
        Ok(true)
    }

    pub fn delete(&self, row: T) {
        let this = *self;
        let decision = self.confirm.confirm(
            ConfirmOptions::new(
                format!("Eliminar {}", self.noun),
                format!(
                    "¿Eliminar «{}»? Esta acción no se puede deshacer.",
                    row.display_name()
                ),
            )
            .confirm_text("Eliminar")
            .danger(),
        );
        let id = row.id();
        spawn_local(async move {
            if let Ok(true) = this.api.track_action(this.endpoint.delete(&this.api, decision, id)).await {
                this.list.remove(id);
                this.total.try_update(|t| {
                    if let Some(t) = t {
                        *t = t.saturating_sub(1);
                    }
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use futures::executor::block_on;
    use futures::future::ready;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        id: i64,
    }

    const ROWS: Endpoint = Endpoint::paged("/api/clientes");

    #[test]
    fn test_list_sends_query() {
        let mock = MockTransport::new();
        mock.reply_json(json!([{"id": 1}]));
        let query = ListQuery::default().with_search("andes");
        let page = block_on(ROWS.list::<Row>(&mock, &query)).unwrap();
        assert_eq!(page.rows, vec![Row { id: 1 }]);
        assert_eq!(page.total, None);
        assert_eq!(
            mock.calls(),
            vec![(
                HttpMethod::Get,
                "/api/clientes?buscar=andes&pagina=1&tamano=50".to_string()
            )]
        );
    }

    #[test]
    fn test_plain_list_has_no_query() {
        let mock = MockTransport::new();
        mock.reply_json(json!([]));
        let page = block_on(Endpoint::plain("/api/bodegas").list::<Row>(&mock, &ListQuery::default()))
            .unwrap();
        assert!(page.rows.is_empty());
        assert_eq!(mock.calls(), vec![(HttpMethod::Get, "/api/bodegas".to_string())]);
    }

    #[test]
    fn test_page_object_accepted() {
        let mock = MockTransport::new();
        mock.reply_json(json!({"content": [{"id": 4}, {"id": 5}], "totalElements": 12}));
        let page = block_on(ROWS.list::<Row>(&mock, &ListQuery::default())).unwrap();
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.total, Some(12));
    }

    #[test]
    fn test_delete_gated() {
        let mock = MockTransport::new();
        let products = Endpoint::paged("/api/productos");
        assert_eq!(block_on(products.delete(&mock, ready(false), 3)), Ok(false));
        assert_eq!(mock.request_count(), 0);

        assert_eq!(block_on(products.delete(&mock, ready(true), 3)), Ok(true));
        assert_eq!(
            mock.calls(),
            vec![(HttpMethod::Delete, "/api/productos/3".to_string())]
        );
    }

    #[test]
    fn test_set_status_path() {
        let mock = MockTransport::new();
        let next = block_on(ROWS.set_status(&mock, ready(true), 9, RecordStatus::Active)).unwrap();
        assert_eq!(next, Some(RecordStatus::Active));
        assert_eq!(
            mock.calls(),
            vec![(HttpMethod::Patch, "/api/clientes/9/estado".to_string())]
        );
        assert_eq!(mock.last_body(), Some(json!({"estado": "ACTIVO"})));
    }
}
