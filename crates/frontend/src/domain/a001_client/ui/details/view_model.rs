use contracts::domain::a001_client::aggregate::{Client, ClientDto};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use crate::shared::components::form_modal::submit_form;
use crate::shared::components::ui::optional_text;
use crate::shared::registry::RegistryHook;

/// Form state of the client create/edit dialog
#[derive(Clone, Copy)]
pub struct ClientDetailsViewModel {
    pub id: Option<i64>,
    pub nombre: RwSignal<String>,
    pub documento: RwSignal<String>,
    pub correo: RwSignal<String>,
    pub telefono: RwSignal<String>,
    pub direccion: RwSignal<String>,
    pub errors: RwSignal<FieldErrors>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl ClientDetailsViewModel {
    pub fn new(client: Option<&Client>) -> Self {
        let dto = client.map(ClientDto::from).unwrap_or_default();
        Self {
            id: dto.id,
            nombre: RwSignal::new(dto.nombre),
            documento: RwSignal::new(dto.documento),
            correo: RwSignal::new(dto.correo.unwrap_or_default()),
            telefono: RwSignal::new(dto.telefono.unwrap_or_default()),
            direccion: RwSignal::new(dto.direccion.unwrap_or_default()),
            errors: RwSignal::new(FieldErrors::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    pub fn to_dto(&self) -> ClientDto {
        ClientDto {
            id: self.id,
            nombre: self.nombre.get_untracked().trim().to_string(),
            documento: self.documento.get_untracked().trim().to_string(),
            correo: optional_text(&self.correo.get_untracked()),
            telefono: optional_text(&self.telefono.get_untracked()),
            direccion: optional_text(&self.direccion.get_untracked()),
        }
    }

    /// Validates, then creates or updates through `hook`
    pub fn save(&self, hook: RegistryHook<Client>, on_done: Callback<()>) {
        let dto = self.to_dto();
        if let Err(errors) = dto.validate() {
            self.errors.set(errors);
            return;
        }
        self.errors.set(FieldErrors::new());
        let id = self.id;
        submit_form(self.saving, self.error, on_done, move || async move {
            let name = dto.nombre.clone();
            match id {
                Some(id) => hook.update(id, dto, &name).await,
                None => hook.create(dto, &name).await,
            }
        });
    }
}
