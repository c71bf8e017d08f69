use contracts::domain::a002_provider::aggregate::{Provider, ProviderDto};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use crate::shared::components::form_modal::submit_form;
use crate::shared::components::ui::optional_text;
use crate::shared::registry::RegistryHook;

#[derive(Clone, Copy)]
pub struct ProviderDetailsViewModel {
    pub id: Option<i64>,
    pub razon_social: RwSignal<String>,
    pub ruc: RwSignal<String>,
    pub contacto: RwSignal<String>,
    pub correo: RwSignal<String>,
    pub telefono: RwSignal<String>,
    pub errors: RwSignal<FieldErrors>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl ProviderDetailsViewModel {
    pub fn new(provider: Option<&Provider>) -> Self {
        let dto = provider.map(ProviderDto::from).unwrap_or_default();
        Self {
            id: dto.id,
            razon_social: RwSignal::new(dto.razon_social),
            ruc: RwSignal::new(dto.ruc),
            contacto: RwSignal::new(dto.contacto.unwrap_or_default()),
            correo: RwSignal::new(dto.correo.unwrap_or_default()),
            telefono: RwSignal::new(dto.telefono.unwrap_or_default()),
            errors: RwSignal::new(FieldErrors::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn to_dto(&self) -> ProviderDto {
        ProviderDto {
            id: self.id,
            razon_social: self.razon_social.get_untracked().trim().to_string(),
            ruc: self.ruc.get_untracked().trim().to_string(),
            contacto: optional_text(&self.contacto.get_untracked()),
            correo: optional_text(&self.correo.get_untracked()),
            telefono: optional_text(&self.telefono.get_untracked()),
        }
    }

    pub fn save(&self, hook: RegistryHook<Provider>, on_done: Callback<()>) {
        let dto = self.to_dto();
        if let Err(errors) = dto.validate() {
            self.errors.set(errors);
            return;
        }
        self.errors.set(FieldErrors::new());
        let id = self.id;
        submit_form(self.saving, self.error, on_done, move || async move {
            let name = dto.razon_social.clone();
            match id {
                Some(id) => hook.update(id, dto, &name).await,
                None => hook.create(dto, &name).await,
            }
        });
    }
}
