use contracts::domain::a004_warehouse::aggregate::{Warehouse, WarehouseDto};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use crate::shared::components::form_modal::submit_form;
use crate::shared::components::ui::optional_text;
use crate::shared::registry::RegistryHook;

#[derive(Clone, Copy)]
pub struct WarehouseDetailsViewModel {
    pub id: Option<i64>,
    pub nombre: RwSignal<String>,
    pub ubicacion: RwSignal<String>,
    pub responsable: RwSignal<String>,
    pub errors: RwSignal<FieldErrors>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl WarehouseDetailsViewModel {
    pub fn new(warehouse: Option<&Warehouse>) -> Self {
        let dto = warehouse.map(WarehouseDto::from).unwrap_or_default();
        Self {
            id: dto.id,
            nombre: RwSignal::new(dto.nombre),
            ubicacion: RwSignal::new(dto.ubicacion.unwrap_or_default()),
            responsable: RwSignal::new(dto.responsable.unwrap_or_default()),
            errors: RwSignal::new(FieldErrors::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    pub fn save(&self, hook: RegistryHook<Warehouse>, on_done: Callback<()>) {
        let dto = WarehouseDto {
            id: self.id,
            nombre: self.nombre.get_untracked().trim().to_string(),
            ubicacion: optional_text(&self.ubicacion.get_untracked()),
            responsable: optional_text(&self.responsable.get_untracked()),
        };
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
