use contracts::domain::a004_warehouse::aggregate::Warehouse;
use leptos::prelude::*;

use super::view_model::WarehouseDetailsViewModel;
use crate::shared::components::form_modal::FormModal;
use crate::shared::components::ui::FormInput;
use crate::shared::registry::RegistryHook;

#[component]
pub fn WarehouseDetails(
    hook: RegistryHook<Warehouse>,
    warehouse: Option<Warehouse>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = WarehouseDetailsViewModel::new(warehouse.as_ref());
    let title = warehouse
        .as_ref()
        .map(|w| format!("Bodega: {}", w.nombre))
        .unwrap_or_else(|| "Nueva bodega".to_string());
    let on_submit = Callback::new(move |_| vm.save(hook, on_close));

    view! {
        <FormModal title=title on_close=on_close on_submit=on_submit saving=vm.saving error=vm.error>
            <FormInput label="Nombre" value=vm.nombre field="nombre" errors=vm.errors disabled=vm.saving />
            <FormInput label="Ubicación" value=vm.ubicacion field="ubicacion" errors=vm.errors disabled=vm.saving />
            <FormInput label="Responsable" value=vm.responsable field="responsable" errors=vm.errors disabled=vm.saving />
        </FormModal>
    }
}
