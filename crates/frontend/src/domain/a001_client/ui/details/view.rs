use contracts::domain::a001_client::aggregate::Client;
use leptos::prelude::*;

use super::view_model::ClientDetailsViewModel;
use crate::shared::components::form_modal::FormModal;
use crate::shared::components::ui::FormInput;
use crate::shared::registry::RegistryHook;

#[component]
pub fn ClientDetails(
    hook: RegistryHook<Client>,
    /// Row being edited; `None` creates a new client
    client: Option<Client>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = ClientDetailsViewModel::new(client.as_ref());
    let title = match &client {
        Some(c) => format!("Cliente: {}", c.nombre),
        None => "Nuevo cliente".to_string(),
    };
    let on_submit = Callback::new(move |_| vm.save(hook, on_close));

    view! {
        <FormModal
            title=title
            on_close=on_close
            on_submit=on_submit
            saving=vm.saving
            error=vm.error
            submit_text=if vm.is_edit_mode() { "Guardar" } else { "Crear" }
        >
            <FormInput label="Nombre" value=vm.nombre field="nombre" errors=vm.errors disabled=vm.saving />
            <FormInput
                label="Cédula / RUC"
                value=vm.documento
                field="documento"
                errors=vm.errors
                placeholder="10 o 13 dígitos"
                disabled=vm.saving
            />
            <FormInput label="Correo" value=vm.correo field="correo" errors=vm.errors input_type="email" disabled=vm.saving />
            <FormInput label="Teléfono" value=vm.telefono field="telefono" errors=vm.errors disabled=vm.saving />
            <FormInput label="Dirección" value=vm.direccion field="direccion" errors=vm.errors disabled=vm.saving />
        </FormModal>
    }
}
