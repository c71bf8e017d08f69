use contracts::domain::a002_provider::aggregate::Provider;
use leptos::prelude::*;

use super::view_model::ProviderDetailsViewModel;
use crate::shared::components::form_modal::FormModal;
use crate::shared::components::ui::FormInput;
use crate::shared::registry::RegistryHook;

#[component]
pub fn ProviderDetails(
    hook: RegistryHook<Provider>,
    provider: Option<Provider>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = ProviderDetailsViewModel::new(provider.as_ref());
    let title = provider
        .as_ref()
        .map(|p| format!("Proveedor: {}", p.razon_social))
        .unwrap_or_else(|| "Nuevo proveedor".to_string());
    let on_submit = Callback::new(move |_| vm.save(hook, on_close));

    view! {
        <FormModal title=title on_close=on_close on_submit=on_submit saving=vm.saving error=vm.error>
            <FormInput label="Razón social" value=vm.razon_social field="razonSocial" errors=vm.errors disabled=vm.saving />
            <FormInput label="RUC" value=vm.ruc field="ruc" errors=vm.errors placeholder="13 dígitos" disabled=vm.saving />
            <FormInput label="Contacto" value=vm.contacto field="contacto" errors=vm.errors disabled=vm.saving />
            <FormInput label="Correo" value=vm.correo field="correo" errors=vm.errors input_type="email" disabled=vm.saving />
            <FormInput label="Teléfono" value=vm.telefono field="telefono" errors=vm.errors disabled=vm.saving />
        </FormModal>
    }
}
