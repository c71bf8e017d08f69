use contracts::domain::a003_product::aggregate::Product;
use leptos::prelude::*;

use super::view_model::ProductDetailsViewModel;
use crate::shared::components::form_modal::FormModal;
use crate::shared::components::ui::FormInput;
use crate::shared::registry::RegistryHook;

#[component]
pub fn ProductDetails(
    hook: RegistryHook<Product>,
    product: Option<Product>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = ProductDetailsViewModel::new(product.as_ref());
    let title = product
        .as_ref()
        .map(|p| format!("Producto: {}", p.nombre))
        .unwrap_or_else(|| "Nuevo producto".to_string());
    let on_submit = Callback::new(move |_| vm.save(hook, on_close));

    view! {
        <FormModal title=title on_close=on_close on_submit=on_submit saving=vm.saving error=vm.error>
            <div class="form__row">
                <FormInput label="Código" value=vm.codigo field="codigo" errors=vm.errors disabled=vm.saving />
                <FormInput label="Nombre" value=vm.nombre field="nombre" errors=vm.errors disabled=vm.saving />
            </div>
            <div class="form__row">
                <FormInput label="Categoría" value=vm.categoria field="categoria" errors=vm.errors disabled=vm.saving />
                <FormInput label="Unidad" value=vm.unidad field="unidad" errors=vm.errors placeholder="unidad, kg, m..." disabled=vm.saving />
            </div>
            <div class="form__row">
                <FormInput label="Precio de compra" value=vm.precio_compra field="precioCompra" errors=vm.errors disabled=vm.saving />
                <FormInput label="Precio de venta" value=vm.precio_venta field="precioVenta" errors=vm.errors disabled=vm.saving />
            </div>
        </FormModal>
    }
}
