use contracts::domain::a007_purchase_order::aggregate::{NewPurchaseOrder, OrderLine};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use crate::domain::a002_provider::api::use_providers;
use crate::domain::a003_product::api::use_products;
use crate::domain::a004_warehouse::api::use_warehouses;
use crate::domain::a007_purchase_order::hook::PurchaseOrdersHook;
use crate::shared::components::form_modal::{submit_form, FormModal};
use crate::shared::components::line_items::{LineDraft, LineItemsEditor};
use crate::shared::components::record_select::{option_label, select_options, RecordSelect};

pub fn build_order(
    proveedor: Option<i64>,
    bodega: Option<i64>,
    lines: &[LineDraft],
) -> Result<NewPurchaseOrder, FieldErrors> {
    let mut errors = FieldErrors::new();
    if proveedor.is_none() {
        errors.check("proveedorId", Err("Seleccione un proveedor".to_string()));
    }
    if bodega.is_none() {
        errors.check("bodegaId", Err("Seleccione la bodega de destino".to_string()));
    }
    if lines.is_empty() {
        errors.check("lineas", Err("Agregue al menos un producto".to_string()));
    }
    errors.into_result()?;
    let (Some(proveedor_id), Some(bodega_id)) = (proveedor, bodega) else {
        return Err(FieldErrors::new());
    };
    Ok(NewPurchaseOrder {
        proveedor_id,
        bodega_id,
        lineas: lines
            .iter()
            .map(|l| OrderLine {
                producto_id: l.producto_id,
                cantidad: l.cantidad,
                costo_unitario: l.precio,
            })
            .collect(),
    })
}

#[component]
pub fn PurchaseOrderForm(hook: PurchaseOrdersHook, on_close: Callback<()>) -> impl IntoView {
    let providers = use_providers();
    let warehouses = use_warehouses();
    let products = use_products();
    providers.load_options();
    warehouses.load();
    products.load_options();

    let proveedor = RwSignal::new(None::<i64>);
    let bodega = RwSignal::new(None::<i64>);
    let lines = RwSignal::new(Vec::<LineDraft>::new());
    let errors = RwSignal::new(FieldErrors::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let provider_options = Signal::derive(move || {
        providers
            .list
            .items
            .with(|rows| select_options(rows, |p| p.id, |p| p.razon_social.clone()))
    });
    let warehouse_options = Signal::derive(move || {
        warehouses.list.items.with(|rows| {
            let active: Vec<_> = rows.iter().filter(|w| w.estado.is_active()).cloned().collect();
            select_options(&active, |w| w.id, |w| w.nombre.clone())
        })
    });
    let product_options = Signal::derive(move || {
        products
            .list
            .items
            .with(|rows| select_options(rows, |p| p.id, |p| format!("{} - {}", p.codigo, p.nombre)))
    });

    let on_submit = Callback::new(move |_| {
        let dto = match lines.with_untracked(|ls| {
            build_order(proveedor.get_untracked(), bodega.get_untracked(), ls)
        }) {
            Ok(dto) => dto,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::new());
        let name = provider_options.with_untracked(|o| option_label(o, dto.proveedor_id));
        submit_form(saving, error, on_close, move || async move {
            hook.create(dto, &name).await
        });
    });

    view! {
        <FormModal title="Nueva orden de compra" on_close=on_close on_submit=on_submit saving=saving error=error submit_text="Crear">
            <div class="form__row">
                <RecordSelect label="Proveedor" value=proveedor options=provider_options field="proveedorId" errors=errors disabled=saving />
                <RecordSelect label="Bodega destino" value=bodega options=warehouse_options field="bodegaId" errors=errors disabled=saving />
            </div>
            <LineItemsEditor lines=lines products=product_options price_label="Costo unitario" disabled=saving />
            {move || errors.with(|e| e.get("lineas").map(str::to_string)).map(|m| view! { <div class="form__error">{m}</div> })}
        </FormModal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_order_requires_header_and_lines() {
        let errors = build_order(None, Some(1), &[]).unwrap_err();
        assert!(errors.get("proveedorId").is_some());
        assert!(errors.get("bodegaId").is_none());
        assert_eq!(errors.get("lineas"), Some("Agregue al menos un producto"));
    }

    #[test]
    fn test_build_order_maps_lines() {
        let lines = vec![LineDraft {
            producto_id: 9,
            producto: "Tornillo".to_string(),
            cantidad: 100.0,
            precio: 0.05,
        }];
        let dto = build_order(Some(2), Some(1), &lines).unwrap();
        assert_eq!(dto.proveedor_id, 2);
        assert_eq!(dto.lineas[0].costo_unitario, 0.05);
    }
}
