use contracts::domain::a005_inventory::aggregate::{AssignProduct, StockRow};
use contracts::shared::validation::{FieldErrors, ValidationRules};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a003_product::api::use_products;
use crate::domain::a005_inventory::hook::InventoryHook;
use crate::shared::components::form_modal::{submit_form, FormModal};
use crate::shared::components::record_select::{option_label, select_options, RecordSelect};
use crate::shared::components::ui::{parse_decimal, FormInput};

/// Parsed quantity or the field's error message
pub fn parse_quantity(raw: &str) -> Result<f64, String> {
    let value = parse_decimal(raw).ok_or_else(|| "Ingrese una cantidad numérica".to_string())?;
    ValidationRules::required()
        .with_min(0.0)
        .validate_number(value, "La cantidad")?;
    Ok(value)
}

#[component]
pub fn AdjustQuantityForm(hook: InventoryHook, row: StockRow, on_close: Callback<()>) -> impl IntoView {
    let cantidad = RwSignal::new(row.cantidad.to_string());
    let errors = RwSignal::new(FieldErrors::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let row = StoredValue::new(row);

    // the table may be stale; show what the backend has now
    spawn_local(async move {
        match hook.quantity(&row.get_value()).await {
            Ok(q) => {
                cantidad.try_set(q.cantidad.to_string());
            }
            Err(e) => log::warn!("quantity lookup failed: {}", e),
        }
    });

    let on_submit = Callback::new(move |_| {
        let value = match parse_quantity(&cantidad.get_untracked()) {
            Ok(value) => value,
            Err(message) => {
                let mut e = FieldErrors::new();
                e.check("cantidad", Err(message));
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::new());
        let row = row.get_value();
        submit_form(saving, error, on_close, move || async move {
            hook.set_quantity(&row, value).await
        });
    });

    let title = row.with_value(|r| format!("{} / {}", r.producto, r.bodega));

    view! {
        <FormModal title=title on_close=on_close on_submit=on_submit saving=saving error=error submit_text="Ajustar">
            <FormInput label="Cantidad" value=cantidad field="cantidad" errors=errors disabled=saving />
        </FormModal>
    }
}

#[component]
pub fn AssignProductForm(
    hook: InventoryHook,
    #[prop(into)] warehouses: Signal<Vec<(i64, String)>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let products = use_products();
    products.load_options();

    let producto = RwSignal::new(None::<i64>);
    let bodega = RwSignal::new(hook.query.with_untracked(|q| q.warehouse_id));
    let errors = RwSignal::new(FieldErrors::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let product_options = Signal::derive(move || {
        products
            .list
            .items
            .with(|rows| select_options(rows, |p| p.id, |p| format!("{} - {}", p.codigo, p.nombre)))
    });

    let on_submit = Callback::new(move |_| {
        let mut e = FieldErrors::new();
        if producto.get_untracked().is_none() {
            e.check("productoId", Err("Seleccione un producto".to_string()));
        }
        if bodega.get_untracked().is_none() {
            e.check("bodegaId", Err("Seleccione una bodega".to_string()));
        }
        let (Some(producto_id), Some(bodega_id)) = (producto.get_untracked(), bodega.get_untracked()) else {
            errors.set(e);
            return;
        };
        errors.set(FieldErrors::new());

        let summary = format!(
            "{} a {}",
            product_options.with_untracked(|o| option_label(o, producto_id)),
            warehouses.with_untracked(|o| option_label(o, bodega_id))
        );
        let dto = AssignProduct {
            producto_id,
            bodega_id,
        };
        submit_form(saving, error, on_close, move || async move {
            hook.assign(dto, &summary).await
        });
    });

    view! {
        <FormModal title="Asignar producto a bodega" on_close=on_close on_submit=on_submit saving=saving error=error submit_text="Asignar">
            <RecordSelect label="Producto" value=producto options=product_options field="productoId" errors=errors disabled=saving />
            <RecordSelect label="Bodega" value=bodega options=warehouses field="bodegaId" errors=errors disabled=saving />
        </FormModal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("12,5"), Ok(12.5));
        assert!(parse_quantity("-1").is_err());
        assert_eq!(
            parse_quantity("doce"),
            Err("Ingrese una cantidad numérica".to_string())
        );
    }
}
