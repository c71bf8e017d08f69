use contracts::domain::a008_sale::aggregate::{NewSale, SaleLine};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use crate::domain::a001_client::api::use_clients;
use crate::domain::a003_product::api::use_products;
use crate::domain::a004_warehouse::api::use_warehouses;
use crate::domain::a008_sale::hook::SalesHook;
use crate::shared::components::form_modal::{submit_form, FormModal};
use crate::shared::components::line_items::{lines_total, LineDraft, LineItemsEditor};
use crate::shared::components::record_select::{option_label, select_options, RecordSelect};

pub fn build_sale(
    cliente: Option<i64>,
    bodega: Option<i64>,
    lines: &[LineDraft],
) -> Result<NewSale, FieldErrors> {
    let mut errors = FieldErrors::new();
    if cliente.is_none() {
        errors.check("clienteId", Err("Seleccione un cliente".to_string()));
    }
    if bodega.is_none() {
        errors.check("bodegaId", Err("Seleccione la bodega de salida".to_string()));
    }
    if lines.is_empty() {
        errors.check("lineas", Err("Agregue al menos un producto".to_string()));
    }
    errors.into_result()?;
    let (Some(cliente_id), Some(bodega_id)) = (cliente, bodega) else {
        return Err(FieldErrors::new());
    };
    Ok(NewSale {
        cliente_id,
        bodega_id,
        lineas: lines
            .iter()
            .map(|l| SaleLine {
                producto_id: l.producto_id,
                cantidad: l.cantidad,
                precio_unitario: l.precio,
            })
            .collect(),
    })
}

#[component]
pub fn SaleForm(hook: SalesHook, on_close: Callback<()>) -> impl IntoView {
    let clients = use_clients();
    let warehouses = use_warehouses();
    let products = use_products();
    clients.load_options();
    warehouses.load();
    products.load_options();

    let cliente = RwSignal::new(None::<i64>);
    let bodega = RwSignal::new(None::<i64>);
    let lines = RwSignal::new(Vec::<LineDraft>::new());
    let errors = RwSignal::new(FieldErrors::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let client_options = Signal::derive(move || {
        clients
            .list
            .items
            .with(|rows| select_options(rows, |c| c.id, |c| format!("{} ({})", c.nombre, c.documento)))
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
    let sale_price = Callback::new(move |id: i64| {
        products
            .list
            .items
            .with_untracked(|rows| rows.iter().find(|p| p.id == id).map(|p| p.precio_venta))
    });

    let on_submit = Callback::new(move |_| {
        let dto = match lines.with_untracked(|ls| {
            build_sale(cliente.get_untracked(), bodega.get_untracked(), ls)
        }) {
            Ok(dto) => dto,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::new());
        let name = client_options.with_untracked(|o| option_label(o, dto.cliente_id));
        let total = lines.with_untracked(|ls| lines_total(ls));
        submit_form(saving, error, on_close, move || async move {
            hook.create(dto, &name, total).await
        });
    });

    view! {
        <FormModal title="Nueva venta" on_close=on_close on_submit=on_submit saving=saving error=error submit_text="Registrar">
            <div class="form__row">
                <RecordSelect label="Cliente" value=cliente options=client_options field="clienteId" errors=errors disabled=saving />
                <RecordSelect label="Bodega" value=bodega options=warehouse_options field="bodegaId" errors=errors disabled=saving />
            </div>
            <LineItemsEditor
                lines=lines
                products=product_options
                price_label="Precio unitario"
                disabled=saving
                suggest_price=sale_price
            />
            {move || errors.with(|e| e.get("lineas").map(str::to_string)).map(|m| view! { <div class="form__error">{m}</div> })}
        </FormModal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_sale() {
        let errors = build_sale(Some(1), None, &[]).unwrap_err();
        assert!(errors.get("clienteId").is_none());
        assert!(errors.get("bodegaId").is_some());
        assert!(errors.get("lineas").is_some());

        let lines = vec![LineDraft {
            producto_id: 4,
            producto: "Cemento".to_string(),
            cantidad: 2.0,
            precio: 8.75,
        }];
        let dto = build_sale(Some(1), Some(3), &lines).unwrap();
        assert_eq!(dto.bodega_id, 3);
        assert_eq!(dto.lineas[0].precio_unitario, 8.75);
    }
}
