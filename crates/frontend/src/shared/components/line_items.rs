//! Product lines editor shared by purchase orders and sales

use contracts::shared::validation::{FieldErrors, ValidationRules};
use leptos::prelude::*;

use crate::shared::components::record_select::{option_label, RecordSelect};
use crate::shared::components::ui::{parse_decimal, FormInput};
use crate::shared::icons::icon;

#[derive(Debug, Clone, PartialEq)]
pub struct LineDraft {
    pub producto_id: i64,
    pub producto: String,
    pub cantidad: f64,
    /// Unit cost or unit price, depending on the document
    pub precio: f64,
}

/// Same product twice adds up the quantity and keeps the latest price
pub fn add_line(lines: &mut Vec<LineDraft>, line: LineDraft) {
    match lines.iter_mut().find(|l| l.producto_id == line.producto_id) {
        Some(existing) => {
            existing.cantidad += line.cantidad;
            existing.precio = line.precio;
        }
        None => lines.push(line),
    }
}

pub fn lines_total(lines: &[LineDraft]) -> f64 {
    lines.iter().map(|l| l.cantidad * l.precio).sum()
}

pub fn parse_line(
    producto: Option<i64>,
    cantidad: &str,
    precio: &str,
    price_label: &str,
) -> Result<(i64, f64, f64), FieldErrors> {
    let mut errors = FieldErrors::new();
    if producto.is_none() {
        errors.check("lineaProducto", Err("Seleccione un producto".to_string()));
    }
    let cantidad = parse_decimal(cantidad);
    match cantidad {
        Some(c) if c > 0.0 => {}
        _ => errors.check("lineaCantidad", Err("La cantidad debe ser mayor a 0".to_string())),
    }
    let precio = parse_decimal(precio);
    match precio {
        Some(p) => errors.check(
            "lineaPrecio",
            ValidationRules::required().with_min(0.0).validate_number(p, price_label),
        ),
        None => errors.check("lineaPrecio", Err(format!("{} es obligatorio", price_label))),
    }
    errors.into_result()?;
    match (producto, cantidad, precio) {
        (Some(id), Some(c), Some(p)) => Ok((id, c, p)),
        _ => Err(FieldErrors::new()),
    }
}

#[component]
pub fn LineItemsEditor(
    lines: RwSignal<Vec<LineDraft>>,
    #[prop(into)] products: Signal<Vec<(i64, String)>>,
    price_label: &'static str,
    #[prop(into)] disabled: Signal<bool>,
    /// Prefills the price when a product is picked
    #[prop(optional)]
    suggest_price: Option<Callback<i64, Option<f64>>>,
) -> impl IntoView {
    let producto = RwSignal::new(None::<i64>);
    let cantidad = RwSignal::new(String::new());
    let precio = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());

    if let Some(suggest) = suggest_price {
        Effect::new(move |_| {
            if let Some(price) = producto.get().and_then(|id| suggest.run(id)) {
                precio.set(format!("{:.2}", price));
            }
        });
    }

    let add = move |_| {
        match parse_line(
            producto.get_untracked(),
            &cantidad.get_untracked(),
            &precio.get_untracked(),
            price_label,
        ) {
            Ok((producto_id, cantidad_value, precio_value)) => {
                let name = products.with_untracked(|opts| option_label(opts, producto_id));
                lines.update(|ls| {
                    add_line(
                        ls,
                        LineDraft {
                            producto_id,
                            producto: name,
                            cantidad: cantidad_value,
                            precio: precio_value,
                        },
                    )
                });
                errors.set(FieldErrors::new());
                producto.set(None);
                cantidad.set(String::new());
                precio.set(String::new());
            }
            Err(e) => errors.set(e),
        }
    };

    view! {
        <fieldset class="line-items" disabled=move || disabled.get()>
            <legend>"Detalle"</legend>
            <div class="form__row">
                <RecordSelect label="Producto" value=producto options=products field="lineaProducto" errors=errors />
                <FormInput label="Cantidad" value=cantidad field="lineaCantidad" errors=errors />
                <FormInput label=price_label value=precio field="lineaPrecio" errors=errors />
                <button type="button" class="button button--secondary line-items__add" on:click=add>
                    {icon("plus")}
                    " Agregar"
                </button>
            </div>
            <table class="line-items__table">
                <thead>
                    <tr>
                        <th>"Producto"</th>
                        <th>"Cantidad"</th>
                        <th>{price_label}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || lines.get()
                        key=|l| (l.producto_id, l.cantidad.to_bits(), l.precio.to_bits())
                        children=move |line: LineDraft| {
                            let id = line.producto_id;
                            view! {
                                <tr>
                                    <td>{line.producto}</td>
                                    <td>{line.cantidad}</td>
                                    <td>{format!("{:.2}", line.precio)}</td>
                                    <td>
                                        <button
                                            type="button"
                                            class="button button--icon"
                                            title="Quitar"
                                            on:click=move |_| lines.update(|ls| ls.retain(|l| l.producto_id != id))
                                        >
                                            {icon("x")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <div class="line-items__total">
                "Total estimado: "
                {move || format!("{:.2}", lines.with(|ls| lines_total(ls)))}
            </div>
        </fieldset>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: i64, cantidad: f64, precio: f64) -> LineDraft {
        LineDraft {
            producto_id: id,
            producto: format!("P{}", id),
            cantidad,
            precio,
        }
    }

    #[test]
    fn test_add_line_merges_same_product() {
        let mut lines = vec![draft(1, 2.0, 5.0)];
        add_line(&mut lines, draft(2, 1.0, 3.0));
        add_line(&mut lines, draft(1, 3.0, 4.5));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].cantidad, 5.0);
        assert_eq!(lines[0].precio, 4.5);
        assert_eq!(lines_total(&lines), 25.5);
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(Some(4), "2", "1,25", "El costo"), Ok((4, 2.0, 1.25)));

        let errors = parse_line(None, "0", "", "El costo").unwrap_err();
        assert!(errors.get("lineaProducto").is_some());
        assert!(errors.get("lineaCantidad").is_some());
        assert_eq!(errors.get("lineaPrecio"), Some("El costo es obligatorio"));
    }
}
