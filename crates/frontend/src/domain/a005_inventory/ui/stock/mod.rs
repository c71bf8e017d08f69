use contracts::domain::a005_inventory::aggregate::StockRow;
use leptos::prelude::*;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a004_warehouse::api::use_warehouses;
use crate::domain::a005_inventory::hook::use_inventory;
use crate::domain::a005_inventory::ui::details::{AdjustQuantityForm, AssignProductForm};
use crate::shared::components::list_state::ListStatus;
use crate::shared::components::page_header::{PageHeader, RefreshButton};
use crate::shared::components::record_select::{parse_id, select_options};
use crate::shared::components::ui::ToneBadge;
use crate::shared::confirm::Tone;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, contains_any, ListControls, Searchable, Sortable};

impl Searchable for StockRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_any(&[&self.producto, &self.bodega], filter)
    }
}

impl Sortable for StockRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "bodega" => cmp_text(&self.bodega, &other.bodega),
            "cantidad" => self.cantidad.total_cmp(&other.cantidad),
            _ => cmp_text(&self.producto, &other.producto),
        }
    }
}

fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[component]
pub fn InventoryPage() -> impl IntoView {
    let inventory = use_inventory();
    let warehouses = use_warehouses();
    let controls = ListControls::new("producto");
    let warehouse_value = RwSignal::new(String::new());
    let adjusting = RwSignal::new(None::<StockRow>);
    let show_assign = RwSignal::new(false);

    warehouses.load_options();
    inventory.load();

    Effect::new(move |prev: Option<String>| {
        let value = warehouse_value.get();
        if prev.as_ref().is_some_and(|p| *p != value) {
            inventory.select_warehouse(parse_id(&value));
        }
        value
    });

    let warehouse_options = Signal::derive(move || {
        warehouses
            .list
            .items
            .with(|rows| select_options(rows, |w| w.id, |w| w.nombre.clone()))
    });

    let visible = Memo::new(move |_| inventory.rows.with(|rows| controls.apply(rows)));

    let header = move |field: &'static str, label: &'static str| {
        view! {
            <TableHeaderCell>
                <div class="table__sortable-header" style="cursor:pointer;" on:click=move |_| controls.toggle_sort(field)>
                    {label}
                    <span class="table__sort-indicator">{move || controls.indicator(field)}</span>
                </div>
            </TableHeaderCell>
        }
    };

    view! {
        <div class="page">
            <PageHeader title="Inventario" count=Signal::derive(move || inventory.rows.with(Vec::len))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| show_assign.set(true)>
                    {icon("plus")}
                    " Asignar producto"
                </Button>
                <RefreshButton
                    loading=Signal::derive(move || inventory.api.loading())
                    on_click=Callback::new(move |_| inventory.load())
                />
            </PageHeader>

            <div class="page__content">
                <div class="filter-panel">
                    <Select value=warehouse_value size=SelectSize::Small>
                        <option value="">"Todas las bodegas"</option>
                        {move || warehouse_options.get().into_iter().map(|(id, name)| view! {
                            <option value=id.to_string()>{name}</option>
                        }).collect_view()}
                    </Select>
                    <Input value=controls.search placeholder="Producto o bodega..." />
                </div>

                <Show when=move || inventory.access.get() == Some(false)>
                    <div class="alert alert--warning">
                        "No tiene acceso para operar en esta bodega. Solo puede consultar su stock."
                    </div>
                </Show>

                <ListStatus
                    loading=Signal::derive(move || inventory.api.loading())
                    error=Signal::derive(move || inventory.api.error())
                    loaded=inventory.loaded
                    has_rows=Signal::derive(move || !visible.with(Vec::is_empty))
                    empty_text="No hay existencias para mostrar"
                >
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {header("producto", "Producto")}
                                {header("bodega", "Bodega")}
                                {header("cantidad", "Cantidad")}
                                <TableHeaderCell>"Mínimo"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|r| (r.producto_id, r.bodega_id, r.cantidad.to_bits())
                                children=move |row: StockRow| {
                                    let low = row.is_low();
                                    let for_adjust = row.clone();
                                    let can_operate = move || inventory.access.get() != Some(false);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{row.producto.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{row.bodega.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_quantity(row.cantidad)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {row.minimo.map(format_quantity).unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                {low.then(|| view! { <ToneBadge tone=Tone::Danger>"Bajo mínimo"</ToneBadge> })}
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| adjusting.set(Some(for_adjust.clone()))
                                                    disabled=Signal::derive(move || !can_operate())
                                                >
                                                    "Ajustar"
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </ListStatus>

                {move || adjusting.get().map(|row| view! {
                    <AdjustQuantityForm hook=inventory row=row on_close=Callback::new(move |_| adjusting.set(None)) />
                })}

                <Show when=move || show_assign.get()>
                    <AssignProductForm
                        hook=inventory
                        warehouses=warehouse_options
                        on_close=Callback::new(move |_| show_assign.set(false))
                    />
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(12.0), "12");
        assert_eq!(format_quantity(2.5), "2.50");
    }
}
