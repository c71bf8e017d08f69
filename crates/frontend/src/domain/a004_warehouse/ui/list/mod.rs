use contracts::domain::a004_warehouse::aggregate::Warehouse;
use leptos::prelude::*;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a004_warehouse::api::use_warehouses;
use crate::domain::a004_warehouse::ui::details::WarehouseDetails;
use crate::shared::components::list_state::{ActionErrorBanner, ListStatus};
use crate::shared::components::page_header::{PageHeader, RefreshButton};
use crate::shared::components::ui::StatusBadge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, contains_any, ListControls, Searchable, Sortable};

impl Searchable for Warehouse {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_any(
            &[
                &self.nombre,
                self.ubicacion.as_deref().unwrap_or(""),
                self.responsable.as_deref().unwrap_or(""),
            ],
            filter,
        )
    }
}

impl Sortable for Warehouse {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "ubicacion" => cmp_text(
                self.ubicacion.as_deref().unwrap_or(""),
                other.ubicacion.as_deref().unwrap_or(""),
            ),
            "estado" => self.estado.label().cmp(other.estado.label()),
            _ => cmp_text(&self.nombre, &other.nombre),
        }
    }
}

/// Warehouses are few, so the whole list is loaded and filtered here
#[component]
pub fn WarehousesListPage() -> impl IntoView {
    let warehouses = use_warehouses();
    let controls = ListControls::new("nombre");
    let form = RwSignal::new(None::<Option<Warehouse>>);

    warehouses.load();

    let visible = Memo::new(move |_| warehouses.list.items.with(|rows| controls.apply(rows)));

    view! {
        <div class="page">
            <PageHeader title="Bodegas" count=Signal::derive(move || warehouses.list.items.with(Vec::len))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| form.set(Some(None))>
                    {icon("plus")}
                    " Nueva"
                </Button>
                <RefreshButton
                    loading=Signal::derive(move || warehouses.api.loading())
                    on_click=Callback::new(move |_| warehouses.load())
                />
            </PageHeader>

            <div class="page__content">
                <div class="filter-panel">
                    <Input value=controls.search placeholder="Nombre, ubicación, responsable..." />
                </div>

                <ActionErrorBanner api=warehouses.api />

                <ListStatus
                    loading=Signal::derive(move || warehouses.api.loading())
                    error=Signal::derive(move || warehouses.api.error())
                    loaded=warehouses.list.loaded
                    has_rows=Signal::derive(move || !visible.with(Vec::is_empty))
                    empty_text="No hay bodegas registradas"
                >
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" style="cursor:pointer;" on:click=move |_| controls.toggle_sort("nombre")>
                                        "Nombre"
                                        <span class="table__sort-indicator">{move || controls.indicator("nombre")}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" style="cursor:pointer;" on:click=move |_| controls.toggle_sort("ubicacion")>
                                        "Ubicación"
                                        <span class="table__sort-indicator">{move || controls.indicator("ubicacion")}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>"Responsable"</TableHeaderCell>
                                <TableHeaderCell>"Estado"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|w| (w.id, w.estado.label(), w.nombre.clone(), w.ubicacion.clone(), w.responsable.clone())
                                children=move |warehouse: Warehouse| {
                                    let for_toggle = warehouse.clone();
                                    let for_edit = warehouse.clone();
                                    let active = warehouse.estado.is_active();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{warehouse.nombre.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {warehouse.ubicacion.clone().unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {warehouse.responsable.clone().unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <StatusBadge active=active label=warehouse.estado.label() />
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| warehouses.toggle_status(for_toggle.clone())
                                                >
                                                    {if active { "Desactivar" } else { "Activar" }}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| form.set(Some(Some(for_edit.clone())))
                                                    attr:title="Editar"
                                                >
                                                    {icon("edit")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </ListStatus>

                {move || form.get().map(|warehouse| view! {
                    <WarehouseDetails hook=warehouses warehouse=warehouse on_close=Callback::new(move |_| form.set(None)) />
                })}
            </div>
        </div>
    }
}
