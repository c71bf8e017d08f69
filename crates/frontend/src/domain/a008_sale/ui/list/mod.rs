use contracts::domain::a008_sale::aggregate::Sale;
use leptos::prelude::*;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a003_product::api::format_price;
use crate::domain::a008_sale::hook::use_sales;
use crate::domain::a008_sale::ui::details::SaleForm;
use crate::shared::components::list_state::ListStatus;
use crate::shared::components::page_header::{PageHeader, RefreshButton};
use crate::shared::components::pagination_controls::{has_next_page, PaginationControls};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, contains_any, ListControls, Searchable, Sortable};

impl Searchable for Sale {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_any(
            &[&self.id.to_string(), self.cliente.as_deref().unwrap_or("")],
            filter,
        )
    }
}

impl Sortable for Sale {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "cliente" => cmp_text(
                self.cliente.as_deref().unwrap_or(""),
                other.cliente.as_deref().unwrap_or(""),
            ),
            "total" => self.total.total_cmp(&other.total),
            _ => self.fecha.cmp(&other.fecha),
        }
    }
}

#[component]
pub fn SalesPage() -> impl IntoView {
    let sales = use_sales();
    let controls = ListControls::new("fecha");
    let creating = RwSignal::new(false);

    sales.load();

    let visible = Memo::new(move |_| sales.list.items.with(|rows| controls.apply(rows)));
    let page_total = Signal::derive(move || visible.with(|rows| rows.iter().map(|s| s.total).sum::<f64>()));

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
            <PageHeader title="Ventas" count=Signal::derive(move || sales.list.items.with(Vec::len))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| creating.set(true)>
                    {icon("plus")}
                    " Nueva venta"
                </Button>
                <RefreshButton
                    loading=Signal::derive(move || sales.api.loading())
                    on_click=Callback::new(move |_| sales.load())
                />
            </PageHeader>

            <div class="page__content">
                <div class="filter-panel">
                    <Input value=controls.search placeholder="Número o cliente..." />
                    <span class="filter-panel__summary">
                        "Total en pantalla: "
                        {move || format_price(page_total.get())}
                    </span>
                </div>

                <ListStatus
                    loading=Signal::derive(move || sales.api.loading())
                    error=Signal::derive(move || sales.api.error())
                    loaded=sales.list.loaded
                    has_rows=Signal::derive(move || !visible.with(Vec::is_empty))
                    empty_text="No hay ventas registradas"
                >
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"N°"</TableHeaderCell>
                                {header("fecha", "Fecha")}
                                {header("cliente", "Cliente")}
                                <TableHeaderCell>"Productos"</TableHeaderCell>
                                {header("total", "Total")}
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|s| s.id
                                children=move |sale: Sale| {
                                    let units: f64 = sale.lineas.iter().map(|l| l.cantidad).sum();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <code>{format!("#{}", sale.id)}</code>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_date(&sale.fecha)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {sale.cliente.clone().unwrap_or_else(|| sale.cliente_id.to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {format!("{} línea(s), {} u.", sale.lineas.len(), units)}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="table__cell--money">{format_price(sale.total)}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </ListStatus>

                <PaginationControls
                    page=Signal::derive(move || sales.query.with(|q| q.page))
                    has_next=Signal::derive(move || {
                        let (page, size) = sales.query.with(|q| (q.page, q.page_size));
                        has_next_page(page, size, sales.list.items.with(Vec::len), sales.total.get())
                    })
                    total=sales.total
                    on_page_change=Callback::new(move |page| sales.go_to_page(page))
                />

                <Show when=move || creating.get()>
                    <SaleForm hook=sales on_close=Callback::new(move |_| creating.set(false)) />
                </Show>
            </div>
        </div>
    }
}
