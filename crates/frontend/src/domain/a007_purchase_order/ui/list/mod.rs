use contracts::domain::a007_purchase_order::aggregate::{OrderStatus, PurchaseOrder};
use leptos::prelude::*;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a003_product::api::format_price;
use crate::domain::a007_purchase_order::hook::{transition_action, use_purchase_orders};
use crate::domain::a007_purchase_order::ui::details::PurchaseOrderForm;
use crate::shared::components::list_state::{ActionErrorBanner, ListStatus};
use crate::shared::components::page_header::{PageHeader, RefreshButton};
use crate::shared::components::pagination_controls::{has_next_page, PaginationControls};
use crate::shared::components::ui::ToneBadge;
use crate::shared::confirm::Tone;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, contains_any, ListControls, Searchable, Sortable};

pub fn parse_order_status(value: &str) -> Option<OrderStatus> {
    match value {
        "PENDIENTE" => Some(OrderStatus::Pendiente),
        "RECIBIDA" => Some(OrderStatus::Recibida),
        "ANULADA" => Some(OrderStatus::Anulada),
        _ => None,
    }
}

pub fn status_tone(status: OrderStatus) -> Tone {
    match status {
        OrderStatus::Pendiente => Tone::Warning,
        OrderStatus::Recibida => Tone::Brand,
        OrderStatus::Anulada => Tone::Danger,
    }
}

impl Searchable for PurchaseOrder {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_any(
            &[&self.id.to_string(), self.proveedor.as_deref().unwrap_or("")],
            filter,
        )
    }
}

impl Sortable for PurchaseOrder {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "proveedor" => cmp_text(
                self.proveedor.as_deref().unwrap_or(""),
                other.proveedor.as_deref().unwrap_or(""),
            ),
            "total" => self.total.total_cmp(&other.total),
            "estado" => self.estado.label().cmp(other.estado.label()),
            "id" => self.id.cmp(&other.id),
            _ => self.fecha.cmp(&other.fecha),
        }
    }
}

#[component]
pub fn PurchaseOrdersPage() -> impl IntoView {
    let orders = use_purchase_orders();
    let controls = ListControls::new("fecha");
    let creating = RwSignal::new(false);
    let status = RwSignal::new(String::new());

    orders.load();

    Effect::new(move |prev: Option<String>| {
        let value = status.get();
        if prev.as_ref().is_some_and(|p| *p != value) {
            orders.filter_status(parse_order_status(&value));
        }
        value
    });

    let visible = Memo::new(move |_| orders.list.items.with(|rows| controls.apply(rows)));

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
            <PageHeader title="Órdenes de compra" count=Signal::derive(move || orders.list.items.with(Vec::len))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| creating.set(true)>
                    {icon("plus")}
                    " Nueva orden"
                </Button>
                <RefreshButton
                    loading=Signal::derive(move || orders.api.loading())
                    on_click=Callback::new(move |_| orders.load())
                />
            </PageHeader>

            <div class="page__content">
                <div class="filter-panel">
                    <Input value=controls.search placeholder="Número o proveedor..." />
                    <Select value=status size=SelectSize::Small>
                        <option value="">"Todas"</option>
                        <option value="PENDIENTE">"Pendientes"</option>
                        <option value="RECIBIDA">"Recibidas"</option>
                        <option value="ANULADA">"Anuladas"</option>
                    </Select>
                </div>

                <ActionErrorBanner api=orders.api />

                <ListStatus
                    loading=Signal::derive(move || orders.api.loading())
                    error=Signal::derive(move || orders.api.error())
                    loaded=orders.list.loaded
                    has_rows=Signal::derive(move || !visible.with(Vec::is_empty))
                    empty_text="No hay órdenes de compra"
                >
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {header("id", "N°")}
                                {header("fecha", "Fecha")}
                                {header("proveedor", "Proveedor")}
                                <TableHeaderCell>"Líneas"</TableHeaderCell>
                                {header("total", "Total")}
                                {header("estado", "Estado")}
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|o| (o.id, o.estado.label(), o.total.to_bits())
                                children=move |order: PurchaseOrder| {
                                    let actions = order
                                        .estado
                                        .transitions()
                                        .iter()
                                        .map(|next| {
                                            let next = *next;
                                            let row = order.clone();
                                            let (verb, _) = transition_action(next);
                                            view! {
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| orders.change_status(row.clone(), next)
                                                >
                                                    {verb}
                                                </Button>
                                            }
                                        })
                                        .collect_view();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <code>{format!("#{}", order.id)}</code>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_date(&order.fecha)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {order.proveedor.clone().unwrap_or_else(|| order.proveedor_id.to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{order.lineas.len()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="table__cell--money">{format_price(order.total)}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <ToneBadge tone=status_tone(order.estado)>{order.estado.label()}</ToneBadge>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{actions}</TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </ListStatus>

                <PaginationControls
                    page=Signal::derive(move || orders.query.with(|q| q.page))
                    has_next=Signal::derive(move || {
                        let (page, size) = orders.query.with(|q| (q.page, q.page_size));
                        has_next_page(page, size, orders.list.items.with(Vec::len), orders.total.get())
                    })
                    total=orders.total
                    on_page_change=Callback::new(move |page| orders.go_to_page(page))
                />

                <Show when=move || creating.get()>
                    <PurchaseOrderForm hook=orders on_close=Callback::new(move |_| creating.set(false)) />
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_status() {
        assert_eq!(parse_order_status("RECIBIDA"), Some(OrderStatus::Recibida));
        assert_eq!(parse_order_status(""), None);
    }

    #[test]
    fn test_status_tone() {
        assert_eq!(status_tone(OrderStatus::Anulada), Tone::Danger);
        assert_eq!(status_tone(OrderStatus::Pendiente), Tone::Warning);
    }
}
