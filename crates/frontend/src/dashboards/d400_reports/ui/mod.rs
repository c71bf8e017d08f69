use contracts::dashboards::d400_reports::dto::{ClientsReport, InventoryReport, ReportRange, SalesReport};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d400_reports::api::{check_range, clients_report, inventory_report, sales_report};
use crate::domain::a003_product::api::format_price;
use crate::domain::a006_expiration::urgency::today;
use crate::shared::components::page_header::{PageHeader, RefreshButton};
use crate::shared::components::stat_card::{StatCard, ValueFormat};
use crate::shared::components::ui::FormInput;
use crate::shared::confirm::Tone;
use crate::shared::date_utils::{format_date, month_to_date};
use crate::shared::http::{ApiErrorKind, CancelToken};
use crate::system::auth::request::use_api;

/// Reports summary: sales in a date range plus client and inventory snapshots
#[component]
pub fn ReportsDashboard() -> impl IntoView {
    let api = use_api();
    let (first, last) = month_to_date(today());
    let desde = RwSignal::new(first);
    let hasta = RwSignal::new(last);
    let range_errors = RwSignal::new(FieldErrors::new());

    let sales = RwSignal::new(None::<SalesReport>);
    let clients = RwSignal::new(None::<ClientsReport>);
    let inventory = RwSignal::new(None::<InventoryReport>);
    let sales_error = RwSignal::new(None::<String>);
    let clients_error = RwSignal::new(None::<String>);
    let inventory_error = RwSignal::new(None::<String>);
    let in_flight = StoredValue::new_local(None::<CancelToken>);

    let load_sales = move || {
        let range = ReportRange {
            desde: desde.get_untracked(),
            hasta: hasta.get_untracked(),
        };
        if let Err(message) = check_range(&range) {
            let mut e = FieldErrors::new();
            e.check("hasta", Err(message));
            range_errors.set(e);
            return;
        }
        range_errors.set(FieldErrors::new());
        sales_error.set(None);
        let token = CancelToken::new();
        if let Some(previous) = in_flight.try_get_value().flatten() {
            previous.cancel();
        }
        in_flight.try_set_value(Some(token.clone()));
        spawn_local(async move {
            match sales_report(&api, &range, Some(token)).await {
                Ok(report) => {
                    sales.try_set(Some(report));
                }
                Err(e) if e.kind == ApiErrorKind::Cancelled => {}
                Err(e) => {
                    log::warn!("sales report failed: {}", e);
                    sales_error.try_set(Some(format!("Ventas: {}", e.message)));
                }
            }
        });
    };

    let load_all = move || {
        load_sales();
        clients_error.set(None);
        inventory_error.set(None);
        spawn_local(async move {
            match clients_report(&api).await {
                Ok(report) => {
                    clients.try_set(Some(report));
                }
                Err(e) => {
                    log::warn!("clients report failed: {}", e);
                    clients_error.try_set(Some(format!("Clientes: {}", e.message)));
                }
            }
        });
        spawn_local(async move {
            match inventory_report(&api).await {
                Ok(report) => {
                    inventory.try_set(Some(report));
                }
                Err(e) => {
                    log::warn!("inventory report failed: {}", e);
                    inventory_error.try_set(Some(format!("Inventario: {}", e.message)));
                }
            }
        });
    };

    let errors = move || report_errors([sales_error.get(), clients_error.get(), inventory_error.get()]);

    load_all();

    view! {
        <div class="page">
            <PageHeader title="Reportes">
                <RefreshButton
                    loading=Signal::derive(move || api.loading())
                    on_click=Callback::new(move |_| load_all())
                />
            </PageHeader>

            <div class="page__content">
                <div class="filter-panel">
                    <FormInput label="Desde" value=desde field="desde" errors=range_errors input_type="date" />
                    <FormInput label="Hasta" value=hasta field="hasta" errors=range_errors input_type="date" />
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| load_sales()>
                        "Aplicar"
                    </Button>
                </div>

                {move || {
                    errors()
                        .into_iter()
                        .map(|e| view! { <div class="alert alert--error" role="alert">{e}</div> })
                        .collect_view()
                }}

                <div class="stat-grid">
                    <StatCard
                        label="Ventas del período"
                        icon_name="dollar-sign"
                        value=Signal::derive(move || sales.with(|r| r.as_ref().map(|r| r.total_ventas)))
                        format=ValueFormat::Money
                        tone=Tone::Brand
                    />
                    <StatCard
                        label="Número de ventas"
                        icon_name="orders"
                        value=Signal::derive(move || sales.with(|r| r.as_ref().map(|r| r.cantidad_ventas as f64)))
                        format=ValueFormat::Integer
                        subtitle=Signal::derive(move || {
                            sales.with(|r| r.as_ref().map(|r| format!("Ticket promedio {}", format_price(r.ticket_promedio))))
                        })
                    />
                    <StatCard
                        label="Clientes"
                        icon_name="customers"
                        value=Signal::derive(move || clients.with(|r| r.as_ref().map(|r| r.total_clientes as f64)))
                        format=ValueFormat::Integer
                        subtitle=Signal::derive(move || {
                            clients.with(|r| r.as_ref().map(|r| format!("{} nuevos", r.nuevos)))
                        })
                    />
                    <StatCard
                        label="Valor del inventario"
                        icon_name="inventory"
                        value=Signal::derive(move || inventory.with(|r| r.as_ref().map(|r| r.valor_total)))
                        format=ValueFormat::Money
                    />
                    <StatCard
                        label="Productos bajo mínimo"
                        icon_name="products"
                        value=Signal::derive(move || inventory.with(|r| r.as_ref().map(|r| r.productos_bajo_minimo as f64)))
                        format=ValueFormat::Integer
                        tone=Signal::derive(move || {
                            let low = inventory.with(|r| r.as_ref().map_or(0, |r| r.productos_bajo_minimo));
                            if low > 0 { Tone::Danger } else { Tone::Default }
                        })
                    />
                </div>

                <div class="report-grid">
                    <section class="report-panel">
                        <h3>"Ventas por día"</h3>
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Fecha"</TableHeaderCell>
                                    <TableHeaderCell>"Total"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || sales.with(|r| r.as_ref().map(|r| r.por_dia.clone()).unwrap_or_default())
                                    .into_iter()
                                    .map(|d| view! {
                                        <TableRow>
                                            <TableCell>{format_date(&d.fecha)}</TableCell>
                                            <TableCell>{format_price(d.total)}</TableCell>
                                        </TableRow>
                                    })
                                    .collect_view()}
                            </TableBody>
                        </Table>
                    </section>

                    <section class="report-panel">
                        <h3>"Mejores clientes"</h3>
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Cliente"</TableHeaderCell>
                                    <TableHeaderCell>"Compras"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || clients.with(|r| r.as_ref().map(|r| r.top.clone()).unwrap_or_default())
                                    .into_iter()
                                    .map(|c| view! {
                                        <TableRow>
                                            <TableCell>{c.nombre}</TableCell>
                                            <TableCell>{format_price(c.total)}</TableCell>
                                        </TableRow>
                                    })
                                    .collect_view()}
                            </TableBody>
                        </Table>
                    </section>

                    <section class="report-panel">
                        <h3>"Rotación de productos"</h3>
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Producto"</TableHeaderCell>
                                    <TableHeaderCell>"Rotación"</TableHeaderCell>
                                    <TableHeaderCell>"Cobertura"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || inventory.with(|r| r.as_ref().map(|r| r.rotacion.clone()).unwrap_or_default())
                                    .into_iter()
                                    .map(|row| view! {
                                        <TableRow>
                                            <TableCell>{row.producto}</TableCell>
                                            <TableCell>{format!("{:.2}", row.rotacion)}</TableCell>
                                            <TableCell>
                                                {row.cobertura_dias.map(|d| format!("{:.0} días", d)).unwrap_or_else(|| "-".to_string())}
                                            </TableCell>
                                        </TableRow>
                                    })
                                    .collect_view()}
                            </TableBody>
                        </Table>
                    </section>
                </div>
            </div>
        </div>
    }
}

/// Failed sections in display order
fn report_errors(sections: [Option<String>; 3]) -> Vec<String> {
    sections.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_failed_section_reported() {
        let errors = report_errors([
            None,
            Some("Clientes: HTTP 500".to_string()),
            Some("Inventario: sin conexión".to_string()),
        ]);
        assert_eq!(errors, vec!["Clientes: HTTP 500", "Inventario: sin conexión"]);
        assert!(report_errors([None, None, None]).is_empty());
    }
}
