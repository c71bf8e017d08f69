use contracts::domain::a003_product::aggregate::Product;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a003_product::api::{format_price, use_products};
use crate::domain::a003_product::ui::details::ProductDetails;
use crate::shared::components::list_state::{ActionErrorBanner, ListStatus};
use crate::shared::components::page_header::{PageHeader, RefreshButton};
use crate::shared::components::pagination_controls::{has_next_page, PaginationControls};
use crate::shared::components::status_filter::StatusFilter;
use crate::shared::components::ui::StatusBadge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, contains_any, ListControls, Searchable, Sortable};

impl Searchable for Product {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_any(
            &[
                &self.codigo,
                &self.nombre,
                self.categoria.as_deref().unwrap_or(""),
            ],
            filter,
        )
    }
}

impl Sortable for Product {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "codigo" => cmp_text(&self.codigo, &other.codigo),
            "categoria" => cmp_text(
                self.categoria.as_deref().unwrap_or(""),
                other.categoria.as_deref().unwrap_or(""),
            ),
            "precio_compra" => self.precio_compra.total_cmp(&other.precio_compra),
            "precio_venta" => self.precio_venta.total_cmp(&other.precio_venta),
            "estado" => self.estado.label().cmp(other.estado.label()),
            _ => cmp_text(&self.nombre, &other.nombre),
        }
    }
}

#[component]
pub fn ProductsListPage() -> impl IntoView {
    let products = use_products();
    let controls = ListControls::new("nombre");
    let form = RwSignal::new(None::<Option<Product>>);

    products.load();

    let visible = Memo::new(move |_| products.list.items.with(|rows| controls.apply(rows)));

    let open_edit = move |row: Product| {
        spawn_local(async move {
            let fresh = products.fetch_one(row.id).await.unwrap_or(row);
            form.try_set(Some(Some(fresh)));
        });
    };

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
            <PageHeader title="Productos" count=Signal::derive(move || products.list.items.with(Vec::len))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| form.set(Some(None))>
                    {icon("plus")}
                    " Nuevo"
                </Button>
                <RefreshButton
                    loading=Signal::derive(move || products.api.loading())
                    on_click=Callback::new(move |_| products.load())
                />
            </PageHeader>

            <div class="page__content">
                <div class="filter-panel">
                    <Input value=controls.search placeholder="Código, nombre o categoría..." />
                    <StatusFilter on_change=Callback::new(move |s| products.filter_status(s)) />
                </div>

                <ActionErrorBanner api=products.api />

                <ListStatus
                    loading=Signal::derive(move || products.api.loading())
                    error=Signal::derive(move || products.api.error())
                    loaded=products.list.loaded
                    has_rows=Signal::derive(move || !visible.with(Vec::is_empty))
                    empty_text="No hay productos registrados"
                >
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {header("codigo", "Código")}
                                {header("nombre", "Nombre")}
                                {header("categoria", "Categoría")}
                                {header("precio_compra", "Compra")}
                                {header("precio_venta", "Venta")}
                                {header("estado", "Estado")}
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|p| {
                                    (
                                        p.id,
                                        p.estado.label(),
                                        p.nombre.clone(),
                                        p.codigo.clone(),
                                        p.precio_compra.to_bits(),
                                        p.precio_venta.to_bits(),
                                    )
                                }
                                children=move |product: Product| {
                                    let for_toggle = product.clone();
                                    let for_edit = product.clone();
                                    let for_delete = product.clone();
                                    let active = product.estado.is_active();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <code>{product.codigo.clone()}</code>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{product.nombre.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {product.categoria.clone().unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="table__cell--money">{format_price(product.precio_compra)}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="table__cell--money">{format_price(product.precio_venta)}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <StatusBadge active=active label=product.estado.label() />
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| products.toggle_status(for_toggle.clone())
                                                >
                                                    {if active { "Desactivar" } else { "Activar" }}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| open_edit(for_edit.clone())
                                                    attr:title="Editar"
                                                >
                                                    {icon("edit")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| products.delete(for_delete.clone())
                                                    attr:title="Eliminar"
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </ListStatus>

                <PaginationControls
                    page=Signal::derive(move || products.query.with(|q| q.page))
                    has_next=Signal::derive(move || {
                        let (page, size) = products.query.with(|q| (q.page, q.page_size));
                        has_next_page(page, size, products.list.items.with(Vec::len), products.total.get())
                    })
                    total=products.total
                    on_page_change=Callback::new(move |page| products.go_to_page(page))
                />

                {move || form.get().map(|product| view! {
                    <ProductDetails hook=products product=product on_close=Callback::new(move |_| form.set(None)) />
                })}
            </div>
        </div>
    }
}
