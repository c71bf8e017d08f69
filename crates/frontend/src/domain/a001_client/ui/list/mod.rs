use contracts::domain::a001_client::aggregate::Client;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a001_client::api::use_clients;
use crate::domain::a001_client::ui::details::ClientDetails;
use crate::shared::components::list_state::{ActionErrorBanner, ListStatus};
use crate::shared::components::page_header::{PageHeader, RefreshButton};
use crate::shared::components::pagination_controls::{has_next_page, PaginationControls};
use crate::shared::components::status_filter::StatusFilter;
use crate::shared::components::ui::StatusBadge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, contains_any, ListControls, Searchable, Sortable};

impl Searchable for Client {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_any(
            &[
                &self.nombre,
                &self.documento,
                self.correo.as_deref().unwrap_or(""),
                self.telefono.as_deref().unwrap_or(""),
            ],
            filter,
        )
    }
}

impl Sortable for Client {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "documento" => self.documento.cmp(&other.documento),
            "correo" => cmp_text(
                self.correo.as_deref().unwrap_or(""),
                other.correo.as_deref().unwrap_or(""),
            ),
            "estado" => self.estado.label().cmp(other.estado.label()),
            _ => cmp_text(&self.nombre, &other.nombre),
        }
    }
}

#[component]
pub fn ClientsListPage() -> impl IntoView {
    let clients = use_clients();
    let controls = ListControls::new("nombre");
    // Some(None) = creating, Some(Some(row)) = editing
    let form = RwSignal::new(None::<Option<Client>>);

    clients.load();

    let visible = Memo::new(move |_| clients.list.items.with(|rows| controls.apply(rows)));

    let open_edit = move |row: Client| {
        spawn_local(async move {
            let fresh = clients.fetch_one(row.id).await.unwrap_or(row);
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
            <PageHeader title="Clientes" count=Signal::derive(move || clients.list.items.with(Vec::len))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| form.set(Some(None))>
                    {icon("plus")}
                    " Nuevo"
                </Button>
                <RefreshButton
                    loading=Signal::derive(move || clients.api.loading())
                    on_click=Callback::new(move |_| clients.load())
                />
            </PageHeader>

            <div class="page__content">
                <div class="filter-panel">
                    <Input value=controls.search placeholder="Nombre, documento, correo..." />
                    <StatusFilter on_change=Callback::new(move |s| clients.filter_status(s)) />
                </div>

                <ActionErrorBanner api=clients.api />

                <ListStatus
                    loading=Signal::derive(move || clients.api.loading())
                    error=Signal::derive(move || clients.api.error())
                    loaded=clients.list.loaded
                    has_rows=Signal::derive(move || !visible.with(Vec::is_empty))
                    empty_text="No hay clientes registrados"
                >
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {header("nombre", "Nombre")}
                                {header("documento", "Documento")}
                                {header("correo", "Correo")}
                                <TableHeaderCell>"Teléfono"</TableHeaderCell>
                                {header("estado", "Estado")}
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|c| (c.id, c.estado.label(), c.nombre.clone(), c.correo.clone(), c.telefono.clone())
                                children=move |client: Client| {
                                    let for_toggle = client.clone();
                                    let for_edit = client.clone();
                                    let active = client.estado.is_active();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{client.nombre.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{client.documento.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {client.correo.clone().unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {client.telefono.clone().unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <StatusBadge active=active label=client.estado.label() />
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| clients.toggle_status(for_toggle.clone())
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
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </ListStatus>

                <PaginationControls
                    page=Signal::derive(move || clients.query.with(|q| q.page))
                    has_next=Signal::derive(move || {
                        let (page, size) = clients.query.with(|q| (q.page, q.page_size));
                        has_next_page(page, size, clients.list.items.with(Vec::len), clients.total.get())
                    })
                    total=clients.total
                    on_page_change=Callback::new(move |page| clients.go_to_page(page))
                />

                {move || form.get().map(|client| view! {
                    <ClientDetails hook=clients client=client on_close=Callback::new(move |_| form.set(None)) />
                })}
            </div>
        </div>
    }
}
