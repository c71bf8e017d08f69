use contracts::domain::a002_provider::aggregate::Provider;
use leptos::prelude::*;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a002_provider::api::use_providers;
use crate::domain::a002_provider::ui::details::ProviderDetails;
use crate::shared::components::list_state::{ActionErrorBanner, ListStatus};
use crate::shared::components::page_header::{PageHeader, RefreshButton};
use crate::shared::components::pagination_controls::{has_next_page, PaginationControls};
use crate::shared::components::status_filter::StatusFilter;
use crate::shared::components::ui::StatusBadge;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, contains_any, ListControls, Searchable, Sortable};

impl Searchable for Provider {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_any(
            &[
                &self.razon_social,
                &self.ruc,
                self.contacto.as_deref().unwrap_or(""),
            ],
            filter,
        )
    }
}

impl Sortable for Provider {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "ruc" => self.ruc.cmp(&other.ruc),
            "estado" => self.estado.label().cmp(other.estado.label()),
            _ => cmp_text(&self.razon_social, &other.razon_social),
        }
    }
}

#[component]
pub fn ProvidersListPage() -> impl IntoView {
    let providers = use_providers();
    let controls = ListControls::new("razon_social");
    let form = RwSignal::new(None::<Option<Provider>>);

    providers.load();

    let visible = Memo::new(move |_| providers.list.items.with(|rows| controls.apply(rows)));

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
            <PageHeader title="Proveedores" count=Signal::derive(move || providers.list.items.with(Vec::len))>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| form.set(Some(None))>
                    {icon("plus")}
                    " Nuevo"
                </Button>
                <RefreshButton
                    loading=Signal::derive(move || providers.api.loading())
                    on_click=Callback::new(move |_| providers.load())
                />
            </PageHeader>

            <div class="page__content">
                <div class="filter-panel">
                    <Input value=controls.search placeholder="Razón social, RUC, contacto..." />
                    <StatusFilter on_change=Callback::new(move |s| providers.filter_status(s)) />
                </div>

                <ActionErrorBanner api=providers.api />

                <ListStatus
                    loading=Signal::derive(move || providers.api.loading())
                    error=Signal::derive(move || providers.api.error())
                    loaded=providers.list.loaded
                    has_rows=Signal::derive(move || !visible.with(Vec::is_empty))
                    empty_text="No hay proveedores registrados"
                >
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {header("razon_social", "Razón social")}
                                {header("ruc", "RUC")}
                                <TableHeaderCell>"Contacto"</TableHeaderCell>
                                <TableHeaderCell>"Teléfono"</TableHeaderCell>
                                {header("estado", "Estado")}
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|p| (p.id, p.estado.label(), p.razon_social.clone(), p.contacto.clone(), p.telefono.clone())
                                children=move |provider: Provider| {
                                    let for_toggle = provider.clone();
                                    let for_edit = provider.clone();
                                    let active = provider.estado.is_active();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{provider.razon_social.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{provider.ruc.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {provider.contacto.clone().unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {provider.telefono.clone().unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <StatusBadge active=active label=provider.estado.label() />
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| providers.toggle_status(for_toggle.clone())
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

                <PaginationControls
                    page=Signal::derive(move || providers.query.with(|q| q.page))
                    has_next=Signal::derive(move || {
                        let (page, size) = providers.query.with(|q| (q.page, q.page_size));
                        has_next_page(page, size, providers.list.items.with(Vec::len), providers.total.get())
                    })
                    total=providers.total
                    on_page_change=Callback::new(move |page| providers.go_to_page(page))
                />

                {move || form.get().map(|provider| view! {
                    <ProviderDetails hook=providers provider=provider on_close=Callback::new(move |_| form.set(None)) />
                })}
            </div>
        </div>
    }
}
