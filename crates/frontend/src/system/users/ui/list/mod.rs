use contracts::system::auth::{ROLE_ADMIN, ROLE_SELLER, ROLE_WAREHOUSE};
use contracts::system::users::{User, UserStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use crate::shared::components::list_state::{ActionErrorBanner, ListStatus};
use crate::shared::components::ui::StatusBadge;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_text, contains_any, ListControls, Searchable, Sortable};
use crate::system::auth::guard::RequireRole;
use crate::system::users::hook::use_users;
use crate::system::users::ui::details::{CreateUserForm, EditUserForm};

pub const ROLES: [&str; 3] = [ROLE_ADMIN, ROLE_SELLER, ROLE_WAREHOUSE];

impl Searchable for User {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_any(&[&self.nombre, &self.correo, &self.rol], filter)
    }
}

impl Sortable for User {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "correo" => cmp_text(&self.correo, &other.correo),
            "rol" => cmp_text(&self.rol, &other.rol),
            "estado" => self.estado.label().cmp(other.estado.label()),
            "ultimo_acceso" => self.ultimo_acceso.cmp(&other.ultimo_acceso),
            _ => cmp_text(&self.nombre, &other.nombre),
        }
    }
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    view! {
        <RequireRole role=ROLE_ADMIN>
            <UsersList />
        </RequireRole>
    }
}

#[component]
fn UsersList() -> impl IntoView {
    let users = use_users();
    let controls = ListControls::new("nombre");
    let show_create = RwSignal::new(false);
    let editing = RwSignal::new(None::<User>);

    users.load();

    let visible = Memo::new(move |_| users.list.items.with(|rows| controls.apply(rows)));

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
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Usuarios"</h1>
                    <Badge>{move || users.list.items.with(Vec::len).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| show_create.set(true)>
                        {icon("plus")}
                        " Nuevo"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| users.load()
                        disabled=Signal::derive(move || users.api.loading())
                    >
                        {icon("refresh")}
                        " Actualizar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <Input value=controls.search placeholder="Nombre, correo o rol..." />
                </div>

                <ActionErrorBanner api=users.api />

                <ListStatus
                    loading=Signal::derive(move || users.api.loading())
                    error=Signal::derive(move || users.api.error())
                    loaded=users.list.loaded
                    has_rows=Signal::derive(move || !visible.with(Vec::is_empty))
                    empty_text="No hay usuarios registrados"
                >
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {header("nombre", "Nombre")}
                                {header("correo", "Correo")}
                                {header("rol", "Rol")}
                                {header("estado", "Estado")}
                                {header("ultimo_acceso", "Último acceso")}
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|u| (u.id, u.estado.label(), u.rol.clone(), u.nombre.clone())
                                children=move |user: User| {
                                    let role_value = RwSignal::new(user.rol.clone());
                                    let for_role = user.clone();
                                    Effect::new(move |prev: Option<()>| {
                                        let selected = role_value.get();
                                        if prev.is_none() || selected == for_role.rol {
                                            return;
                                        }
                                        let user = for_role.clone();
                                        spawn_local(async move {
                                            let original = user.rol.clone();
                                            if !matches!(users.change_role(user, selected).await, Ok(true)) {
                                                role_value.try_set(original);
                                            }
                                        });
                                    });
                                    let for_toggle = user.clone();
                                    let for_edit = user.clone();
                                    let active = user.estado == UserStatus::Active;
                                    let toggle_label = if active { "Pausar" } else { "Activar" };
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{user.nombre.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{user.correo.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Select value=role_value size=SelectSize::Small>
                                                    {ROLES.iter().map(|r| view! { <option value=*r>{*r}</option> }).collect_view()}
                                                </Select>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <StatusBadge active=active label=user.estado.label() />
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {user.ultimo_acceso.as_deref().map(format_datetime).unwrap_or_else(|| "-".to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| users.toggle_status(for_toggle.clone())
                                                >
                                                    {toggle_label}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| editing.set(Some(for_edit.clone()))
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

                <Show when=move || show_create.get()>
                    <CreateUserForm hook=users on_close=Callback::new(move |_| show_create.set(false)) />
                </Show>

                {move || editing.get().map(|user| view! {
                    <EditUserForm hook=users user=user on_close=Callback::new(move |_| editing.set(None)) />
                })}
            </div>
        </div>
    }
}
