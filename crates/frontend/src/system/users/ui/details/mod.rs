use contracts::shared::validation::FieldErrors;
use contracts::system::auth::ROLE_SELLER;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};
use leptos::prelude::*;

use crate::shared::components::form_modal::{submit_form, FormModal};
use crate::shared::components::ui::FormInput;
use crate::system::users::hook::UsersHook;
use crate::system::users::ui::list::ROLES;

#[component]
pub fn CreateUserForm(hook: UsersHook, on_close: Callback<()>) -> impl IntoView {
    let nombre = RwSignal::new(String::new());
    let correo = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let rol = RwSignal::new(ROLE_SELLER.to_string());
    let errors = RwSignal::new(FieldErrors::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let on_submit = Callback::new(move |_| {
        let dto = CreateUserDto {
            nombre: nombre.get_untracked().trim().to_string(),
            correo: correo.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            rol: rol.get_untracked(),
        };
        if let Err(e) = dto.validate() {
            errors.set(e);
            return;
        }
        errors.set(FieldErrors::new());
        submit_form(saving, error, on_close, move || async move { hook.create(dto).await });
    });

    view! {
        <FormModal title="Nuevo usuario" on_close=on_close on_submit=on_submit saving=saving error=error submit_text="Crear">
            <FormInput label="Nombre" value=nombre field="nombre" errors=errors disabled=saving />
            <FormInput label="Correo" value=correo field="correo" errors=errors input_type="email" disabled=saving />
            <FormInput label="Contraseña" value=password field="password" errors=errors input_type="password" disabled=saving />
            <div class="form__group">
                <label class="form__label" for="field-rol">"Rol"</label>
                <select
                    id="field-rol"
                    class="form__input"
                    prop:value=move || rol.get()
                    on:change=move |ev| rol.set(event_target_value(&ev))
                >
                    {ROLES.iter().map(|r| view! { <option value=*r>{*r}</option> }).collect_view()}
                </select>
            </div>
        </FormModal>
    }
}

#[component]
pub fn EditUserForm(hook: UsersHook, user: User, on_close: Callback<()>) -> impl IntoView {
    let id = user.id;
    let nombre = RwSignal::new(user.nombre.clone());
    let correo = RwSignal::new(user.correo.clone());
    let errors = RwSignal::new(FieldErrors::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let on_submit = Callback::new(move |_| {
        let dto = UpdateUserDto {
            nombre: nombre.get_untracked().trim().to_string(),
            correo: correo.get_untracked().trim().to_string(),
        };
        if let Err(e) = dto.validate() {
            errors.set(e);
            return;
        }
        errors.set(FieldErrors::new());
        submit_form(saving, error, on_close, move || async move { hook.update(id, dto).await });
    });

    view! {
        <FormModal title=format!("Editar: {}", user.nombre) on_close=on_close on_submit=on_submit saving=saving error=error>
            <FormInput label="Nombre" value=nombre field="nombre" errors=errors disabled=saving />
            <FormInput label="Correo" value=correo field="correo" errors=errors input_type="email" disabled=saving />
        </FormModal>
    }
}
