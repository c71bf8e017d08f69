use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::components::form_modal::FormModal;
use crate::shared::components::ui::FormInput;
use crate::system::auth::context::use_session;
use crate::system::auth::session::PasswordChangeError;

#[component]
pub fn ChangePasswordForm(on_close: Callback<()>) -> impl IntoView {
    let session = use_session();
    let current = RwSignal::new(String::new());
    let new = RwSignal::new(String::new());
    let repeat = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let on_submit = Callback::new(move |_| {
        let (current_val, new_val) = (current.get_untracked(), new.get_untracked());
        if new_val != repeat.get_untracked() {
            let mut e = FieldErrors::new();
            e.check("repeat_password", Err("Las contraseñas no coinciden".to_string()));
            errors.set(e);
            return;
        }
        errors.set(FieldErrors::new());
        error.set(None);
        saving.set(true);
        spawn_local(async move {
            match session.change_password(&current_val, &new_val).await {
                Ok(()) => on_close.run(()),
                Err(PasswordChangeError::Validation(e)) => {
                    errors.try_set(e);
                }
                Err(e) => {
                    error.try_set(Some(e.to_string()));
                }
            }
            saving.try_set(false);
        });
    });

    view! {
        <FormModal title="Cambiar contraseña" on_close=on_close on_submit=on_submit saving=saving error=error>
            <FormInput label="Contraseña actual" value=current field="current_password" errors=errors input_type="password" disabled=saving />
            <FormInput label="Nueva contraseña" value=new field="new_password" errors=errors input_type="password" disabled=saving />
            <FormInput label="Repita la nueva contraseña" value=repeat field="repeat_password" errors=errors input_type="password" disabled=saving />
        </FormModal>
    }
}
