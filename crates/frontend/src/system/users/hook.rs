use contracts::system::users::{CreateUserDto, UpdateUserDto, User, UserStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::confirm::{gated, use_confirm, ConfirmOptions, ConfirmService, Tone};
use crate::shared::http::ApiError;
use crate::shared::resource::ResourceList;
use crate::system::auth::request::{use_api, AuthedClient};

/// User management state for one page instance
#[derive(Clone, Copy)]
pub struct UsersHook {
    pub api: AuthedClient,
    pub list: ResourceList<User>,
    confirm: ConfirmService,
}

pub fn use_users() -> UsersHook {
    UsersHook {
        api: use_api(),
        list: ResourceList::new(),
        confirm: use_confirm(),
    }
}

impl UsersHook {
    pub fn load(&self) {
        let this = *self;
        spawn_local(async move {
            match this.api.track(api::fetch_users(&this.api)).await {
                Ok(users) => this.list.set(users),
                Err(e) => log::warn!("users load failed: {}", e),
            }
        });
    }

    /// Asks first; on success only the affected row changes
    pub fn toggle_status(&self, user: User) {
        let this = *self;
        let next = user.estado.toggled();
        let options = ConfirmOptions::new(
            match next {
                UserStatus::Paused => "Pausar usuario",
                UserStatus::Active => "Activar usuario",
            },
            format!("¿Cambiar el estado de {} a {}?", user.nombre, next.label()),
        )
        .tone(Tone::Warning);
        let decision = self.confirm.confirm(options);

        spawn_local(async move {
            if let Ok(Some(estado)) = this
                .api
                .track_action(api::toggle_status(&this.api, decision, &user))
                .await
            {
                this.list.patch(user.id, |u| u.estado = estado);
            }
        });
    }

    /// `Ok(false)` when nothing changed (same role or declined)
    pub async fn change_role(&self, user: User, rol: String) -> Result<bool, ApiError> {
        if user.rol == rol {
            return Ok(false);
        }
        let decision = self.confirm.confirm(
            ConfirmOptions::new(
                "Cambiar rol",
                format!("¿Asignar el rol {} a {}?", rol, user.nombre),
            )
            .tone(Tone::Brand),
        );
        match self
            .api
            .track_action(api::change_role(&self.api, decision, user.id, &rol))
            .await?
        {
            Some(rol) => {
                self.list.patch(user.id, |u| u.rol = rol);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// `Ok(false)` when the user declined
    pub async fn create(&self, dto: CreateUserDto) -> Result<bool, ApiError> {
        let decision = self.confirm.confirm(
            ConfirmOptions::new("Crear usuario", format!("¿Crear la cuenta de {}?", dto.nombre))
                .confirm_text("Crear")
                .tone(Tone::Brand),
        );
        let client = self.api;
        let Some(created) = gated(decision, || api::create_user(&client, &dto)).await else {
            return Ok(false);
        };
        match created? {
            Some(user) => self.list.upsert(user),
            None => self.load(),
        }
        Ok(true)
    }

    pub async fn update(&self, id: i64, dto: UpdateUserDto) -> Result<bool, ApiError> {
        let decision = self.confirm.confirm(
            ConfirmOptions::new("Guardar cambios", format!("¿Guardar los datos de {}?", dto.nombre))
                .confirm_text("Guardar"),
        );
        let client = self.api;
        let Some(updated) = gated(decision, || api::update_user(&client, id, &dto)).await else {
            return Ok(false);
        };
        match updated? {
            Some(user) => self.list.upsert(user),
            None => self.list.patch(id, |u| {
                u.nombre = dto.nombre.clone();
                u.correo = dto.correo.clone();
            }),
        }
        Ok(true)
    }
}
