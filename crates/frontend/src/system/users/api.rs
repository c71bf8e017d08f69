use contracts::system::users::{CreateUserDto, RoleChange, UpdateUserDto, User, UserStatus};
use std::future::Future;

use crate::shared::api_utils::segment;
use crate::shared::confirm::gated;
use crate::shared::http::{execute, fetch, ApiError, ApiRequest, Transport};
use crate::shared::resource::change_status;

const BASE: &str = "/auth/users";

fn item_path(id: i64) -> String {
    format!("{}/{}", BASE, segment(id))
}

pub async fn fetch_users(t: &dyn Transport) -> Result<Vec<User>, ApiError> {
    fetch(t, ApiRequest::get(BASE)).await
}

/// Returns the created user when the backend echoes it
pub async fn create_user(t: &dyn Transport, dto: &CreateUserDto) -> Result<Option<User>, ApiError> {
    fetch(t, ApiRequest::post(BASE).json(dto)?).await
}

pub async fn update_user(
    t: &dyn Transport,
    id: i64,
    dto: &UpdateUserDto,
) -> Result<Option<User>, ApiError> {
    fetch(t, ApiRequest::put(item_path(id)).json(dto)?).await
}

/// `ACTIVE <-> PAUSED`, sent only if `decision` resolves to true
pub async fn toggle_status(
    t: &dyn Transport,
    decision: impl Future<Output = bool>,
    user: &User,
) -> Result<Option<UserStatus>, ApiError> {
    change_status(
        t,
        decision,
        format!("{}/estado", item_path(user.id)),
        user.estado.toggled(),
    )
    .await
}

pub async fn change_role(
    t: &dyn Transport,
    decision: impl Future<Output = bool>,
    id: i64,
    rol: &str,
) -> Result<Option<String>, ApiError> {
    let body = RoleChange {
        rol: rol.to_string(),
    };
    let request = ApiRequest::patch(format!("{}/rol", item_path(id))).json(&body)?;
    match gated(decision, move || execute(t, request)).await {
        None => Ok(None),
        Some(result) => result.map(|()| Some(body.rol)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::mock::MockTransport;
    use crate::shared::http::HttpMethod;
    use crate::shared::resource::patch_row;
    use futures::executor::block_on;
    use futures::future::ready;
    use serde_json::json;

    fn luis() -> User {
        User {
            id: 7,
            nombre: "Luis".into(),
            correo: "luis@profitup.ec".into(),
            rol: "Vendedor".into(),
            estado: UserStatus::Active,
            creado_en: None,
            ultimo_acceso: None,
        }
    }

    #[test]
    fn test_fetch_users_path() {
        let mock = MockTransport::new();
        mock.reply_json(json!([
            {"id": 7, "nombre": "Luis", "correo": "luis@profitup.ec", "rol": "Vendedor", "estado": "ACTIVE"}
        ]));
        let users = block_on(fetch_users(&mock)).unwrap();
        assert_eq!(users, vec![luis()]);
        assert_eq!(mock.calls(), vec![(HttpMethod::Get, "/auth/users".to_string())]);
    }

    #[test]
    fn test_toggle_cancelled_sends_nothing() {
        let mock = MockTransport::new();
        let mut rows = vec![luis()];
        let result = block_on(toggle_status(&mock, ready(false), &rows[0])).unwrap();
        assert_eq!(result, None);
        assert_eq!(mock.request_count(), 0);
        assert_eq!(rows[0].estado, UserStatus::Active);

        // untouched list stays as it was
        assert!(!patch_row(&mut rows, 99, |u| u.estado = UserStatus::Paused));
    }

    #[test]
    fn test_toggle_confirmed_patches_row_in_place() {
        let mock = MockTransport::new();
        mock.reply_empty();
        let mut rows = vec![luis()];

        let next = block_on(toggle_status(&mock, ready(true), &rows[0]))
            .unwrap()
            .unwrap();
        assert_eq!(next, UserStatus::Paused);
        assert_eq!(
            mock.calls(),
            vec![(HttpMethod::Patch, "/auth/users/7/estado".to_string())]
        );
        assert_eq!(mock.last_body(), Some(json!({"estado": "PAUSED"})));

        patch_row(&mut rows, 7, |u| u.estado = next);
        assert_eq!(rows[0].estado, UserStatus::Paused);
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn test_change_role() {
        let mock = MockTransport::new();
        let rol = block_on(change_role(&mock, ready(true), 7, "Bodeguero")).unwrap();
        assert_eq!(rol.as_deref(), Some("Bodeguero"));
        assert_eq!(
            mock.calls(),
            vec![(HttpMethod::Patch, "/auth/users/7/rol".to_string())]
        );
        assert_eq!(mock.last_body(), Some(json!({"rol": "Bodeguero"})));
    }

    #[test]
    fn test_create_accepts_empty_reply() {
        let mock = MockTransport::new();
        mock.reply_empty();
        let dto = CreateUserDto {
            nombre: "Eva".into(),
            correo: "eva@profitup.ec".into(),
            password: "secreto".into(),
            rol: "Vendedor".into(),
        };
        let created = block_on(create_user(&mock, &dto)).unwrap();
        assert!(created.is_none());
        assert_eq!(mock.calls(), vec![(HttpMethod::Post, "/auth/users".to_string())]);
    }
}
