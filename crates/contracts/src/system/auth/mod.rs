use serde::{Deserialize, Serialize};

/// Role that satisfies every role check
pub const ROLE_ADMIN: &str = "Administrador";
pub const ROLE_SELLER: &str = "Vendedor";
pub const ROLE_WAREHOUSE: &str = "Bodeguero";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub correo: String,
    pub password: String,
}

/// `POST /auth/login` response. Some backend builds return the profile inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    #[serde(default, alias = "usuario", alias = "profile")]
    pub user: Option<Profile>,
}

/// Authenticated user's profile as returned by `GET /auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub nombre: String,
    pub correo: String,
    pub rol: String,
    #[serde(default)]
    pub estado: Option<String>,
}

impl Profile {
    /// Administrators pass every role check; other roles must match exactly
    pub fn has_role(&self, role: &str) -> bool {
        self.rol == ROLE_ADMIN || self.rol == role
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "passwordActual")]
    pub current_password: String,
    #[serde(rename = "passwordNueva")]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(rol: &str) -> Profile {
        Profile {
            id: 1,
            nombre: "Ana".into(),
            correo: "ana@profitup.ec".into(),
            rol: rol.into(),
            estado: None,
        }
    }

    #[test]
    fn test_admin_satisfies_every_role() {
        let admin = profile(ROLE_ADMIN);
        assert!(admin.has_role(ROLE_ADMIN));
        assert!(admin.has_role(ROLE_SELLER));
        assert!(admin.has_role("Cualquiera"));
    }

    #[test]
    fn test_other_roles_match_exactly() {
        let seller = profile(ROLE_SELLER);
        assert!(seller.has_role(ROLE_SELLER));
        assert!(!seller.has_role(ROLE_ADMIN));
        assert!(!seller.has_role(ROLE_WAREHOUSE));
        assert!(!seller.has_role("vendedor"));
    }

    #[test]
    fn test_login_response_aliases() {
        let r: LoginResponse = serde_json::from_str(r#"{"accessToken":"abc"}"#).unwrap();
        assert_eq!(r.token, "abc");
        assert!(r.user.is_none());
    }
}
