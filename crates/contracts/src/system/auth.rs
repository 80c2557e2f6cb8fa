//! Authentication and authorization DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Payload under the envelope's `data` key for `/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthData {
    pub user: User,
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub key: String,
    pub name: String,
}

/// Authenticated user as returned by `/login` and `/me`.
///
/// `effective_permissions` is the flattened set of permission strings the
/// session holds (roles already expanded by the backend). It is replaced
/// wholesale on every fetch, never patched field by field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_super_user: bool,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub effective_permissions: Vec<String>,
}
