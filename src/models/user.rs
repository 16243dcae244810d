use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A registered user as stored and as returned by the user routes.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub image: Option<String>,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Registration payload. Email is the identity key; registering an email
/// twice is answered without inserting a second record.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUser {
    pub image: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 40))]
    pub role: String,
}

/// Partial profile update. Only the listed fields can be overwritten;
/// anything else in the request body is ignored by deserialization.
#[derive(Debug, Deserialize)]
pub struct UserUpdate {
    pub image: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.name.is_none() && self.role.is_none()
    }
}

/// Body of the admin role-change call.
#[derive(Debug, Deserialize, Validate)]
pub struct RoleChange {
    #[validate(length(min = 1, max = 40))]
    pub role: String,
}

/// Query string accepted by the user listing. Every field is optional;
/// values outside the allowed sort/order/limit ranges are rejected by the
/// handler rather than passed through to SQL.
#[derive(Debug, Default, Deserialize)]
pub struct UserSearchQuery {
    pub search: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

/// One row of the per-role aggregate: the role name and how many users
/// hold it.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct RoleCount {
    pub name: String,
    pub value: i64,
}
