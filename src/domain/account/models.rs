//! Account models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Role granted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Regular shopper.
    User,

    /// Administrator.
    Admin,
}

/// User account as served by the backend. The same shape comes back from
/// the profile endpoint and inside login/register responses (where the
/// optional contact fields are typically absent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,

    /// Granted roles.
    pub roles: Vec<Role>,

    /// E-mail address, the login identifier.
    pub email: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Date of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Timestamp>,

    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Avatar file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,

    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,

    /// Backend document version counter.
    #[serde(rename = "__v")]
    pub version: i64,
}

/// Body of a profile update. Unset fields are left unchanged by the
/// backend; `password`/`new_password` together request a password change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProfileBody {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// New postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// New date of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Timestamp>,

    /// New avatar file name, as returned by the avatar upload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Current password, required when changing it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Replacement password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_deserializes_from_api_shape() {
        let json = r#"{
            "_id": "6124d49b7b37d6a7aedf0f22",
            "roles": ["User"],
            "email": "a@b.com",
            "createdAt": "2021-08-24T09:53:31.044Z",
            "updatedAt": "2022-01-10T15:52:01.852Z",
            "__v": 0
        }"#;

        let user: User = serde_json::from_str(json).expect("user should deserialize");

        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.roles, vec![Role::User]);
        assert_eq!(user.name, None);
        assert_eq!(user.version, 0);
    }

    #[test]
    fn update_body_omits_unset_fields() {
        let body = UpdateProfileBody {
            name: Some("Ti".to_owned()),
            ..UpdateProfileBody::default()
        };
        let value = serde_json::to_value(&body).expect("body should serialize");

        assert_eq!(value, serde_json::json!({ "name": "Ti" }));
    }
}
