use crate::error::AppError;
use crate::service::validation::{email, length, Validate};
use crate::sql::FieldSet;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

/// A user plus the ids of the jobs they applied to.
#[derive(Clone, Debug, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub jobs: Vec<i32>,
}

/// Profile plus password hash, for login only. Never serialized.
#[derive(Clone, FromRow)]
pub struct StoredCredentials {
    #[sqlx(flatten)]
    pub user: User,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), AppError> {
        length("username", &self.username, 1, Some(25))?;
        length("password", &self.password, 1, None)
    }
}

/// Self-service signup; always creates a non-admin.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Validate for RegisterUser {
    fn validate(&self) -> Result<(), AppError> {
        validate_profile(&self.username, &self.password, &self.first_name, &self.last_name, &self.email)
    }
}

/// Admin-created user; may itself be an admin.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), AppError> {
        validate_profile(&self.username, &self.password, &self.first_name, &self.last_name, &self.email)
    }
}

impl From<RegisterUser> for NewUser {
    fn from(r: RegisterUser) -> Self {
        NewUser {
            username: r.username,
            password: r.password,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            is_admin: false,
        }
    }
}

fn validate_profile(username: &str, password: &str, first: &str, last: &str, mail: &str) -> Result<(), AppError> {
    length("username", username, 1, Some(25))?;
    length("password", password, 5, Some(20))?;
    length("firstName", first, 1, Some(30))?;
    length("lastName", last, 1, Some(30))?;
    length("email", mail, 6, Some(60))?;
    email("email", mail)
}

/// PATCH body. Username and admin flag are not editable here.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserPatch {
    /// Expects `password`, if set, to already be hashed.
    pub fn into_field_set(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.push_opt("firstName", self.first_name);
        fields.push_opt("lastName", self.last_name);
        fields.push_opt("password", self.password);
        fields.push_opt("email", self.email);
        fields
    }
}

impl Validate for UserPatch {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(v) = &self.first_name {
            length("firstName", v, 1, Some(30))?;
        }
        if let Some(v) = &self.last_name {
            length("lastName", v, 1, Some(30))?;
        }
        if let Some(v) = &self.password {
            length("password", v, 5, Some(20))?;
        }
        if let Some(v) = &self.email {
            length("email", v, 6, Some(60))?;
            email("email", v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::validation::parse_body;
    use serde_json::json;

    fn register_body() -> serde_json::Value {
        json!({
            "username": "new",
            "password": "password",
            "firstName": "first",
            "lastName": "last",
            "email": "new@email.com"
        })
    }

    #[test]
    fn register_cannot_claim_admin() {
        let mut body = register_body();
        body["isAdmin"] = json!(true);
        assert!(parse_body::<RegisterUser>(body).is_err());
    }

    #[test]
    fn registered_user_is_not_admin() {
        let reg: RegisterUser = parse_body(register_body()).unwrap();
        assert!(!NewUser::from(reg).is_admin);
    }

    #[test]
    fn rejects_bad_email_and_short_password() {
        let mut body = register_body();
        body["email"] = json!("not-an-email");
        assert!(parse_body::<RegisterUser>(body).is_err());

        let mut body = register_body();
        body["password"] = json!("pw");
        assert!(parse_body::<RegisterUser>(body).is_err());
    }

    #[test]
    fn patch_cannot_grant_admin() {
        assert!(parse_body::<UserPatch>(json!({"isAdmin": true})).is_err());
        assert!(parse_body::<UserPatch>(json!({"username": "other"})).is_err());
    }

    #[test]
    fn user_serializes_without_password() {
        let v = serde_json::to_value(User {
            username: "u1".into(),
            first_name: "U1F".into(),
            last_name: "U1L".into(),
            email: "user1@user.com".into(),
            is_admin: false,
        })
        .unwrap();
        assert_eq!(v["firstName"], json!("U1F"));
        assert!(v.get("password").is_none());
    }
}
