use crate::error::AppError;
use crate::service::validation::{length, minimum, url, Validate};
use crate::sql::FieldSet;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A job as listed under its company.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Validate for NewCompany {
    fn validate(&self) -> Result<(), AppError> {
        length("handle", &self.handle, 1, Some(25))?;
        if self.handle != self.handle.to_lowercase() {
            return Err(AppError::Validation("handle must be lowercase".into()));
        }
        length("name", &self.name, 1, None)?;
        if let Some(n) = self.num_employees {
            minimum("numEmployees", n, 0)?;
        }
        if let Some(u) = &self.logo_url {
            url("logoUrl", u)?;
        }
        Ok(())
    }
}

/// PATCH body. The handle is immutable.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl CompanyPatch {
    pub fn into_field_set(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.push_opt("name", self.name);
        fields.push_opt("description", self.description);
        fields.push_opt("numEmployees", self.num_employees);
        fields.push_opt("logoUrl", self.logo_url);
        fields
    }
}

impl Validate for CompanyPatch {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            length("name", name, 1, None)?;
        }
        if let Some(n) = self.num_employees {
            minimum("numEmployees", n, 0)?;
        }
        if let Some(u) = &self.logo_url {
            url("logoUrl", u)?;
        }
        Ok(())
    }
}
