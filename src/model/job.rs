use crate::error::AppError;
use crate::model::Company;
use crate::service::validation::{equity, length, minimum, Validate};
use crate::sql::FieldSet;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// NUMERIC, read back as text.
    pub equity: Option<String>,
    pub company_handle: String,
}

/// Search result row: the job plus its company's name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company: Company,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<String>,
    pub company_handle: String,
}

impl Validate for NewJob {
    fn validate(&self) -> Result<(), AppError> {
        length("title", &self.title, 1, None)?;
        if let Some(s) = self.salary {
            minimum("salary", s, 0)?;
        }
        if let Some(e) = &self.equity {
            equity("equity", e)?;
        }
        length("companyHandle", &self.company_handle, 1, Some(25))
    }
}

/// PATCH body. Neither the id nor the owning company can change.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<String>,
}

impl JobPatch {
    pub fn into_field_set(self) -> FieldSet {
        let mut fields = FieldSet::new();
        fields.push_opt("title", self.title);
        fields.push_opt("salary", self.salary);
        fields.push_opt("equity", self.equity);
        fields
    }
}

impl Validate for JobPatch {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(t) = &self.title {
            length("title", t, 1, None)?;
        }
        if let Some(s) = self.salary {
            minimum("salary", s, 0)?;
        }
        if let Some(e) = &self.equity {
            equity("equity", e)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::validation::parse_body;
    use serde_json::json;

    #[test]
    fn new_job_rules() {
        assert!(parse_body::<NewJob>(json!({"title": "J", "companyHandle": "c1"})).is_ok());
        assert!(parse_body::<NewJob>(json!({"title": "J", "companyHandle": "c1", "equity": "2"})).is_err());
        assert!(parse_body::<NewJob>(json!({"title": "J", "companyHandle": "c1", "salary": -5})).is_err());
        assert!(parse_body::<NewJob>(json!({"title": "J"})).is_err());
    }

    #[test]
    fn patch_cannot_move_job() {
        assert!(parse_body::<JobPatch>(json!({"companyHandle": "c2"})).is_err());
        assert!(parse_body::<JobPatch>(json!({"id": 7})).is_err());
    }

    #[test]
    fn empty_patch_yields_empty_field_set() {
        let patch: JobPatch = parse_body(json!({})).unwrap();
        assert!(patch.into_field_set().is_empty());
    }
}
