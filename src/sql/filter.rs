//! Search filters: query-string parsing, validation, and WHERE clause compilation.

use crate::error::AppError;
use crate::sql::QueryBuf;
use std::collections::HashMap;

/// Criteria that can narrow a base SELECT.
pub trait SearchCriteria {
    /// Appended to every compiled query.
    const ORDER_BY: &'static str;

    /// Local invariants, checked before any predicate is built.
    fn validate(&self) -> Result<(), AppError>;

    /// Push values into `q` and return the predicates that reference them, in fixed order.
    fn predicates(&self, q: &mut QueryBuf) -> Vec<String>;
}

/// Compile `base_select` plus `criteria` into a full query ending in the fixed ORDER BY.
/// With no predicates the base query is returned as-is (plus ORDER BY).
pub fn sql_for_search<C: SearchCriteria>(base_select: &str, criteria: &C) -> Result<QueryBuf, AppError> {
    criteria.validate()?;
    let mut q = QueryBuf::new();
    let predicates = criteria.predicates(&mut q);
    let where_clause = if predicates.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", predicates.join(" AND "))
    };
    q.sql = format!("{}{} ORDER BY {}", base_select, where_clause, C::ORDER_BY);
    Ok(q)
}

/// `%value%` with LIKE metacharacters escaped so the match is literal containment.
fn contains_pattern(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

fn parse_count(key: &str, raw: &str) -> Result<i32, AppError> {
    let n: i32 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidRequest(format!("{} must be an integer", key)))?;
    non_negative(key, n)
}

fn non_negative(key: &str, n: i32) -> Result<i32, AppError> {
    if n < 0 {
        return Err(AppError::InvalidRequest(format!("{} must be at least 0", key)));
    }
    Ok(n)
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, AppError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(AppError::InvalidRequest(format!("{} must be true or false", key)))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Read `name`, `minEmployees`, `maxEmployees`; other keys are ignored.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut f = CompanyFilter::default();
        for (k, v) in params {
            match k.as_str() {
                "name" => f.name = Some(v.clone()),
                "minEmployees" => f.min_employees = Some(parse_count(k, v)?),
                "maxEmployees" => f.max_employees = Some(parse_count(k, v)?),
                _ => {}
            }
        }
        Ok(f)
    }
}

impl SearchCriteria for CompanyFilter {
    const ORDER_BY: &'static str = "name";

    fn validate(&self) -> Result<(), AppError> {
        if let Some(n) = self.min_employees {
            non_negative("minEmployees", n)?;
        }
        if let Some(n) = self.max_employees {
            non_negative("maxEmployees", n)?;
        }
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(AppError::InvalidRequest(
                    "Min employees cannot be greater than max".into(),
                ));
            }
        }
        Ok(())
    }

    fn predicates(&self, q: &mut QueryBuf) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(name) = &self.name {
            let n = q.push_param(contains_pattern(name));
            parts.push(format!("name ILIKE ${}", n));
        }
        if let Some(min) = self.min_employees {
            let n = q.push_param(min);
            parts.push(format!("num_employees >= ${}", n));
        }
        if let Some(max) = self.max_employees {
            let n = q.push_param(max);
            parts.push(format!("num_employees <= ${}", n));
        }
        parts
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    /// `Some(true)` keeps only jobs with equity > 0; false or absent adds no constraint.
    pub has_equity: Option<bool>,
}

impl JobFilter {
    /// Read `title`, `minSalary`, `hasEquity`; other keys are ignored.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut f = JobFilter::default();
        for (k, v) in params {
            match k.as_str() {
                "title" => f.title = Some(v.clone()),
                "minSalary" => f.min_salary = Some(parse_count(k, v)?),
                "hasEquity" => f.has_equity = Some(parse_flag(k, v)?),
                _ => {}
            }
        }
        Ok(f)
    }
}

impl SearchCriteria for JobFilter {
    const ORDER_BY: &'static str = "title";

    fn validate(&self) -> Result<(), AppError> {
        if let Some(n) = self.min_salary {
            non_negative("minSalary", n)?;
        }
        Ok(())
    }

    fn predicates(&self, q: &mut QueryBuf) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(title) = &self.title {
            let n = q.push_param(contains_pattern(title));
            parts.push(format!("j.title ILIKE ${}", n));
        }
        if let Some(min) = self.min_salary {
            let n = q.push_param(min);
            parts.push(format!("j.salary >= ${}", n));
        }
        if self.has_equity == Some(true) {
            parts.push("j.equity > 0".to_string());
        }
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlValue;

    const COMPANIES: &str = "SELECT handle, name FROM companies";
    const JOBS: &str = "SELECT j.id, j.title FROM jobs j";

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn no_criteria_returns_base_query_with_order() {
        let q = sql_for_search(COMPANIES, &CompanyFilter::default()).unwrap();
        assert_eq!(q.sql, format!("{} ORDER BY name", COMPANIES));
        assert!(q.params.is_empty());

        let q = sql_for_search(JOBS, &JobFilter::default()).unwrap();
        assert_eq!(q.sql, format!("{} ORDER BY title", JOBS));
        assert!(q.params.is_empty());
    }

    #[test]
    fn name_is_case_insensitive_containment() {
        let f = CompanyFilter {
            name: Some("net".into()),
            ..Default::default()
        };
        let q = sql_for_search(COMPANIES, &f).unwrap();
        assert_eq!(q.sql, format!("{} WHERE name ILIKE $1 ORDER BY name", COMPANIES));
        assert_eq!(q.params, vec![SqlValue::from("%net%")]);
    }

    #[test]
    fn company_predicates_follow_fixed_order() {
        let f = CompanyFilter {
            name: Some("c".into()),
            min_employees: Some(2),
            max_employees: Some(800),
        };
        let q = sql_for_search(COMPANIES, &f).unwrap();
        assert_eq!(
            q.sql,
            format!(
                "{} WHERE name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3 ORDER BY name",
                COMPANIES
            )
        );
        assert_eq!(q.params, vec![SqlValue::from("%c%"), SqlValue::from(2), SqlValue::from(800)]);
    }

    #[test]
    fn inverted_range_fails_even_alone() {
        let f = CompanyFilter {
            min_employees: Some(50),
            max_employees: Some(10),
            ..Default::default()
        };
        assert!(matches!(sql_for_search(COMPANIES, &f), Err(AppError::InvalidRequest(_))));

        let f = CompanyFilter {
            name: Some("net".into()),
            ..f
        };
        assert!(matches!(sql_for_search(COMPANIES, &f), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn equal_bounds_are_allowed() {
        let f = CompanyFilter {
            min_employees: Some(10),
            max_employees: Some(10),
            ..Default::default()
        };
        assert!(sql_for_search(COMPANIES, &f).is_ok());
    }

    #[test]
    fn like_metacharacters_are_literal() {
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn has_equity_true_adds_predicate_without_value() {
        let f = JobFilter {
            has_equity: Some(true),
            ..Default::default()
        };
        let q = sql_for_search(JOBS, &f).unwrap();
        assert_eq!(q.sql, format!("{} WHERE j.equity > 0 ORDER BY title", JOBS));
        assert!(q.params.is_empty());
    }

    #[test]
    fn has_equity_false_adds_nothing() {
        let f = JobFilter {
            has_equity: Some(false),
            ..Default::default()
        };
        let q = sql_for_search(JOBS, &f).unwrap();
        assert_eq!(q.sql, format!("{} ORDER BY title", JOBS));
    }

    #[test]
    fn job_predicates_follow_fixed_order() {
        let f = JobFilter {
            title: Some("eng".into()),
            min_salary: Some(50_000),
            has_equity: Some(true),
        };
        let q = sql_for_search(JOBS, &f).unwrap();
        assert_eq!(
            q.sql,
            format!(
                "{} WHERE j.title ILIKE $1 AND j.salary >= $2 AND j.equity > 0 ORDER BY title",
                JOBS
            )
        );
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn unknown_query_keys_are_ignored() {
        let f = CompanyFilter::from_query(&query(&[("name", "net"), ("color", "red"), ("limit", "5")])).unwrap();
        assert_eq!(
            f,
            CompanyFilter {
                name: Some("net".into()),
                ..Default::default()
            }
        );
        let q = sql_for_search(COMPANIES, &f).unwrap();
        assert!(!q.sql.contains("color"));
    }

    #[test]
    fn query_values_are_parsed_and_checked() {
        let f = JobFilter::from_query(&query(&[("minSalary", "1000"), ("hasEquity", "TRUE")])).unwrap();
        assert_eq!(f.min_salary, Some(1000));
        assert_eq!(f.has_equity, Some(true));

        assert!(matches!(
            CompanyFilter::from_query(&query(&[("minEmployees", "lots")])),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            CompanyFilter::from_query(&query(&[("maxEmployees", "-1")])),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            JobFilter::from_query(&query(&[("hasEquity", "maybe")])),
            Err(AppError::InvalidRequest(_))
        ));
    }
}
