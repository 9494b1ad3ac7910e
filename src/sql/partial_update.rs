//! SET clause compiler for partial updates.

use crate::config::ColumnMap;
use crate::error::AppError;
use crate::sql::{quoted, QueryBuf, SqlValue};

/// Ordered (field, value) pairs of a partial mutation. Order decides placeholder numbering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSet {
    fields: Vec<(String, SqlValue)>,
}

impl FieldSet {
    pub fn new() -> Self {
        FieldSet { fields: Vec::new() }
    }

    pub fn push(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) {
        self.fields.push((field.into(), value.into()));
    }

    /// Push only when a value is present.
    pub fn push_opt<V: Into<SqlValue>>(&mut self, field: &str, value: Option<V>) {
        if let Some(v) = value {
            self.push(field, v);
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, SqlValue)> {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<SqlValue>> FromIterator<(K, V)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FieldSet {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Compile `fields` into `"col1"=$1, "col2"=$2, ...` with values in the same order.
/// Unmapped fields are used as column names as-is.
pub fn sql_for_partial_update(fields: &FieldSet, columns: &ColumnMap) -> Result<QueryBuf, AppError> {
    if fields.is_empty() {
        return Err(AppError::InvalidRequest("No data".into()));
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(fields.len());
    for (field, value) in fields.iter() {
        let column = columns.column_for(field);
        let param_num = q.push_param(value.clone());
        let rhs = columns
            .cast_for(field)
            .map(|t| format!("${}::{}", param_num, t))
            .unwrap_or_else(|| format!("${}", param_num));
        sets.push(format!("{}={}", quoted(column), rhs));
    }
    q.sql = sets.join(", ");
    Ok(q)
}
