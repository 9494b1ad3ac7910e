//! Query text plus its positional parameters, and the UPDATE statement wrapper.

use crate::sql::SqlValue;

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// SQL text and the values for its `$1..$n` placeholders, index-aligned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    pub fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its 1-based placeholder number.
    pub fn push_param(&mut self, v: impl Into<SqlValue>) -> usize {
        self.params.push(v.into());
        self.params.len()
    }
}

/// `UPDATE <table> SET <set> WHERE "<key_column>" = $k RETURNING <returning>`.
/// The key takes the next placeholder after the SET values.
pub fn update_statement(
    table: &str,
    set: QueryBuf,
    key_column: &str,
    key: impl Into<SqlValue>,
    returning: &str,
) -> QueryBuf {
    let mut q = set;
    let key_param = q.push_param(key);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        table,
        q.sql,
        quoted(key_column),
        key_param,
        returning
    );
    q
}
