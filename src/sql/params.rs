//! Positional parameter values and their PostgreSQL encoding.

use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

/// A value bound to a `$n` placeholder. Each variant encodes as its own PostgreSQL type.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i32),
    Bool(bool),
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<i32> for SqlValue {
    fn from(n: i32) -> Self {
        SqlValue::Int(n)
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        SqlValue::Bool(b)
    }
}

impl<'q> Encode<'q, Postgres> for SqlValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            SqlValue::Text(s) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)
            }
            SqlValue::Int(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf),
            SqlValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            SqlValue::Text(_) => <String as sqlx::Type<Postgres>>::type_info(),
            SqlValue::Int(_) => <i32 as sqlx::Type<Postgres>>::type_info(),
            SqlValue::Bool(_) => <bool as sqlx::Type<Postgres>>::type_info(),
        })
    }
}

impl sqlx::Type<Postgres> for SqlValue {
    fn type_info() -> PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}
