//! Per-entity mapping from API field names (camelCase) to stored column names.

/// One field of an entity as the API names it, and where it lives in the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub column: &'static str,
    /// PostgreSQL type to cast the bound parameter to (e.g. `numeric` for text-encoded decimals).
    pub cast: Option<&'static str>,
}

impl ColumnSpec {
    pub const fn new(field: &'static str, column: &'static str) -> Self {
        ColumnSpec { field, column, cast: None }
    }

    pub const fn with_cast(field: &'static str, column: &'static str, cast: &'static str) -> Self {
        ColumnSpec {
            field,
            column,
            cast: Some(cast),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnMap {
    pub entity: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl ColumnMap {
    pub const fn new(entity: &'static str, columns: &'static [ColumnSpec]) -> Self {
        ColumnMap { entity, columns }
    }

    pub fn get(&self, field: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Stored column for `field`, or the field name itself when it is not mapped.
    pub fn column_for<'a>(&self, field: &'a str) -> &'a str {
        self.get(field).map(|c| c.column).unwrap_or(field)
    }

    /// Cast applied to the bound parameter for `field`, if the mapping declares one.
    pub fn cast_for(&self, field: &str) -> Option<&'static str> {
        self.get(field).and_then(|c| c.cast)
    }
}

pub const COMPANY_COLUMNS: ColumnMap = ColumnMap::new(
    "company",
    &[
        ColumnSpec::new("name", "name"),
        ColumnSpec::new("description", "description"),
        ColumnSpec::new("numEmployees", "num_employees"),
        ColumnSpec::new("logoUrl", "logo_url"),
    ],
);

pub const JOB_COLUMNS: ColumnMap = ColumnMap::new(
    "job",
    &[
        ColumnSpec::new("title", "title"),
        ColumnSpec::new("salary", "salary"),
        ColumnSpec::with_cast("equity", "equity", "numeric"),
    ],
);

pub const USER_COLUMNS: ColumnMap = ColumnMap::new(
    "user",
    &[
        ColumnSpec::new("firstName", "first_name"),
        ColumnSpec::new("lastName", "last_name"),
        ColumnSpec::new("email", "email"),
        ColumnSpec::new("password", "password"),
        ColumnSpec::new("isAdmin", "is_admin"),
    ],
);

/// Every entity map, for startup validation.
pub const ALL_COLUMN_MAPS: &[ColumnMap] = &[COMPANY_COLUMNS, JOB_COLUMNS, USER_COLUMNS];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_camel_case_fields_to_columns() {
        assert_eq!(COMPANY_COLUMNS.column_for("numEmployees"), "num_employees");
        assert_eq!(USER_COLUMNS.column_for("firstName"), "first_name");
    }

    #[test]
    fn unmapped_field_passes_through() {
        assert_eq!(COMPANY_COLUMNS.column_for("handle"), "handle");
    }

    #[test]
    fn equity_carries_numeric_cast() {
        assert_eq!(JOB_COLUMNS.cast_for("equity"), Some("numeric"));
        assert_eq!(JOB_COLUMNS.cast_for("title"), None);
        assert_eq!(COMPANY_COLUMNS.cast_for("handle"), None);
    }
}
