//! Startup validation of the column maps: identifiers and uniqueness.

use crate::config::ColumnMap;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

pub fn validate_column_maps(maps: &[ColumnMap]) -> Result<(), ConfigError> {
    let column_re = Regex::new(r"^[a-z_][a-z0-9_]*$").map_err(|e| ConfigError::InvalidColumnMap {
        entity: "*",
        reason: e.to_string(),
    })?;
    let field_re = Regex::new(r"^[a-z][A-Za-z0-9]*$").map_err(|e| ConfigError::InvalidColumnMap {
        entity: "*",
        reason: e.to_string(),
    })?;
    let cast_re = Regex::new(r"^[a-z][a-z0-9_ ]*$").map_err(|e| ConfigError::InvalidColumnMap {
        entity: "*",
        reason: e.to_string(),
    })?;

    for map in maps {
        if map.columns.is_empty() {
            return Err(ConfigError::InvalidColumnMap {
                entity: map.entity,
                reason: "no columns".into(),
            });
        }
        let mut fields = HashSet::new();
        let mut columns = HashSet::new();
        for spec in map.columns {
            if !field_re.is_match(spec.field) {
                return Err(ConfigError::InvalidColumnMap {
                    entity: map.entity,
                    reason: format!("invalid field name '{}'", spec.field),
                });
            }
            if !column_re.is_match(spec.column) {
                return Err(ConfigError::InvalidColumnMap {
                    entity: map.entity,
                    reason: format!("invalid column name '{}'", spec.column),
                });
            }
            if let Some(cast) = spec.cast {
                if !cast_re.is_match(cast) {
                    return Err(ConfigError::InvalidColumnMap {
                        entity: map.entity,
                        reason: format!("invalid cast '{}' for {}", cast, spec.field),
                    });
                }
            }
            if !fields.insert(spec.field) {
                return Err(ConfigError::InvalidColumnMap {
                    entity: map.entity,
                    reason: format!("duplicate field '{}'", spec.field),
                });
            }
            if !columns.insert(spec.column) {
                return Err(ConfigError::InvalidColumnMap {
                    entity: map.entity,
                    reason: format!("duplicate column '{}'", spec.column),
                });
            }
        }
    }
    Ok(())
}
