//! Dataset loading: JSON files into the engine's opaque-row model, plus
//! schema inference for hosts that supply no column definitions.

use crate::grid::{ColumnSpec, Row};
use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Load a dataset from a JSON file containing an array of objects.
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read dataset {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .wrap_err_with(|| format!("invalid JSON in {}", path.display()))?;
    let rows = rows_from_value(value)?;
    debug!(path = %path.display(), rows = rows.len(), "loaded dataset");
    Ok(rows)
}

/// Convert a parsed JSON value into rows. Only an array of objects is a
/// valid dataset.
pub fn rows_from_value(value: Value) -> Result<Vec<Row>> {
    let Value::Array(items) = value else {
        bail!("dataset must be a JSON array of objects");
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(row) => Ok(row),
            other => bail!("dataset element {i} is not an object: {other}"),
        })
        .collect()
}

/// Infer a column schema from row data: the union of keys across all rows in
/// first-appearance order, every column filterable and sortable.
pub fn infer_columns(rows: &[Row]) -> Vec<ColumnSpec> {
    let mut keys: Vec<&String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys.into_iter()
        .map(|key| ColumnSpec::new(key.as_str()).with_sortable(true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_rows_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[{{"name": "Al", "age": 25}}, {{"name": "Bo", "age": 30}}]"#
        )
        .unwrap();
        drop(file);

        let rows = load_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], json!("Al"));
    }

    #[test]
    fn test_non_array_json_is_rejected() {
        assert!(rows_from_value(json!({"not": "an array"})).is_err());
        assert!(rows_from_value(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_infer_columns_unions_keys_in_first_appearance_order() {
        let rows = rows_from_value(json!([
            {"b": 1, "a": 2},
            {"a": 3, "c": 4}
        ]))
        .unwrap();
        let specs = infer_columns(&rows);
        let keys: Vec<_> = specs.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(specs[0].sortable, Some(true));
    }
}
