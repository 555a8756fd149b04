//! Display and ordering helpers for raw cell values.

use serde_json::Value;
use std::cmp::Ordering;

/// Convert a cell value into its display string.
///
/// Strings are rendered verbatim (no surrounding quotes), null renders empty,
/// everything else uses its JSON text form. This is also the stringification
/// used by the filter pipeline, so filter option labels match rendered cells.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Generic ordering for the sort stage: numeric compare when both cells are
/// numbers, lexical on the display form otherwise. Missing and null cells
/// order below all defined values.
pub fn cmp_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (defined(a), defined(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
                // JSON numbers are never NaN, but stay total anyway.
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            } else {
                display_string(a).cmp(&display_string(b))
            }
        }
    }
}

fn defined(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_string() {
        assert_eq!(display_string(&json!("Al")), "Al");
        assert_eq!(display_string(&json!(30)), "30");
        assert_eq!(display_string(&json!(2.5)), "2.5");
        assert_eq!(display_string(&json!(true)), "true");
        assert_eq!(display_string(&Value::Null), "");
    }

    #[test]
    fn test_numeric_compare() {
        let (a, b) = (json!(25), json!(30));
        assert_eq!(cmp_cells(Some(&a), Some(&b)), Ordering::Less);

        // Numeric, not lexical: 9 < 10 even though "9" > "10".
        let (a, b) = (json!(9), json!(10));
        assert_eq!(cmp_cells(Some(&a), Some(&b)), Ordering::Less);
    }

    #[test]
    fn test_lexical_fallback() {
        let (a, b) = (json!("Al"), json!("Bo"));
        assert_eq!(cmp_cells(Some(&a), Some(&b)), Ordering::Less);

        // Mixed types fall back to display form.
        let (a, b) = (json!(5), json!("5"));
        assert_eq!(cmp_cells(Some(&a), Some(&b)), Ordering::Equal);
    }

    #[test]
    fn test_null_orders_below_defined() {
        let v = json!(0);
        assert_eq!(cmp_cells(None, Some(&v)), Ordering::Less);
        assert_eq!(cmp_cells(Some(&Value::Null), Some(&v)), Ordering::Less);
        assert_eq!(cmp_cells(Some(&v), None), Ordering::Greater);
        assert_eq!(cmp_cells(None, Some(&Value::Null)), Ordering::Equal);
    }
}
