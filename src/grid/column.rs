//! Column model: normalizes raw column definitions into a canonical ordered
//! list, and owns per-column geometry (width bounds, resize, autosize).
//!
//! Identity is the position in the canonical list. Visibility is a rendering
//! filter over that list, never a mutation of it, so indices held by the
//! focus and geometry state stay valid across visibility toggles.

use crate::grid::value::display_string;
use crate::grid::Row;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Default width for columns that do not specify one.
pub const DEFAULT_WIDTH: u16 = 150;
/// Default lower width bound.
pub const DEFAULT_MIN_WIDTH: u16 = 50;
/// Default upper width bound.
pub const DEFAULT_MAX_WIDTH: u16 = 500;
/// Width applied by the autosize action.
pub const AUTOSIZE_WIDTH: u16 = 200;

/// Custom cell renderer: maps a whole row to its display value.
pub type CellRenderer = Arc<dyn Fn(&Row) -> String + Send + Sync>;

/// Raw column definition as supplied by the host. Unset fields take the
/// documented defaults during normalization.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    pub display_name: Option<String>,
    pub sortable: Option<bool>,
    pub filterable: Option<bool>,
    pub visible: Option<bool>,
    pub width: Option<u16>,
    pub min_width: Option<u16>,
    pub max_width: Option<u16>,
    #[serde(skip)]
    pub renderer: Option<CellRenderer>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = Some(sortable);
        self
    }

    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = Some(filterable);
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_renderer(mut self, renderer: CellRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("key", &self.key)
            .field("display_name", &self.display_name)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("visible", &self.visible)
            .field("width", &self.width)
            .field("min_width", &self.min_width)
            .field("max_width", &self.max_width)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

/// Normalized column. Invariant: `min_width <= width <= max_width`.
#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub display_name: String,
    pub sortable: bool,
    pub filterable: bool,
    pub visible: bool,
    pub width: u16,
    pub min_width: u16,
    pub max_width: u16,
    pub renderer: Option<CellRenderer>,
}

impl Column {
    /// Whether this column reads a field from row data. Render-only columns
    /// have no key and are never sortable or filterable.
    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    /// Clamp a proposed width into this column's bounds.
    pub fn clamp_width(&self, proposed: u16) -> u16 {
        proposed.clamp(self.min_width, self.max_width)
    }

    /// Apply a signed pixel delta to the current width, clamped.
    pub fn width_with_delta(&self, delta: i32) -> u16 {
        let proposed = (i32::from(self.width) + delta)
            .clamp(i32::from(self.min_width), i32::from(self.max_width));
        proposed as u16
    }

    /// Raw cell display text for this column (no renderer applied). A row
    /// lacking the key is an empty cell, not an error.
    pub fn raw_text(&self, row: &Row) -> String {
        row.get(&self.key).map(display_string).unwrap_or_default()
    }

    /// Rendered cell text: the custom renderer when present, raw otherwise.
    pub fn cell_text(&self, row: &Row) -> String {
        match &self.renderer {
            Some(render) => render(row),
            None => self.raw_text(row),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("display_name", &self.display_name)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("visible", &self.visible)
            .field("width", &self.width)
            .field("min_width", &self.min_width)
            .field("max_width", &self.max_width)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

/// Normalize raw column definitions into the canonical column list.
///
/// Bad schema input is repaired, never rejected: inverted width bounds are
/// collapsed, widths clamped into bounds, duplicate keys kept (both columns
/// read the same field) with a warning.
pub fn normalize(specs: Vec<ColumnSpec>) -> Vec<Column> {
    let mut seen_keys: Vec<String> = Vec::new();
    specs
        .into_iter()
        .map(|spec| {
            if spec.key.is_empty() {
                if spec.renderer.is_none() {
                    warn!("column without key or renderer will render empty cells");
                }
            } else if seen_keys.contains(&spec.key) {
                warn!(key = %spec.key, "duplicate column key; both columns read the same field");
            } else {
                seen_keys.push(spec.key.clone());
            }

            let min_width = spec.min_width.unwrap_or(DEFAULT_MIN_WIDTH);
            let mut max_width = spec.max_width.unwrap_or(DEFAULT_MAX_WIDTH);
            if max_width < min_width {
                warn!(
                    key = %spec.key,
                    min_width, max_width, "inverted width bounds; collapsing max to min"
                );
                max_width = min_width;
            }
            let width = spec.width.unwrap_or(DEFAULT_WIDTH).clamp(min_width, max_width);

            let sortable = spec.sortable.unwrap_or(false) && !spec.key.is_empty();
            let filterable = spec.filterable.unwrap_or(true) && !spec.key.is_empty();

            Column {
                display_name: spec.display_name.unwrap_or_else(|| spec.key.clone()),
                key: spec.key,
                sortable,
                filterable,
                visible: spec.visible.unwrap_or(true),
                width,
                min_width,
                max_width,
                renderer: spec.renderer,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_normalize_defaults() {
        let cols = normalize(vec![ColumnSpec::new("name")]);
        assert_eq!(cols.len(), 1);
        let col = &cols[0];
        assert_eq!(col.display_name, "name");
        assert!(!col.sortable);
        assert!(col.filterable);
        assert!(col.visible);
        assert_eq!(col.width, DEFAULT_WIDTH);
        assert_eq!(col.min_width, DEFAULT_MIN_WIDTH);
        assert_eq!(col.max_width, DEFAULT_MAX_WIDTH);
    }

    #[test]
    fn test_normalize_clamps_width_into_bounds() {
        let mut spec = ColumnSpec::new("age").with_width(10);
        spec.min_width = Some(80);
        spec.max_width = Some(120);
        let cols = normalize(vec![spec]);
        assert_eq!(cols[0].width, 80);
    }

    #[test]
    fn test_normalize_repairs_inverted_bounds() {
        let mut spec = ColumnSpec::new("age");
        spec.min_width = Some(200);
        spec.max_width = Some(100);
        let cols = normalize(vec![spec]);
        assert_eq!(cols[0].min_width, 200);
        assert_eq!(cols[0].max_width, 200);
        assert_eq!(cols[0].width, 200);
    }

    #[test]
    fn test_keyless_column_is_never_sortable_or_filterable() {
        let spec = ColumnSpec::new("").with_sortable(true).with_filterable(true);
        let cols = normalize(vec![spec]);
        assert!(!cols[0].sortable);
        assert!(!cols[0].filterable);
    }

    #[test]
    fn test_width_with_delta_clamps_extremes() {
        let cols = normalize(vec![ColumnSpec::new("a")]);
        let col = &cols[0];
        assert_eq!(col.width_with_delta(100_000), col.max_width);
        assert_eq!(col.width_with_delta(-100_000), col.min_width);
        assert_eq!(col.width_with_delta(10), DEFAULT_WIDTH + 10);
    }

    #[test]
    fn test_cell_text_prefers_renderer() {
        let spec = ColumnSpec::new("name")
            .with_renderer(Arc::new(|row: &Row| {
                format!("*{}*", row.get("name").and_then(|v| v.as_str()).unwrap_or(""))
            }));
        let cols = normalize(vec![spec]);

        let mut row = Row::new();
        row.insert("name".into(), json!("Al"));
        assert_eq!(cols[0].cell_text(&row), "*Al*");
        assert_eq!(cols[0].raw_text(&row), "Al");
    }

    #[test]
    fn test_missing_key_renders_empty() {
        let cols = normalize(vec![ColumnSpec::new("missing")]);
        let row = Row::new();
        assert_eq!(cols[0].cell_text(&row), "");
    }
}
