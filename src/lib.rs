pub mod grid;
pub mod logging;
pub mod services;
pub mod tui;

// Re-export commonly used types
pub use grid::{Column, ColumnSpec, GridEvent, GridState, PageView, Row, RowId, SortDirection};
pub use tui::{Action, ActionCategory};
