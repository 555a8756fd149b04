//! Grid state engine: owns column/row/view state and derives a consistent
//! filtered -> sorted -> paginated view on every transition.
//!
//! Nothing in this module knows about terminals or rendering; the TUI layer
//! consumes [`PageView`] snapshots and drives the engine through its
//! transition methods.

pub mod column;
pub mod events;
pub mod filter;
pub mod focus;
pub mod page;
pub mod selection;
pub mod sort;
pub mod state;
pub mod value;
pub mod view;

pub use column::{Column, ColumnSpec};
pub use events::GridEvent;
pub use filter::FilterState;
pub use focus::{FocusCoord, FocusState, NavDirection};
pub use page::PageState;
pub use selection::SelectionSet;
pub use sort::{SortDirection, SortState};
pub use state::GridState;
pub use view::{PageView, RowEntry};

/// A row is an opaque mapping from column key to cell value. The engine never
/// mutates a row; it only reorders and filters references.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Row identity: index into the raw dataset, stable for the lifetime of a
/// dataset instance.
pub type RowId = usize;
