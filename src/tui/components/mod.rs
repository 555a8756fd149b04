pub mod filter_menu;
pub mod grid_table;

pub use filter_menu::{FilterMenu, MenuEntry};
pub use grid_table::{GridTable, HitTarget, PIXELS_PER_CELL};
