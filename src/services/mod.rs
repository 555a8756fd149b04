pub mod dataset;
pub mod export;

pub use dataset::{infer_columns, load_rows};
pub use export::{csv_string, write_csv};
