/// This module reads text rows from CSV content and writes classified rows back out as CSV
pub mod text_csv;

pub use text_csv::*;
