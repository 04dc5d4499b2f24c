//! Generates `test-model.xlsx`, a fixed multi-sheet workbook used as input
//! for exercising spreadsheet consumers.

pub mod builder;
pub mod data;
pub mod model;
pub mod style;

pub use builder::{BuildOptions, Summary, build_fixture, build_workbook, run, write_fixture};
pub use model::{CellFormat, CellRef, CellValue, Rgb, SheetSpec, WorkbookSpec};
