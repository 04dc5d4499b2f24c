use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use umya_spreadsheet::Spreadsheet;

use crate::data;
use crate::model::{CellValue, WorkbookSpec};
use crate::style;

/// Name of the blank sheet `umya_spreadsheet::new_file()` starts with.
pub const DEFAULT_SHEET: &str = "Sheet1";

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub output: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(data::OUTPUT_FILE),
        }
    }
}

impl BuildOptions {
    pub fn with_output(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub path: PathBuf,
    pub sheet_names: Vec<String>,
    pub sroi: String,
}

impl Summary {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("✓ Created {}", self.path.display()),
            format!("✓ Sheets: {}", self.sheet_names.join(", ")),
            format!("✓ SROI value: {} (within acceptable range)", self.sroi),
        ]
    }
}

// Fixed so that reruns carry identical document properties.
fn document_timestamp() -> Result<String> {
    let at = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| anyhow!("invalid document timestamp"))?;
    Ok(at.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

/// Turns the in-memory description into an umya workbook holding exactly
/// the described sheets, in order.
pub fn build_workbook(spec: &WorkbookSpec) -> Result<Spreadsheet> {
    if spec.sheets().is_empty() {
        bail!("workbook has no sheets");
    }

    let mut book = umya_spreadsheet::new_file();

    for sheet_spec in spec.sheets() {
        let name = sheet_spec.name();
        let sheet = book
            .new_sheet(name)
            .map_err(|e| anyhow!("cannot create sheet {name}: {e}"))?;

        for (at, cell) in sheet_spec.cells() {
            let target = sheet.get_cell_mut(at.coordinates());
            match &cell.value {
                Some(CellValue::Text(s)) => {
                    target.set_value(s.as_str());
                }
                Some(CellValue::Number(n)) => {
                    target.set_value_number(*n);
                }
                None => {}
            }
        }

        for (at, cell) in sheet_spec.cells() {
            if cell.format.is_empty() {
                continue;
            }
            sheet
                .get_cell_mut(at.coordinates())
                .set_style(style::to_style(&cell.format));
        }
    }

    book.remove_sheet_by_name(DEFAULT_SHEET)
        .map_err(|e| anyhow!("cannot remove default sheet {DEFAULT_SHEET}: {e}"))?;
    book.set_active_sheet(0);

    let stamp = document_timestamp()?;
    book.get_properties_mut()
        .set_created(stamp.clone())
        .set_modified(stamp);

    Ok(book)
}

fn save(book: &Spreadsheet, path: &Path) -> Result<()> {
    umya_spreadsheet::writer::xlsx::write(book, path)
        .with_context(|| format!("cannot save file: {}", path.display()))
}

/// Builds the fixture and writes it to `options.output`, replacing any
/// existing file.
pub fn write_fixture(options: &BuildOptions) -> Result<Summary> {
    let spec = data::fixture()?;
    let book = build_workbook(&spec)?;
    save(&book, &options.output)?;

    let sroi = spec
        .sheet(data::RESULTS)
        .and_then(|s| s.value(data::SROI_CELL))
        .map(CellValue::to_string)
        .ok_or_else(|| anyhow!("{}!{} is empty", data::RESULTS, data::SROI_CELL))?;

    Ok(Summary {
        path: options.output.clone(),
        sheet_names: spec.sheet_names().into_iter().map(String::from).collect(),
        sroi,
    })
}

/// Writes `test-model.xlsx` into the working directory.
pub fn build_fixture() -> Result<Summary> {
    write_fixture(&BuildOptions::default())
}

/// The binary takes no flags; arguments are accepted and ignored.
pub fn run(args: impl IntoIterator<Item = OsString>) -> Result<()> {
    let mut args = args.into_iter();
    let _exe = args.next();

    let summary = build_fixture()?;
    for line in summary.lines() {
        println!("{line}");
    }
    println!("\nYou can now upload this file to the validation tool!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_names(book: &Spreadsheet) -> Vec<String> {
        book.get_sheet_collection()
            .iter()
            .map(|s| s.get_name().to_string())
            .collect()
    }

    #[test]
    fn default_sheet_is_removed() {
        let book = build_workbook(&data::fixture().unwrap()).unwrap();
        assert_eq!(sheet_names(&book), data::SHEET_NAMES);
        assert!(book.get_sheet_by_name(DEFAULT_SHEET).is_none());
        assert!(book.get_sheet_by_name("Sheet").is_none());
    }

    #[test]
    fn values_land_at_their_addresses() {
        let book = build_workbook(&data::fixture().unwrap()).unwrap();
        let results = book.get_sheet_by_name(data::RESULTS).unwrap();
        assert_eq!(results.get_value("B5"), data::SROI_VALUE);
        assert_eq!(results.get_value("B6"), "£275,000");
        assert_eq!(results.get_value("B9"), "150");
        assert_eq!(results.get_value("A8"), "");

        let location = book.get_sheet_by_name(data::LOCATION).unwrap();
        assert_eq!(location.get_value("C6"), "Gov 2024");
    }

    #[test]
    fn empty_workbook_is_rejected() {
        assert!(build_workbook(&WorkbookSpec::default()).is_err());
    }

    #[test]
    fn sheet_named_like_the_default_is_rejected() {
        let mut spec = WorkbookSpec::default();
        spec.add_sheet(DEFAULT_SHEET).unwrap();
        assert!(build_workbook(&spec).is_err());
    }

    #[test]
    fn summary_lines() {
        let summary = Summary {
            path: PathBuf::from(data::OUTPUT_FILE),
            sheet_names: data::SHEET_NAMES.iter().map(|s| s.to_string()).collect(),
            sroi: data::SROI_VALUE.to_string(),
        };
        assert_eq!(
            summary.lines(),
            [
                "✓ Created test-model.xlsx",
                "✓ Sheets: Results, Assumptions, Data Inputs, UK Location Data",
                "✓ SROI value: 1:5.5 (within acceptable range)",
            ]
        );
    }

    #[test]
    fn document_timestamp_is_fixed() {
        assert_eq!(document_timestamp().unwrap(), "2024-01-01T00:00:00Z");
    }
}
