//! The fixed content of `test-model.xlsx`.

use anyhow::Result;

use crate::model::{CellFormat, CellValue, Rgb, SheetSpec, WorkbookSpec};

pub const OUTPUT_FILE: &str = "test-model.xlsx";

pub const RESULTS: &str = "Results";
pub const ASSUMPTIONS: &str = "Assumptions";
pub const DATA_INPUTS: &str = "Data Inputs";
pub const LOCATION: &str = "UK Location Data";

pub const SHEET_NAMES: [&str; 4] = [RESULTS, ASSUMPTIONS, DATA_INPUTS, LOCATION];

pub const SROI_CELL: &str = "B5";
pub const SROI_VALUE: &str = "1:5.5";

pub const HEADER_ROW: u32 = 3;
pub const FIRST_DATA_ROW: u32 = 4;

pub const MANDATORY: &str = "YES";
const MANDATORY_COLUMN: &str = "C";

const HIGHLIGHT: &str = "FFFF00";
const SROI_COLOR: &str = "0000FF";
const NOTE_COLOR: &str = "666666";

#[derive(Debug, Clone, Copy)]
enum Raw {
    Text(&'static str),
    Int(i32),
}

const fn t(s: &'static str) -> Raw {
    Raw::Text(s)
}

impl From<Raw> for CellValue {
    fn from(raw: Raw) -> Self {
        match raw {
            Raw::Text(s) => CellValue::from(s),
            Raw::Int(n) => CellValue::from(n),
        }
    }
}

// (row, label in A, value in B)
const RESULT_METRICS: &[(u32, &str, Raw)] = &[
    (5, "SROI (Social Return on Investment)", t(SROI_VALUE)),
    (6, "Total Social Value Created", t("£275,000")),
    (7, "Total Investment", t("£50,000")),
    (9, "Participants Helped", Raw::Int(150)),
    (10, "Jobs Secured", Raw::Int(98)),
];

const ASSUMPTION_HEADER: [&str; 3] = ["Assumption", "Value", "Source"];
const ASSUMPTION_ROWS: &[[Raw; 3]] = &[
    [t("Average UK Salary"), t("£33,000"), t("ONS 2024")],
    [t("Wellbeing Value (QALY)"), t("£8,500"), t("NHS/HM Treasury")],
    [t("Attribution Factor"), t("60%"), t("Academic Research")],
    [t("Deadweight Factor"), t("25%"), t("IES Research")],
    [t("Displacement Factor"), t("10%"), t("Sector Standards")],
    [t("Drop-off per year"), t("15%"), t("Longitudinal Studies")],
];

const INPUT_HEADER: [&str; 3] = ["Field", "Example Value", "Mandatory?"];
const INPUT_ROWS: &[[Raw; 3]] = &[
    [t("Number of Participants"), Raw::Int(150), t("YES")],
    [t("Program Cost"), t("£50,000"), t("YES")],
    [t("Duration (months)"), Raw::Int(6), t("YES")],
    [t("Age Range"), t("16-24"), t("NO")],
    [t("Employment Rate Achieved"), t("65%"), t("NO (uses research default)")],
    [t("Average Salary of Jobs"), t("£25,000"), t("NO (uses UK average)")],
];

const LOCATION_HEADER: [&str; 3] = ["Metric", "UK Value", "Source/Year"];
const LOCATION_ROWS: &[[Raw; 3]] = &[
    [t("Youth Unemployment Rate"), t("11.2%"), t("ONS 2024")],
    [t("Median Salary"), t("£33,000"), t("ONS 2024")],
    [t("Minimum Wage"), t("£11.44/hour"), t("Gov 2024")],
    [t("Tax Rate (Basic)"), t("20%"), t("HMRC")],
    [t("National Insurance"), t("12%"), t("HMRC")],
    [t("Wellbeing Value"), t("£8,500"), t("HM Treasury")],
];

const LOCATION_NOTE: (&str, &str) = (
    "A12",
    "Note: This table can be expanded for other countries",
);

/// Builds the four-sheet fixture in its final order.
pub fn fixture() -> Result<WorkbookSpec> {
    let mut book = WorkbookSpec::default();

    results(book.add_sheet(RESULTS)?)?;

    let sheet = book.add_sheet(ASSUMPTIONS)?;
    title(sheet, "Value Factors & Assumptions")?;
    table(sheet, ASSUMPTION_HEADER, ASSUMPTION_ROWS)?;

    let sheet = book.add_sheet(DATA_INPUTS)?;
    title(sheet, "Data Input Fields")?;
    table(sheet, INPUT_HEADER, INPUT_ROWS)?;
    highlight_mandatory(sheet)?;

    let sheet = book.add_sheet(LOCATION)?;
    title(sheet, "UK-Specific Data Table")?;
    table(sheet, LOCATION_HEADER, LOCATION_ROWS)?;
    let (addr, note) = LOCATION_NOTE;
    sheet.set(addr, note)?;
    sheet.format(addr, CellFormat::italic().with_color(Rgb::new(NOTE_COLOR)?))?;

    Ok(book)
}

fn title(sheet: &mut SheetSpec, text: &str) -> Result<()> {
    sheet.set("A1", text)?;
    sheet.format("A1", CellFormat::bold().with_size(14.0))
}

fn results(sheet: &mut SheetSpec) -> Result<()> {
    title(sheet, "Youth Employment Skills Training - Results")?;
    sheet.set("A3", "Key Metrics")?;
    sheet.format("A3", CellFormat::bold())?;

    for &(row, label, value) in RESULT_METRICS {
        sheet.set_row(row, [CellValue::from(label), CellValue::from(value)])?;
    }
    sheet.format(
        SROI_CELL,
        CellFormat::default()
            .with_size(12.0)
            .with_color(Rgb::new(SROI_COLOR)?),
    )
}

fn table(sheet: &mut SheetSpec, header: [&str; 3], rows: &[[Raw; 3]]) -> Result<()> {
    sheet.set_row(HEADER_ROW, header)?;
    for col in ["A", "B", "C"] {
        sheet.format(&format!("{col}{HEADER_ROW}"), CellFormat::bold())?;
    }
    for (row, values) in (FIRST_DATA_ROW..).zip(rows) {
        sheet.set_row(row, *values)?;
    }
    Ok(())
}

fn highlight_mandatory(sheet: &mut SheetSpec) -> Result<()> {
    let fill = CellFormat::default().with_fill(Rgb::new(HIGHLIGHT)?);
    for row in FIRST_DATA_ROW..FIRST_DATA_ROW + INPUT_ROWS.len() as u32 {
        let addr = format!("{MANDATORY_COLUMN}{row}");
        let flagged = sheet
            .value(&addr)
            .and_then(CellValue::as_text)
            .is_some_and(|v| v == MANDATORY);
        if flagged {
            sheet.format(&addr, fill.clone())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheets_come_in_fixed_order() {
        let book = fixture().unwrap();
        assert_eq!(book.sheet_names(), SHEET_NAMES);
    }

    #[test]
    fn sroi_is_text() {
        let book = fixture().unwrap();
        let results = book.sheet(RESULTS).unwrap();
        assert_eq!(
            results.value(SROI_CELL),
            Some(&CellValue::Text(SROI_VALUE.to_string()))
        );
        let fmt = &results.get(SROI_CELL).unwrap().format;
        assert_eq!(fmt.size, Some(12.0));
        assert_eq!(fmt.color.as_ref().map(Rgb::hex), Some("0000FF"));
        assert_eq!(results.value("B9"), Some(&CellValue::Number(150.0)));
        assert_eq!(results.value("B10"), Some(&CellValue::Number(98.0)));
        assert_eq!(results.value("A8"), None);
    }

    #[test]
    fn tables_have_six_full_rows() {
        let book = fixture().unwrap();
        for name in [ASSUMPTIONS, DATA_INPUTS, LOCATION] {
            let sheet = book.sheet(name).unwrap();
            let rows = sheet.table_rows(FIRST_DATA_ROW);
            assert_eq!(rows.len(), 6, "{name}");
            assert!(rows.iter().all(|r| r.len() == 3), "{name}");
            for col in ["A", "B", "C"] {
                let cell = sheet.get(&format!("{col}{HEADER_ROW}")).unwrap();
                assert!(cell.format.bold, "{name}!{col}{HEADER_ROW}");
            }
        }
    }

    #[test]
    fn only_mandatory_inputs_are_highlighted() {
        let book = fixture().unwrap();
        let inputs = book.sheet(DATA_INPUTS).unwrap();
        let highlighted: Vec<u32> = inputs
            .cells()
            .filter(|(_, cell)| cell.format.fill.is_some())
            .map(|(at, _)| at.row)
            .collect();
        assert_eq!(highlighted, [4, 5, 6]);
        for row in highlighted {
            assert_eq!(
                inputs.value(&format!("C{row}")).and_then(CellValue::as_text),
                Some(MANDATORY)
            );
        }
    }

    #[test]
    fn titles_and_note_are_styled() {
        let book = fixture().unwrap();
        for sheet in book.sheets() {
            let fmt = &sheet.get("A1").unwrap().format;
            assert!(fmt.bold, "{}", sheet.name());
            assert_eq!(fmt.size, Some(14.0), "{}", sheet.name());
        }
        let note = book.sheet(LOCATION).unwrap().get("A12").unwrap();
        assert!(note.format.italic);
        assert!(!note.format.bold);
        assert_eq!(note.format.color.as_ref().map(Rgb::hex), Some("666666"));
    }
}
