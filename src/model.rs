//! In-memory description of a workbook: sheets, addressed cells, values and
//! formatting. Built once, then handed to the writer.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;

static A1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]{1,3})([0-9]+)$").expect("valid regex"));

/// A 1-based cell address. Orders row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

/// Last column of an xlsx sheet, `XFD`.
pub const MAX_COL: u32 = 16_384;
pub const MAX_ROW: u32 = 1_048_576;

impl CellRef {
    pub fn new(col: u32, row: u32) -> Result<Self> {
        if col == 0 || row == 0 {
            bail!("cell coordinates are 1-based, got column {col}, row {row}");
        }
        if col > MAX_COL || row > MAX_ROW {
            bail!("cell outside the sheet grid: column {col}, row {row}");
        }
        Ok(Self { row, col })
    }

    /// `(col, row)`, the order umya expects.
    pub fn coordinates(self) -> (u32, u32) {
        (self.col, self.row)
    }
}

fn column_number_to_name(mut column: u32) -> String {
    // 1 -> A, 26 -> Z, 27 -> AA ...
    let mut name = String::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.insert(0, (b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_number_to_name(self.col), self.row)
    }
}

impl FromStr for CellRef {
    type Err = anyhow::Error;

    fn from_str(addr: &str) -> Result<Self> {
        let caps = A1_RE
            .captures(addr)
            .ok_or_else(|| anyhow!("invalid cell address: {addr:?}"))?;
        let col = caps[1].bytes().fold(0u32, |acc, b| {
            acc * 26 + u32::from(b.to_ascii_uppercase() - b'A' + 1)
        });
        let row: u32 = caps[2]
            .parse()
            .with_context(|| format!("row out of range in cell address: {addr}"))?;
        Self::new(col, row).with_context(|| format!("invalid cell address: {addr:?}"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

/// Six hex digits, `RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rgb(String);

impl Rgb {
    pub fn new(hex: &str) -> Result<Self> {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("expected a 6-digit hex color, got {hex:?}");
        }
        Ok(Self(hex.to_ascii_uppercase()))
    }

    pub fn hex(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellFormat {
    pub bold: bool,
    pub italic: bool,
    pub size: Option<f64>,
    pub color: Option<Rgb>,
    pub fill: Option<Rgb>,
}

impl CellFormat {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_fill(mut self, fill: Rgb) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_font(&self) -> bool {
        self.bold || self.italic || self.size.is_some() || self.color.is_some()
    }

    /// Flags are OR-ed; options set in `other` replace ours.
    pub fn merge(&mut self, other: CellFormat) {
        self.bold |= other.bold;
        self.italic |= other.italic;
        if other.size.is_some() {
            self.size = other.size;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.fill.is_some() {
            self.fill = other.fill;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub value: Option<CellValue>,
    pub format: CellFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetSpec {
    name: String,
    cells: BTreeMap<CellRef, Cell>,
}

impl SheetSpec {
    fn new(name: String) -> Self {
        Self {
            name,
            cells: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn parse_addr(&self, addr: &str) -> Result<CellRef> {
        addr.parse().with_context(|| format!("sheet {}", self.name))
    }

    /// Assigns a value. Re-assigning the same value is a no-op; a different
    /// value at an occupied address is an error.
    pub fn set(&mut self, addr: &str, value: impl Into<CellValue>) -> Result<()> {
        let at = self.parse_addr(addr)?;
        let value = value.into();
        let cell = self.cells.entry(at).or_default();
        if let Some(existing) = &cell.value {
            if *existing != value {
                bail!(
                    "conflicting values for {}!{at}: {existing:?} then {value:?}",
                    self.name
                );
            }
        }
        cell.value = Some(value);
        Ok(())
    }

    /// Writes `values` left to right starting at column A of `row`.
    pub fn set_row<V>(&mut self, row: u32, values: impl IntoIterator<Item = V>) -> Result<()>
    where
        V: Into<CellValue>,
    {
        for (i, value) in values.into_iter().enumerate() {
            let at = CellRef::new(i as u32 + 1, row)
                .with_context(|| format!("sheet {}", self.name))?;
            self.set(&at.to_string(), value)?;
        }
        Ok(())
    }

    pub fn format(&mut self, addr: &str, format: CellFormat) -> Result<()> {
        let at = self.parse_addr(addr)?;
        match self.cells.entry(at) {
            Entry::Occupied(mut e) => e.get_mut().format.merge(format),
            Entry::Vacant(e) => {
                e.insert(Cell {
                    value: None,
                    format,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, addr: &str) -> Option<&Cell> {
        let at: CellRef = addr.parse().ok()?;
        self.cells.get(&at)
    }

    pub fn value(&self, addr: &str) -> Option<&CellValue> {
        self.get(addr).and_then(|c| c.value.as_ref())
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.cells.iter().map(|(at, cell)| (*at, cell))
    }

    /// Rows from `first_row` down that hold at least one value, stopping at
    /// the first row with none.
    pub fn table_rows(&self, first_row: u32) -> Vec<Vec<&CellValue>> {
        let mut rows = Vec::new();
        for row in first_row..=MAX_ROW {
            let values: Vec<&CellValue> = self
                .cells
                .range(CellRef { row, col: 1 }..=CellRef { row, col: MAX_COL })
                .filter_map(|(_, cell)| cell.value.as_ref())
                .collect();
            if values.is_empty() {
                break;
            }
            rows.push(values);
        }
        rows
    }
}

/// Ordered sheets with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookSpec {
    sheets: Vec<SheetSpec>,
}

impl WorkbookSpec {
    pub fn add_sheet(&mut self, name: &str) -> Result<&mut SheetSpec> {
        if name.is_empty() {
            bail!("sheet name must not be empty");
        }
        if self.sheet(name).is_some() {
            bail!("duplicate sheet name: {name}");
        }
        self.sheets.push(SheetSpec::new(name.to_string()));
        let index = self.sheets.len() - 1;
        Ok(&mut self.sheets[index])
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetSpec> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheets(&self) -> &[SheetSpec] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name()).collect()
    }
}
