use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// ColumnLabel – spreadsheet-style column identifier
// ---------------------------------------------------------------------------

/// A column identifier such as `A`, `B`, … `Z`, `AA`.
///
/// Stored as the 1-based display index so that ordering a `BTreeMap` by label
/// gives the display order (`B` before `AA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnLabel(u32);

impl ColumnLabel {
    /// Label for a 1-based column index. `0` has no label.
    pub fn from_index(index: usize) -> Option<Self> {
        if index == 0 {
            return None;
        }
        u32::try_from(index).ok().map(ColumnLabel)
    }

    /// Label for a 0-based position in a record.
    pub fn from_position(position: usize) -> Option<Self> {
        Self::from_index(position + 1)
    }

    /// Parse a free-text token: surrounding whitespace is ignored, the rest
    /// must be uppercase ASCII letters. `A` → 1, `Z` → 26, `AA` → 27.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        let mut index: u32 = 0;
        for b in token.bytes() {
            if !b.is_ascii_uppercase() {
                return None;
            }
            let digit = u32::from(b - b'A') + 1;
            index = index.checked_mul(26)?.checked_add(digit)?;
        }
        Some(ColumnLabel(index))
    }

    /// Label named by the leading uppercase letters of a typed token, so
    /// `A1` and `Ccol` name `A` and `C`. Nothing if it starts otherwise.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        let end = token
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(token.len());
        Self::parse(&token[..end])
    }

    /// 1-based display column index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = self.0;
        while n > 0 {
            n -= 1;
            letters.push((b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        let name: String = letters.into_iter().rev().collect();
        f.write_str(&name)
    }
}

impl Serialize for ColumnLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell
// ---------------------------------------------------------------------------

/// A cell is either text (possibly empty) or an explicit null coming from a
/// source that has one (JSON `null`, Parquet nulls).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Null,
}

impl CellValue {
    /// Text view of the cell; null reads as the empty string.
    pub fn as_str(&self) -> &str {
        match self {
            CellValue::Text(s) => s,
            CellValue::Null => "",
        }
    }

    /// Empty text or null.
    pub fn is_blank(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<Option<String>> for CellValue {
    fn from(v: Option<String>) -> Self {
        v.map(CellValue::Text).unwrap_or(CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Row – one record of the sheet
// ---------------------------------------------------------------------------

/// Ordered mapping from column label to cell value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<ColumnLabel, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from positional values, labelled `A`, `B`, … in order.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let cells = values
            .into_iter()
            .enumerate()
            .filter_map(|(pos, v)| ColumnLabel::from_position(pos).map(|l| (l, v.into())))
            .collect();
        Row { cells }
    }

    pub fn insert(&mut self, label: ColumnLabel, value: impl Into<CellValue>) {
        self.cells.insert(label, value.into());
    }

    pub fn get(&self, label: ColumnLabel) -> Option<&CellValue> {
        self.cells.get(&label)
    }

    /// Column labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = ColumnLabel> + '_ {
        self.cells.keys().copied()
    }

    /// Cell values in display order.
    pub fn values(&self) -> impl Iterator<Item = &CellValue> + Clone {
        self.cells.values()
    }

    /// Number of columns in this row.
    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the loaded sheet
// ---------------------------------------------------------------------------

/// The full loaded sheet. Never mutated in place: filtering and reloading
/// build a new `Dataset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Dataset { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Header labels, taken from the first row. `None` for an empty dataset.
    pub fn header(&self) -> Option<Vec<ColumnLabel>> {
        self.rows.first().map(|r| r.labels().collect())
    }

    /// New dataset holding the rows at `indices`, in the given order.
    /// Out-of-range indices are ignored.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
