use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;

use super::model::Dataset;

/// File name used when the user leaves the name blank.
pub const DEFAULT_FILENAME: &str = "download";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Pdf,
    Img,
    Txt,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Xlsx,
        ExportFormat::Csv,
        ExportFormat::Pdf,
        ExportFormat::Img,
        ExportFormat::Txt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Img => "img",
            ExportFormat::Txt => "txt",
        }
    }

    /// Extension of the written file.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Img => "png",
            other => other.as_str(),
        }
    }

    /// Whether [`export`] can write this format.
    pub fn is_supported(self) -> bool {
        !matches!(self, ExportFormat::Pdf | ExportFormat::Img)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            "img" | "png" => Ok(ExportFormat::Img),
            "txt" => Ok(ExportFormat::Txt),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0} export is not supported yet")]
    Unsupported(ExportFormat),

    #[error("unknown export format '{0}' (expected xlsx, csv, pdf, img or txt)")]
    UnknownFormat(String),

    #[error("writing export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("writing JSON line: {0}")]
    Json(#[from] serde_json::Error),

    #[error("writing XLSX: {0}")]
    Xlsx(#[from] XlsxError),
}

/// `<dir>/<filename>`, falling back to [`DEFAULT_FILENAME`] for a blank name.
pub fn output_stem(dir: &Path, filename: &str) -> PathBuf {
    let name = filename.trim();
    dir.join(if name.is_empty() { DEFAULT_FILENAME } else { name })
}

/// Write `dataset` to `<stem>.<ext>` and return the written path.
///
/// * `csv`  – one line per row, values comma-joined, no header
/// * `txt`  – one JSON object per row and line
/// * `xlsx` – `Sheet1` with a header row of column labels
/// * `pdf`, `img` – [`ExportError::Unsupported`], nothing is written
pub fn export(dataset: &Dataset, stem: &Path, format: ExportFormat) -> Result<PathBuf, ExportError> {
    if !format.is_supported() {
        return Err(ExportError::Unsupported(format));
    }

    let mut name: OsString = stem.as_os_str().to_owned();
    name.push(".");
    name.push(format.extension());
    let path = PathBuf::from(name);

    match format {
        ExportFormat::Csv => write_csv(dataset, &path)?,
        ExportFormat::Txt => write_txt(dataset, &path)?,
        ExportFormat::Xlsx => write_xlsx(dataset, &path)?,
        ExportFormat::Pdf | ExportFormat::Img => return Err(ExportError::Unsupported(format)),
    }
    log::info!("Exported {} rows to {}", dataset.len(), path.display());
    Ok(path)
}

fn write_csv(dataset: &Dataset, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;
    // A row holding one blank cell is written as `""` so it stays a record.
    for row in dataset.rows() {
        writer.write_record(row.values().map(|v| v.as_str()))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_txt(dataset: &Dataset, path: &Path) -> Result<(), ExportError> {
    let mut out = BufWriter::new(File::create(path)?);
    for row in dataset.rows() {
        serde_json::to_writer(&mut out, row)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn write_xlsx(dataset: &Dataset, path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("Sheet1")?;

    let header = dataset.header().unwrap_or_default();
    for (col, label) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, &label.to_string())?;
    }

    for (r, row) in dataset.rows().iter().enumerate() {
        for (col, &label) in header.iter().enumerate() {
            if let Some(value) = row.get(label).filter(|v| !v.is_blank()) {
                sheet.write_string(r as u32 + 1, col as u16, value.as_str())?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
