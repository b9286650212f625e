use std::path::PathBuf;

use anyhow::Result;

use super::loader::load_file;
use super::model::{Dataset, Row};

/// Where a sheet comes from. The viewer only ever asks for the whole thing.
pub trait DataSource {
    fn fetch(&self) -> Result<Dataset>;

    /// Short label shown in the status bar.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// Built-in sample
// ---------------------------------------------------------------------------

/// The fixed five-row demo sheet.
pub struct SampleSource;

impl DataSource for SampleSource {
    fn fetch(&self) -> Result<Dataset> {
        Ok(sample_dataset())
    }

    fn describe(&self) -> String {
        "sample sheet".to_string()
    }
}

pub fn sample_dataset() -> Dataset {
    Dataset::new(vec![
        Row::from_values(["Name", "Age", "Link"]),
        Row::from_values(["Alice", "30", "http://example.com"]),
        Row::from_values(["Bob", "25", ""]),
        Row::from_values(["", "35", "http://example.org"]),
        Row::from_values(["Charlie", "", "http://example.net"]),
    ])
}

// ---------------------------------------------------------------------------
// File-backed source
// ---------------------------------------------------------------------------

/// A CSV / JSON / Parquet file on disk.
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> Result<Dataset> {
        load_file(&self.path)
    }

    fn describe(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_shape() {
        let ds = SampleSource.fetch().unwrap();
        assert_eq!(ds.len(), 5);
        let header: Vec<String> = ds.header().unwrap().iter().map(|l| l.to_string()).collect();
        assert_eq!(header, ["A", "B", "C"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let src = FileSource::new("/definitely/not/here.csv");
        assert!(src.fetch().is_err());
        assert_eq!(src.describe(), "here.csv");
    }
}
