use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::data::classify::ContentType;
use crate::data::export::{export, ExportFormat};
use crate::data::filter::filter;
use crate::data::model::Dataset;
use crate::data::predicate::Operation;
use crate::data::query::{split_columns, FilterQuery, FilterScope, RowRange};
use crate::data::source::{DataSource, FileSource, SampleSource};

#[derive(Parser)]
#[command(name = "sheetview")]
#[command(about = "Spreadsheet viewer with range highlighting, row filtering and export", long_about = None)]
pub struct Cli {
    /// Sheet to open (.csv, .json, .parquet). Opens the sample sheet when omitted.
    pub file: Option<PathBuf>,

    /// Folder the Download dialog writes to
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter a sheet and export the result without opening a window
    Export(ExportArgs),
}

#[derive(Args)]
pub struct ExportArgs {
    /// Sheet to read; the sample sheet when omitted
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Output path without extension
    #[arg(long)]
    pub output: PathBuf,

    /// xlsx, csv, txt (pdf and img are not supported)
    #[arg(long, default_value = "csv")]
    pub format: String,

    /// Inclusive 1-based row range, e.g. `2:10`; every row when omitted
    #[arg(long)]
    pub rows: Option<String>,

    /// null or not-null
    #[arg(long, default_value = "not-null")]
    pub operation: String,

    /// word, number, link or all
    #[arg(long, default_value = "all")]
    pub content_type: String,

    /// Comma-separated column labels, e.g. `A,C`
    #[arg(long, default_value = "")]
    pub columns: String,

    /// rows-only or rows-and-columns
    #[arg(long, default_value = "rows-only")]
    pub scope: String,
}

pub fn source_for(path: Option<PathBuf>) -> Box<dyn DataSource> {
    match path {
        Some(p) => Box::new(FileSource::new(p)),
        None => Box::new(SampleSource),
    }
}

impl ExportArgs {
    fn query(&self, dataset: &Dataset) -> Result<FilterQuery> {
        let row_range = match &self.rows {
            Some(spec) => {
                let (from, to) = spec
                    .split_once(':')
                    .with_context(|| format!("row range '{spec}' must look like FROM:TO"))?;
                RowRange::parse(from, to)?
            }
            None => RowRange::new(1, dataset.len() as i64),
        };
        let operation: Operation = self.operation.parse().unwrap_or_default();
        let content_type = self.content_type.parse().unwrap_or_else(|e| {
            log::warn!("{e}; matching all content");
            ContentType::All
        });
        let scope: FilterScope = self.scope.parse()?;

        Ok(FilterQuery::new(row_range, operation, content_type)
            .with_columns(split_columns(&self.columns))
            .with_scope(scope))
    }
}

/// Headless filter-and-export. Returns the written file.
pub fn run_export(args: ExportArgs) -> Result<PathBuf> {
    let format: ExportFormat = args.format.parse()?;
    let source = source_for(args.input.clone());
    let dataset = source
        .fetch()
        .with_context(|| format!("loading {}", source.describe()))?;

    let query = args.query(&dataset)?;
    let filtered = filter(&dataset, &query);
    log::info!(
        "{} of {} rows from {} match",
        filtered.len(),
        dataset.len(),
        source.describe()
    );

    let path = export(&filtered, &args.output, format)?;
    Ok(path)
}
