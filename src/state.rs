use std::path::PathBuf;

use crate::data::export::{export, output_stem, ExportError, ExportFormat, DEFAULT_FILENAME};
use crate::data::filter::filtered_indices;
use crate::data::model::Dataset;
use crate::data::query::{ApplyForm, QueryError};
use crate::data::range::{select_range, Selection};
use crate::data::source::DataSource;
use crate::view::TableView;

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Download modal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DownloadForm {
    pub open: bool,
    pub filename: String,
    pub format: ExportFormat,
}

impl Default for DownloadForm {
    fn default() -> Self {
        Self {
            open: false,
            filename: DEFAULT_FILENAME.to_string(),
            format: ExportFormat::Xlsx,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded sheet. Replaced wholesale on reload.
    pub dataset: Dataset,

    /// Positions in `dataset` of the rows currently displayed.
    pub visible_indices: Vec<usize>,

    /// What the table widget draws.
    pub view: TableView,

    /// Cells highlighted by the last apply.
    pub selection: Selection,

    /// Raw contents of the apply-operation controls.
    pub form: ApplyForm,

    pub download: DownloadForm,

    /// Directory export files are written to.
    pub export_dir: PathBuf,

    /// Name of the loaded source, shown in the top bar.
    pub source_label: Option<String>,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl AppState {
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            dataset: Dataset::default(),
            visible_indices: Vec::new(),
            view: TableView::default(),
            selection: Selection::default(),
            form: ApplyForm::default(),
            download: DownloadForm::default(),
            export_dir,
            source_label: None,
            status: None,
        }
    }

    /// Fetch from `source`. On failure the current sheet stays loaded.
    pub fn load(&mut self, source: &dyn DataSource) {
        let label = source.describe();
        match source.fetch() {
            Ok(dataset) => {
                log::info!("Loaded {} rows from {label}", dataset.len());
                self.set_dataset(dataset, label);
            }
            Err(e) => {
                log::error!("Failed to load {label}: {e:#}");
                self.status = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }

    /// Ingest a newly loaded sheet and show all of it.
    pub fn set_dataset(&mut self, dataset: Dataset, label: String) {
        self.visible_indices = (0..dataset.len()).collect();
        self.view = TableView::render(&dataset, Some(self.visible_indices.as_slice()));
        self.selection = Selection::default();
        self.form.row_to = dataset.len().max(1).to_string();

        self.dataset = dataset;
        self.source_label = Some(label);
        self.status = None;
    }

    /// Rows currently displayed, as a dataset of their own.
    pub fn displayed_dataset(&self) -> Dataset {
        self.dataset.select(&self.visible_indices)
    }

    /// Handle the "Apply" button.
    ///
    /// Highlights the range over the rows on screen, filters the full sheet,
    /// re-renders and carries the highlight over to surviving rows. A form
    /// that does not validate leaves everything as it was.
    pub fn apply_operation(&mut self) -> Result<(), QueryError> {
        let query = match self.form.to_query() {
            Ok(q) => q,
            Err(e) => {
                log::warn!("Rejected apply: {e}");
                self.status = Some(Status::Error(e.to_string()));
                return Err(e);
            }
        };
        log::debug!(
            "Apply: primary column {:?}, operation type {:?} (informational)",
            query.primary_column,
            query.operation_type
        );

        let selection = select_range(
            self.view.displayed_rows(),
            &query.range_columns,
            query.row_range,
        );
        log::debug!("Range selection covers {} cells", selection.len());

        let indices = filtered_indices(&self.dataset, &query);
        let filtered = self.dataset.select(&indices);
        let mut view = TableView::render(&filtered, Some(indices.as_slice()));
        view.carry_marks(&self.view, &selection);

        log::info!(
            "Filter rows {} {} {} ({}): {} of {} rows kept",
            query.row_range,
            query.operation,
            query.content_type,
            query.scope,
            indices.len(),
            self.dataset.len()
        );

        self.status = Some(Status::Info(format!(
            "{} of {} rows match",
            indices.len(),
            self.dataset.len()
        )));
        self.visible_indices = indices;
        self.view = view;
        self.selection = selection;
        Ok(())
    }

    pub fn open_download_modal(&mut self) {
        self.download.open = true;
    }

    pub fn close_download_modal(&mut self) {
        self.download.open = false;
    }

    /// Handle the "Download" confirmation: export the rows on screen.
    pub fn download(&mut self) -> Result<PathBuf, ExportError> {
        let stem = output_stem(&self.export_dir, &self.download.filename);
        let result = export(&self.displayed_dataset(), &stem, self.download.format);
        match &result {
            Ok(path) => {
                self.status = Some(Status::Info(format!("Saved {}", path.display())));
            }
            Err(e @ ExportError::Unsupported(_)) => {
                log::warn!("{e}");
                self.status = Some(Status::Error(e.to_string()));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status = Some(Status::Error(format!("Error: {e}")));
            }
        }
        self.close_download_modal();
        result
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::data::classify::ContentType;
    use crate::data::model::ColumnLabel;
    use crate::data::predicate::Operation;
    use crate::data::source::SampleSource;

    struct BrokenSource;

    impl DataSource for BrokenSource {
        fn fetch(&self) -> anyhow::Result<Dataset> {
            Err(anyhow!("sheet unavailable"))
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.load(&SampleSource);
        state
    }

    fn label(s: &str) -> ColumnLabel {
        ColumnLabel::parse(s).unwrap()
    }

    #[test]
    fn load_shows_everything() {
        let state = loaded();
        assert_eq!(state.visible_indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(state.view.displayed_rows().len(), 5);
        assert_eq!(state.form.row_to, "5");
        assert_eq!(state.source_label.as_deref(), Some("sample sheet"));
    }

    #[test]
    fn failed_load_keeps_previous_sheet() {
        let mut state = loaded();
        state.load(&BrokenSource);
        assert_eq!(state.dataset.len(), 5);
        assert!(matches!(state.status, Some(Status::Error(ref m)) if m.contains("sheet unavailable")));
    }

    #[test]
    fn apply_filters_and_highlights() {
        let mut state = loaded();
        state.form.range_columns = "A, C".to_string();
        state.form.row_from = "2".to_string();
        state.form.row_to = "3".to_string();
        state.form.operation = Operation::NotNull;
        state.form.content_type = ContentType::All;
        state.apply_operation().unwrap();

        assert_eq!(state.visible_indices, vec![1, 2]);
        assert_eq!(state.selection.len(), 4);
        // Rows 1 and 2 of the sheet are now displayed at 0 and 1.
        assert!(state.view.is_marked(0, label("A")));
        assert!(state.view.is_marked(1, label("C")));
        assert!(!state.view.is_marked(0, label("B")));
    }

    #[test]
    fn apply_always_filters_the_full_sheet() {
        let mut state = loaded();
        state.form.row_from = "2".to_string();
        state.form.row_to = "2".to_string();
        state.apply_operation().unwrap();
        assert_eq!(state.visible_indices, vec![1]);

        state.form.row_from = "1".to_string();
        state.form.row_to = "5".to_string();
        state.apply_operation().unwrap();
        assert_eq!(state.visible_indices.len(), 5);
    }

    #[test]
    fn invalid_bound_is_reported_and_changes_nothing() {
        let mut state = loaded();
        state.form.row_from = "one".to_string();
        assert!(state.apply_operation().is_err());
        assert_eq!(state.visible_indices.len(), 5);
        assert!(matches!(state.status, Some(Status::Error(_))));
    }

    #[test]
    fn empty_result_renders_empty_view() {
        let mut state = loaded();
        state.form.row_to = "5".to_string();
        state.form.operation = Operation::Null;
        state.apply_operation().unwrap();
        assert!(state.view.is_empty());
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn download_exports_displayed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(dir.path().to_path_buf());
        state.load(&SampleSource);
        state.form.row_from = "2".to_string();
        state.form.row_to = "3".to_string();
        state.apply_operation().unwrap();

        state.open_download_modal();
        state.download.filename = "picked".to_string();
        state.download.format = ExportFormat::Csv;
        let path = state.download().unwrap();

        assert!(!state.download.open);
        assert_eq!(path, dir.path().join("picked.csv"));
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text, "Alice,30,http://example.com\nBob,25,\n");
    }

    #[test]
    fn unsupported_download_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(dir.path().to_path_buf());
        state.load(&SampleSource);
        state.download.format = ExportFormat::Pdf;
        assert!(matches!(state.download(), Err(ExportError::Unsupported(ExportFormat::Pdf))));
        assert!(matches!(state.status, Some(Status::Error(ref m)) if m.contains("pdf")));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
