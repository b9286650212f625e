use std::collections::HashMap;

use crate::data::model::{ColumnLabel, Dataset, Row};
use crate::data::range::Selection;

/// Shown instead of a table when there is nothing to display.
pub const EMPTY_MESSAGE: &str = "No rows to display.";

// ---------------------------------------------------------------------------
// TableView – what the table widget draws
// ---------------------------------------------------------------------------

/// A rendered sheet: header, displayed rows and highlight marks.
///
/// Built fresh on every render, so a previous view never leaks rows or
/// marks into the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    header: Vec<ColumnLabel>,
    rows: Vec<Row>,
    /// Position of each displayed row in the full dataset.
    sources: Vec<usize>,
    marks: Selection,
}

impl TableView {
    /// Render `dataset`. `sources[i]` is where displayed row `i` lives in the
    /// full dataset; pass `None` when the dataset is the full one.
    pub fn render(dataset: &Dataset, sources: Option<&[usize]>) -> Self {
        let Some(header) = dataset.header() else {
            return TableView::default();
        };
        let sources = match sources {
            Some(s) => s.to_vec(),
            None => (0..dataset.len()).collect(),
        };
        TableView {
            header,
            rows: dataset.rows().to_vec(),
            sources,
            marks: Selection::default(),
        }
    }

    /// Whether the view has no rows (and therefore no header).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> &[ColumnLabel] {
        &self.header
    }

    /// The rows as displayed, in order.
    pub fn displayed_rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn source_index(&self, displayed: usize) -> Option<usize> {
        self.sources.get(displayed).copied()
    }

    /// Text of each cell of displayed row `index`, aligned with the header.
    pub fn cell_texts(&self, index: usize) -> Vec<&str> {
        let Some(row) = self.rows.get(index) else {
            return Vec::new();
        };
        self.header
            .iter()
            .map(|&l| row.get(l).map(|v| v.as_str()).unwrap_or(""))
            .collect()
    }

    /// Highlight the selected cells that exist in this view.
    pub fn mark(&mut self, selection: &Selection) {
        for (row, label) in selection.iter() {
            if self.rows.get(row).is_some_and(|r| r.get(label).is_some()) {
                self.marks.insert(row, label);
            }
        }
    }

    /// Highlight cells selected in `previous` on the rows of this view that
    /// come from the same dataset rows.
    pub fn carry_marks(&mut self, previous: &TableView, selection: &Selection) {
        let positions: HashMap<usize, usize> = self
            .sources
            .iter()
            .enumerate()
            .map(|(displayed, &source)| (source, displayed))
            .collect();

        let carried: Selection = selection
            .iter()
            .filter_map(|(row, label)| {
                let source = previous.source_index(row)?;
                positions.get(&source).map(|&displayed| (displayed, label))
            })
            .collect();
        self.mark(&carried);
    }

    pub fn is_marked(&self, row: usize, label: ColumnLabel) -> bool {
        self.marks.contains(row, label)
    }

    pub fn marks(&self) -> &Selection {
        &self.marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::classify::ContentType;
    use crate::data::filter::{filter, filtered_indices};
    use crate::data::predicate::Operation;
    use crate::data::query::{FilterQuery, RowRange};
    use crate::data::range::select_range;
    use crate::data::source::sample_dataset;

    fn label(s: &str) -> ColumnLabel {
        ColumnLabel::parse(s).unwrap()
    }

    #[test]
    fn header_from_first_row() {
        let view = TableView::render(&sample_dataset(), None);
        assert_eq!(view.header(), &[label("A"), label("B"), label("C")]);
        assert_eq!(view.displayed_rows().len(), 5);
        assert_eq!(view.cell_texts(2), ["Bob", "25", ""]);
    }

    #[test]
    fn empty_dataset_renders_empty_state() {
        let view = TableView::render(&Dataset::default(), None);
        assert!(view.is_empty());
        assert!(view.header().is_empty());
        assert!(view.cell_texts(0).is_empty());
    }

    #[test]
    fn rendering_twice_is_identical() {
        let ds = sample_dataset();
        let q = FilterQuery::new(RowRange::new(2, 4), Operation::NotNull, ContentType::All);
        let idx = filtered_indices(&ds, &q);
        let filtered = filter(&ds, &q);
        let first = TableView::render(&filtered, Some(idx.as_slice()));
        let second = TableView::render(&filtered, Some(idx.as_slice()));
        assert_eq!(first, second);
        assert_eq!(second.displayed_rows().len(), 3);
    }

    #[test]
    fn marks_only_existing_cells() {
        let ds = sample_dataset();
        let mut view = TableView::render(&ds, None);
        let mut sel = select_range(view.displayed_rows(), &["A", "C"], RowRange::new(2, 3));
        sel.insert(40, label("A"));
        view.mark(&sel);
        assert_eq!(view.marks().len(), 4);
        assert!(view.is_marked(1, label("A")));
        assert!(view.is_marked(2, label("C")));
        assert!(!view.is_marked(1, label("B")));
    }

    #[test]
    fn marks_follow_rows_through_filtering() {
        let ds = sample_dataset();
        let before = TableView::render(&ds, None);
        // Highlight Bob and the row with no name.
        let sel = select_range(before.displayed_rows(), &["B"], RowRange::new(3, 4));

        // Filter, then drop Bob from what is displayed.
        let q = FilterQuery::new(RowRange::new(1, 5), Operation::NotNull, ContentType::All);
        let mut idx = filtered_indices(&ds, &q);
        idx.retain(|&i| i != 2);
        let mut after = TableView::render(&ds.select(&idx), Some(idx.as_slice()));
        after.carry_marks(&before, &sel);

        // Source row 3 is now displayed at position 2.
        assert_eq!(after.marks().iter().collect::<Vec<_>>(), vec![(2, label("B"))]);
    }
}
