use std::collections::BTreeSet;

use super::model::{ColumnLabel, Row};
use super::query::RowRange;

// ---------------------------------------------------------------------------
// Selection – highlighted cells
// ---------------------------------------------------------------------------

/// Set of highlighted `(displayed row index, column)` pairs. Recomputed on
/// every apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    cells: BTreeSet<(usize, ColumnLabel)>,
}

impl Selection {
    pub fn insert(&mut self, row: usize, column: ColumnLabel) {
        self.cells.insert((row, column));
    }

    pub fn contains(&self, row: usize, column: ColumnLabel) -> bool {
        self.cells.contains(&(row, column))
    }

    /// Distinct row indices touched by the selection.
    pub fn rows(&self) -> BTreeSet<usize> {
        self.cells.iter().map(|(r, _)| *r).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, ColumnLabel)> + '_ {
        self.cells.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(usize, ColumnLabel)> for Selection {
    fn from_iter<T: IntoIterator<Item = (usize, ColumnLabel)>>(iter: T) -> Self {
        Selection {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Cells of `displayed` that fall inside the row range and the requested
/// columns.
///
/// * Row indices are positions in `displayed` (0-based); `range` is 1-based.
/// * Column tokens are trimmed and named by their leading uppercase letters
///   (`A1` is `A`); tokens with none, or naming a column the row does not
///   have, are skipped.
pub fn select_range<S: AsRef<str>>(displayed: &[Row], columns: &[S], range: RowRange) -> Selection {
    let labels: Vec<ColumnLabel> = columns
        .iter()
        .filter_map(|c| ColumnLabel::from_token(c.as_ref()))
        .collect();

    let mut selection = Selection::default();
    for (index, row) in displayed.iter().enumerate() {
        if !range.contains(index) {
            continue;
        }
        for &label in &labels {
            if row.get(label).is_some() {
                selection.insert(index, label);
            }
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::sample_dataset;

    fn label(s: &str) -> ColumnLabel {
        ColumnLabel::parse(s).unwrap()
    }

    #[test]
    fn marks_rectangle() {
        let ds = sample_dataset();
        let sel = select_range(ds.rows(), &["A", "C"], RowRange::new(2, 3));
        let got: Vec<_> = sel.iter().collect();
        assert_eq!(
            got,
            vec![
                (1, label("A")),
                (1, label("C")),
                (2, label("A")),
                (2, label("C")),
            ]
        );
    }

    #[test]
    fn tokens_are_trimmed_and_unknown_skipped() {
        let ds = sample_dataset();
        let sel = select_range(ds.rows(), &[" B ", "Z", "x", ""], RowRange::new(1, 1));
        assert_eq!(sel.iter().collect::<Vec<_>>(), vec![(0, label("B"))]);
    }

    #[test]
    fn tokens_with_trailing_text_use_their_letters() {
        let ds = sample_dataset();
        let sel = select_range(ds.rows(), &["A1", "Ccol", "AB"], RowRange::new(1, 2));
        assert_eq!(
            sel.iter().collect::<Vec<_>>(),
            vec![
                (0, label("A")),
                (0, label("C")),
                (1, label("A")),
                (1, label("C")),
            ]
        );
    }

    #[test]
    fn out_of_bounds_rows_select_nothing() {
        let ds = sample_dataset();
        assert!(select_range(ds.rows(), &["A"], RowRange::new(3, 2)).is_empty());
        assert!(select_range(ds.rows(), &["A"], RowRange::new(6, 9)).is_empty());
        // Partially out of range keeps the rows that exist.
        let sel = select_range(ds.rows(), &["A"], RowRange::new(4, 99));
        assert_eq!(sel.rows().into_iter().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn empty_display_selects_nothing() {
        assert!(select_range::<&str>(&[], &["A"], RowRange::new(1, 5)).is_empty());
    }
}
