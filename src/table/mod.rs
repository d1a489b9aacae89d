//! Data-section models: per-section typed column vocabularies and the row
//! storage that enforces the header-declared width on every data row.
pub mod peptide;
pub mod protein;
pub mod psm;
pub mod small_molecule;

pub use crate::table::peptide::PeptideColumn;
pub use crate::table::protein::ProteinColumn;
pub use crate::table::psm::PsmColumn;
pub use crate::table::small_molecule::SmallMoleculeColumn;

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

static INDEX_PATTERN: OnceLock<Regex> = OnceLock::new();

fn index_pattern() -> &'static Regex {
    INDEX_PATTERN.get_or_init(|| Regex::new(r"\[(\d+)\]").unwrap())
}

/// Replaces every bracketed index in a header token with `[]`, collecting
/// the indices in order, so `search_engine_score[1]_ms_run[2]` becomes
/// `("search_engine_score[]_ms_run[]", [1, 2])` and can be matched against
/// a fixed template. Returns `None` when an index overflows.
pub(crate) fn strip_indices(token: &str) -> Option<(String, Vec<u32>)> {
    let pattern = index_pattern();
    let mut indices = Vec::new();
    for captures in pattern.captures_iter(token) {
        indices.push(captures[1].parse().ok()?);
    }
    let template = pattern.replace_all(token, "[]").into_owned();
    Some((template, indices))
}

/// A pointer from an indexed header column into the metadata block, used by
/// the post-parse validator to detect dangling declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRef {
    SearchEngineScore(u32),
    MsRun(u32),
    Assay(u32),
    StudyVariable(u32),
}

/// Resolution from a raw header token to a typed column. Resolution is total
/// for recognized token shapes and rejects everything else: an indexed token
/// resolves to the same variant regardless of its numeric index.
pub trait MzTabColumn: Sized {
    fn from_token(token: &str) -> Option<Self>;

    /// Metadata declarations this column instance points at, if any.
    fn references(&self) -> Vec<ColumnRef>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row has {actual} fields where the header declared {expected} columns")]
pub struct RowWidthError {
    pub expected: usize,
    pub actual: usize,
}

/// Storage for one data section: the ordered column registry populated from
/// the section header, and the data rows gathered under it.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTable<C> {
    columns: Vec<C>,
    rows: Vec<Vec<String>>,
}

impl<C> Default for SectionTable<C> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

impl<C> SectionTable<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_header(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[C] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&C> {
        self.columns.get(index)
    }

    /// Installs the column registry for subsequent rows. Rows gathered under
    /// an earlier header are kept.
    pub fn set_columns(&mut self, columns: Vec<C>) {
        self.columns = columns;
    }

    /// Appends a data row, rejecting it unless its field count matches the
    /// declared column count exactly.
    pub fn add_row(&mut self, row: Vec<String>) -> Result<(), RowWidthError> {
        if row.len() != self.columns.len() {
            return Err(RowWidthError {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(|row| row.as_slice())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|row| row.as_slice())
    }
}

impl<C: PartialEq> SectionTable<C> {
    /// The position of `column` in the registry, if it was declared.
    pub fn column_index(&self, column: &C) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// The values of one column across all rows, in row order.
    pub fn values<'a>(&'a self, column: &C) -> impl Iterator<Item = &'a str> {
        let at = self.column_index(column);
        self.rows
            .iter()
            .filter_map(move |row| at.and_then(|i| row.get(i)))
            .map(|value| value.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_strip_indices() {
        let (template, indices) = strip_indices("best_search_engine_score[1]").unwrap();
        assert_eq!(template, "best_search_engine_score[]");
        assert_eq!(indices, vec![1]);

        let (template, indices) = strip_indices("search_engine_score[3]_ms_run[12]").unwrap();
        assert_eq!(template, "search_engine_score[]_ms_run[]");
        assert_eq!(indices, vec![3, 12]);

        let (template, indices) = strip_indices("accession").unwrap();
        assert_eq!(template, "accession");
        assert!(indices.is_empty());

        // an empty or non-numeric index never matches the pattern, so the
        // token survives normalization unchanged and resolves to nothing
        let (template, indices) = strip_indices("best_search_engine_score[]").unwrap();
        assert_eq!(template, "best_search_engine_score[]");
        assert!(indices.is_empty());

        assert!(strip_indices("opt_[99999999999]").is_none());
    }

    #[test]
    fn test_row_width_enforced() {
        let mut table: SectionTable<ProteinColumn> = SectionTable::new();
        table.set_columns(vec![ProteinColumn::Accession, ProteinColumn::Description]);
        assert_eq!(table.num_columns(), 2);

        table
            .add_row(vec!["P12345".to_string(), "a protein".to_string()])
            .unwrap();
        let err = table.add_row(vec!["P12345".to_string()]).unwrap_err();
        assert_eq!(err.expected, 2);
        assert_eq!(err.actual, 1);
        let err = table
            .add_row(vec!["a".to_string(), "b".to_string(), "c".to_string()])
            .unwrap_err();
        assert_eq!(err.actual, 3);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_column_values() {
        let mut table: SectionTable<ProteinColumn> = SectionTable::new();
        table.set_columns(vec![ProteinColumn::Accession, ProteinColumn::Taxid]);
        table
            .add_row(vec!["P12345".to_string(), "9606".to_string()])
            .unwrap();
        table
            .add_row(vec!["Q67890".to_string(), "10090".to_string()])
            .unwrap();

        let taxids: Vec<_> = table.values(&ProteinColumn::Taxid).collect();
        assert_eq!(taxids, vec!["9606", "10090"]);
        assert!(table
            .values(&ProteinColumn::Description)
            .next()
            .is_none());
    }
}
