use super::{strip_indices, ColumnRef, MzTabColumn};

/// Typed columns of the protein section (`PRH`/`PRT`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProteinColumn {
    Accession,
    Description,
    Taxid,
    Species,
    Database,
    DatabaseVersion,
    SearchEngine,
    BestSearchEngineScore(u32),
    SearchEngineScoreMsRun { score: u32, ms_run: u32 },
    Reliability,
    NumPsmsMsRun(u32),
    NumPeptidesDistinctMsRun(u32),
    NumPeptidesUniqueMsRun(u32),
    AmbiguityMembers,
    Modifications,
    Uri,
    GoTerms,
    ProteinCoverage,
    AbundanceAssay(u32),
    AbundanceStudyVariable(u32),
    AbundanceStdevStudyVariable(u32),
    AbundanceStdErrorStudyVariable(u32),
    /// A free-form `opt_*` column, stored under its full token.
    Optional(String),
}

impl MzTabColumn for ProteinColumn {
    fn from_token(token: &str) -> Option<Self> {
        if token.starts_with("opt_") {
            return Some(Self::Optional(token.to_string()));
        }
        let (template, indices) = strip_indices(token)?;
        let column = match (template.as_str(), indices.as_slice()) {
            ("accession", []) => Self::Accession,
            ("description", []) => Self::Description,
            ("taxid", []) => Self::Taxid,
            ("species", []) => Self::Species,
            ("database", []) => Self::Database,
            ("database_version", []) => Self::DatabaseVersion,
            ("search_engine", []) => Self::SearchEngine,
            ("best_search_engine_score[]", [score]) => Self::BestSearchEngineScore(*score),
            ("search_engine_score[]_ms_run[]", [score, ms_run]) => Self::SearchEngineScoreMsRun {
                score: *score,
                ms_run: *ms_run,
            },
            ("reliability", []) => Self::Reliability,
            ("num_psms_ms_run[]", [ms_run]) => Self::NumPsmsMsRun(*ms_run),
            ("num_peptides_distinct_ms_run[]", [ms_run]) => Self::NumPeptidesDistinctMsRun(*ms_run),
            ("num_peptides_unique_ms_run[]", [ms_run]) => Self::NumPeptidesUniqueMsRun(*ms_run),
            ("ambiguity_members", []) => Self::AmbiguityMembers,
            ("modifications", []) => Self::Modifications,
            ("uri", []) => Self::Uri,
            ("go_terms", []) => Self::GoTerms,
            ("protein_coverage", []) => Self::ProteinCoverage,
            ("protein_abundance_assay[]", [assay]) => Self::AbundanceAssay(*assay),
            ("protein_abundance_study_variable[]", [sv]) => Self::AbundanceStudyVariable(*sv),
            ("protein_abundance_stdev_study_variable[]", [sv]) => {
                Self::AbundanceStdevStudyVariable(*sv)
            }
            ("protein_abundance_std_error_study_variable[]", [sv]) => {
                Self::AbundanceStdErrorStudyVariable(*sv)
            }
            _ => return None,
        };
        Some(column)
    }

    fn references(&self) -> Vec<ColumnRef> {
        match self {
            Self::BestSearchEngineScore(score) => vec![ColumnRef::SearchEngineScore(*score)],
            Self::SearchEngineScoreMsRun { score, ms_run } => vec![
                ColumnRef::SearchEngineScore(*score),
                ColumnRef::MsRun(*ms_run),
            ],
            Self::NumPsmsMsRun(ms_run)
            | Self::NumPeptidesDistinctMsRun(ms_run)
            | Self::NumPeptidesUniqueMsRun(ms_run) => vec![ColumnRef::MsRun(*ms_run)],
            Self::AbundanceAssay(assay) => vec![ColumnRef::Assay(*assay)],
            Self::AbundanceStudyVariable(sv)
            | Self::AbundanceStdevStudyVariable(sv)
            | Self::AbundanceStdErrorStudyVariable(sv) => vec![ColumnRef::StudyVariable(*sv)],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_plain_tokens() {
        assert_eq!(
            ProteinColumn::from_token("accession"),
            Some(ProteinColumn::Accession)
        );
        assert_eq!(
            ProteinColumn::from_token("protein_coverage"),
            Some(ProteinColumn::ProteinCoverage)
        );
        assert_eq!(
            ProteinColumn::from_token("go_terms"),
            Some(ProteinColumn::GoTerms)
        );
    }

    #[test]
    fn test_indexed_tokens_share_a_variant() {
        let first = ProteinColumn::from_token("best_search_engine_score[1]").unwrap();
        let seventh = ProteinColumn::from_token("best_search_engine_score[7]").unwrap();
        assert!(matches!(first, ProteinColumn::BestSearchEngineScore(1)));
        assert!(matches!(seventh, ProteinColumn::BestSearchEngineScore(7)));
    }

    #[test]
    fn test_doubly_indexed_token() {
        let column = ProteinColumn::from_token("search_engine_score[2]_ms_run[3]").unwrap();
        assert_eq!(
            column,
            ProteinColumn::SearchEngineScoreMsRun { score: 2, ms_run: 3 }
        );
        assert_eq!(
            column.references(),
            vec![ColumnRef::SearchEngineScore(2), ColumnRef::MsRun(3)]
        );
    }

    #[test]
    fn test_optional_column() {
        let column = ProteinColumn::from_token("opt_global_cv_MS:1002217_decoy").unwrap();
        assert_eq!(
            column,
            ProteinColumn::Optional("opt_global_cv_MS:1002217_decoy".to_string())
        );
        assert!(column.references().is_empty());
    }

    #[test]
    fn test_unrecognized_tokens_rejected() {
        assert_eq!(ProteinColumn::from_token("sequence"), None);
        assert_eq!(ProteinColumn::from_token("best_search_engine_score[]"), None);
        assert_eq!(ProteinColumn::from_token("best_search_engine_score[x]"), None);
        assert_eq!(ProteinColumn::from_token(""), None);
    }
}
