use super::{strip_indices, ColumnRef, MzTabColumn};

/// Typed columns of the peptide section (`PEH`/`PEP`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeptideColumn {
    Sequence,
    Accession,
    Unique,
    Database,
    DatabaseVersion,
    SearchEngine,
    BestSearchEngineScore(u32),
    SearchEngineScoreMsRun { score: u32, ms_run: u32 },
    Reliability,
    Modifications,
    RetentionTime,
    RetentionTimeWindow,
    Charge,
    MassToCharge,
    Uri,
    SpectraRef,
    AbundanceAssay(u32),
    AbundanceStudyVariable(u32),
    AbundanceStdevStudyVariable(u32),
    AbundanceStdErrorStudyVariable(u32),
    Optional(String),
}

impl MzTabColumn for PeptideColumn {
    fn from_token(token: &str) -> Option<Self> {
        if token.starts_with("opt_") {
            return Some(Self::Optional(token.to_string()));
        }
        let (template, indices) = strip_indices(token)?;
        let column = match (template.as_str(), indices.as_slice()) {
            ("sequence", []) => Self::Sequence,
            ("accession", []) => Self::Accession,
            ("unique", []) => Self::Unique,
            ("database", []) => Self::Database,
            ("database_version", []) => Self::DatabaseVersion,
            ("search_engine", []) => Self::SearchEngine,
            ("best_search_engine_score[]", [score]) => Self::BestSearchEngineScore(*score),
            ("search_engine_score[]_ms_run[]", [score, ms_run]) => Self::SearchEngineScoreMsRun {
                score: *score,
                ms_run: *ms_run,
            },
            ("reliability", []) => Self::Reliability,
            ("modifications", []) => Self::Modifications,
            ("retention_time", []) => Self::RetentionTime,
            ("retention_time_window", []) => Self::RetentionTimeWindow,
            ("charge", []) => Self::Charge,
            ("mass_to_charge", []) => Self::MassToCharge,
            ("uri", []) => Self::Uri,
            ("spectra_ref", []) => Self::SpectraRef,
            ("peptide_abundance_assay[]", [assay]) => Self::AbundanceAssay(*assay),
            ("peptide_abundance_study_variable[]", [sv]) => Self::AbundanceStudyVariable(*sv),
            ("peptide_abundance_stdev_study_variable[]", [sv]) => {
                Self::AbundanceStdevStudyVariable(*sv)
            }
            ("peptide_abundance_std_error_study_variable[]", [sv]) => {
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
            Self::AbundanceAssay(assay) => vec![ColumnRef::Assay(*assay)],
            Self::AbundanceStudyVariable(sv)
            | Self::AbundanceStdevStudyVariable(sv)
            | Self::AbundanceStdErrorStudyVariable(sv) => vec![ColumnRef::StudyVariable(*sv)],
            _ => Vec::new(),
        }
    }
}
