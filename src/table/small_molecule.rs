use super::{strip_indices, ColumnRef, MzTabColumn};

/// Typed columns of the small molecule section (`SMH`/`SML`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmallMoleculeColumn {
    Identifier,
    ChemicalFormula,
    Smiles,
    InchiKey,
    Description,
    ExpMassToCharge,
    CalcMassToCharge,
    Charge,
    RetentionTime,
    Taxid,
    Species,
    Database,
    DatabaseVersion,
    Reliability,
    Uri,
    SpectraRef,
    SearchEngine,
    BestSearchEngineScore(u32),
    SearchEngineScoreMsRun { score: u32, ms_run: u32 },
    Modifications,
    AbundanceAssay(u32),
    AbundanceStudyVariable(u32),
    AbundanceStdevStudyVariable(u32),
    AbundanceStdErrorStudyVariable(u32),
    Optional(String),
}

impl MzTabColumn for SmallMoleculeColumn {
    fn from_token(token: &str) -> Option<Self> {
        if token.starts_with("opt_") {
            return Some(Self::Optional(token.to_string()));
        }
        let (template, indices) = strip_indices(token)?;
        let column = match (template.as_str(), indices.as_slice()) {
            ("identifier", []) => Self::Identifier,
            ("chemical_formula", []) => Self::ChemicalFormula,
            ("smiles", []) => Self::Smiles,
            ("inchi_key", []) => Self::InchiKey,
            ("description", []) => Self::Description,
            ("exp_mass_to_charge", []) => Self::ExpMassToCharge,
            ("calc_mass_to_charge", []) => Self::CalcMassToCharge,
            ("charge", []) => Self::Charge,
            ("retention_time", []) => Self::RetentionTime,
            ("taxid", []) => Self::Taxid,
            ("species", []) => Self::Species,
            ("database", []) => Self::Database,
            ("database_version", []) => Self::DatabaseVersion,
            ("reliability", []) => Self::Reliability,
            ("uri", []) => Self::Uri,
            ("spectra_ref", []) => Self::SpectraRef,
            ("search_engine", []) => Self::SearchEngine,
            ("best_search_engine_score[]", [score]) => Self::BestSearchEngineScore(*score),
            ("search_engine_score[]_ms_run[]", [score, ms_run]) => Self::SearchEngineScoreMsRun {
                score: *score,
                ms_run: *ms_run,
            },
            ("modifications", []) => Self::Modifications,
            ("smallmolecule_abundance_assay[]", [assay]) => Self::AbundanceAssay(*assay),
            ("smallmolecule_abundance_study_variable[]", [sv]) => Self::AbundanceStudyVariable(*sv),
            ("smallmolecule_abundance_stdev_study_variable[]", [sv]) => {
                Self::AbundanceStdevStudyVariable(*sv)
            }
            ("smallmolecule_abundance_std_error_study_variable[]", [sv]) => {
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
