use super::{strip_indices, ColumnRef, MzTabColumn};

/// Typed columns of the PSM section (`PSH`/`PSM`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PsmColumn {
    Sequence,
    PsmId,
    Accession,
    Unique,
    Database,
    DatabaseVersion,
    SearchEngine,
    SearchEngineScore(u32),
    Reliability,
    Modifications,
    RetentionTime,
    Charge,
    ExpMassToCharge,
    CalcMassToCharge,
    Uri,
    SpectraRef,
    Pre,
    Post,
    Start,
    End,
    Optional(String),
}

impl MzTabColumn for PsmColumn {
    fn from_token(token: &str) -> Option<Self> {
        if token.starts_with("opt_") {
            return Some(Self::Optional(token.to_string()));
        }
        let (template, indices) = strip_indices(token)?;
        let column = match (template.as_str(), indices.as_slice()) {
            ("sequence", []) => Self::Sequence,
            ("PSM_ID", []) => Self::PsmId,
            ("accession", []) => Self::Accession,
            ("unique", []) => Self::Unique,
            ("database", []) => Self::Database,
            ("database_version", []) => Self::DatabaseVersion,
            ("search_engine", []) => Self::SearchEngine,
            ("search_engine_score[]", [score]) => Self::SearchEngineScore(*score),
            ("reliability", []) => Self::Reliability,
            ("modifications", []) => Self::Modifications,
            ("retention_time", []) => Self::RetentionTime,
            ("charge", []) => Self::Charge,
            ("exp_mass_to_charge", []) => Self::ExpMassToCharge,
            ("calc_mass_to_charge", []) => Self::CalcMassToCharge,
            ("uri", []) => Self::Uri,
            ("spectra_ref", []) => Self::SpectraRef,
            ("pre", []) => Self::Pre,
            ("post", []) => Self::Post,
            ("start", []) => Self::Start,
            ("end", []) => Self::End,
            _ => return None,
        };
        Some(column)
    }

    fn references(&self) -> Vec<ColumnRef> {
        match self {
            Self::SearchEngineScore(score) => vec![ColumnRef::SearchEngineScore(*score)],
            _ => Vec::new(),
        }
    }
}
