//! The metadata block (`MTD`) data model: scalar document attributes plus
//! the indexed item registries (`ms_run[n]`, `sample[n]`, `assay[n]`, ...),
//! each keyed by declaration index in declaration order.
pub mod assay;
pub mod contact;
pub mod instrument;
pub mod modification;
pub mod run;
pub mod sample;
pub mod software;
pub mod study_variable;

pub use crate::meta::assay::Assay;
pub use crate::meta::contact::Contact;
pub use crate::meta::instrument::Instrument;
pub use crate::meta::modification::SearchModification;
pub use crate::meta::run::MsRun;
pub use crate::meta::sample::Sample;
pub use crate::meta::software::{Software, SoftwareSetting};
pub use crate::meta::study_variable::StudyVariable;

use std::fmt::Display;
use std::str::FromStr;

use indexmap::IndexMap;
use thiserror::Error;

use crate::params::CvParam;

/// The `mzTab-mode` of a document: whether all quantities are reported or
/// only study-variable summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MzTabMode {
    Complete,
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized mzTab-mode {0:?}, expected Complete or Summary")]
pub struct MzTabModeError(pub String);

impl FromStr for MzTabMode {
    type Err = MzTabModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Complete" => Ok(Self::Complete),
            "Summary" => Ok(Self::Summary),
            _ => Err(MzTabModeError(s.to_string())),
        }
    }
}

impl Display for MzTabMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => f.write_str("Complete"),
            Self::Summary => f.write_str("Summary"),
        }
    }
}

/// The `mzTab-type` of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MzTabType {
    Identification,
    Quantification,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized mzTab-type {0:?}, expected Identification or Quantification")]
pub struct MzTabTypeError(pub String);

impl FromStr for MzTabType {
    type Err = MzTabTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Identification" => Ok(Self::Identification),
            "Quantification" => Ok(Self::Quantification),
            _ => Err(MzTabTypeError(s.to_string())),
        }
    }
}

impl Display for MzTabType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identification => f.write_str("Identification"),
            Self::Quantification => f.write_str("Quantification"),
        }
    }
}

/// Everything declared in the metadata block of one document.
///
/// Indexed registries preserve declaration order. Re-declaring a property of
/// the same `(item, index)` pair is rejected during parsing, so each slot
/// here is written at most once per parse.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MetaData {
    pub version: Option<String>,
    pub mode: Option<MzTabMode>,
    pub mztab_type: Option<MzTabType>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub quantification_method: Option<CvParam>,
    pub ms_runs: IndexMap<u32, MsRun>,
    pub samples: IndexMap<u32, Sample>,
    pub assays: IndexMap<u32, Assay>,
    pub study_variables: IndexMap<u32, StudyVariable>,
    pub instruments: IndexMap<u32, Instrument>,
    pub software: IndexMap<u32, Software>,
    pub contacts: IndexMap<u32, Contact>,
    pub uris: IndexMap<u32, String>,
    pub publications: IndexMap<u32, String>,
    pub custom: IndexMap<u32, CvParam>,
    pub fixed_mods: IndexMap<u32, SearchModification>,
    pub variable_mods: IndexMap<u32, SearchModification>,
    pub protein_search_engine_scores: IndexMap<u32, CvParam>,
    pub peptide_search_engine_scores: IndexMap<u32, CvParam>,
    pub psm_search_engine_scores: IndexMap<u32, CvParam>,
    pub smallmolecule_search_engine_scores: IndexMap<u32, CvParam>,
}

impl MetaData {
    pub fn ms_run(&self, index: u32) -> Option<&MsRun> {
        self.ms_runs.get(&index)
    }

    pub fn sample(&self, index: u32) -> Option<&Sample> {
        self.samples.get(&index)
    }

    pub fn assay(&self, index: u32) -> Option<&Assay> {
        self.assays.get(&index)
    }

    pub fn study_variable(&self, index: u32) -> Option<&StudyVariable> {
        self.study_variables.get(&index)
    }

    /// All species declared across samples, in declaration order.
    pub fn species(&self) -> impl Iterator<Item = &CvParam> {
        self.samples
            .values()
            .flat_map(|sample| sample.species.iter().map(|entry| &entry.param))
    }

    /// All tissues declared across samples, in declaration order.
    pub fn tissues(&self) -> impl Iterator<Item = &CvParam> {
        self.samples
            .values()
            .flat_map(|sample| sample.tissue.iter().map(|entry| &entry.param))
    }

    /// Instrument name parameters, in declaration order.
    pub fn instrument_names(&self) -> impl Iterator<Item = &CvParam> {
        self.instruments
            .values()
            .filter_map(|instrument| instrument.name.as_ref())
    }
}
