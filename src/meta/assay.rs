use crate::params::CvParam;

/// An `assay[n]` declaration, tying a quantification channel to the sample
/// and run it was measured from. The references are stored as the declared
/// indices; whether they dangle is checked after parsing completes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Assay {
    pub quantification_reagent: Option<CvParam>,
    pub sample_ref: Option<u32>,
    pub ms_run_ref: Option<u32>,
}
