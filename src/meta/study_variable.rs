/// A `study_variable[n]` declaration grouping assays and samples under one
/// experimental condition.
///
/// The reference lists are `Option` so that a second `-assay_refs` or
/// `-sample_refs` declaration for the same index is detectable as a
/// duplicate.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StudyVariable {
    pub description: Option<String>,
    pub assay_refs: Option<Vec<u32>>,
    pub sample_refs: Option<Vec<u32>>,
}
