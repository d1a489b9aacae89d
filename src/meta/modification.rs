use crate::params::CvParam;

/// A `fixed_mod[n]` or `variable_mod[n]` declaration: the modification as a
/// CV parameter plus its optional `-site` and `-position` qualifiers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchModification {
    pub param: Option<CvParam>,
    pub site: Option<String>,
    pub position: Option<String>,
}
