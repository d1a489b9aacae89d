use crate::params::CvParam;

/// A single `ms_run[n]` declaration: one external spectrum source the
/// identifications were drawn from.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MsRun {
    pub format: Option<CvParam>,
    pub location: Option<String>,
    pub id_format: Option<CvParam>,
    pub hash: Option<String>,
    pub hash_method: Option<CvParam>,
}

impl MsRun {
    pub fn new(
        format: Option<CvParam>,
        location: Option<String>,
        id_format: Option<CvParam>,
        hash: Option<String>,
        hash_method: Option<CvParam>,
    ) -> Self {
        Self {
            format,
            location,
            id_format,
            hash,
            hash_method,
        }
    }
}
