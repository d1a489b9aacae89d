use crate::params::{CvParam, IndexedParam};

/// An `instrument[n]` declaration. Analyzers are sub-indexed
/// (`instrument[1]-analyzer[2]`) and accumulate in declaration order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Instrument {
    pub name: Option<CvParam>,
    pub source: Option<CvParam>,
    pub analyzers: Vec<IndexedParam>,
    pub detector: Option<CvParam>,
}
