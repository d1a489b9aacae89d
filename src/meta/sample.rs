use crate::params::IndexedParam;

/// A `sample[n]` declaration. The sub-indexed properties are multi-valued:
/// `sample[1]-species[1]` and `sample[1]-species[2]` accumulate rather than
/// clash.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sample {
    pub description: Option<String>,
    pub species: Vec<IndexedParam>,
    pub tissue: Vec<IndexedParam>,
    pub cell_type: Vec<IndexedParam>,
    pub disease: Vec<IndexedParam>,
    pub custom: Vec<IndexedParam>,
}
