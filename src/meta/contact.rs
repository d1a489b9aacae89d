/// A `contact[n]` declaration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: Option<String>,
    pub affiliation: Option<String>,
    pub email: Option<String>,
}
