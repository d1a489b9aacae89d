//! Reading the mzTab interchange format.
pub mod mztab;

pub use crate::io::mztab::{
    is_mztab, validate, LineDecodeError, MzTab, MzTabError, MzTabParserState, MzTabReader,
    Position, ValidationIssue, ValidationReport,
};
