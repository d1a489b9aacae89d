//! A library to read the [mzTab](https://github.com/HUPO-PSI/mzTab)
//! tab-separated interchange format for proteomics identification and
//! quantification results.
//!
//! ```no_run
//! use mztab::MzTabReader;
//!
//! # fn main() -> Result<(), mztab::MzTabError> {
//! let reader = MzTabReader::open_path("./test/data/small.mzTab")?;
//! let document = reader.read_document()?;
//! for species in document.metadata.species() {
//!     println!("{}", species);
//! }
//! # Ok(())
//! # }
//! ```
pub mod io;
pub mod meta;
pub mod params;
pub mod table;

pub use crate::io::mztab::{
    is_mztab, validate, LineDecodeError, MzTab, MzTabError, MzTabParserState, MzTabReader,
    Position, ValidationIssue, ValidationReport,
};
pub use crate::meta::{MetaData, MzTabMode, MzTabType};
pub use crate::params::{CvParam, CvParamError};
pub use crate::table::{
    MzTabColumn, PeptideColumn, ProteinColumn, PsmColumn, SectionTable, SmallMoleculeColumn,
};
