use std::fmt::Display;
use std::fs;
use std::io::{self, prelude::*};
use std::path;
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::meta::MetaData;
use crate::table::{
    PeptideColumn, ProteinColumn, PsmColumn, RowWidthError, SectionTable, SmallMoleculeColumn,
};

use super::handlers::COMMENT;
use super::line::LineDecodeError;
use super::state::{HandlerChains, MzTabParserState};
use super::validator::{validate, ValidationReport};

/// A fully parsed mzTab document: the metadata block plus the four data
/// sections.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MzTab {
    pub metadata: MetaData,
    pub proteins: SectionTable<ProteinColumn>,
    pub peptides: SectionTable<PeptideColumn>,
    pub psms: SectionTable<PsmColumn>,
    pub small_molecules: SectionTable<SmallMoleculeColumn>,
}

impl FromStr for MzTab {
    type Err = MzTabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MzTabReader::new(io::Cursor::new(s)).read_document()
    }
}

/// The 1-based line number and byte offset of a line, carried into every
/// error for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u64,
    pub offset: u64,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, offset {}", self.line, self.offset)
    }
}

/// Errors producible while reading an mzTab document.
#[derive(Debug, Error)]
pub enum MzTabError {
    #[error("{position}: {source}")]
    Decode {
        position: Position,
        #[source]
        source: LineDecodeError,
    },
    #[error("{position}: Duplicate declaration of `{item}`")]
    Duplicate { position: Position, item: String },
    #[error("{position}: Unrecognized column {token:?} in the {section} section header")]
    UnknownColumn {
        position: Position,
        section: &'static str,
        token: String,
    },
    #[error("{position}: {section} {source}")]
    RowWidth {
        position: Position,
        section: &'static str,
        #[source]
        source: RowWidthError,
    },
    #[error("{position}: A {section} data row arrived before its section header")]
    DataBeforeHeader {
        position: Position,
        section: &'static str,
    },
    #[error("{position}: Unrecognized line {content:?}")]
    UnrecognizedLine { position: Position, content: String },
    #[error("Encountered an IO error: {0}")]
    IOError(
        #[from]
        #[source]
        io::Error,
    ),
    #[error("The document failed validation: {0}")]
    Validation(
        #[from]
        #[source]
        ValidationReport,
    ),
}

impl From<MzTabError> for io::Error {
    fn from(value: MzTabError) -> Self {
        match value {
            MzTabError::IOError(ref e) => io::Error::new(e.kind(), value),
            _ => io::Error::new(io::ErrorKind::InvalidData, value),
        }
    }
}

/// A streaming, single-pass mzTab reader.
///
/// One reader instance consumes one input stream to completion, offering
/// each line to the handler chain for the current parser state and aborting
/// on the first structural error. A reader is not meant to be reused: the
/// document it builds is handed to the caller, and a cancelled or failed
/// parse leaves nothing worth keeping.
pub struct MzTabReader<R: io::Read> {
    pub handle: io::BufReader<R>,
    pub state: MzTabParserState,
    pub line_number: u64,
    pub offset: u64,
    chains: HandlerChains,
}

impl<R: io::Read> MzTabReader<R> {
    pub fn new(source: R) -> MzTabReader<R> {
        MzTabReader {
            handle: io::BufReader::new(source),
            state: MzTabParserState::Start,
            line_number: 0,
            offset: 0,
            chains: HandlerChains::new(),
        }
    }

    /// Consume the whole stream, then run the completeness checks over the
    /// populated document. Structural errors abort immediately; validation
    /// problems are collected into a single batch.
    pub fn read_document(mut self) -> Result<MzTab, MzTabError> {
        let document = self.read_unvalidated()?;
        validate(&document)?;
        Ok(document)
    }

    /// Consume the whole stream without the post-parse completeness checks.
    pub fn read_unvalidated(&mut self) -> Result<MzTab, MzTabError> {
        let mut document = MzTab::default();
        let mut buffer = String::new();
        loop {
            buffer.clear();
            let b = self.handle.read_line(&mut buffer)?;
            if b == 0 {
                self.state = MzTabParserState::Done;
                break;
            }
            self.line_number += 1;
            let position = Position {
                line: self.line_number,
                offset: self.offset,
            };
            // Count how many bytes we've read from the source
            self.offset += b as u64;

            let line = buffer.trim_end_matches(['\r', '\n']);

            // Blank and comment lines may appear anywhere
            if line.is_empty() || line == COMMENT || line.starts_with("COM\t") {
                continue;
            }

            self.dispatch(line, position, &mut document)?;
        }
        debug!(
            "Finished reading {} lines ({} bytes)",
            self.line_number, self.offset
        );
        Ok(document)
    }

    fn dispatch(
        &mut self,
        line: &str,
        position: Position,
        document: &mut MzTab,
    ) -> Result<(), MzTabError> {
        let mut handled = false;
        for handler in self.chains.chain(self.state) {
            if handler.handle(line, position, document)? {
                handled = true;
                break;
            }
        }
        if !handled {
            return Err(MzTabError::UnrecognizedLine {
                position,
                content: line.to_string(),
            });
        }
        let code = line.split('\t').next().unwrap_or_default();
        self.state = self.state.after(code);
        Ok(())
    }
}

impl MzTabReader<fs::File> {
    /// Open a file path directly.
    pub fn open_path<P: AsRef<path::Path>>(path: P) -> io::Result<MzTabReader<fs::File>> {
        Ok(Self::new(fs::File::open(path)?))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::meta::{MzTabMode, MzTabType};

    fn read(text: &str) -> Result<MzTab, MzTabError> {
        let mut reader = MzTabReader::new(io::Cursor::new(text));
        reader.read_unvalidated()
    }

    #[test]
    fn test_mode_line() {
        let document = read("MTD\tmzTab-mode\tComplete\n").unwrap();
        assert_eq!(document.metadata.mode, Some(MzTabMode::Complete));
    }

    #[test]
    fn test_blank_and_comment_lines_skipped() {
        let document = read(
            "COM\tproduced by a unit test\n\nMTD\tmzTab-mode\tSummary\n\r\nMTD\tmzTab-type\tIdentification\n",
        )
        .unwrap();
        assert_eq!(document.metadata.mode, Some(MzTabMode::Summary));
        assert_eq!(
            document.metadata.mztab_type,
            Some(MzTabType::Identification)
        );
    }

    #[test]
    fn test_error_positions() {
        let err = read("MTD\tmzTab-mode\tComplete\nMTD\tms_run[]-location\tfile:///a.mzML\n")
            .unwrap_err();
        match err {
            MzTabError::Decode { position, source } => {
                assert_eq!(position.line, 2);
                assert_eq!(position.offset, 24);
                assert!(matches!(source, LineDecodeError::MissingIndex { .. }));
            }
            other => panic!("Unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_line() {
        let err = read("XYZ\tsomething\n").unwrap_err();
        assert!(matches!(
            err,
            MzTabError::UnrecognizedLine { position, .. } if position.line == 1
        ));
        let err = read("MTD\tnot_a_known_item\tvalue\n").unwrap_err();
        assert!(matches!(err, MzTabError::UnrecognizedLine { .. }));
    }

    #[test]
    fn test_header_then_rows() {
        let document = read(
            "MTD\tmzTab-mode\tComplete\nPRH\taccession\tdescription\nPRT\tP12345\tAlbumin\nPRT\tQ67890\tKeratin\n",
        )
        .unwrap();
        assert_eq!(document.proteins.len(), 2);
        assert_eq!(document.proteins.row(0).unwrap()[0], "P12345");
    }

    #[test]
    fn test_row_width_mismatch_positioned() {
        let err = read("PRH\taccession\tdescription\nPRT\tP12345\n").unwrap_err();
        match err {
            MzTabError::RowWidth {
                position, source, ..
            } => {
                assert_eq!(position.line, 2);
                assert_eq!(source.expected, 2);
                assert_eq!(source.actual, 1);
            }
            other => panic!("Unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_metadata_after_data_section() {
        // the metadata handlers stay reachable after a section header
        let document = read(
            "PRH\taccession\nPRT\tP12345\nMTD\tmzTab-type\tIdentification\nPRT\tQ67890\n",
        )
        .unwrap();
        assert_eq!(document.proteins.len(), 2);
        assert_eq!(
            document.metadata.mztab_type,
            Some(MzTabType::Identification)
        );
    }

    #[test]
    fn test_duplicate_declaration_is_fatal() {
        let err = read(
            "MTD\tms_run[1]-location\tfile:///a.mzML\nMTD\tms_run[1]-location\tfile:///a.mzML\n",
        )
        .unwrap_err();
        match err {
            MzTabError::Duplicate { position, item } => {
                assert_eq!(position.line, 2);
                assert_eq!(item, "ms_run[1]-location");
            }
            other => panic!("Unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_data_row_before_header() {
        let err = read("PSM\tPEPTIDER\t1\tP12345\n").unwrap_err();
        assert!(matches!(
            err,
            MzTabError::DataBeforeHeader { section, .. } if section == "PSM"
        ));
    }

    #[test]
    fn test_from_str_runs_validation() {
        // missing mode and type fail validation through the FromStr path
        let err = "PRH\taccession\nPRT\tP12345\n".parse::<MzTab>().unwrap_err();
        assert!(matches!(err, MzTabError::Validation(_)));
    }
}
