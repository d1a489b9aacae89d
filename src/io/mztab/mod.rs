//! Read [mzTab](https://github.com/HUPO-PSI/mzTab) documents with a
//! streaming, strictly forward, single-pass reader.
//!
//! The reader offers each line to an ordered chain of shape handlers for the
//! current parser state and aborts on the first structural problem, carrying
//! the 1-based line number and byte offset into every error. Once the stream
//! is consumed, a batch of completeness checks runs over the populated
//! document.
mod handlers;
mod line;
mod reader;
mod state;
mod validator;

pub use line::LineDecodeError;
pub use reader::{MzTab, MzTabError, MzTabReader, Position};
pub use state::MzTabParserState;
pub use validator::{validate, ValidationIssue, ValidationReport};

pub fn is_mztab(buf: &[u8]) -> bool {
    let needle = b"MTD\tmzTab-";
    buf.windows(needle.len()).any(|window| window == needle)
}
