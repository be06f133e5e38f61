pub mod error;

pub use self::error::*;

use bstr::io::*;
use bstr::ByteSlice;
use log::debug;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::alignment::AlignmentRecord;

/// Reads tabular alignment hits. Lines starting with `#` are comments
/// and always skipped. By default every other line must be a hit, so a
/// blank line fails like any line missing fields; a `Safe` parser
/// skips blank lines instead.
#[derive(Debug, Clone, Default)]
pub struct HitParser {
    tolerance: ParserTolerance,
}

impl HitParser {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_tolerance(tolerance: ParserTolerance) -> Self {
        HitParser { tolerance }
    }

    /// Parse a single line. Comments come back as `Ok(None)`.
    pub fn parse_line(
        &self,
        line: &[u8],
    ) -> Result<Option<AlignmentRecord>, ParseError> {
        if line.starts_with(b"#") {
            return Ok(None);
        }
        if line.trim().is_empty() {
            return Err(ParseError::EmptyLine);
        }
        let record = AlignmentRecord::from_line(line)?;
        Ok(Some(record))
    }

    fn push_line(
        &self,
        records: &mut Vec<AlignmentRecord>,
        line: &[u8],
        line_num: usize,
    ) -> ParseResult<()> {
        match self.parse_line(line) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => (),
            Err(err) if err.can_safely_continue(&self.tolerance) => (),
            Err(ParseError::EmptyLine) => {
                return Err(ParseError::invalid_line(
                    ParseFieldError::MissingFields,
                    line,
                    line_num,
                ))
            }
            Err(ParseError::InvalidField(err)) => {
                return Err(ParseError::invalid_line(err, line, line_num))
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    pub fn parse_lines<I>(&self, lines: I) -> ParseResult<Vec<AlignmentRecord>>
    where
        I: Iterator,
        I::Item: AsRef<[u8]>,
    {
        let mut records = Vec::new();

        for (ix, line) in lines.enumerate() {
            self.push_line(&mut records, line.as_ref(), ix + 1)?;
        }

        Ok(records)
    }

    pub fn parse_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> ParseResult<Vec<AlignmentRecord>> {
        let file = File::open(path.as_ref())?;
        let lines = BufReader::new(file).byte_lines();

        let mut records = Vec::new();

        for (ix, line) in lines.enumerate() {
            let line = line?;
            self.push_line(&mut records, &line, ix + 1)?;
        }

        debug!(
            "read {} hits from {}",
            records.len(),
            path.as_ref().display()
        );

        Ok(records)
    }
}

/// Read every hit in a file with the default tolerance
pub fn read_hits<P: AsRef<Path>>(path: P) -> ParseResult<Vec<AlignmentRecord>> {
    HitParser::new().parse_file(path)
}
