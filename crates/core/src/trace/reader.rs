//! Line-oriented trace reader.

use std::io::BufRead;

use super::record::TraceRecord;
use crate::common::ReplayError;

/// Iterator over the records of a buffered trace.
///
/// Blank lines are skipped. Parse failures carry the 1-based line number they were
/// found on. End of input ends the iteration; it is not an error.
#[derive(Debug)]
pub struct TraceReader<R> {
    inner: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered source.
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far, including blank ones.
    pub const fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.inner.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => return Some(Err(ReplayError::Io(e))),
            }

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }

            let line = self.line;
            return Some(
                text.parse::<TraceRecord>()
                    .map_err(|e| ReplayError::Format(e.at_line(line))),
            );
        }
    }
}
