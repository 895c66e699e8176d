//! Tab-separated tables.
//!
//! Every table this crate reads is plain TSV: no quoting, rows of uneven
//! width, line numbers taken from the record positions `csv` tracks.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::QuestionError;

/// Label used in errors for tables read from memory rather than a file.
pub(crate) const IN_MEMORY: &str = "<in-memory>";

pub(crate) fn reader<R: Read>(input: R, has_headers: bool) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .has_headers(has_headers)
        .from_reader(input)
}

/// One-based line on which `record` starts.
pub(crate) fn line_number(record: &StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}

/// The record as it appeared in the file.
pub(crate) fn line(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join("\t")
}

/// Whether every cell of `record` is whitespace.
pub(crate) fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

/// Turn a `csv` failure into a [`QuestionError`]. I/O failures keep the
/// path; anything else is a malformed row, built by `malformed` from the
/// line number and the reason.
pub(crate) fn record_error(
    path: &Path,
    error: csv::Error,
    malformed: impl FnOnce(usize, String) -> QuestionError,
) -> QuestionError {
    let line_number = error.position().map_or(0, |p| p.line() as usize);
    let reason = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => QuestionError::io(path, source),
        _ => malformed(line_number, reason),
    }
}
