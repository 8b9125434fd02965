use std::io::BufRead;

use color_eyre::eyre::{Context, Result};

/// Candidates supplied up front, e.g. trailing command-line arguments.
pub fn from_args(items: Vec<String>) -> impl Iterator<Item = Result<String>> {
    items.into_iter().map(Ok)
}

/// Candidates read one line at a time from a newline-delimited stream; the
/// end of the stream ends the input.  A final line without a terminator is
/// still a candidate.
pub fn from_reader<R: BufRead>(reader: R) -> impl Iterator<Item = Result<String>> {
    reader
        .lines()
        .map(|line| line.context("unable to read candidate item"))
}
