use std::io::Write;

use color_eyre::eyre::{bail, Context, Result};
use itertools::Itertools;

use crate::config::Config;
use crate::filter::FilterResult;

/// Renders a filter result to a writer using the configured notice strings.
#[derive(Debug)]
pub struct Presenter<'a> {
    config: &'a Config,
}

impl<'a> Presenter<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn render(&self, w: &mut impl Write, result: &FilterResult) -> Result<()> {
        match result {
            FilterResult::Found(item) => {
                writeln!(w, "{}{}", self.config.found_prefix, item.to_ascii_uppercase())
            }
            FilterResult::NotFound => writeln!(w, "{}", self.config.not_found_message),
            FilterResult::Ambiguous(next_chars) => writeln!(
                w,
                "{}{}",
                self.config.next_chars_prefix,
                next_chars.iter().format("")
            ),
            FilterResult::Invalid(item) => {
                bail!("received an invalid item `{item}`")
            }
        }
        .context("unable to write result")
    }
}
