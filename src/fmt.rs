mod json_writer;
mod md_writer;

use std::{result::Result as StdResult, str::FromStr};

use serde::de::{Deserialize, Deserializer};
use strum::{Display, EnumString};
use time::{macros::format_description, OffsetDateTime};

pub use self::{json_writer::JsonWriter, md_writer::MarkdownWriter};
use crate::{commit::Commit, config::RenderConfig, error::Result, sectionmap::SectionMap};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum ChangelogFormat {
    Json,
    #[default]
    Markdown,
}

impl<'de> Deserialize<'de> for ChangelogFormat {
    fn deserialize<D>(deserializer: D) -> StdResult<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A changelog rendering capability.
///
/// Implementors choose their own output granularity: `write_commit` is
/// invoked once per record in arrival order and may emit output immediately
/// (or, the default, nothing at all), and `write_changelog` is invoked once
/// after the final record with the grouped view of everything seen across
/// the run. The stream driving the writer forwards whatever it produces, in
/// the order produced.
///
/// `chlog` provides two implementors: [`MarkdownWriter`], which renders one
/// cumulative document, and [`JsonWriter`], which emits per-record chunks.
pub trait FormatWriter {
    /// Called for each commit as it is observed. The default does nothing,
    /// which is the cumulative-document behavior.
    fn write_commit(&mut self, _config: &RenderConfig, _commit: &Commit) -> Result<()> {
        Ok(())
    }

    /// Writes a changelog from a given [`SectionMap`] grouping of every
    /// commit observed, which can be thought of as an "AST" of sorts
    fn write_changelog(&mut self, config: &RenderConfig, section_map: &SectionMap) -> Result<()>;

    /// Writes preassembled contents straight through to the underlying
    /// writer
    fn write(&mut self, content: &str) -> Result<()>;
}

/// The date stamped on the release header: the context's `date` value when
/// one was supplied, today (UTC) otherwise.
pub(crate) fn release_date(config: &RenderConfig) -> Result<String> {
    if let Some(date) = config.context.as_ref().and_then(|c| c.date()) {
        return Ok(date.to_owned());
    }
    let now = OffsetDateTime::now_utc();
    Ok(now.format(format_description!("[year]-[month]-[day]"))?)
}
