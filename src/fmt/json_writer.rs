use std::io;

use log::debug;
use serde_json::json;

use crate::{
    commit::Commit,
    config::RenderConfig,
    error::Result,
    fmt::{release_date, FormatWriter},
    sectionmap::SectionMap,
};

/// Wraps a `std::io::Write` object to write `chlog` output as line
/// delimited JSON.
///
/// This is the incremental-granularity writer: one JSON object is emitted
/// per commit as it is observed, and a single release-header object closes
/// the stream once all input has been seen.
pub struct JsonWriter<'a>(&'a mut dyn io::Write);

impl<'a> JsonWriter<'a> {
    /// Creates a new instance of the `JsonWriter` struct using a
    /// `std::io::Write` object.
    pub fn new<T: io::Write>(writer: &'a mut T) -> JsonWriter<'a> {
        JsonWriter(writer)
    }
}

impl<'a> FormatWriter for JsonWriter<'a> {
    fn write_commit(&mut self, _config: &RenderConfig, commit: &Commit) -> Result<()> {
        debug!("Writing commit chunk: {}", commit.subject);
        writeln!(self.0, "{}", serde_json::to_string(commit)?)?;
        self.0.flush().map_err(Into::into)
    }

    fn write_changelog(&mut self, config: &RenderConfig, sm: &SectionMap) -> Result<()> {
        debug!("Writing JSON release header");
        let sections: Vec<&String> = config
            .options
            .sections
            .keys()
            .filter(|sec| sm.sections.contains_key(&sec[..]))
            .collect();

        let header = json!({
            "version": config.version.to_string(),
            "title": config.context.as_ref().and_then(|c| c.title()),
            "date": release_date(config)?,
            "sections": sections,
        });
        writeln!(self.0, "{header}")?;
        self.0.flush().map_err(Into::into)
    }

    fn write(&mut self, content: &str) -> Result<()> {
        write!(self.0, "{content}")?;
        self.0.flush().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::RenderOptions, version::ReleaseVersion};

    fn config() -> RenderConfig {
        RenderConfig {
            version: ReleaseVersion::parse(Some("1.0.0")).unwrap(),
            context: None,
            options: RenderOptions::default(),
        }
    }

    #[test]
    fn commits_stream_out_as_they_are_observed() {
        let cfg = config();
        let commit = Commit {
            hash: "abc".to_owned(),
            subject: "a feature".to_owned(),
            component: "".to_owned(),
            closes: vec![],
            breaks: vec![],
            commit_type: "feat".to_owned(),
        };

        let mut buf = vec![];
        let mut writer = JsonWriter::new(&mut buf);
        writer.write_commit(&cfg, &commit).unwrap();
        writer.write_commit(&cfg, &commit).unwrap();

        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.lines().count(), 2);
        let parsed: serde_json::Value = serde_json::from_str(out.lines().next().unwrap()).unwrap();
        assert_eq!(parsed["subject"], "a feature");
    }

    #[test]
    fn header_closes_the_stream() {
        let cfg = config();
        let sm = SectionMap::from_commits(&[], &cfg.options);

        let mut buf = vec![];
        JsonWriter::new(&mut buf).write_changelog(&cfg, &sm).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(std::str::from_utf8(&buf).unwrap()).unwrap();
        assert_eq!(parsed["version"], "1.0.0");
        assert!(parsed["sections"].as_array().unwrap().is_empty());
    }
}
