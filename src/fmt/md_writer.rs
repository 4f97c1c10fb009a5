use std::io;

use crate::{
    config::RenderConfig,
    error::Result,
    fmt::{release_date, FormatWriter},
    sectionmap::{ComponentMap, SectionMap},
};

/// Wraps a `std::io::Write` object to write `chlog` output in a Markdown
/// format.
///
/// This is the cumulative-granularity writer: nothing is emitted while
/// records are observed, and the full document (header, grouped sections)
/// is written once at the end of the run.
///
/// # Example
///
/// ```no_run
/// # use std::io::BufWriter;
/// # use chlog::fmt::MarkdownWriter;
/// let out = std::io::stdout();
/// let mut out_buf = BufWriter::new(out.lock());
/// let mut writer = MarkdownWriter::new(&mut out_buf);
/// ```
pub struct MarkdownWriter<'a>(&'a mut dyn io::Write);

impl<'a> MarkdownWriter<'a> {
    /// Creates a new instance of the `MarkdownWriter` struct using a
    /// `std::io::Write` object.
    pub fn new<T: io::Write + 'a>(writer: &'a mut T) -> MarkdownWriter<'a> {
        MarkdownWriter(writer)
    }

    fn write_header(&mut self, config: &RenderConfig) -> Result<()> {
        let version = &config.version;
        let title = match config.context.as_ref().and_then(|c| c.title()) {
            Some(t) => format!("{t} "),
            None => String::new(),
        };
        let date = release_date(config)?;

        writeln!(
            self.0,
            "<a name=\"{version}\"></a>\n# {version} {title}({date})\n",
        )
        .map_err(Into::into)
    }

    /// Writes a particular section of a changelog
    fn write_section(&mut self, title: &str, section: &ComponentMap) -> Result<()> {
        if section.is_empty() {
            return Ok(());
        }

        self.0
            .write_all(format!("\n### {title}\n\n")[..].as_bytes())?;

        for (component, entries) in section.iter() {
            let nested = (entries.len() > 1) && !component.is_empty();

            let prefix = if nested {
                writeln!(self.0, "* **{component}:**")?;
                "  *".to_owned()
            } else if !component.is_empty() {
                format!("* **{component}:**")
            } else {
                "*".to_string()
            };

            for entry in entries.iter() {
                write!(self.0, "{prefix} {}", entry.subject)?;

                if !entry.hash.is_empty() {
                    let short = entry.hash.get(..8).unwrap_or(&entry.hash);
                    write!(self.0, " ({short})")?;
                }

                if !entry.closes.is_empty() {
                    let closes_string = entry
                        .closes
                        .iter()
                        .map(|s| format!("#{s}"))
                        .collect::<Vec<String>>()
                        .join(", ");

                    write!(self.0, ", closes {closes_string}")?;
                }

                writeln!(self.0)?;
            }
        }

        Ok(())
    }
}

impl<'a> FormatWriter for MarkdownWriter<'a> {
    fn write_changelog(&mut self, config: &RenderConfig, sm: &SectionMap) -> Result<()> {
        self.write_header(config)?;

        // Get the section names ordered from the configured section map
        let s_it = config
            .options
            .sections
            .keys()
            .filter_map(|sec| sm.sections.get(sec).map(|secmap| (sec, secmap)));
        for (sec, secmap) in s_it {
            self.write_section(&sec[..], secmap)?;
        }

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
    use crate::{
        commit::Commit,
        config::{RenderOptions, TemplateContext},
        sectionmap::SectionMap,
        version::ReleaseVersion,
    };

    fn config(context: Option<&str>) -> RenderConfig {
        RenderConfig {
            version: ReleaseVersion::parse(Some("1.0.0")).unwrap(),
            context: context.map(|c| serde_json::from_str::<TemplateContext>(c).unwrap()),
            options: RenderOptions::default(),
        }
    }

    fn feature(subject: &str, component: &str) -> Commit {
        Commit {
            hash: "9b1aff905b638aa274a5fc8f88662df446d374bd".to_owned(),
            subject: subject.to_owned(),
            component: component.to_owned(),
            closes: vec!["10036".to_owned(), "9338".to_owned()],
            breaks: vec![],
            commit_type: "feat".to_owned(),
        }
    }

    fn render(config: &RenderConfig, commits: &[Commit]) -> String {
        let sm = SectionMap::from_commits(commits, &config.options);
        let mut buf = vec![];
        MarkdownWriter::new(&mut buf)
            .write_changelog(config, &sm)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_and_section_layout() {
        let cfg = config(None);
        let log = render(&cfg, &[feature("provide support", "ngMessages")]);

        assert!(log.starts_with("<a name=\"1.0.0\"></a>\n# 1.0.0 ("));
        assert!(log.contains("\n### Features\n\n"));
        assert!(log.contains(
            "* **ngMessages:** provide support (9b1aff90), closes #10036, #9338\n"
        ));
    }

    #[test]
    fn context_title_and_date_land_in_the_header() {
        let cfg = config(Some(
            r#"{"title":"This is a title","date":"2015 March 14"}"#,
        ));
        let log = render(&cfg, &[]);

        assert!(log.contains("This is a title"));
        assert!(log.contains("(2015 March 14)"));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let cfg = config(None);
        let log = render(&cfg, &[feature("something", "")]);

        assert!(!log.contains("Bug Fixes"));
        assert!(!log.contains("Breaking Changes"));
    }

    #[test]
    fn breaking_note_renders_without_a_hash() {
        let cfg = config(None);
        let mut c = feature("the feature", "core");
        c.breaks = vec!["the api changed".to_owned()];
        let log = render(&cfg, &[c]);

        assert!(log.contains("\n### Breaking Changes\n\n* **core:** the api changed\n"));
    }

    #[test]
    fn multiple_entries_for_one_component_nest() {
        let cfg = config(None);
        let log = render(
            &cfg,
            &[feature("first", "core"), feature("second", "core")],
        );

        assert!(log.contains("* **core:**\n  * first"));
        assert!(log.contains("\n  * second"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let cfg = config(Some(r#"{"date":"2015 March 14"}"#));
        let commits = [feature("a", "x"), feature("b", "y")];
        assert_eq!(render(&cfg, &commits), render(&cfg, &commits));
    }
}
