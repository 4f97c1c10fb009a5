use log::debug;

use crate::{
    commit::{Commit, CommitRecord, Commits},
    config::RenderConfig,
    error::{Error, Result},
    fmt::FormatWriter,
    sectionmap::SectionMap,
};

/// The transform at the heart of `chlog`: accumulates parsed commit
/// records, combines them with the immutable render configuration, and
/// drives the configured writer.
///
/// One instance is bound to a `(version, context, options)` snapshot and
/// shared across every input source of a run. The writer decides whether
/// output appears per record or once at the end; the stream forwards
/// whatever it produces, in order, buffering nothing beyond the accumulated
/// records themselves.
pub struct ChangelogStream<'a> {
    config: &'a RenderConfig,
    writer: &'a mut dyn FormatWriter,
    commits: Commits,
}

impl<'a> ChangelogStream<'a> {
    pub fn new(config: &'a RenderConfig, writer: &'a mut dyn FormatWriter) -> ChangelogStream<'a> {
        ChangelogStream {
            config,
            writer,
            commits: vec![],
        }
    }

    /// Feeds one record through the writer's incremental hook and retains
    /// its typed view for the cumulative render. Writer failures surface as
    /// render errors the orchestrator can catch per source.
    pub fn push(&mut self, record: CommitRecord) -> Result<()> {
        let commit = Commit::from(&record);
        debug!("Pushing commit: {}", commit.subject);
        self.writer
            .write_commit(self.config, &commit)
            .map_err(Error::into_render)?;
        self.commits.push(commit);
        Ok(())
    }

    /// Finalizes the run: renders the cumulative document, or the literal
    /// override when the options carry one. A context `date` leads the
    /// override on its own line.
    pub fn finish(&mut self) -> Result<()> {
        debug!("Finishing changelog stream with {} commits", self.commits.len());

        if let Some(main) = self.config.options.main_template.as_ref() {
            let mut doc = String::new();
            if let Some(date) = self.config.context.as_ref().and_then(|c| c.date()) {
                doc.push_str(date);
                doc.push('\n');
            }
            doc.push_str(main);
            return self.writer.write(&doc).map_err(Error::into_render);
        }

        let sm = SectionMap::from_commits(&self.commits, &self.config.options);
        self.writer
            .write_changelog(self.config, &sm)
            .map_err(Error::into_render)
    }
}
