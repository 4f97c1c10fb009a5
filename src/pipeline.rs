use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
};

use log::debug;

use crate::{
    error::{Error, Result},
    split::LineSplitter,
    stream::ChangelogStream,
};

/// Where the orchestrator stands in its walk over the input sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    ReadingFile(usize),
    Done,
}

/// Sequences the pipeline across the named input files, isolating failures
/// per source so that one bad or missing file does not abort the batch.
///
/// Exactly one source is open at a time, and a source reaches a terminal
/// state (ended or errored) before the next is opened, so output ordering
/// follows path ordering. Failed sources are reported to the error sink and
/// skipped, never retried.
pub struct Orchestrator<'a, 'b> {
    stream: ChangelogStream<'a>,
    paths: &'b [String],
}

impl<'a, 'b> Orchestrator<'a, 'b> {
    pub fn new(stream: ChangelogStream<'a>, paths: &'b [String]) -> Orchestrator<'a, 'b> {
        Orchestrator { stream, paths }
    }

    /// Walks `Idle -> ReadingFile(0..n) -> Done`, reporting each source's
    /// failure to `errs` and returning how many sources were read through
    /// to the end. Once `Done` is reached no further output is produced.
    pub fn run(mut self, errs: &mut dyn Write) -> Result<usize> {
        let mut succeeded = 0;
        let mut state = State::Idle;

        loop {
            state = match state {
                State::Idle => {
                    if self.paths.is_empty() {
                        return Err(Error::NoInput);
                    }
                    State::ReadingFile(0)
                }
                State::ReadingFile(i) => {
                    let path = &self.paths[i];
                    debug!("Reading file {i}: {path}");
                    match self.process_file(path) {
                        Ok(()) => succeeded += 1,
                        Err(e) => {
                            writeln!(errs, "{}", e.with_path(path)).ok();
                        }
                    }
                    if i + 1 < self.paths.len() {
                        State::ReadingFile(i + 1)
                    } else {
                        State::Done
                    }
                }
                State::Done => break,
            };
        }

        // A run with no surviving source produces no document at all, not
        // an empty one.
        if succeeded == 0 {
            return Ok(0);
        }

        // The shared stream renders once every source has completed; a
        // failure here is attributed to the last source and the run is
        // treated as having produced no document.
        if let Err(e) = self.stream.finish() {
            let last = self.paths.last().map(|p| &p[..]).unwrap_or("");
            writeln!(errs, "{}", e.with_path(last)).ok();
            return Ok(0);
        }

        Ok(succeeded)
    }

    fn process_file(&mut self, path: &str) -> Result<()> {
        let file = File::open(path)?;
        for record in LineSplitter::new(BufReader::new(file)) {
            self.stream.push(record?)?;
        }
        Ok(())
    }
}

/// Runs the single-stream pipeline over standard input. Unlike the
/// multi-file walk there is no next source to fall back to, so the first
/// read, split, or render failure is fatal to the process.
pub fn run_stdin<R: BufRead>(mut stream: ChangelogStream<'_>, input: R) -> Result<()> {
    debug!("Reading commits from stdin");
    for record in LineSplitter::new(input) {
        stream.push(record?)?;
    }
    stream.finish()
}
