use std::io::{BufRead, Lines};

use log::debug;

use crate::{
    commit::CommitRecord,
    error::{Error, Result},
};

/// Splits a raw text stream on line boundaries and parses each line as one
/// JSON commit record, in arrival order.
///
/// Blank lines, including the customary trailing newline, are skipped
/// without emitting a spurious record. A fresh splitter is created for each
/// input source; the records all feed the same [`ChangelogStream`]
/// instance.
///
/// [`ChangelogStream`]: crate::ChangelogStream
pub struct LineSplitter<R> {
    lines: Lines<R>,
}

impl<R: BufRead> LineSplitter<R> {
    pub fn new(input: R) -> Self {
        LineSplitter {
            lines: input.lines(),
        }
    }
}

impl<R: BufRead> Iterator for LineSplitter<R> {
    type Item = Result<CommitRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(l) => l,
                Err(e) => return Some(Err(Error::Io(e))),
            };
            if line.trim().is_empty() {
                debug!("Skipping blank input line");
                continue;
            }
            return Some(serde_json::from_str(&line).map_err(|e| Error::LineParse {
                path: None,
                reason: e.to_string(),
            }));
        }
    }
}
