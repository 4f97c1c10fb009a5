// DOCS

mod commit;
mod macros;
mod sectionmap;
mod split;
mod stream;
mod version;

pub mod config;
pub mod error;
pub mod fmt;
pub mod pipeline;

pub use commit::{Commit, CommitRecord, Commits};
pub use config::{load_context, load_options, RenderConfig, RenderOptions, TemplateContext};
pub use sectionmap::{ComponentMap, SectionMap};
pub use split::LineSplitter;
pub use stream::ChangelogStream;
pub use version::ReleaseVersion;

/// The section breaking-change notes are always listed under, regardless of
/// the commit's own type.
const BREAKING_SECTION: &str = "Breaking Changes";
