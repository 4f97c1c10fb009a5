use std::{collections::HashMap, fs, path::Path, result::Result as StdResult};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{Error, Result},
    fmt::ChangelogFormat,
    version::ReleaseVersion,
};

/// Template variables supplied alongside the commits, loaded once from a
/// JSON file before any input is processed and shared read-only across the
/// whole run.
///
/// The map is opaque; the writers look up the keys they understand
/// (`title`, `date`) and carry the rest without complaint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TemplateContext(IndexMap<String, Value>);

impl TemplateContext {
    /// The release title, when the context defines one.
    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    /// The release date override, when the context defines one.
    pub fn date(&self) -> Option<&str> {
        self.get_str("date")
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Renderer configuration, loaded once from a TOML file. Every knob is a
/// named, statically validated option; there is no template language.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderOptions {
    /// The format to output the changelog in (Defaults to Markdown)
    pub format: ChangelogFormat,
    /// A literal document that replaces the generated changelog entirely.
    /// Input records are still consumed, just not rendered.
    pub main_template: Option<String>,
    /// Maps out the sections and aliases used to trigger those sections.
    /// The keys are the section name, and the values are an array of
    /// aliases.
    pub sections: IndexMap<String, Vec<String>>,
    /// Maps out the components and aliases used to trigger those
    /// components. The keys are the component name, and the values are an
    /// array of aliases.
    pub components: HashMap<String, Vec<String>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let mut sections = IndexMap::new();
        sections.insert(
            "Features".to_owned(),
            vec!["ft".to_owned(), "feat".to_owned()],
        );
        sections.insert(
            "Bug Fixes".to_owned(),
            vec!["fx".to_owned(), "fix".to_owned()],
        );
        sections.insert("Performance".to_owned(), vec!["perf".to_owned()]);
        sections.insert(
            crate::BREAKING_SECTION.to_owned(),
            vec!["breaks".to_owned()],
        );

        RenderOptions {
            format: ChangelogFormat::default(),
            main_template: None,
            sections,
            components: HashMap::new(),
        }
    }
}

impl RenderOptions {
    /// Retrieves the section title for a given commit-type alias, if any
    /// section claims it.
    pub fn section_for(&self, alias: &str) -> Option<&String> {
        self.sections
            .iter()
            .filter(|&(_, v)| v.iter().any(|s| s == alias))
            .map(|(k, _)| k)
            .next()
    }

    /// Retrieves the full component name for a given alias (if one is
    /// defined)
    pub fn component_for(&self, alias: &str) -> Option<&String> {
        self.components
            .iter()
            .filter(|&(_, v)| v.iter().any(|c| c == alias))
            .map(|(k, _)| k)
            .next()
    }
}

/// The immutable snapshot of everything a render needs: the validated
/// release version plus the optional side inputs. Captured once at startup
/// and passed by reference to every stream invocation.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub version: ReleaseVersion,
    pub context: Option<TemplateContext>,
    pub options: RenderOptions,
}

/// Loads template variables from a JSON file, resolved relative to the
/// current working directory. Any read or parse failure is fatal to the
/// run, since the context is shared across every input source.
pub fn load_context<P: AsRef<Path>>(path: P) -> Result<TemplateContext> {
    load_resource(path.as_ref(), "context", |s| {
        serde_json::from_str(s).map_err(|e| e.to_string())
    })
}

/// Loads renderer options from a TOML file, resolved relative to the
/// current working directory. Same fatality contract as [`load_context`].
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<RenderOptions> {
    load_resource(path.as_ref(), "options", |s| {
        toml::from_str(s).map_err(|e| e.to_string())
    })
}

fn load_resource<T>(
    path: &Path,
    name: &'static str,
    parse: impl FnOnce(&str) -> StdResult<T, String>,
) -> Result<T> {
    debug!("Loading {} from {}", name, path.display());
    let contents = fs::read_to_string(path).map_err(|e| Error::ResourceLoad {
        name,
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    parse(&contents).map_err(|reason| Error::ResourceLoad {
        name,
        path: path.display().to_string(),
        reason,
    })
}
