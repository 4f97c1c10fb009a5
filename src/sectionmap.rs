use std::collections::{BTreeMap, HashMap};

use crate::{
    commit::{Commit, Commits},
    config::RenderOptions,
    BREAKING_SECTION,
};

/// The second level of the changelog, i.e. the components -> commit
/// information
pub type ComponentMap = BTreeMap<String, Commits>;

/// A struct which holds sections to and components->commits map
pub struct SectionMap {
    /// The top level map of the changelog, i.e. sections -> components
    pub sections: HashMap<String, ComponentMap>,
}

impl SectionMap {
    /// Groups commits into sections and components using the configured
    /// alias maps, which we can then iterate through and write.
    ///
    /// Commits whose type maps to no configured section are dropped.
    /// Commits carrying breaking-change notes are additionally listed under
    /// the Breaking Changes section, one entry per note, with the note text
    /// as the entry body.
    pub fn from_commits(commits: &[Commit], options: &RenderOptions) -> SectionMap {
        let mut sm = SectionMap {
            sections: HashMap::new(),
        };

        for entry in commits {
            let component = options
                .component_for(&entry.component)
                .cloned()
                .unwrap_or_else(|| entry.component.clone());

            for note in &entry.breaks {
                let broke = Commit {
                    subject: note.clone(),
                    // note entries have no hash of their own to link
                    hash: String::new(),
                    closes: vec![],
                    breaks: vec![],
                    ..entry.clone()
                };
                sm.insert(BREAKING_SECTION, component.clone(), broke);
            }

            if let Some(section) = options.section_for(&entry.commit_type) {
                let section = section.clone();
                let mut kept = entry.clone();
                kept.component = component.clone();
                sm.insert(&section, component, kept);
            }
        }

        sm
    }

    fn insert(&mut self, section: &str, component: String, commit: Commit) {
        self.sections
            .entry(section.to_owned())
            .or_insert_with(BTreeMap::new)
            .entry(component)
            .or_insert_with(Vec::new)
            .push(commit);
    }
}
