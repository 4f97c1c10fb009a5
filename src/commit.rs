use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One parsed commit, exactly as it arrived on an input line.
///
/// No schema is enforced here. The record is an ordered map of whatever the
/// upstream commit parser produced; the typed [`Commit`] view picks out the
/// conventional fields and ignores the rest.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct CommitRecord(IndexMap<String, Value>);

impl CommitRecord {
    fn str_field(&self, key: &str) -> String {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_owned()
    }

    /// Issue numbers referenced by the commit (`references[].issue`).
    fn references(&self) -> Vec<String> {
        match self.0.get("references").and_then(Value::as_array) {
            Some(refs) => refs
                .iter()
                .filter_map(|r| r.get("issue"))
                .filter_map(issue_number)
                .collect(),
            None => vec![],
        }
    }

    /// Texts of any notes the commit carries (`notes[].text`), which for
    /// conventional commits are its breaking-change notes.
    fn notes(&self) -> Vec<String> {
        match self.0.get("notes").and_then(Value::as_array) {
            Some(notes) => notes
                .iter()
                .filter_map(|n| n.get("text"))
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            None => vec![],
        }
    }
}

fn issue_number(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The struct representation of a `Commit`, the typed view the changelog
/// writers consume
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    /// The 40 char hash
    pub hash: String,
    /// The commit subject
    pub subject: String,
    /// The component (if any)
    pub component: String,
    /// Any issues this commit closes
    pub closes: Vec<String>,
    /// Any breaking change notes this commit carries
    pub breaks: Vec<String>,
    /// The raw commit type (e.g. `feat`)
    pub commit_type: String,
}

/// A convienience type for multiple commits
pub type Commits = Vec<Commit>;

impl From<&CommitRecord> for Commit {
    fn from(rec: &CommitRecord) -> Commit {
        Commit {
            hash: rec.str_field("hash"),
            subject: rec.str_field("subject"),
            component: rec.str_field("scope"),
            closes: rec.references(),
            breaks: rec.notes(),
            commit_type: rec.str_field("type"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> CommitRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn typed_view_of_a_full_record() {
        let rec = record(
            r#"{"hash":"9b1aff905b638aa274a5fc8f88662df446d374bd",
                "type":"feat","scope":"ngMessages",
                "subject":"provide support for dynamic message resolution",
                "references":[{"action":"Closes","issue":"10036"},
                              {"action":"Closes","issue":9338}],
                "notes":[{"title":"BREAKING CHANGE","text":"attribute moved"}]}"#,
        );
        let commit = Commit::from(&rec);

        assert_eq!(commit.hash, "9b1aff905b638aa274a5fc8f88662df446d374bd");
        assert_eq!(commit.commit_type, "feat");
        assert_eq!(commit.component, "ngMessages");
        assert_eq!(
            commit.subject,
            "provide support for dynamic message resolution"
        );
        assert_eq!(commit.closes, vec!["10036", "9338"]);
        assert_eq!(commit.breaks, vec!["attribute moved"]);
    }

    #[test]
    fn missing_fields_degrade_to_empty() {
        let commit = Commit::from(&record(r#"{"subject":"just a subject"}"#));

        assert_eq!(commit.subject, "just a subject");
        assert!(commit.hash.is_empty());
        assert!(commit.component.is_empty());
        assert!(commit.commit_type.is_empty());
        assert!(commit.closes.is_empty());
        assert!(commit.breaks.is_empty());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let commit = Commit::from(&record(
            r#"{"type":"fix","subject":"s","extra":{"nested":[1,2]}}"#,
        ));
        assert_eq!(commit.commit_type, "fix");
    }
}
