use std::fmt;

use semver::Version;

use crate::error::{Error, Result};

/// The validated semantic version of the release being written.
///
/// Validation runs before any commit input is read, so a bad version fails
/// the whole invocation immediately. A single leading `v`/`V` (common in
/// git tags) is stripped before validation and never printed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion(Version);

impl ReleaseVersion {
    /// Validates the version argument. `None` (or a blank string) means no
    /// version was supplied at all, which is a distinct error from a
    /// malformed one; a malformed version names the offending string.
    pub fn parse(ver: Option<&str>) -> Result<Self> {
        let raw = match ver.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => return Err(Error::MissingVersion),
        };

        let stripped = raw
            .strip_prefix('v')
            .or_else(|| raw.strip_prefix('V'))
            .unwrap_or(raw);

        match Version::parse(stripped) {
            Ok(v) => Ok(ReleaseVersion(v)),
            Err(..) => Err(Error::InvalidVersion(raw.to_owned())),
        }
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_semver() {
        let ver = ReleaseVersion::parse(Some("1.0.0")).unwrap();
        assert_eq!(ver.to_string(), "1.0.0");
    }

    #[test]
    fn strips_leading_v() {
        let ver = ReleaseVersion::parse(Some("v2.3.4")).unwrap();
        assert_eq!(ver.to_string(), "2.3.4");
    }

    #[test]
    fn keeps_prerelease_and_build_metadata() {
        let ver = ReleaseVersion::parse(Some("1.0.0-beta.1+build.5")).unwrap();
        assert_eq!(ver.to_string(), "1.0.0-beta.1+build.5");
    }

    #[test]
    fn missing_version_is_its_own_error() {
        assert!(matches!(
            ReleaseVersion::parse(None),
            Err(Error::MissingVersion)
        ));
        assert!(matches!(
            ReleaseVersion::parse(Some("  ")),
            Err(Error::MissingVersion)
        ));
    }

    #[test]
    fn invalid_version_reports_the_literal_string() {
        match ReleaseVersion::parse(Some("version")) {
            Err(Error::InvalidVersion(s)) => assert_eq!(s, "version"),
            other => panic!("expected InvalidVersion, got {other:?}"),
        }
    }

    #[test]
    fn partial_versions_are_invalid() {
        assert!(matches!(
            ReleaseVersion::parse(Some("1.2")),
            Err(Error::InvalidVersion(..))
        ));
    }
}
