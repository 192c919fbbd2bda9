use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Error, Result};

// https://github.com/opencontainers/distribution-spec/blob/main/spec.md#pulling-manifests
static REPOSITORY_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(?:(?:\.|_|__|-+)[a-z0-9]+)*(?:/[a-z0-9]+(?:(?:\.|_|__|-+)[a-z0-9]+)*)*$")
        .expect("repository name pattern must compile")
});

/// A repository name validated against the distribution-spec grammar.
///
/// Names arrive from an untrusted webhook payload and end up both as registry
/// API query keys and as filesystem path segments beneath the storage root.
/// The grammar admits no `.`/`..` segments, no empty segments, and no
/// characters outside `[a-z0-9._-/]`, so a constructed value can never build
/// a path that escapes the storage root.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for RepositoryName {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        if s.len() > 255 || !REPOSITORY_NAME_RE.is_match(s) {
            return Err(Error::InvalidRepositoryName(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl std::fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RepositoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::single("ubuntu", true)]
    #[case::namespaced("app/web", true)]
    #[case::deep("a/b/c", true)]
    #[case::separators("my-app.v2_final", true)]
    #[case::digits("web2/api3", true)]
    #[case::empty("", false)]
    #[case::uppercase("App/Web", false)]
    #[case::space("app /web", false)]
    #[case::leading_slash("/app", false)]
    #[case::trailing_slash("app/", false)]
    #[case::double_slash("app//web", false)]
    #[case::dotdot("..", false)]
    #[case::traversal("../../etc/passwd", false)]
    #[case::embedded_traversal("app/../web", false)]
    #[case::backslash("app\\web", false)]
    #[case::leading_separator("-app", false)]
    #[case::trailing_separator("app-", false)]
    fn validate_try_from(#[case] input: &str, #[case] valid: bool) {
        let actual = RepositoryName::try_from(input);
        match (valid, actual) {
            (true, Ok(name)) => {
                assert_eq!(name.as_str(), input);
            }
            (true, Err(e)) => {
                assert!(false, "expected {input:?} to be accepted, got {e:?}");
            }
            (false, Ok(name)) => {
                assert!(false, "expected {input:?} to be rejected, got {name:?}");
            }
            (false, Err(Error::InvalidRepositoryName(s))) => {
                assert_eq!(s, input);
            }
            (false, Err(e)) => {
                assert!(false, "unexpected error for {input:?}: {e:?}");
            }
        }
    }

    #[test]
    fn rejects_names_longer_than_255() {
        let long = "a".repeat(256);
        assert!(RepositoryName::try_from(long.as_str()).is_err());
    }
}
