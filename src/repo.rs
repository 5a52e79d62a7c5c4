//! Repository reference parsing and remote URL construction.

use crate::errors::ParseError;
use std::fmt;

/// A normalized `{owner, name}` repository reference.
///
/// Both fields are non-empty once parsed; `parse` fails otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parse one of the three accepted reference forms:
    ///
    /// - `http(s)://<host>/<owner>/<name>[/...]`
    /// - `git@<host>:<owner>/<name>[.git]`
    /// - `<owner>/<name>`
    ///
    /// The HTTPS form keeps a trailing `.git` in the name while the SSH
    /// form strips it; callers depend on that exact behavior, so both
    /// sides are pinned by tests below.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.starts_with("http://") || input.starts_with("https://") {
            return Self::parse_http(input);
        }
        if input.starts_with("git@") {
            return Self::parse_ssh(input);
        }
        Self::parse_shorthand(input)
    }

    fn parse_http(input: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidUrl(input.to_string());
        let rest = input.splitn(2, "://").nth(1).ok_or_else(invalid)?;
        // everything past the host is the path
        let path = rest.splitn(2, '/').nth(1).ok_or_else(invalid)?;
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 2 {
            return Err(invalid());
        }
        Ok(Self {
            owner: segments[0].to_string(),
            name: segments[1].to_string(),
        })
    }

    fn parse_ssh(input: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidSshUrl(input.to_string());
        let path = input.splitn(2, ':').nth(1).ok_or_else(invalid)?;
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 2 {
            return Err(invalid());
        }
        let name = segments[1].strip_suffix(".git").unwrap_or(segments[1]);
        if name.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            owner: segments[0].to_string(),
            name: name.to_string(),
        })
    }

    fn parse_shorthand(input: &str) -> Result<Self, ParseError> {
        let segments: Vec<&str> = input.split('/').collect();
        match segments.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(ParseError::InvalidFormat),
        }
    }

    /// SSH-style remote URL, used for push and clone targets.
    pub fn ssh_url(&self, host: &str) -> String {
        format!("git@{host}:{}/{}.git", self.owner, self.name)
    }

    /// HTTPS remote URL, used for remotes added to an existing local repo.
    pub fn https_url(&self, host: &str) -> String {
        format!("https://{host}/{}/{}.git", self.owner, self.name)
    }

    /// Directory name `git clone --bare` produces for this repository.
    pub fn bare_dir_name(&self) -> String {
        format!("{}.git", self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(owner: &str, name: &str) -> RepoRef {
        RepoRef {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn parse_https_url() {
        assert_eq!(
            RepoRef::parse("https://github.com/acme/widgets").unwrap(),
            repo("acme", "widgets")
        );
    }

    #[test]
    fn parse_http_url() {
        assert_eq!(
            RepoRef::parse("http://github.com/acme/widgets").unwrap(),
            repo("acme", "widgets")
        );
    }

    #[test]
    fn parse_https_keeps_git_suffix() {
        // the SSH branch strips ".git"; this one deliberately does not
        assert_eq!(
            RepoRef::parse("https://github.com/acme/widgets.git").unwrap(),
            repo("acme", "widgets.git")
        );
    }

    #[test]
    fn parse_https_ignores_extra_path_segments() {
        assert_eq!(
            RepoRef::parse("https://github.com/acme/widgets/tree/main").unwrap(),
            repo("acme", "widgets")
        );
    }

    #[test]
    fn parse_https_skips_empty_segments() {
        assert_eq!(
            RepoRef::parse("https://github.com/acme//widgets").unwrap(),
            repo("acme", "widgets")
        );
    }

    #[test]
    fn parse_https_requires_owner_and_name() {
        assert!(matches!(
            RepoRef::parse("https://github.com"),
            Err(ParseError::InvalidUrl(_))
        ));
        assert!(matches!(
            RepoRef::parse("https://github.com/acme"),
            Err(ParseError::InvalidUrl(_))
        ));
        assert!(matches!(
            RepoRef::parse("https://github.com///"),
            Err(ParseError::InvalidUrl(_))
        ));
    }

    #[test]
    fn parse_ssh_url_strips_git_suffix() {
        assert_eq!(
            RepoRef::parse("git@github.com:acme/widgets.git").unwrap(),
            repo("acme", "widgets")
        );
    }

    #[test]
    fn parse_ssh_url_without_git_suffix() {
        assert_eq!(
            RepoRef::parse("git@github.com:acme/widgets").unwrap(),
            repo("acme", "widgets")
        );
    }

    #[test]
    fn parse_ssh_requires_colon() {
        assert!(matches!(
            RepoRef::parse("git@github.com"),
            Err(ParseError::InvalidSshUrl(_))
        ));
    }

    #[test]
    fn parse_ssh_requires_owner_and_name() {
        assert!(matches!(
            RepoRef::parse("git@github.com:acme"),
            Err(ParseError::InvalidSshUrl(_))
        ));
    }

    #[test]
    fn parse_ssh_rejects_bare_git_suffix_name() {
        // "owner/.git" would strip down to an empty name
        assert!(matches!(
            RepoRef::parse("git@github.com:acme/.git"),
            Err(ParseError::InvalidSshUrl(_))
        ));
    }

    #[test]
    fn parse_shorthand() {
        assert_eq!(
            RepoRef::parse("acme/widgets").unwrap(),
            repo("acme", "widgets")
        );
    }

    #[test]
    fn parse_shorthand_rejects_wrong_segment_counts() {
        assert_eq!(RepoRef::parse("widgets"), Err(ParseError::InvalidFormat));
        assert_eq!(RepoRef::parse("a/b/c"), Err(ParseError::InvalidFormat));
        assert_eq!(RepoRef::parse(""), Err(ParseError::InvalidFormat));
    }

    #[test]
    fn parse_shorthand_rejects_empty_segments() {
        assert_eq!(RepoRef::parse("/widgets"), Err(ParseError::InvalidFormat));
        assert_eq!(RepoRef::parse("acme/"), Err(ParseError::InvalidFormat));
        assert_eq!(RepoRef::parse("/"), Err(ParseError::InvalidFormat));
    }

    #[test]
    fn display_is_owner_slash_name() {
        assert_eq!(repo("acme", "widgets").to_string(), "acme/widgets");
    }

    #[test]
    fn url_construction() {
        let r = repo("acme", "widgets");
        assert_eq!(r.ssh_url("github.com"), "git@github.com:acme/widgets.git");
        assert_eq!(
            r.https_url("github.com"),
            "https://github.com/acme/widgets.git"
        );
        assert_eq!(r.bare_dir_name(), "widgets.git");
    }

    #[test]
    fn url_construction_honors_host() {
        let r = repo("acme", "widgets");
        assert_eq!(
            r.ssh_url("ghe.example.com"),
            "git@ghe.example.com:acme/widgets.git"
        );
        assert_eq!(
            r.https_url("ghe.example.com"),
            "https://ghe.example.com/acme/widgets.git"
        );
    }
}
