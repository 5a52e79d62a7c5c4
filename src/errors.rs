//! Typed error hierarchy for the private-fork CLI.
//!
//! Two enums cover the two failure domains:
//! - `ParseError`: a repository reference that could not be understood
//! - `CommandError`: an external `git`/`gh` invocation that failed

use thiserror::Error;

/// Errors from parsing a repository reference.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// An `http(s)://` reference whose path does not contain at least
    /// OWNER/REPO.
    #[error("invalid repository URL: {0}")]
    InvalidUrl(String),

    /// A `git@` reference without a usable OWNER/REPO path.
    #[error("invalid repository SSH URL: {0}")]
    InvalidSshUrl(String),

    /// Anything else that is not plain OWNER/REPO shorthand.
    #[error("invalid repository format: use OWNER/REPO")]
    InvalidFormat,
}

/// Errors from invoking one of the external collaborators.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started at all.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited non-zero.
    #[error("{program} exited with status {code}")]
    Exit { program: &'static str, code: i32 },

    /// A captured invocation succeeded but its output was unusable.
    #[error("could not parse {program} output: {reason}")]
    Output {
        program: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_messages_name_the_form() {
        assert!(
            ParseError::InvalidUrl("https://x".into())
                .to_string()
                .contains("repository URL")
        );
        assert!(
            ParseError::InvalidSshUrl("git@x".into())
                .to_string()
                .contains("SSH")
        );
        assert!(ParseError::InvalidFormat.to_string().contains("OWNER/REPO"));
    }

    #[test]
    fn command_error_spawn_is_matchable() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "git not found");
        let err = CommandError::Spawn {
            program: "git",
            source: io_err,
        };
        match &err {
            CommandError::Spawn { program, source } => {
                assert_eq!(*program, "git");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Spawn variant"),
        }
    }

    #[test]
    fn command_error_exit_carries_code() {
        let err = CommandError::Exit {
            program: "gh",
            code: 128,
        };
        assert!(err.to_string().contains("128"));
        assert!(matches!(err, CommandError::Exit { code: 128, .. }));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&ParseError::InvalidFormat);
        assert_std_error(&CommandError::Exit {
            program: "git",
            code: 1,
        });
    }
}
