//! Output error types.

use super::OutputReport;
use crate::generator::{FeedFormat, GeneratorError};
use std::error::Error as _;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create directory `{0}`")]
    CreateDir(PathBuf, #[source] std::io::Error),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("failed to copy `{from}` to `{to}`")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render {format} feed of locale `{locale}`")]
    Render {
        locale: String,
        format: FeedFormat,
        #[source]
        source: GeneratorError,
    },

    #[error("output task panicked")]
    Join(#[source] tokio::task::JoinError),

    #[error("{} feed output task(s) failed", .failures.len())]
    Failed {
        failures: Vec<TaskFailure>,
        /// What the other tasks still wrote.
        report: OutputReport,
    },
}

impl OutputError {
    /// Individual failures; a single-task error yields itself.
    pub fn failures(&self) -> Vec<&OutputError> {
        match self {
            Self::Failed { failures, .. } => failures.iter().map(|f| &f.error).collect(),
            other => vec![other],
        }
    }
}

/// Unit of work spawned by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutputTask {
    Locale(String),
    Stylesheet { locale: String, format: FeedFormat },
}

impl fmt::Display for OutputTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locale(locale) => write!(f, "feeds of locale {locale}"),
            Self::Stylesheet { locale, format } => {
                write!(f, "{format} stylesheet of locale {locale}")
            }
        }
    }
}

/// A task that did not complete. `task` is `None` when it panicked.
#[derive(Debug)]
pub struct TaskFailure {
    pub task: Option<OutputTask>,
    pub error: OutputError,
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(task) = &self.task {
            write!(f, "{task}: ")?;
        }
        write!(f, "{}", self.error)?;
        let mut source = self.error.source();
        while let Some(cause) = source {
            write!(f, ": {cause}")?;
            source = cause.source();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_task_failure_display_includes_cause() {
        let failure = TaskFailure {
            task: Some(OutputTask::Locale("/zh/".into())),
            error: OutputError::CreateDir(
                PathBuf::from("dist/zh"),
                Error::new(ErrorKind::PermissionDenied, "denied"),
            ),
        };
        assert_eq!(
            failure.to_string(),
            "feeds of locale /zh/: failed to create directory `dist/zh`: denied"
        );
    }

    #[test]
    fn test_failed_lists_failures() {
        let err = OutputError::Failed {
            failures: vec![TaskFailure {
                task: Some(OutputTask::Stylesheet {
                    locale: "/".into(),
                    format: FeedFormat::Rss,
                }),
                error: OutputError::Write(
                    PathBuf::from("dist/rss.xsl"),
                    Error::new(ErrorKind::Other, "disk full"),
                ),
            }],
            report: OutputReport::default(),
        };
        assert_eq!(err.to_string(), "1 feed output task(s) failed");
        assert_eq!(err.failures().len(), 1);
    }

    #[test]
    fn test_task_ordering() {
        let mut tasks = vec![
            OutputTask::Stylesheet {
                locale: "/".into(),
                format: FeedFormat::Atom,
            },
            OutputTask::Locale("/zh/".into()),
            OutputTask::Locale("/".into()),
        ];
        tasks.sort();
        assert_eq!(tasks[0], OutputTask::Locale("/".into()));
    }
}
