//! Classified per-item failures. Closed set: every failure an item can hit is one of these.

use std::error::Error as StdError;
use std::io;
use thiserror::Error;

/// Why a single log source could not be analyzed.
///
/// Both variants are terminal for that item only: the outcome becomes `FAILED` with the rendered
/// message in `error_details`, and the batch keeps going.
#[derive(Debug, Error)]
pub enum ClassifiedError {
    /// Path is missing, is a directory, or cannot be opened for read.
    #[error("file not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        cause: io::Error,
    },

    /// The analysis policy rejected the content.
    #[error("parsing error for {log_id} ({path}): {reason}")]
    ParsingFailure {
        log_id: String,
        path: String,
        reason: String,
        #[source]
        cause: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl ClassifiedError {
    pub fn file_not_found(path: impl Into<String>, cause: io::Error) -> Self {
        ClassifiedError::FileNotFound {
            path: path.into(),
            cause,
        }
    }

    pub fn parsing_failure(
        log_id: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ClassifiedError::ParsingFailure {
            log_id: log_id.into(),
            path: path.into(),
            reason: reason.into(),
            cause: None,
        }
    }

    /// Attach an underlying cause. No-op for `FileNotFound`, which always carries one.
    pub fn with_cause(self, err: impl StdError + Send + Sync + 'static) -> Self {
        match self {
            ClassifiedError::ParsingFailure {
                log_id,
                path,
                reason,
                ..
            } => ClassifiedError::ParsingFailure {
                log_id,
                path,
                reason,
                cause: Some(Box::new(err)),
            },
            other => other,
        }
    }

    /// Short human summary used as the outcome `message`.
    pub fn summary(&self) -> &'static str {
        match self {
            ClassifiedError::FileNotFound { .. } => "File not found.",
            ClassifiedError::ParsingFailure { .. } => "Parsing error.",
        }
    }

    /// Rendered message plus every `source()` in the chain, `: `-joined. For debug logging.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut src = StdError::source(self);
        while let Some(e) = src {
            out.push_str(": ");
            out.push_str(&e.to_string());
            src = e.source();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_renders_path_and_keeps_cause() {
        let err = ClassifiedError::file_not_found(
            "/var/log/missing.log",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.to_string(), "file not found: /var/log/missing.log");
        assert_eq!(err.summary(), "File not found.");
        let src = StdError::source(&err).unwrap();
        assert_eq!(src.to_string(), "no such file");
        assert_eq!(err.chain(), "file not found: /var/log/missing.log: no such file");
    }

    #[test]
    fn parsing_failure_renders_id_path_reason() {
        let err = ClassifiedError::parsing_failure("web-1", "/logs/a.log", "bad header");
        assert_eq!(err.to_string(), "parsing error for web-1 (/logs/a.log): bad header");
        assert!(StdError::source(&err).is_none());
    }

    #[test]
    fn with_cause_chains_only_parsing_failures() {
        let err = ClassifiedError::parsing_failure("id", "p", "r")
            .with_cause(io::Error::other("truncated"));
        assert_eq!(err.chain(), "parsing error for id (p): r: truncated");

        let nf = ClassifiedError::file_not_found("p", io::Error::other("gone"))
            .with_cause(io::Error::other("ignored"));
        assert_eq!(nf.chain(), "file not found: p: gone");
    }
}
