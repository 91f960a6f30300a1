// SPDX-FileCopyrightText: 2026 Odyssey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Odyssey game core.

use thiserror::Error;

/// The primary error type used across all Odyssey collaborator traits and
/// core operations.
///
/// Errors are string-typed at the collaborator boundary: the only consumer
/// of error detail is the in-character error narration, which accepts plain
/// text.
#[derive(Debug, Error)]
pub enum OdysseyError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Persistence backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Generative backend errors (API failure, malformed structured output, job failure).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// External data lookup errors (SBDB transport or decode failure).
    #[error("lookup error: {message}")]
    Lookup { message: String },

    /// The persistence backend is not configured; online-only operations refuse to run.
    #[error("persistence backend not configured")]
    NotConfigured,

    /// Operation timed out (long-running video jobs are timeout-bounded).
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OdysseyError {
    /// Shorthand for a provider error with no underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        OdysseyError::Provider {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_render_messages() {
        let e = OdysseyError::Config("bad toml".into());
        assert_eq!(e.to_string(), "configuration error: bad toml");

        let e = OdysseyError::provider("503 from backend");
        assert_eq!(e.to_string(), "provider error: 503 from backend");

        let e = OdysseyError::NotConfigured;
        assert!(e.to_string().contains("not configured"));

        let e = OdysseyError::Timeout {
            duration: std::time::Duration::from_secs(600),
        };
        assert!(e.to_string().contains("600"));
    }

    #[test]
    fn storage_errors_carry_sources() {
        let e = OdysseyError::Storage {
            source: Box::new(std::io::Error::other("disk gone")),
        };
        assert!(e.to_string().contains("disk gone"));
    }
}
