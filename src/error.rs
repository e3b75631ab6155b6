//! Error types for loading, splitting and writing OpenAPI documents.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading the source document.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid YAML in {path}: {source}")]
    InvalidYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // Structure errors (exit code 2)
    #[error("invalid OpenAPI document: root is not a mapping")]
    NotAMapping,

    #[error("invalid OpenAPI document: missing '{section}' section")]
    MissingSection { section: &'static str },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors while computing resource documents.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("resource '{resource}' references undefined schema '{name}'")]
    DanglingReference { resource: String, name: String },
}

impl SplitError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors while persisting one resource document.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize resource '{resource}': {message}")]
    Serialize { resource: String, message: String },

    #[error("cannot write resource '{resource}' to {path}: {source}")]
    Write {
        resource: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_exit_codes() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("stripe-openapi.yml"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = LoadError::NotAMapping;
        assert_eq!(err.exit_code(), 2);

        let err = LoadError::MissingSection { section: "paths" };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn split_error_exit_code() {
        let err = SplitError::DanglingReference {
            resource: "charges".into(),
            name: "missing".into(),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_section_display() {
        let err = LoadError::MissingSection {
            section: "components.schemas",
        };
        assert_eq!(
            err.to_string(),
            "invalid OpenAPI document: missing 'components.schemas' section"
        );
    }

    #[test]
    fn write_error_display() {
        let err = WriteError::Serialize {
            resource: "refunds".into(),
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "cannot serialize resource 'refunds': boom");
    }
}
