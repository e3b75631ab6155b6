//! Source document loading.
//!
//! Reads an OpenAPI document from YAML (or JSON, which YAML accepts) and
//! checks the sections the splitter depends on.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::LoadError;

/// A loaded OpenAPI document with `paths` and `components.schemas` present.
#[derive(Debug, Clone)]
pub struct Document {
    root: Mapping,
}

impl Document {
    /// Load a document from a file path.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::FileNotFound` if the file doesn't exist,
    /// `LoadError::InvalidYaml` if it doesn't parse, or a structure error
    /// if a required section is missing.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value =
            serde_yaml::from_str(&content).map_err(|source| LoadError::InvalidYaml {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_value(value)
    }

    /// Parse a document from a YAML or JSON string.
    pub fn parse(content: &str) -> Result<Self, LoadError> {
        let value: Value =
            serde_yaml::from_str(content).map_err(|source| LoadError::InvalidYaml {
                path: "<string>".into(),
                source,
            })?;
        Self::from_value(value)
    }

    /// Wrap an already-parsed value.
    ///
    /// # Errors
    ///
    /// The root must be a mapping holding a `paths` mapping and a
    /// `components.schemas` mapping.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let Value::Mapping(root) = value else {
            return Err(LoadError::NotAMapping);
        };

        if !matches!(root.get("paths"), Some(Value::Mapping(_))) {
            return Err(LoadError::MissingSection { section: "paths" });
        }

        let schemas = root.get("components").and_then(|c| c.get("schemas"));
        if !matches!(schemas, Some(Value::Mapping(_))) {
            return Err(LoadError::MissingSection {
                section: "components.schemas",
            });
        }

        Ok(Self { root })
    }

    /// The route table (`paths`).
    pub fn paths(&self) -> &Mapping {
        self.section_mapping("paths")
    }

    /// The named-type table (`components.schemas`).
    pub fn schemas(&self) -> &Mapping {
        self.components()
            .and_then(|c| c.get("schemas"))
            .and_then(Value::as_mapping)
            .unwrap_or_else(|| empty_mapping())
    }

    /// `components.securitySchemes`, if present.
    pub fn security_schemes(&self) -> Option<&Value> {
        self.components().and_then(|c| c.get("securitySchemes"))
    }

    /// The format version string (`openapi`), if present.
    pub fn openapi_version(&self) -> Option<&Value> {
        self.root.get("openapi")
    }

    /// The `info` block, if present.
    pub fn info(&self) -> Option<&Value> {
        self.root.get("info")
    }

    /// The `servers` list, if present.
    pub fn servers(&self) -> Option<&Value> {
        self.root.get("servers")
    }

    /// Top-level `security` requirements, if present.
    pub fn security(&self) -> Option<&Value> {
        self.root.get("security")
    }

    fn components(&self) -> Option<&Value> {
        self.root.get("components")
    }

    fn section_mapping(&self, key: &str) -> &Mapping {
        self.root
            .get(key)
            .and_then(Value::as_mapping)
            .unwrap_or_else(|| empty_mapping())
    }
}

/// Shared empty mapping; `from_value` guarantees the real sections exist.
fn empty_mapping() -> &'static Mapping {
    static EMPTY: std::sync::OnceLock<Mapping> = std::sync::OnceLock::new();
    EMPTY.get_or_init(Mapping::new)
}
