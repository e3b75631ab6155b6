//! Core types and constants for splitting OpenAPI documents.

/// Mapping key that marks an embedded reference.
pub const REF_KEY: &str = "$ref";

/// Prefix of in-document references to named schemas.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Route prefix used to find the resource segment.
pub const DEFAULT_PATH_PREFIX: &str = "/v1/";

/// Schemas carried into every output document when defined in the source.
pub const DEFAULT_ALWAYS_INCLUDE: &[&str] = &["error"];

/// Default input document name.
pub const DEFAULT_INPUT: &str = "stripe-openapi.yml";

/// Default output directory name.
pub const DEFAULT_OUTPUT_DIR: &str = "split_openapi_refined";

/// Serialization used for output documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// File extension written for this format (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yml",
            OutputFormat::Json => "json",
        }
    }

    /// Parse a format name, case-insensitively.
    ///
    /// Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Options for splitting a document into resources.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Routes must start with this prefix to be grouped.
    pub path_prefix: String,
    /// Schema names added to every resource when present in the source table.
    pub always_include: Vec<String>,
    /// When true, a reference to an undefined schema fails the split
    /// instead of being dropped.
    pub strict: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            always_include: DEFAULT_ALWAYS_INCLUDE
                .iter()
                .map(|name| name.to_string())
                .collect(),
            strict: false,
        }
    }
}

impl SplitOptions {
    /// Create options with the default prefix and always-include list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the route prefix.
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    /// Replace the always-include list.
    pub fn always_include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_include = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set strict mode (dangling references become errors).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
