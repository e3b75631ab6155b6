//! Per-resource document assembly.
//!
//! Combines one resource group's routes with the schemas they need and the
//! source document's shared metadata.

use std::collections::BTreeSet;

use serde_yaml::{Mapping, Value};
use tracing::{info, warn};

use crate::document::Document;
use crate::error::{SplitError, WriteError};
use crate::grouper::{group_paths, Grouping, ResourceGroup};
use crate::refs::find_refs;
use crate::resolver::{dangling_refs, resolve_dependencies};
use crate::types::{OutputFormat, SplitOptions};

/// Format version written when the source has none.
const FALLBACK_OPENAPI_VERSION: &str = "3.0.0";

/// A complete output document for one resource.
#[derive(Debug, Clone)]
pub struct ResourceDocument {
    pub resource: String,
    /// Schema names resolved for the resource, including dangling ones.
    pub required_schemas: BTreeSet<String>,
    /// Resolved names with no definition in the source table.
    pub dangling: BTreeSet<String>,
    pub document: Value,
}

impl ResourceDocument {
    /// Output file name, e.g. `charges.yml`.
    pub fn file_name(&self, format: OutputFormat) -> String {
        format!("{}.{}", self.resource, format.extension())
    }

    /// Number of schemas actually emitted.
    pub fn schema_count(&self) -> usize {
        self.document
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(Value::as_mapping)
            .map_or(0, Mapping::len)
    }

    /// Serialize the document.
    ///
    /// # Errors
    ///
    /// Returns `WriteError::Serialize` if the value can't be represented in
    /// `format` (e.g. a YAML mapping key JSON can't express).
    pub fn render(&self, format: OutputFormat) -> Result<String, WriteError> {
        let rendered = match format {
            OutputFormat::Yaml => {
                serde_yaml::to_string(&self.document).map_err(|e| e.to_string())
            }
            OutputFormat::Json => serde_json::to_string_pretty(&self.document)
                .map(|mut json| {
                    json.push('\n');
                    json
                })
                .map_err(|e| e.to_string()),
        };

        rendered.map_err(|message| WriteError::Serialize {
            resource: self.resource.clone(),
            message,
        })
    }
}

/// Build the output document for one resource group.
///
/// The schema table holds the transitive closure of schemas referenced by
/// the group's routes, plus every `options.always_include` name the source
/// defines, sorted by name.
///
/// # Errors
///
/// Returns `SplitError::DanglingReference` in strict mode when a resolved
/// name has no definition.
pub fn assemble_resource(
    document: &Document,
    group: &ResourceGroup,
    options: &SplitOptions,
) -> Result<ResourceDocument, SplitError> {
    let all_schemas = document.schemas();
    let paths = group.paths();

    let initial = find_refs(&Value::Mapping(paths.clone()));
    let mut required = resolve_dependencies(&initial, all_schemas);
    info!(
        resource = %group.resource,
        direct = initial.len(),
        total = required.len(),
        "resolved schemas"
    );

    for name in &options.always_include {
        if all_schemas.contains_key(name.as_str()) {
            required.insert(name.clone());
        }
    }

    let dangling = dangling_refs(&required, all_schemas);
    if let Some(name) = dangling.iter().next() {
        if options.strict {
            return Err(SplitError::DanglingReference {
                resource: group.resource.clone(),
                name: name.clone(),
            });
        }
        warn!(resource = %group.resource, dangling = ?dangling, "dropping undefined schemas");
    }

    let schemas: Mapping = required
        .iter()
        .filter_map(|name| {
            all_schemas
                .get(name.as_str())
                .map(|definition| (Value::String(name.clone()), definition.clone()))
        })
        .collect();

    let mut components = Mapping::new();
    components.insert("schemas".into(), Value::Mapping(schemas));
    components.insert(
        "securitySchemes".into(),
        document
            .security_schemes()
            .cloned()
            .unwrap_or_else(|| Value::Mapping(Mapping::new())),
    );

    let mut root = Mapping::new();
    root.insert(
        "openapi".into(),
        document
            .openapi_version()
            .cloned()
            .unwrap_or_else(|| FALLBACK_OPENAPI_VERSION.into()),
    );
    root.insert(
        "info".into(),
        document
            .info()
            .cloned()
            .unwrap_or_else(|| fallback_info(&group.resource)),
    );
    root.insert(
        "servers".into(),
        document
            .servers()
            .cloned()
            .unwrap_or_else(|| Value::Sequence(Vec::new())),
    );
    root.insert("paths".into(), Value::Mapping(paths));
    root.insert("components".into(), Value::Mapping(components));
    if let Some(security) = document.security() {
        root.insert("security".into(), security.clone());
    }

    Ok(ResourceDocument {
        resource: group.resource.clone(),
        required_schemas: required,
        dangling,
        document: Value::Mapping(root),
    })
}

/// Group the document's paths and assemble every resource.
///
/// Returns the grouping (for skipped-path reporting) alongside the assembled
/// documents, in group order.
pub fn split_document(
    document: &Document,
    options: &SplitOptions,
) -> Result<(Grouping, Vec<ResourceDocument>), SplitError> {
    let grouping = group_paths(document.paths(), &options.path_prefix);
    let resources = grouping
        .groups
        .values()
        .map(|group| assemble_resource(document, group, options))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((grouping, resources))
}

/// `info` block synthesized when the source has none.
fn fallback_info(resource: &str) -> Value {
    let mut info = Mapping::new();
    info.insert(
        "title".into(),
        format!("{} API Resource", capitalize(resource)).into(),
    );
    info.insert("version".into(), "unknown".into());
    Value::Mapping(info)
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
