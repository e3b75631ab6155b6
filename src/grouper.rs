//! Route grouping - partitions paths by their resource segment.
//!
//! `/v1/charges/{charge}/refunds` belongs to resource `charges`: the first
//! segment after the configured prefix.

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::{info, warn};

/// Why a path was left out of every resource group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The path key is not a string.
    NonStringPath,
    /// The path does not start with the configured prefix.
    PrefixMismatch,
    /// Nothing follows the prefix.
    TooShort,
    /// The resource segment is a path parameter such as `{id}`.
    ParameterSegment,
}

/// A path excluded from grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPath {
    pub path: String,
    pub reason: SkipReason,
}

/// Routes sharing one resource key, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGroup {
    pub resource: String,
    pub routes: Vec<(String, Value)>,
}

impl ResourceGroup {
    /// Build the group's `paths` mapping, preserving route order.
    pub fn paths(&self) -> Mapping {
        self.routes
            .iter()
            .map(|(path, route)| (Value::String(path.clone()), route.clone()))
            .collect()
    }
}

/// Result of grouping a document's paths.
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    /// Groups keyed by resource, in order of first appearance.
    pub groups: IndexMap<String, ResourceGroup>,
    pub skipped: Vec<SkippedPath>,
}

impl Grouping {
    /// Returns true if no path matched the convention.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Extract the resource key of `path` for `prefix`.
pub fn resource_key<'a>(path: &'a str, prefix: &str) -> Result<&'a str, SkipReason> {
    let Some(rest) = path.strip_prefix(prefix) else {
        return Err(SkipReason::PrefixMismatch);
    };

    // An empty first segment (`/v1//x`) has no resource name.
    let key = rest.split('/').next().unwrap_or_default();
    if key.is_empty() {
        return Err(SkipReason::TooShort);
    }
    if key.contains('{') && key.contains('}') {
        return Err(SkipReason::ParameterSegment);
    }
    Ok(key)
}

/// Partition `paths` into resource groups.
///
/// Paths that do not fit the `<prefix><resource>/...` shape are recorded in
/// [`Grouping::skipped`] and otherwise ignored.
pub fn group_paths(paths: &Mapping, prefix: &str) -> Grouping {
    let mut grouping = Grouping::default();

    for (key, route) in paths {
        let Some(path) = key.as_str() else {
            warn!(key = ?key, "path key is not a string, skipping");
            grouping.skipped.push(SkippedPath {
                path: format!("{:?}", key),
                reason: SkipReason::NonStringPath,
            });
            continue;
        };

        match resource_key(path, prefix) {
            Ok(resource) => {
                grouping
                    .groups
                    .entry(resource.to_string())
                    .or_insert_with(|| ResourceGroup {
                        resource: resource.to_string(),
                        routes: Vec::new(),
                    })
                    .routes
                    .push((path.to_string(), route.clone()));
            }
            Err(reason) => {
                match reason {
                    SkipReason::PrefixMismatch => {
                        info!(path, prefix, "path outside prefix, skipping");
                    }
                    SkipReason::TooShort => {
                        warn!(path, "path is too short after prefix, skipping");
                    }
                    SkipReason::ParameterSegment => {
                        warn!(path, "resource segment is a path parameter, skipping");
                    }
                    SkipReason::NonStringPath => {}
                }
                grouping.skipped.push(SkippedPath {
                    path: path.to_string(),
                    reason,
                });
            }
        }
    }

    grouping
}
