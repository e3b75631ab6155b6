//! Reference discovery - finds the schema names a subtree points at.

use std::collections::BTreeSet;

use serde_yaml::Value;

use crate::types::{REF_KEY, SCHEMA_REF_PREFIX};

/// Extract the schema name from a `$ref` value.
///
/// Returns the last path segment when `reference` points into
/// `#/components/schemas/`, and `None` for any other reference form.
pub fn schema_name(reference: &str) -> Option<&str> {
    if !reference.starts_with(SCHEMA_REF_PREFIX) {
        return None;
    }
    reference.rsplit('/').next()
}

/// Collect every schema name referenced anywhere within `value`.
///
/// # Example
///
/// ```
/// use openapi_split::find_refs;
///
/// let route: serde_yaml::Value = serde_yaml::from_str(r##"
/// get:
///   responses:
///     "200":
///       content:
///         application/json:
///           schema:
///             $ref: "#/components/schemas/charge"
/// "##).unwrap();
///
/// let refs = find_refs(&route);
/// assert!(refs.contains("charge"));
/// ```
pub fn find_refs(value: &Value) -> BTreeSet<String> {
    let mut refs = BTreeSet::new();
    collect_refs(value, &mut refs);
    refs
}

/// Add every schema name referenced within `value` to `refs`.
///
/// A `$ref` entry is a leaf: its value is never scanned further, whether or
/// not it points at a schema.
pub fn collect_refs(value: &Value, refs: &mut BTreeSet<String>) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                if key.as_str() == Some(REF_KEY) {
                    if let Value::String(reference) = child {
                        if let Some(name) = schema_name(reference) {
                            refs.insert(name.to_string());
                        }
                        continue;
                    }
                }
                collect_refs(child, refs);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                collect_refs(item, refs);
            }
        }
        Value::Tagged(tagged) => collect_refs(&tagged.value, refs),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn schema_name_with_prefix() {
        assert_eq!(schema_name("#/components/schemas/charge"), Some("charge"));
        assert_eq!(
            schema_name("#/components/schemas/payment_intent"),
            Some("payment_intent")
        );
    }

    #[test]
    fn schema_name_other_forms() {
        assert_eq!(schema_name("#/components/responses/NotFound"), None);
        assert_eq!(schema_name("other.yml#/components/schemas/charge"), None);
        assert_eq!(schema_name("charge"), None);
    }

    #[test]
    fn finds_nested_refs() {
        let value = yaml(
            r##"
get:
  parameters:
    - in: query
      schema:
        $ref: "#/components/schemas/expand"
  responses:
    "200":
      content:
        application/json:
          schema:
            anyOf:
              - $ref: "#/components/schemas/charge"
              - $ref: "#/components/schemas/refund"
"##,
        );
        assert_eq!(find_refs(&value), names(&["charge", "expand", "refund"]));
    }

    #[test]
    fn duplicates_collapse() {
        let value = yaml(
            r##"
- $ref: "#/components/schemas/charge"
- items:
    $ref: "#/components/schemas/charge"
"##,
        );
        assert_eq!(find_refs(&value), names(&["charge"]));
    }

    #[test]
    fn ignores_other_reference_forms() {
        let value = yaml(
            r##"
responses:
  "404":
    $ref: "#/components/responses/NotFound"
  default:
    $ref: "https://example.com/schemas/error.json"
"##,
        );
        assert!(find_refs(&value).is_empty());
    }

    #[test]
    fn non_string_ref_is_scanned() {
        // A property literally named "$ref" holds a schema, not a reference.
        let value = yaml(
            r##"
properties:
  $ref:
    $ref: "#/components/schemas/inner"
"##,
        );
        assert_eq!(find_refs(&value), names(&["inner"]));
    }

    #[test]
    fn scalars_and_empty_values() {
        assert!(find_refs(&Value::Null).is_empty());
        assert!(find_refs(&yaml("just a string")).is_empty());
        assert!(find_refs(&yaml("{}")).is_empty());
        assert!(find_refs(&yaml("[]")).is_empty());
    }

    #[test]
    fn tagged_values_are_scanned() {
        let value = yaml(
            r##"
schema: !custom
  $ref: "#/components/schemas/tagged"
"##,
        );
        assert_eq!(find_refs(&value), names(&["tagged"]));
    }

    #[test]
    fn collect_refs_accumulates() {
        let mut refs = names(&["existing"]);
        collect_refs(&yaml(r##"{$ref: "#/components/schemas/added"}"##), &mut refs);
        assert_eq!(refs, names(&["added", "existing"]));
    }
}
