//! Dependency resolution - transitive closure over schema references.

use std::collections::{BTreeSet, VecDeque};

use serde_yaml::Mapping;
use tracing::debug;

use crate::refs::find_refs;

/// Resolve every schema reachable from `initial` through `schemas`.
///
/// Breadth-first: each name is visited at most once, so reference cycles
/// terminate. The result always contains `initial`. Names without an entry in
/// `schemas` stay in the result but contribute no further dependencies;
/// callers decide whether such dangling names matter (see [`dangling_refs`]).
pub fn resolve_dependencies(initial: &BTreeSet<String>, schemas: &Mapping) -> BTreeSet<String> {
    let mut required = initial.clone();
    let mut visited = initial.clone();
    let mut queue: VecDeque<String> = initial.iter().cloned().collect();

    while let Some(name) = queue.pop_front() {
        let Some(definition) = schemas.get(name.as_str()) else {
            debug!(schema = %name, "referenced schema not defined, skipping");
            continue;
        };

        for dependency in find_refs(definition) {
            if visited.insert(dependency.clone()) {
                required.insert(dependency.clone());
                queue.push_back(dependency);
            }
        }
    }

    required
}

/// Names in `names` that have no definition in `schemas`.
pub fn dangling_refs(names: &BTreeSet<String>, schemas: &Mapping) -> BTreeSet<String> {
    names
        .iter()
        .filter(|name| !schemas.contains_key(name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schemas(s: &str) -> Mapping {
        serde_yaml::from_str(s).unwrap()
    }

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn follows_transitive_refs() {
        let table = schemas(
            r##"
refund:
  properties:
    charge:
      $ref: "#/components/schemas/charge"
charge:
  properties:
    customer:
      $ref: "#/components/schemas/customer"
customer:
  type: object
unrelated:
  type: object
"##,
        );
        let result = resolve_dependencies(&names(&["refund"]), &table);
        assert_eq!(result, names(&["charge", "customer", "refund"]));
    }

    #[test]
    fn cycle_terminates() {
        let table = schemas(
            r##"
A:
  $ref: "#/components/schemas/B"
B:
  $ref: "#/components/schemas/A"
"##,
        );
        let result = resolve_dependencies(&names(&["A"]), &table);
        assert_eq!(result, names(&["A", "B"]));
    }

    #[test]
    fn self_reference_terminates() {
        let table = schemas(
            r##"
node:
  properties:
    children:
      items:
        $ref: "#/components/schemas/node"
"##,
        );
        let result = resolve_dependencies(&names(&["node"]), &table);
        assert_eq!(result, names(&["node"]));
    }

    #[test]
    fn dangling_names_are_kept_but_not_expanded() {
        let table = schemas(
            r##"
charge:
  properties:
    ghost:
      $ref: "#/components/schemas/ghost"
"##,
        );
        let result = resolve_dependencies(&names(&["charge", "missing"]), &table);
        assert_eq!(result, names(&["charge", "ghost", "missing"]));
        assert_eq!(dangling_refs(&result, &table), names(&["ghost", "missing"]));
    }

    #[test]
    fn empty_initial_set() {
        let table = schemas("charge: {type: object}");
        assert!(resolve_dependencies(&BTreeSet::new(), &table).is_empty());
    }

    #[test]
    fn idempotent_on_closed_set() {
        let table = schemas(
            r##"
a:
  $ref: "#/components/schemas/b"
b:
  items:
    - $ref: "#/components/schemas/c"
c:
  type: string
"##,
        );
        let once = resolve_dependencies(&names(&["a"]), &table);
        let twice = resolve_dependencies(&once, &table);
        assert_eq!(once, twice);
        assert_eq!(once, names(&["a", "b", "c"]));
    }
}
