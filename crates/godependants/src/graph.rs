//! The dependant graph core.
//!
//! Everything in this module is a pure, in-memory transformation of loaded
//! [`Package`] records:
//!
//! | Operation | Algorithm |
//! |-----------|-----------|
//! | [`is_external`] | first-segment domain marker heuristic |
//! | [`collect_dependants`] | depth-first traversal with a visited set |
//! | [`retain_module_relevant`] | single-pass prefix filter |
//! | [`dependants_of`] | work-list reachability with a visited guard |

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, trace};

use crate::types::{DependantMap, Package};

/// Whether an import path refers to an external package, i.e. one hosted
/// outside the standard library.
///
/// Externally-hosted module paths begin with a domain name
/// (`github.com/x/lib`), so a path is classified external iff its first
/// path segment contains a `.`. Paths with no separator at all are standard
/// library packages (`fmt`, `net/http`'s `net` segment has no dot).
///
/// This is a heuristic: a path whose first segment happens to contain a
/// period without being externally hosted is misclassified, and that
/// approximation is accepted.
#[must_use]
pub fn is_external(import_path: &str) -> bool {
    match import_path.split_once('/') {
        Some((first_segment, _)) => first_segment.contains('.'),
        None => false,
    }
}

/// Build the dependant map for a loaded package set.
///
/// Traverses the package graph depth-first, expanding each package at most
/// once. Internal packages are never expanded: the standard library only
/// imports the standard library, so nothing of interest lies below them.
/// For every visited external package, each of its externally-classified
/// direct imports gains the visiting package as a dependant.
///
/// Imports that name packages absent from `packages` still receive the
/// dependant edge but cannot be traversed further.
#[must_use]
pub fn collect_dependants(packages: &[Package]) -> DependantMap {
    let by_path: HashMap<&str, &Package> = packages
        .iter()
        .map(|p| (p.import_path.as_str(), p))
        .collect();

    let mut dependants = DependantMap::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = Vec::new();

    // Seed with every loaded package; the visited set collapses this to the
    // same traversal as starting from the module's root packages, since the
    // loader returns exactly their dependency closure.
    for package in packages.iter().rev() {
        stack.push(&package.import_path);
    }

    while let Some(path) = stack.pop() {
        if !visited.insert(path) {
            continue;
        }
        if !is_external(path) {
            continue;
        }
        let Some(package) = by_path.get(path) else {
            trace!(package = path, "import not present in loaded set");
            continue;
        };

        for import in &package.imports {
            if is_external(import) {
                dependants
                    .entry(import.clone())
                    .or_default()
                    .push(package.import_path.clone());
            }
            stack.push(import);
        }
    }

    debug!(entries = dependants.len(), "collected dependant map");
    dependants
}

/// Keep only the entries some package of the local module depends on.
///
/// Returns a new map containing exactly the entries whose dependant list has
/// at least one identifier prefixed by `module`. Entries only reachable
/// through chains of other external packages are noise for "what in my
/// module depends on X" and are dropped.
///
/// This is a single pass over top-level entries: a kept entry may still list
/// dependants whose own entries were dropped, and no second pass re-checks
/// them. Known limitation, kept as-is.
#[must_use]
pub fn retain_module_relevant(module: &str, dependants: &DependantMap) -> DependantMap {
    dependants
        .iter()
        .filter(|(_, importers)| importers.iter().any(|dep| dep.starts_with(module)))
        .map(|(pkg, importers)| (pkg.clone(), importers.clone()))
        .collect()
}

/// All packages that directly or transitively depend on `start`.
///
/// Work-list traversal guarded by the result set itself, so it terminates
/// even when the dependant relation contains cycles. `start` is excluded
/// from the result unless it reappears as a dependant via a cycle. A `start`
/// absent from the map yields an empty set, not an error.
#[must_use]
pub fn dependants_of(start: &str, dependants: &DependantMap) -> BTreeSet<String> {
    let mut result = BTreeSet::new();
    let mut work: Vec<&str> = match dependants.get(start) {
        Some(direct) => direct.iter().map(String::as_str).collect(),
        None => return result,
    };

    while let Some(name) = work.pop() {
        if !result.insert(name.to_string()) {
            continue;
        }
        trace!(package = name, "adding dependant");
        if let Some(next) = dependants.get(name) {
            work.extend(next.iter().map(String::as_str));
        }
    }

    result
}
