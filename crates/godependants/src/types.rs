//! Domain types for dependant analysis.
//!
//! These types represent the loaded build graph:
//! - **Entities**: [`Package`], [`CurrentPackage`] (produced by the loader)
//! - **Derived**: [`DependantMap`] (built once per invocation by `graph`)

use std::collections::BTreeMap;

/// A package record as reported by the build toolchain.
///
/// Immutable once loaded; the graph layer only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Import path uniquely identifying the package within the build graph
    /// (e.g. `github.com/x/lib/internal`).
    pub import_path: String,
    /// Import paths of the packages this package imports directly,
    /// in the order the toolchain reported them.
    pub imports: Vec<String>,
    /// Path of the module this package belongs to, when the toolchain
    /// reports one. Standard-library packages have none.
    pub module: Option<String>,
}

impl Package {
    /// Create a package record from an import path and its direct imports.
    #[must_use]
    pub fn new(import_path: impl Into<String>, imports: Vec<String>) -> Self {
        Self {
            import_path: import_path.into(),
            imports,
            module: None,
        }
    }
}

/// The package the tool was invoked from, with its enclosing module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPackage {
    /// Import path of the current package.
    pub import_path: String,
    /// Path of the module enclosing the current package.
    pub module: String,
}

/// Map from an external package to the external packages that import it
/// directly, in discovery order.
///
/// Keys are restricted to externally-classified packages whose importers are
/// also externally-classified; see `graph::collect_dependants`. A `BTreeMap`
/// keeps key iteration deterministic across runs.
pub type DependantMap = BTreeMap<String, Vec<String>>;
