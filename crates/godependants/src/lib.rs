//! # godependants: module-local dependants of external Go packages
//!
//! Given a Go module, godependants answers "which of my packages depend,
//! directly or transitively, on external package X?" — where external means
//! hosted outside the standard library. It loads the module's package
//! closure once via the Go toolchain, builds an in-memory dependant map
//! restricted to external import paths, prunes packages the module never
//! reaches, and resolves transitive closures over the result.
//!
//! ## Design Philosophy
//!
//! - **Library first, CLI second** - the binary is a thin shell over
//!   [`Analysis`]
//! - **Pure core** - everything after the one toolchain call is in-process
//!   data transformation, single-threaded, no I/O
//! - **Loader behind a trait** - [`PackageLoader`] keeps the toolchain at
//!   the edge; tests run against in-memory fixtures
//!
//! ## Quick Start
//!
//! ```no_run
//! use godependants::{Analysis, GoListLoader};
//! use std::path::Path;
//!
//! let analysis = Analysis::load(&GoListLoader::new(), Path::new("."))?;
//! for pkg in analysis.dependants_of("github.com/x/lib") {
//!     println!("{pkg}");
//! }
//! # Ok::<(), godependants::Error>(())
//! ```

mod error;
pub mod graph;
mod loader;
mod types;

pub use error::{Error, PackageError, Result};
pub use loader::{GoListLoader, PackageLoader};
pub use types::{CurrentPackage, DependantMap, Package};

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info};

/// A loaded, filtered view of one module's external dependant graph.
///
/// Construction performs the whole pipeline once: resolve the current
/// package and module, load the package closure, build the dependant map,
/// and prune entries no module-local package depends on. All queries
/// afterwards are pure lookups.
pub struct Analysis {
    module: String,
    current_package: String,
    dependants: DependantMap,
}

impl Analysis {
    /// Load and analyze the module rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Propagates the loader's errors: fatal configuration failures
    /// (no package at `dir`, package outside a module, toolchain missing)
    /// and [`Error::Load`] when individual packages fail to load.
    pub fn load(loader: &dyn PackageLoader, dir: &Path) -> Result<Self> {
        let current = loader.current_package(dir)?;
        info!(module = %current.module, "resolved module");

        let packages = loader.load_packages(dir)?;
        let all_dependants = graph::collect_dependants(&packages);
        let dependants = graph::retain_module_relevant(&current.module, &all_dependants);

        for (pkg, importers) in &dependants {
            debug!(package = %pkg, dependants = ?importers, "dependant map entry");
        }

        Ok(Self {
            module: current.module,
            current_package: current.import_path,
            dependants,
        })
    }

    /// Path of the analyzed module.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Import path of the package the analysis was rooted at.
    #[must_use]
    pub fn current_package(&self) -> &str {
        &self.current_package
    }

    /// Whether `pkg` has an entry in the filtered dependant map.
    #[must_use]
    pub fn contains(&self, pkg: &str) -> bool {
        self.dependants.contains_key(pkg)
    }

    /// Packages that import `pkg` directly. Empty when `pkg` has no entry.
    #[must_use]
    pub fn direct_dependants(&self, pkg: &str) -> &[String] {
        self.dependants.get(pkg).map_or(&[], Vec::as_slice)
    }

    /// Packages that depend on `pkg` directly or transitively.
    #[must_use]
    pub fn dependants_of(&self, pkg: &str) -> BTreeSet<String> {
        graph::dependants_of(pkg, &self.dependants)
    }

    /// The filtered dependant map itself.
    #[must_use]
    pub fn dependant_map(&self) -> &DependantMap {
        &self.dependants
    }

    /// Normalize a user-supplied package argument.
    ///
    /// Arguments starting with `./` are rewritten relative to the module
    /// (`./store` in module `example.com/app` becomes `example.com/app/store`);
    /// anything else passes through unchanged.
    ///
    /// # Errors
    ///
    /// Currently always succeeds; the `Result` is reserved for future
    /// argument validation.
    pub fn clean_package_path(&self, arg: &str) -> Result<String> {
        let Some(rest) = arg.strip_prefix("./") else {
            return Ok(arg.to_string());
        };

        let rest = rest.trim_end_matches('/');
        let cleaned = if rest.is_empty() {
            self.module.clone()
        } else {
            format!("{}/{rest}", self.module)
        };
        debug!(cleaned = %cleaned, "normalized package argument");
        Ok(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn analysis_for_module(module: &str) -> Analysis {
        Analysis {
            module: module.to_string(),
            current_package: module.to_string(),
            dependants: DependantMap::new(),
        }
    }

    #[rstest]
    #[case::relative("./store", "example.com/app/store")]
    #[case::relative_nested("./internal/store", "example.com/app/internal/store")]
    #[case::relative_trailing_slash("./store/", "example.com/app/store")]
    #[case::bare_relative("./", "example.com/app")]
    #[case::already_qualified("github.com/x/lib", "github.com/x/lib")]
    #[case::module_local_qualified("example.com/app/store", "example.com/app/store")]
    fn clean_package_path_rewrites_directory_relative_args(
        #[case] arg: &str,
        #[case] expected: &str,
    ) {
        let analysis = analysis_for_module("example.com/app");
        let cleaned = analysis
            .clean_package_path(arg)
            .expect("normalization always succeeds");
        assert_eq!(cleaned, expected);
    }

    #[test]
    fn direct_dependants_of_unknown_package_is_empty() {
        let analysis = analysis_for_module("example.com/app");
        assert!(analysis.direct_dependants("github.com/x/lib").is_empty());
        assert!(!analysis.contains("github.com/x/lib"));
    }
}
