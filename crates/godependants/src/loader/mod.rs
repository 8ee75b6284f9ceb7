//! Package loading abstraction.
//!
//! The graph core is pure; everything that touches the Go toolchain sits
//! behind [`PackageLoader`]. The production implementation is
//! [`GoListLoader`], which shells out to `go list`. Tests substitute
//! in-memory fixtures.

mod go_list;

pub use go_list::GoListLoader;

use std::path::Path;

use crate::error::Result;
use crate::types::{CurrentPackage, Package};

/// Source of package records for a build module.
///
/// Implementations must surface per-package load failures as
/// [`Error::Load`](crate::Error::Load), distinct from fatal configuration
/// errors ([`Error::Config`](crate::Error::Config) and friends).
pub trait PackageLoader {
    /// Resolve the package at `dir` and the module enclosing it.
    ///
    /// # Errors
    ///
    /// Fails when `dir` holds no package, resolves to more than one package,
    /// or the package is not located within a module.
    fn current_package(&self, dir: &Path) -> Result<CurrentPackage>;

    /// Load every package of the module under `dir`, together with the full
    /// dependency closure (each record carries its direct imports).
    ///
    /// # Errors
    ///
    /// Fails fatally when the toolchain cannot run, and with
    /// [`Error::Load`](crate::Error::Load) when individual packages fail to
    /// load.
    fn load_packages(&self, dir: &Path) -> Result<Vec<Package>>;
}
