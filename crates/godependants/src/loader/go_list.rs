//! `go list`-backed package loader.
//!
//! `go list -json` prints one JSON object per package, concatenated without
//! separators; [`parse_package_stream`] decodes that stream. Loading the
//! module uses `-deps` so the records cover the module's packages and their
//! entire dependency closure, and `-e` so per-package failures surface as
//! `Error` fields in the output instead of aborting the listing.

use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use super::PackageLoader;
use crate::error::{Error, PackageError, Result};
use crate::types::{CurrentPackage, Package};

/// Loads packages by invoking the `go` tool found on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoListLoader;

impl GoListLoader {
    /// Create a loader that invokes `go list`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn go_list(dir: &Path, args: &[&str]) -> Result<Vec<u8>> {
        let output = Command::new("go")
            .arg("list")
            .args(args)
            .current_dir(dir)
            .output()?;

        if !output.status.success() {
            return Err(Error::Toolchain {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

impl PackageLoader for GoListLoader {
    fn current_package(&self, dir: &Path) -> Result<CurrentPackage> {
        let stdout = Self::go_list(dir, &["-json", "."])?;
        let (packages, _) = parse_package_stream(&stdout)?;

        let package = match <[Package; 1]>::try_from(packages) {
            Ok([package]) => package,
            Err(packages) => {
                return Err(Error::Config(format!(
                    "wrong number of packages loaded: wanted 1, got {}",
                    packages.len()
                )));
            }
        };

        let Some(module) = package.module else {
            return Err(Error::Config(
                "current package is not located within a module".to_string(),
            ));
        };

        Ok(CurrentPackage {
            import_path: package.import_path,
            module,
        })
    }

    fn load_packages(&self, dir: &Path) -> Result<Vec<Package>> {
        let stdout = Self::go_list(dir, &["-e", "-deps", "-json", "./..."])?;
        let (packages, errors) = parse_package_stream(&stdout)?;

        if !errors.is_empty() {
            return Err(Error::Load(errors));
        }

        debug!(packages = packages.len(), "loaded package closure");
        Ok(packages)
    }
}

/// One package object of `go list -json` output, narrowed to the fields the
/// analysis needs. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawPackage {
    import_path: String,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    module: Option<RawModule>,
    #[serde(default)]
    error: Option<RawPackageError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawModule {
    path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawPackageError {
    err: String,
}

/// Decode a `go list -json` object stream into package records and the
/// per-package errors the toolchain embedded in it.
///
/// # Errors
///
/// Fails only when the stream itself is malformed JSON; toolchain-reported
/// package failures are returned as data, not as an `Err`.
fn parse_package_stream(stdout: &[u8]) -> Result<(Vec<Package>, Vec<PackageError>)> {
    let mut packages = Vec::new();
    let mut errors = Vec::new();

    for raw in serde_json::Deserializer::from_slice(stdout).into_iter::<RawPackage>() {
        let raw = raw?;
        if let Some(error) = raw.error {
            errors.push(PackageError::new(&raw.import_path, error.err));
        }
        packages.push(Package {
            import_path: raw.import_path,
            imports: raw.imports,
            module: raw.module.map(|m| m.path),
        });
    }

    Ok((packages, errors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_concatenated_object_stream() {
        let stdout = br#"
            {
                "ImportPath": "example.com/app/a",
                "Module": {"Path": "example.com/app", "Main": true},
                "Imports": ["fmt", "github.com/x/lib"]
            }
            {
                "ImportPath": "fmt",
                "Standard": true,
                "Imports": ["errors"]
            }
        "#;

        let (packages, errors) = parse_package_stream(stdout).expect("stream should parse");

        assert!(errors.is_empty());
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].import_path, "example.com/app/a");
        assert_eq!(packages[0].module.as_deref(), Some("example.com/app"));
        assert_eq!(packages[0].imports, vec!["fmt", "github.com/x/lib"]);
        assert_eq!(packages[1].module, None);
    }

    #[test]
    fn surfaces_embedded_package_errors_as_data() {
        let stdout = br#"
            {"ImportPath": "example.com/app/ok", "Imports": []}
            {
                "ImportPath": "example.com/app/broken",
                "Error": {"ImportStack": [], "Pos": "x.go:1", "Err": "expected declaration"}
            }
        "#;

        let (packages, errors) = parse_package_stream(stdout).expect("stream should parse");

        assert_eq!(packages.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].import_path, "example.com/app/broken");
        assert!(errors[0].message.contains("expected declaration"));
    }

    #[test]
    fn rejects_malformed_stream() {
        let result = parse_package_stream(b"{\"ImportPath\": ");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn empty_stream_yields_no_packages() {
        let (packages, errors) = parse_package_stream(b"").expect("empty stream is valid");
        assert!(packages.is_empty());
        assert!(errors.is_empty());
    }
}
