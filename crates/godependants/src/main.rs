//! godependants CLI - list module-local dependants of external Go packages.
//!
//! The binary is a thin shell over [`Analysis`]: parse flags, load and
//! analyze the module once, print one package per line on stdout.
//! Diagnostics go to stderr via `tracing` and disappear under `--quiet`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use godependants::{Analysis, Error, GoListLoader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// godependants: which packages in this module depend on package X?
#[derive(Parser)]
#[command(name = "godependants")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Packages to query, directory-relative ("./store") or fully
    /// qualified; defaults to the current package
    packages: Vec<String>,

    /// Directory to resolve the module and its packages from
    /// (defaults to the current directory)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Only list direct dependants (skip the transitive closure)
    #[arg(long)]
    direct: bool,

    /// Suppress diagnostic output on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.quiet {
        "off"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let dir = match cli.dir.clone() {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!(
                    "{}: failed to get current directory: {e}",
                    "error".red().bold()
                );
                return ExitCode::FAILURE;
            }
        },
    };

    match run(&cli, &dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Load(errors)) => {
            // Partial load failures: report every package, then fail.
            for error in &errors {
                eprintln!("{}: {error}", "error".red().bold());
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, dir: &Path) -> godependants::Result<()> {
    let analysis = Analysis::load(&GoListLoader::new(), dir)?;

    if cli.packages.is_empty() {
        // Assume the current package is the one to get the dependants of.
        let current = analysis.current_package().to_string();
        let dependants: BTreeSet<String> = if cli.direct {
            analysis.direct_dependants(&current).iter().cloned().collect()
        } else {
            analysis.dependants_of(&current)
        };
        print_packages(&dependants);
        return Ok(());
    }

    let mut to_print = BTreeSet::new();
    for arg in &cli.packages {
        let pkg = match analysis.clean_package_path(arg) {
            Ok(pkg) => pkg,
            Err(e) => {
                warn!(package = %arg, error = %e, "clean package path failed, skipping");
                continue;
            }
        };

        if !analysis.contains(&pkg) {
            warn!(package = %pkg, "no such package in module, skipping");
            continue;
        }

        if cli.direct {
            to_print.extend(analysis.direct_dependants(&pkg).iter().cloned());
        } else {
            to_print.extend(analysis.dependants_of(&pkg));
        }
    }
    print_packages(&to_print);

    Ok(())
}

fn print_packages(packages: &BTreeSet<String>) {
    for name in packages {
        println!("{name}");
    }
}
