use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod errors;
mod operations;
mod state;
mod ui;

use errors::map_catalog_load_error;
use operations::{resolve_sort_request, write_sorted_catalog};
use state::AppState;
use ui::{format_listing, format_resolution};

/// Sort a product catalog by a member path chosen at run time
///
/// Examples:
///   # List products in catalog order
///   pathsort catalog.json
///
///   # Sort by a top-level member
///   pathsort catalog.json --sort Id
///
///   # Sort through a nested member, descending
///   pathsort catalog.json --sort SubCategory.Name:desc
///
///   # Sort by the first element of a collection member
///   pathsort catalog.json --sort ListSubCategory.DeepCategory.Name
///
///   # Check whether a path resolves without sorting
///   pathsort catalog.json --sort Tags.Label --check
#[derive(Parser, Debug)]
#[command(name = "pathsort")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Path Rules:\n  \
    - Segments are separated by '.' and matched case-insensitively\n  \
    - Underscores are optional: SubCategory matches sub_category\n  \
    - A collection member continues through its first element\n  \
    - A missing value along the path sorts as the leaf type's default\n  \
    - A path that does not resolve leaves the catalog order unchanged")]
struct Cli {
    /// Path to the catalog JSON file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Sort path with optional direction suffix (e.g. "SubCategory.Name:desc")
    #[arg(short, long = "sort", value_name = "PATH[:asc|:desc]")]
    sort: Option<String>,

    /// Read the sort path and direction from a JSON file
    #[arg(long = "sort-file", value_name = "FILE", conflicts_with = "sort")]
    sort_file: Option<PathBuf>,

    /// Only report how the sort path resolves against Product
    #[arg(long)]
    check: bool,

    /// Write the sorted catalog to this JSON file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Exit code of a `--check` whose path does not resolve
const UNRESOLVED_EXIT: u8 = 2;

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let mut state = AppState::new();

    if let Err(err) = state.load_from_file(cli.file.clone()) {
        let (title, message, details) = map_catalog_load_error(&*err, &cli.file);
        eprintln!("{}", title.red().bold());
        eprintln!("{}", message);
        eprintln!("\n{}", details.dimmed());
        return Ok(ExitCode::FAILURE);
    }

    let request = resolve_sort_request(cli.sort.as_deref(), cli.sort_file.as_deref())?;
    state.set_sort(request);

    if cli.check {
        let Some(request) = state.sort.as_ref() else {
            anyhow::bail!("--check needs a sort path (--sort or --sort-file)");
        };
        let report = format_resolution(&request.path);
        println!("{}", report.text);
        if !report.resolved {
            return Ok(ExitCode::from(UNRESOLVED_EXIT));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let listing = state.listing()?;

    if let Some(request) = &state.sort {
        if !listing.ordered {
            eprintln!(
                "{} sort path '{}' does not resolve on Product; keeping catalog order",
                "Warning:".yellow().bold(),
                request.path
            );
        }
    }

    println!("{}", format_listing(&state.title(), state.sort.as_ref(), &listing));

    if let Some(output) = &cli.output {
        write_sorted_catalog(&state, &listing, output)?;
        eprintln!(
            "{} wrote {} products to {}",
            "Saved:".green().bold(),
            listing.entries.len(),
            output.display()
        );
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn code_of(code: ExitCode) -> String {
        format!("{:?}", code)
    }

    fn catalog_file(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("catalog.json");
        let catalog = json!({
            "title": "Desk",
            "products": [
                {"id": 2, "name": "Lamp", "price": 30.0},
                {"id": 1, "name": "Pen", "price": 1.25}
            ]
        });
        std::fs::write(&path, catalog.to_string()).unwrap();
        path
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("pathsort").chain(args.iter().copied()))
    }

    #[test]
    fn test_run_sorts_and_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = catalog_file(dir.path());
        let output = dir.path().join("sorted.json");

        let code = run(&cli(&[
            input.to_str().unwrap(),
            "--sort",
            "Price",
            "-o",
            output.to_str().unwrap(),
        ]))
        .unwrap();
        assert_eq!(code_of(code), code_of(ExitCode::SUCCESS));

        let saved = pathsort_core::load_catalog(&output).unwrap();
        let ids: Vec<i64> = saved.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_run_check_reports_unresolved_path_as_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let input = catalog_file(dir.path());

        let code = run(&cli(&[input.to_str().unwrap(), "--sort", "Colour", "--check"])).unwrap();
        assert_eq!(code_of(code), code_of(ExitCode::from(UNRESOLVED_EXIT)));

        let code = run(&cli(&[input.to_str().unwrap(), "--sort", "Name", "--check"])).unwrap();
        assert_eq!(code_of(code), code_of(ExitCode::SUCCESS));
    }

    #[test]
    fn test_run_missing_catalog_returns_failure() {
        let code = run(&cli(&["/definitely/not/here.json"])).unwrap();
        assert_eq!(code_of(code), code_of(ExitCode::FAILURE));
    }

    #[test]
    fn test_run_check_without_sort_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = catalog_file(dir.path());

        assert!(run(&cli(&[input.to_str().unwrap(), "--check"])).is_err());
    }
}
