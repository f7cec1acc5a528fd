//! Build tooling for iOS AUv3 plugin projects.
//!
//! Usage: cargo xtask prepare-ios [project-dir] [--xcconfig <path>] [--verbose]

mod util;

use std::path::{Path, PathBuf};

use auv3_resources::{load_deployment_target, prepare_ios_resources, BuildConfig, ProjectLayout};

use crate::util::{print_error, shorten_path};

/// Parsed command line for `prepare-ios`.
struct PrepareArgs {
    project_dir: PathBuf,
    xcconfig: Option<PathBuf>,
    verbose: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] != "prepare-ios" {
        print_usage();
        std::process::exit(1);
    }

    let args = match parse_args(&args[2..]) {
        Ok(args) => args,
        Err(e) => {
            print_error(&e);
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = prepare_ios(&args) {
        print_error(&e);
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: cargo xtask prepare-ios [project-dir] [--xcconfig <path>] [--verbose]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  prepare-ios    Update the iOS AUv3 and app Info.plist files");
    eprintln!("                 from the build config");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  project-dir    Plugin project root (default: current directory)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --xcconfig <path>    Shared iOS xcconfig");
    eprintln!("                       (default: <project-dir>/../../common-ios.xcconfig)");
    eprintln!("  -v, --verbose        Show the files read and written");
}

fn parse_args(args: &[String]) -> Result<PrepareArgs, String> {
    let mut project_dir = None;
    let mut xcconfig = None;
    let mut verbose = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" | "-v" => verbose = true,
            "--xcconfig" => {
                let path = iter.next().ok_or("--xcconfig requires a path")?;
                xcconfig = Some(PathBuf::from(path));
            }
            other if other.starts_with('-') => return Err(format!("Unknown option: {}", other)),
            other => {
                if project_dir.is_some() {
                    return Err(format!("Unexpected argument: {}", other));
                }
                project_dir = Some(PathBuf::from(other));
            }
        }
    }

    let project_dir = match project_dir {
        Some(dir) => dir,
        None => std::env::current_dir()
            .map_err(|e| format!("Failed to get current directory: {}", e))?,
    };

    Ok(PrepareArgs {
        project_dir,
        xcconfig,
        verbose,
    })
}

fn prepare_ios(args: &PrepareArgs) -> Result<(), String> {
    let verbose = args.verbose;

    let config = BuildConfig::load(&args.project_dir).map_err(|e| e.to_string())?;
    for warning in config.warnings() {
        status!("  Warning: {}", warning);
    }

    let layout = ProjectLayout::new(&args.project_dir, &config);
    report_deployment_target(args.xcconfig.as_deref(), &layout.common_xcconfig(), verbose)?;

    status!("Processing Info.plist files...");

    let report = prepare_ios_resources(&layout, &config).map_err(|e| e.to_string())?;

    verbose!(
        verbose,
        "    {} ({}, {})",
        report.extension.identifier,
        report.extension.component.component_type,
        report.extension.component.tags.join(", ")
    );
    verbose!(verbose, "    {}", report.app.identifier);
    for path in &report.written {
        verbose!(verbose, "    Wrote: {}", shorten_path(path));
    }

    Ok(())
}

/// The deployment target is only reported. An explicit `--xcconfig` must
/// exist; the default location may be absent.
fn report_deployment_target(
    explicit: Option<&Path>,
    default: &Path,
    verbose: bool,
) -> Result<(), String> {
    let path = match explicit {
        Some(path) => path,
        None if default.is_file() => default,
        None => {
            verbose!(verbose, "    No xcconfig at {}", shorten_path(default));
            return Ok(());
        }
    };

    let target = load_deployment_target(path).map_err(|e| e.to_string())?;
    verbose!(
        verbose,
        "    Deployment target: {} ({})",
        target.as_deref().unwrap_or("unset"),
        shorten_path(path)
    );
    Ok(())
}
