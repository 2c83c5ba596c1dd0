//! pngcheck-poc — write malformed PNG/MNG files that reproduce known pngcheck defects.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use getopts::{Matches, Options};
use tracing::{debug, warn};

use pngcheck_poc::catalog::TargetRelease;
use pngcheck_poc::config::GeneratorConfig;
use pngcheck_poc::error::{constants, PocError, Result};
use pngcheck_poc::generator::{Generator, Progress, Selection};
use pngcheck_poc::utils::logging;

fn options() -> Options {
    let mut opts = Options::new();
    opts.optopt(
        "o",
        "output",
        "output file (single scenario) or directory ('all'); default poc-<name>.<png|mng>",
        "PATH",
    )
    .optopt("t", "target", "pngcheck release: 2.4.0, 3.0.0, 3.0.1", "RELEASE")
    .optopt("c", "config", "TOML configuration file", "FILE")
    .optflag("l", "list", "list the scenarios of the target release")
    .optflag("h", "help", "print this help");
    opts
}

fn usage(opts: &Options) -> String {
    opts.usage("Usage: pngcheck-poc [options] [SCENARIO|all]")
}

fn load_config(matches: &Matches) -> Result<GeneratorConfig> {
    let mut config = match matches.opt_str("c") {
        Some(path) => GeneratorConfig::from_file(path)?.with_env_overrides()?,
        None => GeneratorConfig::from_env()?,
    };

    if let Some(release) = matches.opt_str("t") {
        config.target.release = release.parse()?;
    }

    config.validate_strict()?;
    Ok(config)
}

fn print_list(release: TargetRelease) {
    println!("Scenarios for pngcheck {release}:");
    for scenario in release.scenarios() {
        println!(
            "  {:<9} {} {:<4}  {}",
            scenario.name,
            scenario.format.name(),
            scenario.chunk,
            scenario.summary
        );
    }
}

fn selection(matches: &Matches, release: TargetRelease) -> Result<Selection> {
    match (matches.free.as_slice(), release.scenarios()) {
        ([one], _) => Ok(Selection::parse(one)),
        // a release with a single scenario needs no name
        ([], [only]) => Ok(Selection::One(only.name.to_string())),
        ([], _) => Err(PocError::Usage(constants::ERR_MISSING_SELECTION.to_string())),
        _ => Err(PocError::Usage(constants::ERR_TOO_MANY_SELECTIONS.to_string())),
    }
}

fn run(matches: &Matches) -> Result<()> {
    let config = load_config(matches)?;
    if !logging::init(&config.logging) {
        warn!("logging already initialised, keeping existing subscriber");
    }
    debug!(?config, "configuration loaded");

    if matches.opt_present("l") {
        print_list(config.target.release);
        return Ok(());
    }

    let selection = selection(matches, config.target.release)?;
    let output = matches.opt_str("o").map(PathBuf::from);
    let generator = Generator::from_config(&config);

    generator.generate_with(&selection, output.as_deref(), |progress| match progress {
        Progress::Started(job) => {
            println!("Generating {} chunk vulnerability POC...", job.scenario.name)
        }
        Progress::Finished(file) => println!(
            "  wrote {} ({} bytes, trigger: {})",
            file.path.display(),
            file.bytes,
            file.command
        ),
    })?;

    if selection.is_all() {
        println!("POC files generated successfully");
    } else {
        println!("POC file generated successfully");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let opts = options();

    let matches = match opts.parse(&args) {
        Ok(matches) => matches,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{}", usage(&opts));
            return ExitCode::from(2);
        }
    };

    if matches.opt_present("h") {
        println!("{}", usage(&opts));
        return ExitCode::SUCCESS;
    }

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_usage() => {
            eprintln!("error: {err}");
            eprintln!("{}", usage(&opts));
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
