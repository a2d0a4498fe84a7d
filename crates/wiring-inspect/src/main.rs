//! `wiring-inspect` command line

use anyhow::Context as _;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use wiring_inspect::{init_logging, inspect_file, InspectConfig, PlanError};

fn cli() -> Command {
    let plan_arg = || {
        Arg::new("plan")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Wiring plan (TOML)")
    };

    Command::new("wiring-inspect")
        .version(wiring_inspect::VERSION)
        .about("Validate and render component wiring plans")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Inspector configuration file (TOML)"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Reject delegations a context does not list in `uses`"),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("check")
                .about("Validate a plan; exits 1 when it has problems")
                .arg(plan_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the report as JSON"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render a valid plan as delegate_components! source")
                .arg(plan_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write to FILE instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("manifest")
                .about("Print the resolved entries of a valid plan as JSON")
                .arg(plan_arg()),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<InspectConfig> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => InspectConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => InspectConfig::new(),
    };
    let strict = matches.get_flag("strict") || config.strict;
    Ok(config.with_strict(strict).with_env_overrides())
}

fn plan_path(args: &ArgMatches) -> anyhow::Result<&PathBuf> {
    args.get_one::<PathBuf>("plan")
        .context("missing plan argument")
}

fn run() -> anyhow::Result<ExitCode> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    // A subscriber may already be installed by an embedding process.
    let _ = init_logging(&config);

    match matches.subcommand() {
        Some(("check", args)) => {
            let path = plan_path(args)?;
            let (_, report) = inspect_file(path, &config)
                .with_context(|| format!("inspecting {}", path.display()))?;
            tracing::info!(
                plan = %path.display(),
                entries = report.entries.len(),
                problems = report.diagnostics.len(),
                "plan checked"
            );

            if args.get_flag("json") {
                println!("{}", config.to_json(&report)?);
            } else {
                print!("{}", report.generate_text());
            }
            Ok(if report.is_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(("render", args)) => {
            let path = plan_path(args)?;
            let (plan, report) = inspect_file(path, &config)
                .with_context(|| format!("inspecting {}", path.display()))?;
            let source = match config.renderer().render(&plan, &report) {
                Ok(source) => source,
                Err(PlanError::Invalid(report)) => {
                    eprint!("{}", report.generate_text());
                    return Ok(ExitCode::FAILURE);
                }
                Err(error) => return Err(error.into()),
            };

            match args.get_one::<PathBuf>("output") {
                Some(output) => {
                    std::fs::write(output, &source)
                        .with_context(|| format!("writing {}", output.display()))?;
                    tracing::info!(output = %output.display(), "plan rendered");
                }
                None => print!("{source}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(("manifest", args)) => {
            let path = plan_path(args)?;
            let (_, report) = inspect_file(path, &config)
                .with_context(|| format!("inspecting {}", path.display()))?;
            if !report.is_valid() {
                eprint!("{}", report.generate_text());
                return Ok(ExitCode::FAILURE);
            }
            println!("{}", config.to_json(&report.entries)?);
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
