use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;

use pr_reviewers_loadtest::commands::config::handle_config;
use pr_reviewers_loadtest::commands::run::handle_run;
use pr_reviewers_loadtest::commands::smoke::handle_smoke;
use pr_reviewers_loadtest::constants::THRESHOLDS_FAILED_EXIT_CODE;
use pr_reviewers_loadtest::logging::{get_log_file_path, init_logging, install_panic_hook};
use pr_reviewers_loadtest::LoadTestError;

fn target_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("Configuration file (defaults to ~/.pr-loadtest.json)"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Service base URL, e.g. http://localhost:8080/api/v1"),
        )
}

fn cli() -> Command {
    Command::new("pr-loadtest")
        .about("Load generator for the PR reviewers service")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Debug-level logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .global(true)
                .help("Write logs to a file in the cache directory instead of stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            target_args(Command::new("run").about("Run the team and pull request scenarios"))
                .arg(
                    Arg::new("rate")
                        .long("rate")
                        .short('r')
                        .value_name("N")
                        .help("Iterations per time unit, for every scenario"),
                )
                .arg(
                    Arg::new("duration")
                        .long("duration")
                        .short('d')
                        .value_name("SECS")
                        .help("Scenario duration in seconds"),
                )
                .arg(
                    Arg::new("max-vus")
                        .long("max-vus")
                        .value_name("N")
                        .help("Maximum concurrent iterations per scenario"),
                )
                .arg(
                    Arg::new("pacing-ms")
                        .long("pacing-ms")
                        .value_name("MS")
                        .help("Pause at the end of each iteration"),
                )
                .arg(
                    Arg::new("only")
                        .long("only")
                        .value_name("WORKFLOW")
                        .value_parser(["team", "pr"])
                        .help("Run only the scenarios for one workflow"),
                ),
        )
        .subcommand(target_args(
            Command::new("smoke").about("Run setup and one iteration of each workflow"),
        ))
        .subcommand(
            Command::new("config")
                .about("Show or initialize the configuration")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_name("PATH")
                        .help("Configuration file to show"),
                )
                .arg(
                    Arg::new("init")
                        .long("init")
                        .help("Write the default configuration to ~/.pr-loadtest.json")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .requires("init")
                        .help("Overwrite an existing configuration file")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn report_error(e: &LoadTestError) -> i32 {
    eprintln!("{} {}", "Error:".red().bold(), e);
    tracing::error!(error = %e, fatal = e.is_fatal(), "aborting");
    if let Some(path) = get_log_file_path() {
        eprintln!("Details in {}", path.display());
    }
    1
}

async fn dispatch(matches: &ArgMatches) -> i32 {
    match matches.subcommand() {
        Some(("run", sub_matches)) => match handle_run(sub_matches).await {
            Ok(true) => 0,
            Ok(false) => THRESHOLDS_FAILED_EXIT_CODE,
            Err(e) => report_error(&e),
        },
        Some(("smoke", sub_matches)) => match handle_smoke(sub_matches).await {
            Ok(true) => 0,
            Ok(false) => 1,
            Err(e) => report_error(&e),
        },
        Some(("config", sub_matches)) => match handle_config(sub_matches).await {
            Ok(()) => 0,
            Err(e) => report_error(&e),
        },
        _ => unreachable!("subcommand_required is set"),
    }
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();

    if let Err(e) = init_logging(matches.get_flag("verbose"), matches.get_flag("log-file")) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }
    install_panic_hook();

    let code = dispatch(&matches).await;
    process::exit(code);
}
