//! COVID trends CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use covid_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use covid_cli::commands::{run_cases, run_config, run_export, run_hospitalizations, run_summary};
use covid_cli::config::load_config;
use covid_cli::logging::{LogConfig, LogFormat, init_logging};
use covid_cli::pipeline::Session;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            tracing::error!("{error:#}");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    config
        .config
        .sources
        .apply_overrides(cli.cases.as_deref(), cli.hospitalizations.as_deref());
    let open_session = || Session::from_config(&config.config, cli.no_cache);
    match &cli.command {
        Command::Cases(args) => run_cases(&mut open_session()?, &config, args),
        Command::Hospitalizations(args) => {
            run_hospitalizations(&mut open_session()?, &config, args)
        }
        Command::Summary(args) => run_summary(&mut open_session()?, &config, args),
        Command::Export(args) => {
            for path in run_export(&mut open_session()?, args)? {
                println!("{}", path.display());
            }
            Ok(())
        }
        Command::Config => run_config(&config),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
