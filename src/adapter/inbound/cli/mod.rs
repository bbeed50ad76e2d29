//! Command-line adapter: argument parsing, dispatch and rendering.

pub mod command;
pub mod config;
pub mod diagnostic;
pub mod mine;
pub mod output;
pub mod paths;
pub mod recommend;
pub mod rules;

use std::path::PathBuf;

use tracing::debug;

use self::command::{Cli, Commands, ConfigCommand, MiningArgs, RulesCommand, StoreArgs};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;

/// Exit status for success, including "no recommendation".
pub const EXIT_OK: u8 = 0;
/// Exit status for faults: configuration, I/O, store or mining errors.
pub const EXIT_FAULT: u8 = 1;
/// Exit status for a rejected query.
pub const EXIT_INVALID_QUERY: u8 = 2;

/// Exit status for a failed command.
#[must_use]
pub fn exit_code(err: &Error) -> u8 {
    match err {
        Error::Query(_) => EXIT_INVALID_QUERY,
        _ => EXIT_FAULT,
    }
}

/// Apply the global output flags.
pub fn configure(cli: &Cli) {
    output::configure(
        output::OutputConfig::new(cli.json, cli.quiet, cli.verbose),
        &cli.color,
    );
}

/// Run the parsed command.
///
/// # Errors
///
/// Returns the first error the command hits; the caller renders it and maps
/// it to an exit status with [`exit_code`].
pub fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show) => {
            let (config, source) = load_config(cli.config.as_ref())?;
            config::execute_show(&config, source.as_ref())
        }
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(cli.config.as_ref()),
        Commands::Mine(args) => {
            let config = prepare(cli, &args.mining, &args.store)?;
            mine::execute(&config)
        }
        Commands::Recommend(args) => {
            let config = prepare(cli, &args.mining, &args.store)?;
            recommend::execute(&config, args)
        }
        Commands::Rules(RulesCommand::Show(args)) => {
            let config = prepare(cli, &MiningArgs::default(), &args.store)?;
            rules::execute_show(&config, args.limit)
        }
        Commands::Rules(RulesCommand::Check(store)) => {
            let config = prepare(cli, &MiningArgs::default(), store)?;
            rules::execute_check(&config)
        }
    }
}

/// Load the configuration for a command.
///
/// An explicit path must exist. Without one, `./codemine.toml` and then
/// `~/.codemine/config.toml` are tried; if neither exists the defaults are
/// used. Returns the file actually read, if any.
///
/// # Errors
///
/// Fails when the chosen file cannot be read, parsed or validated.
pub fn load_config(explicit: Option<&PathBuf>) -> Result<(Config, Option<PathBuf>)> {
    let path = match explicit {
        Some(path) => Some(path.clone()),
        None => paths::discover_config(),
    };
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration");
            Ok((Config::load(&path)?, Some(path)))
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok((Config::default(), None))
        }
    }
}

/// Apply command-line overrides on top of the loaded configuration.
///
/// # Errors
///
/// Fails when an override is out of range.
pub fn apply_overrides(config: &mut Config, mining: &MiningArgs, store: &StoreArgs) -> Result<()> {
    if let Some(path) = &mining.transactions {
        config.transactions.path = path.clone();
    }
    if let Some(format) = mining.format {
        config.transactions.format = format.into();
    }
    if let Some(value) = mining.min_support {
        config.mining.min_support = value;
    }
    if let Some(value) = mining.min_confidence {
        config.mining.min_confidence = value;
    }
    if let Some(value) = mining.max_len {
        config.mining.max_itemset_len = Some(value);
    }
    if let Some(value) = mining.max_candidates {
        config.mining.max_candidates = value;
    }
    if let Some(path) = &store.store {
        config.store.path = path.clone();
    }
    config.validate()
}

fn prepare(cli: &Cli, mining: &MiningArgs, store: &StoreArgs) -> Result<Config> {
    let (mut config, _) = load_config(cli.config.as_ref())?;
    apply_overrides(&mut config, mining, store)?;
    init_logging(&config);
    Ok(config)
}

/// Initialize logging, letting `-v` and `--quiet` adjust the configured level.
fn init_logging(config: &Config) {
    let logging = match (output::is_quiet(), output::verbosity()) {
        (true, _) => config.logging.with_level("error"),
        (false, 0) => config.logging.clone(),
        (false, 1) => config.logging.with_level("debug"),
        (false, _) => config.logging.with_level("trace"),
    };
    logging.init();
}
