//! Command-line interface definitions.
//!
//! Defines the CLI structure for codemine using `clap`: mining a rule set,
//! serving recommendations from it, inspecting it, and managing the
//! configuration file.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::paths;
use crate::adapter::outbound::file::TransactionFormat;
use crate::infrastructure::config::settings::CONFIG_ENV;

/// Association-rule mining and code recommendation
#[derive(Parser, Debug)]
#[command(name = "codemine")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mine the transaction log and replace the stored rule set
    Mine(MineArgs),

    /// Recommend codes for a query
    Recommend(RecommendArgs),

    /// Inspect the stored rule set
    #[command(subcommand)]
    Rules(RulesCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `codemine rules`.
#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// List stored rules with their statistics.
    Show(RulesShowArgs),
    /// Load and validate the stored rule set.
    Check(StoreArgs),
}

/// Subcommands for `codemine config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

/// Transaction file layout as accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum FormatArg {
    /// Header of codes, one presence flag per code per row
    OneHot,
    /// Each row lists the codes present
    Basket,
}

impl From<FormatArg> for TransactionFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::OneHot => Self::OneHot,
            FormatArg::Basket => Self::Basket,
        }
    }
}

/// Rule store location override.
#[derive(Args, Debug, Default, Clone)]
pub struct StoreArgs {
    /// Path of the rule set file.
    #[arg(long)]
    pub store: Option<PathBuf>,
}

/// Overrides for the mining run. Unset values come from the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct MiningArgs {
    /// Path of the transaction CSV.
    #[arg(long)]
    pub transactions: Option<PathBuf>,

    /// Layout of the transaction CSV.
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Minimum support, in (0, 1].
    #[arg(long)]
    pub min_support: Option<f64>,

    /// Minimum confidence, in [0, 1].
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Largest itemset size to enumerate.
    #[arg(long)]
    pub max_len: Option<usize>,

    /// Candidate count per level above which mining is aborted.
    #[arg(long)]
    pub max_candidates: Option<usize>,
}

/// Arguments for `codemine mine`.
#[derive(Args, Debug)]
pub struct MineArgs {
    #[command(flatten)]
    pub mining: MiningArgs,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for `codemine recommend`.
#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Codes the caller already has.
    #[arg(required_unless_present = "stdin")]
    pub codes: Vec<String>,

    /// Read one whitespace-separated query per line from stdin.
    #[arg(long, conflicts_with = "codes")]
    pub stdin: bool,

    /// Also list the rules that fired.
    #[arg(long)]
    pub explain: bool,

    /// Mine a fresh rule set and replace the stored one before serving.
    #[arg(long)]
    pub rebuild: bool,

    #[command(flatten)]
    pub mining: MiningArgs,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for `codemine rules show`.
#[derive(Args, Debug)]
pub struct RulesShowArgs {
    /// Show at most this many rules.
    #[arg(long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the `config init` subcommand.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}
