//! Handler for the `config` command group.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;

use super::{load_config, output};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    if output::is_json() {
        output::json_output(json!({
            "command": "config.init",
            "path": path.display().to_string(),
        }));
        return Ok(());
    }
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!(
        "2. Run: codemine -c {} config validate",
        path.display()
    ));
    output::note(&format!("3. Run: codemine -c {} mine", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(config: &Config, source: Option<&PathBuf>) -> Result<()> {
    let source_label = source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "source": source_label,
            "config": serde_json::to_value(config)?,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Source", &source_label);

    output::section("Mining");
    output::field("Min support", config.mining.min_support);
    output::field("Min confidence", config.mining.min_confidence);
    output::field(
        "Max itemset",
        config
            .mining
            .max_itemset_len
            .map_or_else(|| "unlimited".to_string(), |n| n.to_string()),
    );
    output::field("Max candidates", config.mining.max_candidates);

    output::section("Transactions");
    output::field("Path", config.transactions.path.display());
    output::field("Format", config.transactions.format);

    output::section("Store");
    output::field("Path", config.store.path.display());
    output::field(
        "Rebuild",
        format!("{:?}", config.store.rebuild).to_lowercase(),
    );

    output::section("Recommend");
    output::field("Examples", config.recommend.coverage_examples);

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    if output::verbosity() > 0 {
        output::section("TOML");
        output::lines(&config.to_toml()?);
    }
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: Option<&PathBuf>) -> Result<()> {
    let (_, source) = load_config(path)?;
    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "valid": true,
            "source": source.as_ref().map(|p| p.display().to_string()),
        }));
        return Ok(());
    }

    output::section("Config Validation");
    match source {
        Some(path) => {
            output::field("Path", path.display());
            output::success("Config file is valid");
            output::field("Next", format!("codemine -c {} config show", path.display()));
        }
        None => {
            output::warning("No config file found; built-in defaults apply");
            output::hint("create one with `codemine config init`");
        }
    }
    Ok(())
}
