//! JSON file rule store.
//!
//! The rule set is written inside a small versioned envelope. Writes go to a
//! sibling temp file which is synced and then renamed over the target, so a
//! reader sees either the previous file or the complete new one.
//!
//! Floats are written in shortest round-trip form and parsed back exactly,
//! so every statistic survives a save/load cycle bit for bit.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::RuleSet;
use crate::error::StoreError;
use crate::port::outbound::store::RuleStore;

/// Current rule file format version.
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct RuleFileOut<'a> {
    format_version: u32,
    rule_count: usize,
    rule_set: &'a RuleSet,
}

#[derive(Deserialize)]
struct RuleFileIn {
    format_version: u32,
    rule_count: usize,
    rule_set: RuleSet,
}

/// File-backed [`RuleStore`].
#[derive(Debug, Clone)]
pub struct JsonRuleStore {
    path: PathBuf,
}

impl JsonRuleStore {
    /// Create a store writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the rule file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.location(),
            source,
        }
    }

    fn corrupt(&self, reason: impl Into<String>) -> StoreError {
        StoreError::Corrupt {
            path: self.location(),
            reason: reason.into(),
        }
    }
}

impl RuleStore for JsonRuleStore {
    fn save(&self, rules: &RuleSet) -> Result<(), StoreError> {
        let envelope = RuleFileOut {
            format_version: FORMAT_VERSION,
            rule_count: rules.len(),
            rule_set: rules,
        };
        let json =
            serde_json::to_vec_pretty(&envelope).map_err(|e| StoreError::Encode(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let temp_path = self.temp_path();
        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            self.io_error(e)
        };

        let mut file = fs::File::create(&temp_path).map_err(|e| self.io_error(e))?;
        file.write_all(&json).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        info!(
            path = %self.path.display(),
            rules = rules.len(),
            bytes = json.len(),
            "Rule set saved"
        );
        Ok(())
    }

    fn load(&self) -> Result<RuleSet, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    path: self.location(),
                })
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let envelope: RuleFileIn =
            serde_json::from_slice(&bytes).map_err(|e| self.corrupt(e.to_string()))?;

        if envelope.format_version != FORMAT_VERSION {
            return Err(self.corrupt(format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                envelope.format_version
            )));
        }
        if envelope.rule_count != envelope.rule_set.len() {
            return Err(self.corrupt(format!(
                "header declares {} rules but file holds {}",
                envelope.rule_count,
                envelope.rule_set.len()
            )));
        }
        envelope
            .rule_set
            .validate()
            .map_err(|(index, e)| self.corrupt(format!("rule {index}: {e}")))?;

        debug!(path = %self.path.display(), rules = envelope.rule_count, "Rule set loaded");
        Ok(envelope.rule_set)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
