//! Input port for the historical transaction log.

use crate::domain::TransactionLog;
use crate::error::IngestError;

/// Supplies the complete transaction log for a mining run.
///
/// Implementations skip malformed records, log them, and report them in
/// [`TransactionLog::skipped`]; only failures affecting the source as a
/// whole are returned as errors.
pub trait TransactionSource: Send + Sync {
    /// Load every transaction.
    fn load(&self) -> Result<TransactionLog, IngestError>;

    /// Human-readable location, for logs and CLI output.
    fn location(&self) -> String;
}
