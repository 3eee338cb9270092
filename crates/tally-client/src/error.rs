use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::{ImportIssue, ImportSummary};

pub(crate) const IMPORT_HELP_COMMAND: &str = "tally import --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `tally {cmd} --help` for usage."),
            None => "Run `tally --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn import_schema_mismatch(expected_headers: Vec<String>, actual_headers: Vec<String>) -> Self {
        Self::new(
            "import_schema_mismatch",
            "CSV headers do not match the transactions schema.",
            vec![
                "Include every expected header exactly once.".to_string(),
                "Do not include unknown headers.".to_string(),
                format!("Run `{IMPORT_HELP_COMMAND}` to review the expected columns."),
            ],
        )
        .with_data(json!({
            "expected_headers": expected_headers,
            "actual_headers": actual_headers,
            "help_command": IMPORT_HELP_COMMAND,
        }))
    }

    pub fn import_validation_failed(summary: ImportSummary, issues: Vec<ImportIssue>) -> Self {
        let issue_count = summary.rows_invalid;
        Self::new(
            "import_validation_failed",
            &format!("Import failed validation: {issue_count} rows need fixes. No rows were written."),
            vec![
                "Fix the listed issues in your source file.".to_string(),
                "Then rerun tally import <path>.".to_string(),
            ],
        )
        .with_data(json!({
            "summary": summary,
            "issues": issues,
            "help_command": IMPORT_HELP_COMMAND,
        }))
    }

    pub fn import_source_unreadable(path: &str, detail: &str) -> Self {
        Self::invalid_argument_with_recovery(
            &format!("Failed to read import file `{path}`: {detail}"),
            vec!["Check the file path and read permissions, then retry.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn internal_pattern(message: &str) -> Self {
        Self::new("internal_pattern_error", message, Vec::new())
    }

    pub fn store_init_permission_denied(path: &Path, detail: &str) -> Self {
        Self::at_store(
            "store_init_permission_denied",
            path,
            |location| format!("Cannot initialize store at `{location}`: {detail}"),
            |location| {
                vec![format!(
                    "Grant write access to `{location}` or set `TALLY_HOME` to a writable directory."
                )]
            },
        )
    }

    pub fn store_locked(path: &Path) -> Self {
        Self::at_store(
            "store_locked",
            path,
            |location| format!("Store database is locked at `{location}`."),
            |location| vec![format!("Wait for the other `tally` process using `{location}` to finish, then retry.")],
        )
    }

    pub fn store_corrupt(path: &Path) -> Self {
        Self::at_store(
            "store_corrupt",
            path,
            |location| format!("Store database at `{location}` is unreadable or missing schema objects."),
            |location| {
                vec![
                    format!("Move `{location}` aside."),
                    "Then rerun `tally import <path>` to rebuild the store.".to_string(),
                ]
            },
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        Self::at_store(
            "migration_failed",
            path,
            |location| format!("Could not bring the store at `{location}` up to date: {detail}"),
            |_| vec!["Remove conflicting tables or indexes named in the details, then retry.".to_string()],
        )
    }

    pub fn store_init_failed(path: &Path, detail: &str) -> Self {
        Self::at_store(
            "store_init_failed",
            path,
            |location| format!("Could not set up the store at `{location}`: {detail}"),
            |_| Vec::new(),
        )
    }

    fn at_store(
        code: &str,
        path: &Path,
        message: impl FnOnce(&str) -> String,
        recovery_steps: impl FnOnce(&str) -> Vec<String>,
    ) -> Self {
        let location = path.display().to_string();
        Self::new(code, &message(&location), recovery_steps(&location))
            .with_data(json!({ "path": location }))
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
            || matches!(
                self.code.as_str(),
                "store_init_permission_denied"
                    | "store_locked"
                    | "store_corrupt"
                    | "migration_failed"
                    | "store_init_failed"
            )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
