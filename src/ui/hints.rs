//! Next-step hints shown at the end of a run.

/// Hint after the prerequisite gate failed.
pub fn after_failed_prerequisites(failed: &[String]) -> String {
    if failed.is_empty() {
        return "Run `teardownm check` again once everything is installed.".to_string();
    }
    format!(
        "Missing: {}. Run `teardownm check` again once they are installed.",
        failed.join(", ")
    )
}

/// Hint after a successful `check`.
pub fn after_successful_check() -> &'static str {
    "Run `teardownm run` to set up the sledge workspaces."
}

/// Hint after a successful `run`.
pub fn after_successful_run() -> &'static str {
    "Re-running `teardownm run` is safe: existing folders are left untouched."
}

/// Hint after a fetch failure rolled back its directory.
pub fn after_failed_fetch() -> &'static str {
    "The partially created folder was removed; run `teardownm run` again to retry."
}
