//! Shared helpers for command handlers.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, the action is refused unless `--yes` is set.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Short human timestamp, or `-`.
pub fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn yes_flag_skips_the_prompt() {
        assert!(matches!(confirm("Really?", "delete user", true), Ok(true)));
    }

    #[test]
    fn timestamps_are_minute_precision() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 10, 5, 59).single();
        assert_eq!(timestamp(t), "2024-03-01 10:05");
        assert_eq!(timestamp(None), "-");
    }
}
