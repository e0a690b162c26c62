use colored::Colorize;

use crate::listing::ProcessRiskRecord;

const UNKNOWN_PID: &str = "?";

/// Console alert for one flagged listing line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// First token of the flagged line
    pub pid: String,
}

/// Emit color codes regardless of `NO_COLOR`, `CLICOLOR` or a non-terminal stdout
pub fn force_colors() {
    colored::control::set_override(true);
}

impl Alert {
    pub fn from_record(record: &ProcessRiskRecord<'_>) -> Self {
        Self {
            pid: record.pid().unwrap_or(UNKNOWN_PID).to_string(),
        }
    }

    /// Alert text in bright red, followed by a reset code
    ///
    /// Stays uncolored unless [`force_colors`] ran or the environment allows color.
    pub fn render(&self) -> String {
        format!(
            "\n{}",
            format!("Process PID: {} High Risk", self.pid).bright_red()
        )
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }
}
