//! Parsing of the process risk listing.
//!
//! The kernel module prints a two-line table header followed by one line per
//! process:
//!
//! ```text
//! PID      | '%'CPU | SYSCALLS  | Input     | Output    | Sockets | Prio  | Risco | Score
//! ---------+--------+-----------+-----------+-----------+---------+-------+--------+--------
//! 1        | 0     | 4521       | 12        | 3         | 0       | 120   | Medio | 6
//! ```
//!
//! Only the first whitespace-delimited token (the PID) is structurally
//! relied upon. Everything else is an opaque payload logged verbatim.

/// Number of leading lines skipped on every read
pub const HEADER_LINES: usize = 2;

const COLUMN_SEPARATOR: char = '|';
const RISK_COLUMN: usize = 7;
const SCORE_COLUMN: usize = 8;

/// Risk tier assigned by the kernel module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Parse the label the kernel module writes in its `Risco` column
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Baixo" => Some(RiskLevel::Low),
            "Medio" => Some(RiskLevel::Medium),
            "Alto" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

/// One full read of the listing source
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    text: &'a str,
}

impl<'a> Listing<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Data lines after the header, each keeping its line terminator
    ///
    /// Only `\n` splits lines; a CRLF listing keeps the `\r` in each record.
    pub fn records(&self) -> impl Iterator<Item = ProcessRiskRecord<'a>> + 'a {
        self.text
            .split_inclusive('\n')
            .skip(HEADER_LINES)
            .map(ProcessRiskRecord::new)
    }
}

/// A single data line of the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessRiskRecord<'a> {
    line: &'a str,
}

impl<'a> ProcessRiskRecord<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line }
    }

    /// The line exactly as read, including its newline if present
    pub fn raw(&self) -> &'a str {
        self.line
    }

    /// First whitespace-delimited token
    pub fn pid(&self) -> Option<&'a str> {
        self.line.split_whitespace().next()
    }

    /// Case-sensitive substring match over the whole line
    pub fn matches(&self, marker: &str) -> bool {
        self.line.contains(marker)
    }

    /// Risk tier from the table's `Risco` column, when the line follows the table layout
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.column(RISK_COLUMN).and_then(RiskLevel::from_label)
    }

    /// Behavior score from the table's last column
    pub fn score(&self) -> Option<u32> {
        self.column(SCORE_COLUMN)?.parse().ok()
    }

    fn column(&self, index: usize) -> Option<&'a str> {
        self.line
            .split(COLUMN_SEPARATOR)
            .nth(index)
            .map(str::trim)
    }
}
