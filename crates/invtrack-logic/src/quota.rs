//! Quota declarations: target quantities per item.
//!
//! Quotas are declared in the programmable block's custom data, one per line:
//!
//! ```text
//! Iron Ore 100000
//! SteelPlate 2500
//! ```
//!
//! The value is the last whitespace-delimited token on the line; everything
//! before it (trimmed) is the item name, so multi-word canonical names such as
//! `Iron Ore` can be declared. Bad lines are rejected one at a time and never
//! abort the parse.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Item name -> target quantity.
pub type QuotaTable = BTreeMap<String, f64>;

/// Why a quota line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Not a `<name> <value>` pair.
    WrongTokenCount,
    /// The value token is not a number.
    InvalidValue,
    /// The name was already declared on an earlier line.
    Duplicate,
}

/// A skipped quota line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaRejection {
    /// Zero-based line index in the configuration text.
    pub line_index: usize,
    /// The raw line as written.
    pub line: String,
    pub reason: RejectReason,
}

impl fmt::Display for QuotaRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            RejectReason::WrongTokenCount | RejectReason::InvalidValue => {
                write!(f, "{} is not a valid quota declaration", self.line)
            }
            RejectReason::Duplicate => {
                write!(f, "{} is a duplicate entry and will be ignored", self.line)
            }
        }
    }
}

/// Result of parsing quota text: the table plus every skipped line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotaParse {
    pub table: QuotaTable,
    pub rejected: Vec<QuotaRejection>,
}

/// Split a line into `(name, value_text)`.
///
/// Returns `None` when the line does not have a name part and a value part,
/// or when the name itself ends in a number.
fn split_declaration(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    let split_at = trimmed.rfind(char::is_whitespace)?;
    let name = trimmed[..split_at].trim_end();
    let value = trimmed[split_at..].trim_start();
    if name.is_empty() || value.is_empty() {
        return None;
    }
    // "Gold 5 10" has no single value token; a numeric tail on the name is ambiguous
    let name_tail = name.rsplit(char::is_whitespace).next().unwrap_or(name);
    if name_tail != name && name_tail.parse::<f64>().is_ok() {
        return None;
    }
    Some((name, value))
}

/// Parse a single declaration line.
pub fn parse_quota_line(line: &str) -> Result<(String, f64), RejectReason> {
    let (name, value_text) = split_declaration(line).ok_or(RejectReason::WrongTokenCount)?;
    let value: f64 = value_text
        .parse()
        .map_err(|_| RejectReason::InvalidValue)?;
    if !value.is_finite() {
        return Err(RejectReason::InvalidValue);
    }
    Ok((name.to_string(), value))
}

/// Parse newline-delimited quota declarations.
///
/// First declaration of a name wins; later ones are rejected as duplicates.
/// Never fails: empty or fully invalid input yields an empty table.
pub fn parse_quotas(raw: &str) -> QuotaParse {
    let mut parse = QuotaParse::default();

    for (line_index, line) in raw.split('\n').enumerate() {
        let reject = |reason| QuotaRejection {
            line_index,
            line: line.to_string(),
            reason,
        };

        match parse_quota_line(line) {
            Ok((name, value)) => {
                if parse.table.contains_key(&name) {
                    parse.rejected.push(reject(RejectReason::Duplicate));
                    continue;
                }
                parse.table.insert(name, value);
            }
            Err(reason) => parse.rejected.push(reject(reason)),
        }
    }

    parse
}
