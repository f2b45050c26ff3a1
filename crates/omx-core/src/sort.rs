//! Sort engine.
//!
//! Orders a view by one of six modes. Sorting is stable, so items that
//! compare equal keep their relative filter order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ModelItem;

/// Ordering applied to the filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    NameAsc,
    NameDesc,
    SizeAsc,
    SizeDesc,
    ModifiedDesc,
    ModifiedAsc,
}

/// Error for an unrecognized sort key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown sort mode '{0}' (expected one of: name-asc, name-desc, size-asc, size-desc, modified-desc, modified-asc)")]
pub struct SortModeParseError(pub String);

impl SortMode {
    /// Every mode, in menu order.
    pub const ALL: [Self; 6] = [
        Self::NameAsc,
        Self::NameDesc,
        Self::SizeAsc,
        Self::SizeDesc,
        Self::ModifiedDesc,
        Self::ModifiedAsc,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::SizeAsc => "size-asc",
            Self::SizeDesc => "size-desc",
            Self::ModifiedDesc => "modified-desc",
            Self::ModifiedAsc => "modified-asc",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::SizeAsc => "Size (smallest)",
            Self::SizeDesc => "Size (largest)",
            Self::ModifiedDesc => "Recently modified",
            Self::ModifiedAsc => "Oldest modified",
        }
    }

    /// Compare two items under this mode.
    ///
    /// Missing sizes count as zero. Missing timestamps count as the epoch.
    pub fn compare(self, a: &ModelItem, b: &ModelItem) -> Ordering {
        match self {
            Self::NameAsc => locale_compare(&a.name, &b.name),
            Self::NameDesc => locale_compare(&b.name, &a.name),
            Self::SizeAsc => a.size_or_zero().cmp(&b.size_or_zero()),
            Self::SizeDesc => b.size_or_zero().cmp(&a.size_or_zero()),
            Self::ModifiedDesc => b.modified_instant().cmp(&a.modified_instant()),
            Self::ModifiedAsc => a.modified_instant().cmp(&b.modified_instant()),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = SortModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == key)
            .ok_or_else(|| SortModeParseError(s.to_string()))
    }
}

/// Sort a view in place. Stable.
pub fn sort_view(view: &mut [&ModelItem], mode: SortMode) {
    view.sort_by(|a, b| mode.compare(a, b));
}

/// Return `view` sorted by `mode`.
pub fn sorted(mut view: Vec<&ModelItem>, mode: SortMode) -> Vec<&ModelItem> {
    sort_view(&mut view, mode);
    view
}

/// Natural-language string ordering.
///
/// Case-insensitive on the first pass, with punctuation before digits before
/// letters. Strings that differ only in case put lowercase first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(collation_key)
        .cmp(b.chars().map(collation_key))
        .then_with(|| case_tiebreak(a, b))
        .then_with(|| a.cmp(b))
}

fn collation_key(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

fn case_tiebreak(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .find(|(x, y)| x != y)
        .map_or(Ordering::Equal, |(x, y)| x.is_uppercase().cmp(&y.is_uppercase()))
}
