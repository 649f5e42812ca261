use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the entity owning a cell.
///
/// Carried for log and persistence context only; resolution never looks
/// at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    /// Process-wide defaults.
    Default,
    /// A loaded book (one input, possibly many sheets).
    Book(String),
    /// A single sheet within a book.
    Sheet(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Book(id) => write!(f, "book {id}"),
            Self::Sheet(id) => write!(f, "sheet {id}"),
        }
    }
}
