use thiserror::Error;

use crate::nucleotide::RnaBase;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the layout engine can report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A closing bracket had no open bracket of its class on the stack.
    #[error("unmatched '{bracket}' at position {position}")]
    UnmatchedClose { bracket: char, position: usize },

    /// An opening bracket was never closed.
    #[error("unclosed '{bracket}' at position {position}")]
    UnclosedOpen { bracket: char, position: usize },

    /// Pairing data that cannot be laid out as a nested tree.
    #[error("inconsistent pairing data: span {start}..{end} does not nest")]
    Structural { start: usize, end: usize },

    /// Character that is not an accepted nucleotide in this context.
    #[error("bad nucleotide '{0}'")]
    InvalidBase(char),

    /// Base code that may not be printed in this context.
    #[error("bad nucleotide {0:?}")]
    UnprintableBase(RnaBase),

    /// Pairing partner outside the structure, or a position paired with itself.
    #[error("cannot pair position {index} with {partner} in a structure of length {len}")]
    InvalidPartner {
        index: usize,
        partner: usize,
        len: usize,
    },

    /// More mutually crossing stems than there are bracket classes.
    #[error("no free bracket class for the stem opening at position {position}")]
    BracketClassesExhausted { position: usize },

    /// Spacing constant that is not a positive finite number.
    #[error("{name} must be positive and finite, got {value}")]
    InvalidSpacing { name: &'static str, value: f64 },
}
