// src/error.rs

use thiserror::Error;

/// Errors raised while loading or transforming a sequence.
///
/// Load-time failures (`EmptyInput`, `NoRecords`, `InvalidSymbol`, `Io`)
/// are fatal to the whole analysis run. `UnsupportedSymbol` is raised by a
/// single transform and leaves every other result of the run intact.
/// An undefined skew is a normal result value, not an error.
#[derive(Error, Debug)]
pub enum SequenceError {
    /// Input contained nothing after whitespace stripping.
    #[error("sequence is empty after stripping whitespace")]
    EmptyInput,

    /// FASTA input without a single record.
    #[error("no FASTA records found in input")]
    NoRecords,

    /// A character outside the nucleotide/ambiguity alphabet.
    /// Position counts symbols of the normalized sequence.
    #[error("invalid symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// A symbol with no complement under the selected strand rules.
    #[error("no complement defined for symbol '{symbol}' at position {position}")]
    UnsupportedSymbol { symbol: char, position: usize },

    /// File I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
