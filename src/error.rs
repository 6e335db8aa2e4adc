use thiserror::Error;

/// Errors that stop a dataset from loading.
///
/// A bad book price is deliberately not among them: it is logged and the book
/// is priced at zero instead (see [`crate::Catalog`]).
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed book row at line {line}: expected 4 fields, found {found}")]
    MalformedBook { line: u64, found: usize },

    #[error("malformed sale row at line {line}: {reason}")]
    MalformedSale { line: u64, reason: String },

    #[error(
        "malformed sale row at line {line}: insufficient item fields for declared item count \
         (declared {declared}, found {found})"
    )]
    InsufficientItems { line: u64, declared: u32, found: u64 },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
