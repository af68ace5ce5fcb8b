use crate::Cell;
use thiserror::Error;

/// Rejected mutation of a [`SparseGrid`](crate::SparseGrid).
///
/// The grid is left exactly as it was before the rejected call.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Activation of a cell that is already alive.
    #[error("cell {0} is already alive")]
    AlreadyLive(Cell),
    /// Deactivation of a cell that is not alive.
    #[error("cell {0} is not alive")]
    NotLive(Cell),
}

/// Failure to read an RLE pattern.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern has no `x = .., y = ..` header line")]
    MissingHeader,
    #[error("malformed header: {0}")]
    InvalidHeader(String),
    #[error("unsupported rule `{0}`, only B3/S23 is simulated")]
    UnsupportedRule(String),
    #[error("unexpected symbol {symbol:?} on pattern line {line}")]
    UnexpectedSymbol { symbol: char, line: usize },
    #[error("run length on pattern line {line} does not fit in 64 bits")]
    RunLengthOverflow { line: usize },
    #[error("declared {width}x{height} box exceeds {} cells", crate::utils::MAX_PATTERN_AREA)]
    TooLarge { width: i64, height: i64 },
    #[error("cell {cell} lies outside the declared {width}x{height} box")]
    OutOfBounds { cell: Cell, width: i64, height: i64 },
}
