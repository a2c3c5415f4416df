pub mod parser;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Can't find other symbol ({other:}) for {symbol:} at {line:}:{column:}")]
    BracketMismatch {
        symbol: char,
        other: char,
        line: usize,
        column: usize,
    },
}
