pub mod lexer;

/// The eight meaningful symbols, every other byte is a comment and never
/// makes it out of the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // `>`: Increment the `data pointer` by one
    Increment,
    // `<`: Decrement the `data pointer` by one
    Decrement,

    // `+`: Increment the byte at the `data pointer` by one
    DerefIncrement,
    // `-`: Decrement the byte at the `data pointer` by one
    DerefDecrement,

    // `.`: Write the byte at the `data pointer` to the `output device`
    Write,
    // `,`: Read the next byte from the `input device` and write it to the `data pointer`
    Read,

    // `[`: If the byte at the `data pointer` is zero, then jump the `instruction pointer` forward to the instruction after the matching `]`
    JumpStart,
    // `]`: If the byte at the `data pointer` is non-zero then jump the `instruction pointer` back to the instruction after the matching `[`
    JumpEnd,
}

impl TokenKind {
    pub fn symbol(&self) -> char {
        match self {
            TokenKind::Increment => '>',
            TokenKind::Decrement => '<',
            TokenKind::DerefIncrement => '+',
            TokenKind::DerefDecrement => '-',
            TokenKind::Write => '.',
            TokenKind::Read => ',',
            TokenKind::JumpStart => '[',
            TokenKind::JumpEnd => ']',
        }
    }
}

/// A token along with where it was found, used for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}
