use super::{Token, TokenKind};

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /** Human Readable positions in file */
    pub cur_line: usize,
    pub cur_col: usize,

    /** 'raw' format / offset within the file (in bytes) */
    pub byte_offset: usize,

    bytes: std::slice::Iter<'a, u8>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8]) -> Lexer<'a> {
        Lexer {
            cur_col: 1,
            cur_line: 1,

            byte_offset: 0,

            bytes: source.iter(),
        }
    }

    fn transform_to_type(c: u8) -> Option<TokenKind> {
        match c {
            b'>' => Some(TokenKind::Increment),
            b'<' => Some(TokenKind::Decrement),
            b'+' => Some(TokenKind::DerefIncrement),
            b'-' => Some(TokenKind::DerefDecrement),
            b'.' => Some(TokenKind::Write),
            b',' => Some(TokenKind::Read),
            b'[' => Some(TokenKind::JumpStart),
            b']' => Some(TokenKind::JumpEnd),
            // everything else is a comment
            _ => None,
        }
    }

    fn consume_byte(&mut self) -> Option<u8> {
        let c = *self.bytes.next()?;
        self.cur_col += 1;
        if c == b'\n' {
            self.cur_line += 1;
            self.cur_col = 1;
        }
        self.byte_offset += 1;
        Some(c)
    }

    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            // position of the byte we are about to consume
            let (line, column) = (self.cur_line, self.cur_col);
            let c = self.consume_byte()?;
            if let Some(kind) = Self::transform_to_type(c) {
                return Some(Token { kind, line, column });
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
