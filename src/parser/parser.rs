use tracing::info;

use crate::{
    bytecode::{Instruction, Opcode},
    lexer::{lexer::Lexer, Token, TokenKind},
    optimizer::{drop_pop_fast, optimize_loop, Optimizations},
};

use super::ParseError;

/// Turns source into a flat instruction sequence, optimizing each loop as it closes
pub struct Parser<'a> {
    tokens: Lexer<'a>,
    instructions: Vec<Instruction>,
    /// `LoopStart`s still waiting for their `]`
    open_loops: Vec<(usize, Token)>,
    options: Optimizations,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a [u8], options: Optimizations) -> Parser<'a> {
        Parser {
            tokens: Lexer::new(source),
            instructions: vec![],
            open_loops: vec![],
            options,
        }
    }

    /// Folds runs of `+`/`-` and `>`/`<` into a single instruction
    fn accumulate(&mut self, opcode: Opcode, by: i32) {
        let set_folding = self.options.contains(Optimizations::SET_FOLDING);
        match self.instructions.last_mut() {
            Some(last) if *last == opcode => {
                last.value += by;
                if last.value == 0 {
                    self.instructions.pop();
                }
            }
            // `[-]+` is just a store of a constant
            Some(last)
                if set_folding && opcode == Opcode::Addition && *last == Opcode::Set =>
            {
                last.value += by;
            }
            Some(last)
                if set_folding
                    && opcode == Opcode::Addition
                    && *last == Opcode::Reset
                    && last.value == 1 =>
            {
                *last = Instruction::new(Opcode::Set, by, 0);
            }
            _ => self.instructions.push(Instruction::new(opcode, by, 0)),
        }
    }

    fn open_loop(&mut self, token: Token) {
        self.open_loops.push((self.instructions.len(), token));
        self.instructions.push(Instruction::op(Opcode::LoopStart));
    }

    fn close_loop(&mut self, token: Token) -> Result<(), ParseError> {
        let (begin, _) = self
            .open_loops
            .pop()
            .ok_or(ParseError::BracketMismatch {
                symbol: ']',
                other: '[',
                line: token.line,
                column: token.column,
            })?;

        let end = self.instructions.len();
        self.instructions[begin].link = end;
        self.instructions.push(Instruction::linked(Opcode::LoopEnd, begin));

        optimize_loop(&mut self.instructions, begin, self.options);
        Ok(())
    }

    pub fn parse_program(mut self) -> Result<Vec<Instruction>, ParseError> {
        while let Some(token) = self.tokens.next_token() {
            match token.kind {
                TokenKind::Increment => self.accumulate(Opcode::MovePointer, 1),
                TokenKind::Decrement => self.accumulate(Opcode::MovePointer, -1),
                TokenKind::DerefIncrement => self.accumulate(Opcode::Addition, 1),
                TokenKind::DerefDecrement => self.accumulate(Opcode::Addition, -1),
                TokenKind::Write => self.instructions.push(Instruction::op(Opcode::Output)),
                TokenKind::Read => self.instructions.push(Instruction::op(Opcode::Input)),
                TokenKind::JumpStart => self.open_loop(token),
                TokenKind::JumpEnd => self.close_loop(token)?,
            }
        }

        if let Some((_, token)) = self.open_loops.last() {
            return Err(ParseError::BracketMismatch {
                symbol: '[',
                other: ']',
                line: token.line,
                column: token.column,
            });
        }

        self.instructions.push(Instruction::op(Opcode::Stop));
        drop_pop_fast(&mut self.instructions);

        info!(
            instructions = self.instructions.len(),
            optimizations = ?self.options,
            "parsed program"
        );
        Ok(self.instructions)
    }
}
