extern crate clap;
extern crate thiserror;

pub mod bytecode;
pub mod interpreter;
pub mod lexer;
pub mod memory;
pub mod optimizer;
pub mod parser;
pub mod program;

pub use bytecode::{Instruction, Opcode};
pub use interpreter::{EofPolicy, Runtime, RuntimeError};
pub use memory::Tape;
pub use optimizer::Optimizations;
pub use parser::ParseError;
pub use program::Program;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Couldn't read source")]
    Source(#[source] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
