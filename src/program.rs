use std::io::{Read, Write};

use crate::{
    bytecode::Instruction,
    interpreter::{bytecode_interpreter::ByteCodeInterpreter, Runtime, RuntimeError},
    memory::Tape,
    optimizer::Optimizations,
    parser::{parser::Parser, ParseError},
};

/// A parsed (and optimized) program along with the tape it runs on
#[derive(Debug)]
pub struct Program {
    instructions: Vec<Instruction>,
    tape: Tape,
    data_pointer: isize,
}

impl Program {
    /// Parses with every optimization enabled
    pub fn new(source: &[u8]) -> Result<Self, ParseError> {
        Self::with_optimizations(source, Optimizations::all())
    }

    pub fn with_optimizations(source: &[u8], options: Optimizations) -> Result<Self, ParseError> {
        Ok(Self {
            instructions: Parser::new(source, options).parse_program()?,
            tape: Tape::new(),
            data_pointer: 0,
        })
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Where the data pointer was when the program stopped
    pub fn data_pointer(&self) -> isize {
        self.data_pointer
    }

    pub fn run<R: Read, W: Write>(
        &mut self,
        runtime: &mut Runtime<R, W>,
    ) -> Result<(), RuntimeError> {
        self.data_pointer =
            ByteCodeInterpreter::new().run(runtime, &self.instructions, &mut self.tape)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::EofPolicy;

    fn run(source: &str, input: &[u8]) -> (Program, Vec<u8>) {
        let mut program = Program::new(source.as_bytes()).unwrap();
        let mut runtime = Runtime::new(input, vec![]);
        program.run(&mut runtime).unwrap();
        (program, runtime.into_output())
    }

    #[test]
    fn hello_world() {
        let source = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
        let (_, output) = run(source, b"");
        assert_eq!(output, b"Hello World!\n");
    }

    #[test]
    fn echoes_input() {
        let mut program = Program::new(b",[.,]").unwrap();
        let mut runtime = Runtime::new(&b"abc"[..], vec![]).with_eof(EofPolicy::Zero);
        program.run(&mut runtime).unwrap();
        assert_eq!(runtime.into_output(), b"abc");
    }

    #[test]
    fn multiplication_idiom() {
        let (program, _) = run("+++[->++<]", b"");
        assert_eq!(program.tape().get(0), 0);
        assert_eq!(program.tape().get(1), 6);
        assert_eq!(program.data_pointer(), 0);
    }
}
