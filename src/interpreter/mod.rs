pub mod bytecode_interpreter;

use std::io::{self, ErrorKind, Read, Write};

use clap::ValueEnum;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("IO Error")]
    Io(
        #[from]
        io::Error,
    ),

    #[error("Instruction pointer ({ip:}) ran past the end of the program without a Stop")]
    InstructionOverrun { ip: usize },

    #[error("Gave up after {limit:} instructions")]
    StepLimit { limit: u64 },
}

/// What `,` stores once the input stream has run dry
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EofPolicy {
    /// Store 255 (-1 as a signed byte)
    #[default]
    MinusOne,
    /// Store 0
    Zero,
    /// Leave the cell as it was
    Unchanged,
}

/// Everything a program talks to while it runs
pub struct Runtime<R: Read, W: Write> {
    in_stream: R,
    out_stream: W,

    eof: EofPolicy,

    /// Bytes served (and echoed) before the input stream is touched
    injected: Vec<u8>,
    injected_pos: usize,

    step_limit: Option<u64>,
}

impl<R: Read, W: Write> Runtime<R, W> {
    pub fn new(in_stream: R, out_stream: W) -> Self {
        Self {
            in_stream,
            out_stream,
            eof: EofPolicy::default(),
            injected: vec![],
            injected_pos: 0,
            step_limit: None,
        }
    }

    pub fn with_eof(mut self, eof: EofPolicy) -> Self {
        self.eof = eof;
        self
    }

    /// Serve `text` followed by a newline to the program before reading the real
    /// input, echoing it as if it was typed.
    pub fn with_injection(mut self, text: &str) -> Self {
        self.injected = text.bytes().chain(std::iter::once(b'\n')).collect();
        self.injected_pos = 0;
        self
    }

    pub fn with_step_limit(mut self, limit: Option<u64>) -> Self {
        self.step_limit = limit;
        self
    }

    pub fn step_limit(&self) -> Option<u64> {
        self.step_limit
    }

    pub fn into_output(self) -> W {
        self.out_stream
    }

    pub fn emit_byte(&mut self, value: u8) -> Result<(), RuntimeError> {
        self.out_stream.write_all(&[value])?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        self.out_stream.flush()?;
        Ok(())
    }

    /// The next input byte, `None` means leave the cell alone
    pub fn read_byte(&mut self) -> Result<Option<u8>, RuntimeError> {
        if let Some(&byte) = self.injected.get(self.injected_pos) {
            self.injected_pos += 1;
            self.emit_byte(byte)?;
            self.flush()?;
            return Ok(Some(byte));
        }

        // whoever is typing should see the prompt first
        self.flush()?;

        let mut buf = [0u8; 1];
        loop {
            match self.in_stream.read(&mut buf) {
                Ok(0) => {
                    return Ok(match self.eof {
                        EofPolicy::MinusOne => Some(u8::MAX),
                        EofPolicy::Zero => Some(0),
                        EofPolicy::Unchanged => None,
                    })
                }
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
