pub mod listing;

use std::fmt;

/// The closed set of operations the interpreter understands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Does nothing
    #[default]
    Nop,

    /// Add `value` to the data pointer
    MovePointer,

    /// Add `value` to the current cell (mod 256)
    Addition,

    /// Read a byte from the input stream into the current cell
    Input,

    /// Write the current cell to the output stream
    Output,

    /// Jump past the linked `LoopEnd` if the current cell is zero
    LoopStart,

    /// Jump past the linked `LoopStart` if the current cell is non-zero
    LoopEnd,

    /// Clear `value` cells starting at the current one, stepping `offset` between writes.
    /// Leaves the data pointer on the last cleared cell.
    Reset,

    /// Add `register * value` to the cell `offset` away from the data pointer
    Multiplication,

    /// Add `current * value` to the cell `offset` away and clear the current cell
    Store,

    /// Move the data pointer by `value` until it lands on a zero cell
    Seek,

    /// Overwrite the current cell with `value`
    Set,

    /// Halt the program
    Stop,

    /// Save the current cell on the multiplier stack, skipping to the linked `Pop` if it is zero
    Push,

    /// Save the current cell in the multiplier register and clear it,
    /// skipping to the linked `PopFast` if it was zero
    PushFast,

    /// Clear the current cell and restore the previous multiplier
    Pop,

    /// Restore the previous multiplier, the cell was already cleared by `PushFast`
    PopFast,
}

impl Opcode {
    /// Opcodes whose `link` refers to a partner instruction
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            Opcode::LoopStart
                | Opcode::LoopEnd
                | Opcode::Push
                | Opcode::PushFast
                | Opcode::Pop
                | Opcode::PopFast
        )
    }
}

/// A single instruction, `value` and `offset` are interpreted per opcode (see [`Opcode`]).
///
/// `link` is the position of the partner instruction for loop and push/pop pairs
/// and is unused for every other opcode. Positions stay valid because the optimizer
/// only ever truncates or appends at the end of the sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub value: i32,
    pub offset: i32,
    pub link: usize,
}

impl Instruction {
    pub fn new(opcode: Opcode, value: i32, offset: i32) -> Self {
        Self {
            opcode,
            value,
            offset,
            link: 0,
        }
    }

    pub fn op(opcode: Opcode) -> Self {
        Self::new(opcode, 0, 0)
    }

    pub fn linked(opcode: Opcode, link: usize) -> Self {
        Self {
            link,
            ..Self::op(opcode)
        }
    }
}

impl PartialEq<Opcode> for Instruction {
    fn eq(&self, other: &Opcode) -> bool {
        self.opcode == *other
    }
}

impl PartialEq<Instruction> for Opcode {
    fn eq(&self, other: &Instruction) -> bool {
        *self == other.opcode
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode {
            Opcode::Nop | Opcode::Input | Opcode::Output | Opcode::Stop => {
                write!(f, "{:?}", self.opcode)
            }
            Opcode::MovePointer | Opcode::Addition | Opcode::Seek | Opcode::Set => {
                write!(f, "{:?}({})", self.opcode, self.value)
            }
            Opcode::Reset | Opcode::Multiplication | Opcode::Store => {
                write!(f, "{:?}({}, {})", self.opcode, self.value, self.offset)
            }
            Opcode::LoopStart
            | Opcode::LoopEnd
            | Opcode::Push
            | Opcode::PushFast
            | Opcode::Pop
            | Opcode::PopFast => write!(f, "{:?} -> {}", self.opcode, self.link),
        }
    }
}
