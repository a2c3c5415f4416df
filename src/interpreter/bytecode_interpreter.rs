use std::io::{Read, Write};

use crate::{
    bytecode::{Instruction, Opcode},
    memory::Tape,
};

use super::{Runtime, RuntimeError};

/// Executes an instruction sequence against a tape
#[derive(Debug, Default)]
pub struct ByteCodeInterpreter {
    /// Counters saved by the `Push`es we are currently inside of
    multipliers: Vec<u8>,
    /// What `Multiplication` multiplies by
    register: u8,
}

impl ByteCodeInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs until `Stop`, returning where the data pointer ended up
    pub fn run<R: Read, W: Write>(
        &mut self,
        runtime: &mut Runtime<R, W>,
        instructions: &[Instruction],
        tape: &mut Tape,
    ) -> Result<isize, RuntimeError> {
        let mut cursor = tape.cursor();
        let mut pc = 0;
        let mut steps = 0u64;

        loop {
            let Some(instruction) = instructions.get(pc) else {
                return Err(RuntimeError::InstructionOverrun { ip: pc });
            };

            if let Some(limit) = runtime.step_limit() {
                steps += 1;
                if steps > limit {
                    runtime.flush()?;
                    return Err(RuntimeError::StepLimit { limit });
                }
            }

            match instruction.opcode {
                Opcode::Nop => {}
                Opcode::MovePointer => cursor.advance(instruction.value as isize),
                Opcode::Addition => {
                    let cell = cursor.read().wrapping_add(instruction.value as u8);
                    cursor.write(cell);
                }
                Opcode::Input => {
                    if let Some(byte) = runtime.read_byte()? {
                        cursor.write(byte);
                    }
                }
                Opcode::Output => runtime.emit_byte(cursor.read())?,
                Opcode::LoopStart => {
                    if cursor.read() == 0 {
                        pc = instruction.link + 1;
                        // don't do the ++
                        continue;
                    }
                }
                Opcode::LoopEnd => {
                    if cursor.read() != 0 {
                        pc = instruction.link + 1;
                        continue;
                    }
                }
                Opcode::Reset => {
                    for i in 0..instruction.value {
                        if i > 0 {
                            cursor.advance(instruction.offset as isize);
                        }
                        cursor.write(0);
                    }
                }
                Opcode::Multiplication => cursor.add_at(
                    instruction.offset as isize,
                    self.register.wrapping_mul(instruction.value as u8),
                ),
                Opcode::Store => {
                    let cell = cursor.read();
                    if cell != 0 {
                        cursor.add_at(
                            instruction.offset as isize,
                            cell.wrapping_mul(instruction.value as u8),
                        );
                        cursor.write(0);
                    }
                }
                Opcode::Seek => {
                    while cursor.read() != 0 {
                        cursor.advance(instruction.value as isize);
                    }
                }
                Opcode::Set => cursor.write(instruction.value as u8),
                Opcode::Stop => break,
                Opcode::Push => {
                    let cell = cursor.read();
                    if cell == 0 {
                        pc = instruction.link + 1;
                        continue;
                    }
                    self.multipliers.push(cell);
                    self.register = cell;
                }
                Opcode::PushFast => {
                    let cell = cursor.read();
                    if cell == 0 {
                        pc = instruction.link + 1;
                        continue;
                    }
                    self.register = cell;
                    cursor.write(0);
                }
                Opcode::Pop => {
                    cursor.write(0);
                    self.multipliers.pop();
                    self.register = self.multipliers.last().copied().unwrap_or(0);
                }
                // parsed programs never contain one, and the register
                // is always reloaded by the next push
                Opcode::PopFast => {}
            }
            pc += 1;
        }

        runtime.flush()?;
        Ok(cursor.index())
    }
}
