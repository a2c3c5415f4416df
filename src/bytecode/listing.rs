use std::fmt::Write;

use super::{Instruction, Opcode};

/// Renders one instruction per line, indented by loop/region depth.
///
/// `PushFast` regions aren't indented, their `PopFast` is gone from finished programs.
pub fn listing(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    let width = instructions.len().to_string().len();

    for (pc, instruction) in instructions.iter().enumerate() {
        if matches!(instruction.opcode, Opcode::LoopEnd | Opcode::Pop) {
            depth = depth.saturating_sub(1);
        }

        // writing into a String can't fail
        writeln!(
            out,
            "{:>width$}  {}{}",
            pc,
            "  ".repeat(depth),
            instruction,
            width = width
        )
        .unwrap();

        if matches!(instruction.opcode, Opcode::LoopStart | Opcode::Push) {
            depth += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_loop_bodies() {
        let text = vec![
            Instruction::linked(Opcode::LoopStart, 2),
            Instruction::op(Opcode::Output),
            Instruction::linked(Opcode::LoopEnd, 0),
            Instruction::op(Opcode::Stop),
        ];
        assert_eq!(
            listing(&text),
            "0  LoopStart -> 2\n1    Output\n2  LoopEnd -> 0\n3  Stop\n"
        );
    }

    #[test]
    fn indents_stack_regions() {
        let text = vec![
            Instruction::linked(Opcode::Push, 2),
            Instruction::new(Opcode::Multiplication, 2, 1),
            Instruction::linked(Opcode::Pop, 0),
            Instruction::op(Opcode::Stop),
        ];
        assert_eq!(
            listing(&text),
            "0  Push -> 2\n1    Multiplication(2, 1)\n2  Pop -> 0\n3  Stop\n"
        );
    }
}
