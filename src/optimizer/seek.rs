use crate::bytecode::{Instruction, Opcode};

/// `[>]` / `[<<]` scan for a zero cell, replace the loop with a `Seek`
pub fn seek(text: &mut Vec<Instruction>, begin: usize) -> bool {
    let body = super::loop_body(text, begin);
    if let [step] = body {
        if *step == Opcode::MovePointer {
            let step = step.value;
            text.truncate(begin);
            text.push(Instruction::new(Opcode::Seek, step, 0));
            return true;
        }
    }
    false
}
