use crate::bytecode::{Instruction, Opcode};

/// Detect a `[-]` and replace it with a `Reset`.
///
/// Only odd steps are taken, they reach zero from every starting value, `[--]`
/// on an odd cell never terminates.
pub fn reset(text: &mut Vec<Instruction>, begin: usize) -> bool {
    match super::loop_body(text, begin) {
        [step] if *step == Opcode::Addition && step.value.rem_euclid(2) == 1 => {}
        _ => return false,
    }
    text.truncate(begin);

    // `[-][-]`, the cell is already clear
    if let Some(previous) = text.last() {
        if *previous == Opcode::Reset && previous.offset == 0 {
            return true;
        }
    }

    // `[-]>[-]`, a run of neighbouring cells is being cleared so grow the first reset
    if let [.., first, step] = text.as_mut_slice() {
        if *first == Opcode::Reset
            && *step == Opcode::MovePointer
            && step.value.abs() == 1
            && (first.offset == 0 || first.offset == step.value)
        {
            first.value += 1;
            first.offset = step.value;
            text.pop();
            return true;
        }
    }

    text.push(Instruction::new(Opcode::Reset, 1, 0));
    true
}
