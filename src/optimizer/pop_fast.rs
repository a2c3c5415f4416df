use crate::bytecode::{Instruction, Opcode};

/// `PushFast` already cleared the counter so its `PopFast` does nothing, drop them all.
///
/// This is the one edit that isn't at the end of the sequence, so every link is
/// moved to the new position of its partner. A `PushFast` ends up linked to the
/// instruction just before where its `PopFast` was, skipping the region still
/// resumes right after it.
pub fn drop_pop_fast(text: &mut Vec<Instruction>) {
    let mut kept = 0usize;
    let remap: Vec<usize> = text
        .iter()
        .map(|instruction| {
            if *instruction == Opcode::PopFast {
                // there is always a PushFast in front of it
                kept.saturating_sub(1)
            } else {
                kept += 1;
                kept - 1
            }
        })
        .collect();

    if kept == text.len() {
        return;
    }

    text.retain(|instruction| *instruction != Opcode::PopFast);
    for instruction in text.iter_mut() {
        if instruction.opcode.is_boundary() {
            instruction.link = remap[instruction.link];
        }
    }
}
