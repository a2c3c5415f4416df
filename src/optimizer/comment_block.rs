use crate::bytecode::{Instruction, Opcode};

/// If a loop is entered on a cell that is known to be zero it can never run.
///
/// The classic case is a comment block at the very start of the program, where the
/// whole tape is still 0, but the cell is just as dead after anything that leaves
/// the data pointer on a zero cell.
pub fn comment_block(text: &mut Vec<Instruction>, begin: usize) -> bool {
    let known_zero = match begin.checked_sub(1).map(|pc| text[pc]) {
        None => true,
        Some(previous) => match previous.opcode {
            Opcode::LoopEnd
            | Opcode::Reset
            | Opcode::Seek
            | Opcode::Store
            | Opcode::Pop
            | Opcode::PopFast => true,
            Opcode::Set => previous.value as u8 == 0,
            _ => false,
        },
    };

    if known_zero {
        text.truncate(begin);
    }
    known_zero
}

#[cfg(test)]
mod tests {
    use crate::bytecode::Opcode;
    use crate::optimizer::test_utils::{opcodes, parse_with};
    use crate::optimizer::Optimizations;

    #[test]
    fn leading_loop_is_removed() {
        let text = parse_with("[this is a comment, with punctuation.]+", Optimizations::COMMENT_BLOCK);
        assert_eq!(opcodes(&text), vec![Opcode::Addition]);
    }

    #[test]
    fn loop_after_loop_is_removed() {
        let text = parse_with("+[.-][.]", Optimizations::COMMENT_BLOCK);
        assert_eq!(
            opcodes(&text),
            vec![
                Opcode::Addition,
                Opcode::LoopStart,
                Opcode::Output,
                Opcode::Addition,
                Opcode::LoopEnd,
            ]
        );
    }

    #[test]
    fn loop_after_change_is_kept() {
        let text = parse_with("+[.-]+[.-]", Optimizations::COMMENT_BLOCK);
        assert_eq!(text.len(), 10);
    }
}
