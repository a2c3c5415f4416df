use crate::bytecode::Instruction;

/// `[]` either does nothing (entered on a zero cell) or never terminates,
/// the latter we don't try to preserve.
pub fn empty_loop(text: &mut Vec<Instruction>, begin: usize) -> bool {
    if text.len() - begin == 2 {
        text.truncate(begin);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::bytecode::Opcode;
    use crate::optimizer::test_utils::{opcodes, parse_with};
    use crate::optimizer::Optimizations;

    #[test]
    fn removes_empty_loop() {
        let text = parse_with(">[]<", Optimizations::EMPTY_LOOP);
        // the two moves meet once the loop is gone
        assert!(text.is_empty());
    }

    #[test]
    fn nested_empty_loops_collapse() {
        let text = parse_with(".[[]]", Optimizations::EMPTY_LOOP);
        assert_eq!(opcodes(&text), vec![Opcode::Output]);
    }
}
