//! The fused idioms keep the behaviour of the loops they replace

mod common;

use brainfudge::{
    EofPolicy, Opcode, Optimizations, ParseError, Program, Runtime, RuntimeError, Tape,
};
use common::run_with;

fn run(source: &str) -> Program {
    let mut program = Program::new(source.as_bytes()).unwrap();
    let mut runtime = Runtime::new(&b""[..], vec![]);
    program.run(&mut runtime).unwrap();
    program
}

#[test]
fn reset_clears_any_value() {
    for k in 0..=255 {
        let source = format!("{}[-]", "+".repeat(k));
        let program = run(&source);
        assert_eq!(program.tape().get(0), 0, "after {k} increments");
        assert_eq!(program.data_pointer(), 0);
    }
}

#[test]
fn multiplication_moves_the_product() {
    let program = run("+++[->++<]");
    assert_eq!(program.tape().get(0), 0);
    assert_eq!(program.tape().get(1), 6);
    assert_eq!(program.data_pointer(), 0);
}

#[test]
fn multiplication_wraps() {
    let program = run(&format!("{}[->+++<]", "+".repeat(100)));
    assert_eq!(program.tape().get(1), 44);
}

#[test]
fn seek_stops_on_the_first_zero() {
    // cells 1..=4 are non-zero, cell 5 is the first zero to the right
    let program = run("+>+>++>+++>+<<<<[>]");
    assert_eq!(program.data_pointer(), 5);
    assert!(program
        .instructions()
        .iter()
        .any(|instruction| *instruction == Opcode::Seek));
}

#[test]
fn empty_loop_on_zero_cell_is_a_noop() {
    let program = run(">[]+.");
    assert_eq!(program.tape().get(1), 1);
    assert_eq!(program.data_pointer(), 1);
}

#[test]
fn far_away_cells_are_kept() {
    let right = ">".repeat(100_000);
    let left = "<".repeat(100_000);
    let source = format!("{right}+++++++{left}.{right}.");
    let mut program = Program::new(source.as_bytes()).unwrap();
    let mut runtime = Runtime::new(&b""[..], vec![]);
    program.run(&mut runtime).unwrap();

    assert_eq!(runtime.into_output(), vec![0, 7]);
    assert_eq!(program.data_pointer(), 100_000);
    assert_eq!(program.tape().get(0), 0);
    assert_eq!(program.tape().get(99_999), 0);
    assert_eq!(program.tape().get(100_001), 0);
}

#[test]
fn far_left_and_back() {
    let mut tape = Tape::new();
    let mut cursor = tape.cursor();
    cursor.advance(-100_000);
    cursor.write(42);
    cursor.advance(100_000);
    cursor.advance(-100_000);
    assert_eq!(cursor.read(), 42);
}

#[test]
fn malformed_sources_are_rejected() {
    for source in ["[[", "]", "[]]", "+[->+<"] {
        assert!(
            matches!(
                Program::new(source.as_bytes()),
                Err(ParseError::BracketMismatch { .. })
            ),
            "{source:?} parsed"
        );
    }
}

#[test]
fn reset_runs_merge_into_one_instruction() {
    let program = Program::new(b"+>+>+<<[-]>[-]>[-]").unwrap();
    let resets: Vec<_> = program
        .instructions()
        .iter()
        .filter(|instruction| **instruction == Opcode::Reset)
        .collect();
    assert_eq!(resets.len(), 1);
    assert_eq!((resets[0].value, resets[0].offset), (3, 1));
}

#[test]
fn comment_block_is_never_run() {
    let program = Program::new(b"[ this does things, like reading. ]+.").unwrap();
    assert!(program
        .instructions()
        .iter()
        .all(|instruction| *instruction != Opcode::Input));
}

#[test]
fn eof_policies_show_up_in_the_cell() {
    for (eof, expected) in [
        (EofPolicy::MinusOne, 255),
        (EofPolicy::Zero, 0),
        (EofPolicy::Unchanged, 7),
    ] {
        let mut program = Program::new(b"+++++++,").unwrap();
        let mut runtime = Runtime::new(&b""[..], vec![]).with_eof(eof);
        program.run(&mut runtime).unwrap();
        assert_eq!(program.tape().get(0), expected);
    }
}

#[test]
fn injected_input_is_echoed() {
    let mut program = Program::new(b",.,.,.").unwrap();
    let mut runtime = Runtime::new(&b"z"[..], vec![]).with_injection("a");
    program.run(&mut runtime).unwrap();
    // echo of "a\n" interleaved with the program's own output, then stdin
    assert_eq!(runtime.into_output(), b"aa\n\nz");
}

#[test]
fn unoptimized_infinite_empty_loop_hits_the_limit() {
    assert!(run_with(b"+[]", Optimizations::empty(), b"", 10_000).is_none());
}

#[test]
fn step_limit_is_reported() {
    let mut program = Program::with_optimizations(b"+[]", Optimizations::empty()).unwrap();
    let mut runtime = Runtime::new(&b""[..], vec![]).with_step_limit(Some(50));
    assert!(matches!(
        program.run(&mut runtime),
        Err(RuntimeError::StepLimit { limit: 50 })
    ));
}
