#![allow(dead_code)]

use brainfudge::{EofPolicy, Optimizations, Program, Runtime, RuntimeError};

/// What a finished run looked like from the outside
#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub output: Vec<u8>,
    pub data_pointer: isize,
}

/// Runs `source` with the given passes, `None` if it didn't halt within `limit` steps
pub fn run_with(
    source: &[u8],
    options: Optimizations,
    input: &[u8],
    limit: u64,
) -> Option<(Outcome, Program)> {
    let mut program = Program::with_optimizations(source, options).unwrap();
    let mut runtime = Runtime::new(input, vec![])
        .with_eof(EofPolicy::Zero)
        .with_step_limit(Some(limit));
    match program.run(&mut runtime) {
        Ok(()) => Some((
            Outcome {
                output: runtime.into_output(),
                data_pointer: program.data_pointer(),
            },
            program,
        )),
        Err(RuntimeError::StepLimit { .. }) => None,
        Err(e) => panic!("unexpected runtime error: {e}"),
    }
}

/// Runs the raw and optimized forms and checks they agree, returns false if the
/// raw form never halted
pub fn assert_equivalent(source: &[u8], input: &[u8]) -> bool {
    let Some((raw, raw_program)) = run_with(source, Optimizations::empty(), input, 200_000) else {
        return false;
    };
    let (optimized, optimized_program) =
        run_with(source, Optimizations::all(), input, 2_000_000).unwrap_or_else(|| {
            panic!(
                "optimized form of {:?} didn't halt",
                String::from_utf8_lossy(source)
            )
        });

    assert_eq!(
        raw,
        optimized,
        "{:?} behaves differently once optimized",
        String::from_utf8_lossy(source)
    );
    let (low, high) = (raw.data_pointer.min(0) - 64, raw.data_pointer.max(0) + 64);
    for index in low..=high {
        assert_eq!(
            raw_program.tape().get(index),
            optimized_program.tape().get(index),
            "cell {index} differs for {:?}",
            String::from_utf8_lossy(source)
        );
    }
    true
}
