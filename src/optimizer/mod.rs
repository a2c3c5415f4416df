use bitflags::bitflags;
use tracing::debug;

use crate::bytecode::{Instruction, Opcode};

pub mod comment_block;
pub mod empty_loop;
pub mod multiplication;
pub mod pop_fast;
pub mod reset;
pub mod seek;

pub use pop_fast::drop_pop_fast;

bitflags! {
    /// Which peephole passes run while parsing
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Optimizations: u8 {
        /// Drop loops that are entered on a cell known to be zero
        const COMMENT_BLOCK = 1 << 0;
        /// `[-]` becomes `Reset`
        const RESET = 1 << 1;
        /// `[>]` becomes `Seek`
        const SEEK = 1 << 2;
        /// `[->++<]` becomes a `Push`/`Multiplication`/`Pop` region
        const MULTIPLICATION = 1 << 3;
        /// `[]` is removed
        const EMPTY_LOOP = 1 << 4;
        /// `[-]+++` becomes `Set(3)`
        const SET_FOLDING = 1 << 5;
    }
}

impl Default for Optimizations {
    fn default() -> Self {
        Self::all()
    }
}

type Pass = fn(&mut Vec<Instruction>, usize) -> bool;

/// In the order they are tried, the first pass that applies wins
const PASSES: [(Optimizations, &str, Pass); 5] = [
    (Optimizations::COMMENT_BLOCK, "comment-block", comment_block::comment_block),
    (Optimizations::RESET, "reset", reset::reset),
    (Optimizations::SEEK, "seek", seek::seek),
    (Optimizations::MULTIPLICATION, "multiplication", multiplication::multiplication),
    (Optimizations::EMPTY_LOOP, "empty-loop", empty_loop::empty_loop),
];

/// Runs the loop passes over a loop that was just closed.
///
/// `begin` is the position of its `LoopStart`, the linked `LoopEnd` is the last
/// instruction. Passes only truncate and append so every earlier position stays valid.
pub fn optimize_loop(text: &mut Vec<Instruction>, begin: usize, options: Optimizations) -> bool {
    for (flag, name, pass) in PASSES {
        if options.contains(flag) && pass(text, begin) {
            debug!(pass = name, begin, len = text.len(), "rewrote loop");
            return true;
        }
    }
    false
}

/// The instructions between the `LoopStart` at `begin` and the trailing `LoopEnd`
fn loop_body(text: &[Instruction], begin: usize) -> &[Instruction] {
    &text[begin + 1..text.len() - 1]
}

/// Links every `Push*`/`Pop*` pair appended at or after `from`
fn link_regions(text: &mut [Instruction], from: usize) {
    let mut open = vec![];
    for pc in from..text.len() {
        match text[pc].opcode {
            Opcode::Push | Opcode::PushFast => open.push(pc),
            Opcode::Pop | Opcode::PopFast => {
                if let Some(start) = open.pop() {
                    text[start].link = pc;
                    text[pc].link = start;
                }
            }
            _ => {}
        }
    }
}
