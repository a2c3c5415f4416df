use std::collections::HashSet;

use tracing::trace;

use crate::bytecode::{Instruction, Opcode};

/// Cells the loop body touches, relative to the counter cell
#[derive(Debug, Default)]
struct Footprint {
    /// cells the body itself adds to
    added: HashSet<i32>,
    /// cells overwritten by `Reset` or `Set`
    assigned: HashSet<i32>,
    /// cells overwritten by `Set`
    set: HashSet<i32>,
    /// counter cells of nested regions
    counters: HashSet<i32>,
    /// cells nested regions add to
    targets: HashSet<i32>,
}

impl Footprint {
    /// The fused region runs nested regions, resets and sets once instead of once per
    /// iteration, which is only the same thing if running them again changes nothing.
    fn is_repeatable(&self) -> bool {
        let mut touched = self
            .assigned
            .iter()
            .chain(&self.counters)
            .chain(&self.targets);

        !touched.any(|offset| *offset == 0 || self.added.contains(offset))
            && self.counters.is_disjoint(&self.targets)
            && self.counters.is_disjoint(&self.set)
            && self.targets.is_disjoint(&self.assigned)
    }
}

/// Builds the fused body, tracking where the original body had the data pointer
/// (`current`) against where the rewritten one has it (`cursor`).
#[derive(Debug, Default)]
struct Region {
    operations: Vec<Instruction>,
    current: i32,
    cursor: i32,
    counter_total: i32,
    is_leaf: bool,
    depth: usize,
    footprint: Footprint,
}

impl Region {
    /// Move the data pointer to where the original body had it
    fn flush(&mut self) {
        if self.current != self.cursor {
            self.operations.push(Instruction::new(
                Opcode::MovePointer,
                self.current - self.cursor,
                0,
            ));
            self.cursor = self.current;
        }
    }

    fn multiply(&mut self, factor: i32, target: i32) {
        self.operations.push(Instruction::new(
            Opcode::Multiplication,
            factor,
            target - self.cursor,
        ));
    }

    /// `None` if the instruction can't be part of a multiplication loop
    fn visit(&mut self, instruction: &Instruction) -> Option<()> {
        match instruction.opcode {
            Opcode::Nop => {}
            Opcode::MovePointer => self.current += instruction.value,
            Opcode::Addition => {
                if self.current == 0 {
                    self.counter_total += instruction.value;
                } else {
                    self.footprint.added.insert(self.current);
                    self.multiply(instruction.value, self.current);
                }
            }
            Opcode::Multiplication => {
                let target = self.current + instruction.offset;
                // a nested multiplication feeding our own counter isn't handled
                // and one outside of a push/pop pair has no multiplier
                if target == 0 || self.depth == 0 {
                    return None;
                }
                self.footprint.targets.insert(target);
                self.multiply(instruction.value, target);
            }
            Opcode::Store => {
                self.footprint.counters.insert(self.current);
                self.footprint
                    .targets
                    .insert(self.current + instruction.offset);
                self.flush();
                self.operations.push(*instruction);
            }
            Opcode::Push | Opcode::PushFast => {
                self.is_leaf = false;
                self.depth += 1;
                self.footprint.counters.insert(self.current);
                self.flush();
                // a nested region shares the multiplier stack with us
                self.operations.push(Instruction::op(Opcode::Push));
            }
            Opcode::Pop | Opcode::PopFast => {
                self.depth = self.depth.checked_sub(1)?;
                self.flush();
                self.operations.push(Instruction::op(Opcode::Pop));
            }
            Opcode::Set => {
                self.footprint.assigned.insert(self.current);
                self.footprint.set.insert(self.current);
                self.flush();
                self.operations.push(*instruction);
            }
            Opcode::Reset => {
                for i in 0..instruction.value {
                    self.footprint
                        .assigned
                        .insert(self.current + i * instruction.offset);
                }
                self.flush();
                self.operations.push(*instruction);
                // reset leaves the data pointer on the last cell it cleared
                self.current += (instruction.value - 1) * instruction.offset;
                self.cursor = self.current;
            }
            Opcode::Input
            | Opcode::Output
            | Opcode::LoopStart
            | Opcode::LoopEnd
            | Opcode::Seek
            | Opcode::Stop => return None,
        }
        Some(())
    }

    fn analyse(body: &[Instruction]) -> Option<Region> {
        let mut region = Region {
            is_leaf: true,
            ..Default::default()
        };

        for instruction in body {
            if region.visit(instruction).is_none() {
                trace!(?instruction, "multiplication: unsupported instruction");
                return None;
            }
        }

        // the data pointer has to end up where it started and the counter
        // has to go down by exactly one per iteration
        if region.current != 0
            || region.depth != 0
            || region.counter_total.rem_euclid(256) != 255
        {
            trace!(
                offset = region.current,
                counter = region.counter_total,
                "multiplication: not a counted loop"
            );
            return None;
        }
        if !region.footprint.is_repeatable() {
            trace!(footprint = ?region.footprint, "multiplication: body isn't repeatable");
            return None;
        }

        region.flush();
        Some(region)
    }

    fn append_to(self, text: &mut Vec<Instruction>) {
        let start = text.len();

        // `[->+++<]` has nothing to share a multiplier with
        if let [only] = self.operations.as_slice() {
            if self.is_leaf && *only == Opcode::Multiplication {
                text.push(Instruction::new(Opcode::Store, only.value, only.offset));
                return;
            }
        }

        let (push, pop) = if self.is_leaf {
            (Opcode::PushFast, Opcode::PopFast)
        } else {
            (Opcode::Push, Opcode::Pop)
        };
        text.push(Instruction::op(push));
        text.extend(self.operations);
        text.push(Instruction::op(pop));

        super::link_regions(text, start);
    }
}

/// A loop that only decrements its own counter once per iteration and adds to other
/// cells is a multiplication: `[->+++>+<<]` adds 3 * counter and 1 * counter.
///
/// On success the loop is replaced by a region:
/// `Push`, the body as `Multiplication`s (plus any nested regions, resets and sets),
/// a move back to the counter and the `Pop` that clears the counter.
pub fn multiplication(text: &mut Vec<Instruction>, begin: usize) -> bool {
    let Some(region) = Region::analyse(super::loop_body(text, begin)) else {
        return false;
    };

    text.truncate(begin);
    region.append_to(text);
    true
}
