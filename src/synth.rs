// synth.rs
//
// Synthetic trace builders for the demo CLI and the test/benchmark
// harnesses. The trace format and decoder are out of scope for the core
// (§1), so these build `InstructionTrace` values directly rather than
// parsing any instruction encoding; category flags and register lists are
// assigned by hand, matching each named scenario from spec §8.

use crate::errors::SimError;
use crate::trace::{DecodedInstruction, InstructionTrace, OpCategory, RegId};

fn int_compute() -> OpCategory {
    OpCategory {
        icomp: true,
        ..Default::default()
    }
}

fn fp_compute() -> OpCategory {
    OpCategory {
        fcomp: true,
        ..Default::default()
    }
}

fn store() -> OpCategory {
    OpCategory {
        store: true,
        ..Default::default()
    }
}

fn load() -> OpCategory {
    OpCategory {
        load: true,
        ..Default::default()
    }
}

fn uncond_branch() -> OpCategory {
    OpCategory {
        uncond: true,
        ..Default::default()
    }
}

fn trap() -> OpCategory {
    OpCategory {
        trap: true,
        ..Default::default()
    }
}

/// Scenario A: a single integer add with no dependencies.
pub fn single_add() -> InstructionTrace {
    let mut t = InstructionTrace::new();
    t.push(DecodedInstruction::new(0, "add", int_compute()).with_inputs(&[2, 3]).with_outputs(&[1]));
    t
}

/// Scenario B: a RAW chain of three integer adds.
/// I1: r1 <- r2 + r3 ; I2: r4 <- r1 + r5 ; I3: r6 <- r4 + r7
pub fn raw_chain() -> InstructionTrace {
    let mut t = InstructionTrace::new();
    t.push(DecodedInstruction::new(0, "add", int_compute()).with_inputs(&[2, 3]).with_outputs(&[1]));
    t.push(DecodedInstruction::new(0, "add", int_compute()).with_inputs(&[1, 5]).with_outputs(&[4]));
    t.push(DecodedInstruction::new(0, "add", int_compute()).with_inputs(&[4, 7]).with_outputs(&[6]));
    t
}

/// Scenario C: four mutually independent integer adds contending for
/// `FU_INT=2` functional units.
pub fn independent_adds(count: usize) -> InstructionTrace {
    let mut t = InstructionTrace::new();
    for i in 0..count {
        let base = (i as RegId) * 3 + 1;
        t.push(
            DecodedInstruction::new(0, "add", int_compute())
                .with_inputs(&[base + 1, base + 2])
                .with_outputs(&[base]),
        );
    }
    t
}

/// Scenario D: a branch sandwiched between two independent integer adds.
/// The branch consumes a dispatch slot but never enters an RS/FU/CDB.
pub fn branch_between() -> InstructionTrace {
    let mut t = InstructionTrace::new();
    t.push(DecodedInstruction::new(0, "add", int_compute()).with_inputs(&[2, 3]).with_outputs(&[1]));
    t.push(DecodedInstruction::new(0, "beq", uncond_branch()));
    t.push(DecodedInstruction::new(0, "add", int_compute()).with_inputs(&[5, 6]).with_outputs(&[4]));
    t
}

/// Scenario E: an FP multiply (latency 9) followed by a dependent FP add.
pub fn fp_chain() -> InstructionTrace {
    let mut t = InstructionTrace::new();
    t.push(DecodedInstruction::new(0, "mul.s", fp_compute()).with_inputs(&[10, 11]).with_outputs(&[9]));
    t.push(DecodedInstruction::new(0, "add.s", fp_compute()).with_inputs(&[9, 12]).with_outputs(&[13]));
    t
}

/// A store followed by a dependent-looking load on the same register:
/// stores have no `r_out`, so the map table is never updated by the store
/// and the load cannot observe a producer-through-map-table link to it.
pub fn store_then_load() -> InstructionTrace {
    let mut t = InstructionTrace::new();
    t.push(DecodedInstruction::new(0, "sw", store()).with_inputs(&[1, 2]));
    t.push(DecodedInstruction::new(0, "lw", load()).with_inputs(&[2]).with_outputs(&[3]));
    t
}

/// A trace consisting only of trap instructions: fetch skips every entry
/// and the engine drains immediately.
pub fn only_traps(count: usize) -> InstructionTrace {
    let mut t = InstructionTrace::new();
    for _ in 0..count {
        t.push(DecodedInstruction::new(0, "trap", trap()));
    }
    t
}

/// Resolves a named scenario for the CLI's `--synthetic` flag.
pub fn named_scenario(name: &str) -> Result<InstructionTrace, SimError> {
    match name {
        "single-add" => Ok(single_add()),
        "raw-chain" => Ok(raw_chain()),
        "independent" => Ok(independent_adds(4)),
        "branch" => Ok(branch_between()),
        "fp-chain" => Ok(fp_chain()),
        "store-load" => Ok(store_then_load()),
        other => Err(SimError::ConfigError(format!(
            "unknown synthetic scenario '{other}' (expected one of: single-add, raw-chain, independent, branch, fp-chain, store-load)"
        ))),
    }
}
