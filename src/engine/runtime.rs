// runtime.rs
//
// Per-instruction mutable pipeline state: the stage-entry timestamps and the
// Q[] producer references of §3. This is kept separate from
// `DecodedInstruction` (owned by the trace, immutable) because it is
// engine-owned and mutated cycle by cycle; indices reference the same
// program-order position as the trace, per the re-architecture guidance to
// use a producer-index handle instead of a bare back-pointer.

/// `0` means "not yet reached", matching the stage-entry timestamp
/// convention of §3.
const NOT_REACHED: u64 = 0;

#[derive(Debug, Clone, Default)]
pub struct InstrRuntime {
    pub dispatch_cycle: u64,
    pub issue_cycle: u64,
    pub execute_cycle: u64,
    pub cdb_cycle: u64,

    /// Producer reference per input operand: `None` once resolved (either
    /// the value was already live, or the producer has broadcast).
    pub q: [Option<usize>; 3],

    /// Whether this instruction currently occupies a functional unit slot,
    /// used to exclude it from the issue→execute "oldest ready" scan even
    /// though it still occupies its reservation station.
    pub in_fu: bool,
}

impl InstrRuntime {
    pub fn is_dispatched(&self) -> bool {
        self.dispatch_cycle != NOT_REACHED
    }

    pub fn is_issued(&self) -> bool {
        self.issue_cycle != NOT_REACHED
    }

    pub fn is_broadcast(&self) -> bool {
        self.cdb_cycle != NOT_REACHED
    }

    /// Ready to move to execute: every input operand is either already
    /// available or its producer has already broadcast (§4.4).
    pub fn is_ready(&self) -> bool {
        self.q.iter().all(|producer| producer.is_none())
    }
}
