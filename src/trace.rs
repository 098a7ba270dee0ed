// Copyright (c) 2024 Mudit Bhargava
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
//

// trace.rs
//
// The instruction trace and decoded-instruction surface the Tomasulo engine
// is driven by. Decoding, opcode flag tables, and ISA register semantics are
// out of scope for this crate; the engine only ever consults the category
// flags and register lists below.

use serde::{Deserialize, Serialize};

/// Architectural register number. Register 0 is conventionally the zero
/// register and is never tracked by the map table.
pub type RegId = u32;

/// Opaque category flags derived from an instruction's opcode (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpCategory {
    pub icomp: bool,
    pub fcomp: bool,
    pub load: bool,
    pub store: bool,
    pub cond: bool,
    pub uncond: bool,
    pub trap: bool,
}

impl OpCategory {
    pub fn uses_int_fu(&self) -> bool {
        self.icomp || self.load || self.store
    }

    pub fn uses_fp_fu(&self) -> bool {
        self.fcomp
    }

    pub fn is_branch(&self) -> bool {
        self.cond || self.uncond
    }

    pub fn writes_cdb(&self) -> bool {
        self.icomp || self.load || self.fcomp
    }

    pub fn is_store(&self) -> bool {
        self.store
    }

    pub fn is_trap(&self) -> bool {
        self.trap
    }
}

/// A single decoded instruction, as delivered by the trace (§3, §6).
///
/// `r_in`/`r_out` use `None` for "unused", matching the re-architecture
/// guidance to avoid a bare sentinel value. `index` is the program-order
/// serial number; position 0 is reserved and never issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedInstruction {
    pub index: usize,
    pub op: String,
    pub category: OpCategory,
    pub r_in: [Option<RegId>; 3],
    pub r_out: [Option<RegId>; 2],
}

impl DecodedInstruction {
    pub fn new(index: usize, op: impl Into<String>, category: OpCategory) -> Self {
        Self {
            index,
            op: op.into(),
            category,
            r_in: [None, None, None],
            r_out: [None, None],
        }
    }

    pub fn with_inputs(mut self, inputs: &[RegId]) -> Self {
        for (slot, reg) in self.r_in.iter_mut().zip(inputs.iter()) {
            *slot = Some(*reg);
        }
        self
    }

    pub fn with_outputs(mut self, outputs: &[RegId]) -> Self {
        for (slot, reg) in self.r_out.iter_mut().zip(outputs.iter()) {
            *slot = Some(*reg);
        }
        self
    }
}

/// The collaborator contract of §6: `get_instr(trace, i)` and `sim_num_insn`.
///
/// Position 0 is reserved; implementations are free to leave it absent.
pub trait Trace {
    fn get_instr(&self, index: usize) -> Option<&DecodedInstruction>;
    fn sim_num_insn(&self) -> usize;
}

/// A simple `Vec`-backed trace for in-process construction: the demo CLI's
/// synthetic workloads and the test/benchmark harnesses build one of these
/// directly rather than going through a decoder. Index 0 is always absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstructionTrace {
    instructions: Vec<DecodedInstruction>,
}

impl InstructionTrace {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }

    /// Appends an instruction, assigning it the next program-order index
    /// (starting at 1).
    pub fn push(&mut self, mut instr: DecodedInstruction) -> usize {
        let index = self.instructions.len() + 1;
        instr.index = index;
        self.instructions.push(instr);
        index
    }
}

impl Trace for InstructionTrace {
    fn get_instr(&self, index: usize) -> Option<&DecodedInstruction> {
        if index == 0 {
            return None;
        }
        self.instructions.get(index - 1)
    }

    fn sim_num_insn(&self) -> usize {
        self.instructions.len()
    }
}
