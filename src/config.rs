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

// config.rs
//
// Tunable parameters for the Tomasulo engine (§6). These are compile-time
// constants by default in the reference algorithm; the Rust port exposes
// them as a builder so tests and the CLI can vary resource counts (e.g. to
// demonstrate a structural hazard with a single integer functional unit)
// without touching the engine itself.

/// Tunable resource sizes and latencies for the Tomasulo engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TomasuloConfig {
    /// Capacity of the instruction fetch queue.
    pub ifq_size: usize,
    /// Number of integer reservation stations.
    pub rs_int: usize,
    /// Number of floating-point reservation stations.
    pub rs_fp: usize,
    /// Number of integer functional units.
    pub fu_int: usize,
    /// Number of floating-point functional units.
    pub fu_fp: usize,
    /// Integer functional unit latency, in cycles.
    pub int_latency: u64,
    /// Floating-point functional unit latency, in cycles.
    pub fp_latency: u64,
    /// Number of input register operands modeled per instruction.
    pub num_input_regs: usize,
    /// Number of output register operands modeled per instruction.
    pub num_output_regs: usize,
    /// Size of the architectural register file tracked by the map table.
    pub num_registers: usize,
}

impl Default for TomasuloConfig {
    fn default() -> Self {
        Self {
            ifq_size: 10,
            rs_int: 4,
            rs_fp: 2,
            fu_int: 2,
            fu_fp: 1,
            int_latency: 4,
            fp_latency: 9,
            num_input_regs: 3,
            num_output_regs: 2,
            num_registers: 64,
        }
    }
}

impl TomasuloConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ifq_size(mut self, size: usize) -> Self {
        assert!(size > 0, "IFQ size must be positive");
        self.ifq_size = size;
        self
    }

    pub fn with_rs_int(mut self, count: usize) -> Self {
        self.rs_int = count;
        self
    }

    pub fn with_rs_fp(mut self, count: usize) -> Self {
        self.rs_fp = count;
        self
    }

    pub fn with_fu_int(mut self, count: usize) -> Self {
        self.fu_int = count;
        self
    }

    pub fn with_fu_fp(mut self, count: usize) -> Self {
        self.fu_fp = count;
        self
    }

    pub fn with_int_latency(mut self, cycles: u64) -> Self {
        assert!(cycles > 0, "Functional unit latency must be positive");
        self.int_latency = cycles;
        self
    }

    pub fn with_fp_latency(mut self, cycles: u64) -> Self {
        assert!(cycles > 0, "Functional unit latency must be positive");
        self.fp_latency = cycles;
        self
    }

    pub fn with_num_registers(mut self, count: usize) -> Self {
        assert!(count > 0, "Register file must have at least one register");
        self.num_registers = count;
        self
    }
}
