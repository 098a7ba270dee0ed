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

// lib.rs
//
// This is the library root for a cycle-accurate simulator of Tomasulo's
// dynamic scheduling algorithm. `engine` holds the core cycle-driven state
// machine; `trace` and `config` are the collaborator surfaces it is driven
// through; `synth` builds small in-process traces for the CLI and tests;
// `utils` carries the ambient logging setup shared by the CLI and tests.

pub mod config;
pub mod engine;
pub mod errors;
pub mod synth;
pub mod trace;
pub mod utils;

pub use config::TomasuloConfig;
pub use engine::{run_tomasulo, run_tomasulo_report, InstrTimestamps, TomasuloReport};
pub use errors::SimError;
pub use trace::{DecodedInstruction, InstructionTrace, OpCategory, RegId, Trace};
