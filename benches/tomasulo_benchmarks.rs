use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tomasulo_sim::{run_tomasulo, synth, DecodedInstruction, InstructionTrace, OpCategory, TomasuloConfig};

fn int_add(inputs: &[u32], output: u32) -> DecodedInstruction {
    DecodedInstruction::new(0, "add", OpCategory { icomp: true, ..Default::default() })
        .with_inputs(inputs)
        .with_outputs(&[output])
}

/// A long dependency chain: every instruction waits on its immediate
/// predecessor's CDB broadcast, the worst case for reservation-station
/// occupancy duration.
fn raw_chain_of(len: usize) -> InstructionTrace {
    let mut trace = InstructionTrace::new();
    let mut producer = 1u32;
    for i in 0..len {
        let dest = (i as u32) + 2;
        trace.push(int_add(&[producer, 0], dest));
        producer = dest;
    }
    trace
}

/// A wide independent workload: every instruction is ready at dispatch,
/// stressing oldest-first functional-unit and CDB arbitration instead of
/// CDB wake-up chains.
fn independent_of(len: usize) -> InstructionTrace {
    let mut trace = InstructionTrace::new();
    for i in 0..len {
        let base = (i as u32) * 3 + 1;
        trace.push(int_add(&[base + 1, base + 2], base));
    }
    trace
}

fn bench_raw_chain(c: &mut Criterion) {
    let trace = raw_chain_of(500);
    c.bench_function("raw_chain_500", |b| {
        b.iter(|| black_box(run_tomasulo(black_box(&trace), TomasuloConfig::default())));
    });
}

fn bench_independent(c: &mut Criterion) {
    let trace = independent_of(500);
    c.bench_function("independent_adds_500", |b| {
        b.iter(|| black_box(run_tomasulo(black_box(&trace), TomasuloConfig::default())));
    });
}

fn bench_named_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("named_scenarios");
    for name in ["single-add", "raw-chain", "independent", "branch", "fp-chain", "store-load"] {
        let trace = synth::named_scenario(name).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(run_tomasulo(black_box(&trace), TomasuloConfig::default())));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_raw_chain, bench_independent, bench_named_scenarios);
criterion_main!(benches);
