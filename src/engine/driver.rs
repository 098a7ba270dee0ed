// driver.rs
//
// The cycle driver (§4.8): runs the five substages in the fixed order
// Fetch→Dispatch, Dispatch→Issue, Issue→Execute, Execute→CDB, CDB→Retire,
// then checks the drain condition. This order is what makes "an instruction
// cannot enter dispatch and issue in the same cycle" hold: each substage's
// precondition references a previous stage's timestamp being strictly
// older than the current cycle.

use log::{debug, trace};
use serde::Serialize;

use crate::config::TomasuloConfig;
use crate::trace::Trace;

use super::cdb::CommonDataBus;
use super::functional_unit::FunctionalUnitPool;
use super::ifq::InstructionFetchQueue;
use super::map_table::MapTable;
use super::reservation_station::ReservationStationPool;
use super::runtime::InstrRuntime;

/// The recorded stage-entry timestamps for one instruction, for reporting
/// to a host (§3). A `0` means "not yet reached."
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InstrTimestamps {
    pub index: usize,
    pub dispatch_cycle: u64,
    pub issue_cycle: u64,
    pub execute_cycle: u64,
    pub cdb_cycle: u64,
}

/// The result of running the engine to completion: the total cycle count
/// (`runTomasulo`'s sole externally visible return value, §6) plus the
/// per-instruction timestamps a host needs for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct TomasuloReport {
    pub total_cycles: u64,
    pub timestamps: Vec<InstrTimestamps>,
}

/// Resource types a reservation station/functional unit pool belongs to,
/// used only for log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PoolKind {
    Int,
    Fp,
}

impl PoolKind {
    fn label(self) -> &'static str {
        match self {
            PoolKind::Int => "INT",
            PoolKind::Fp => "FP",
        }
    }
}

/// Owns every piece of engine state (§2): the IFQ, both reservation station
/// pools, both functional unit pools, the map table, and the CDB.
pub struct TomasuloEngine {
    config: TomasuloConfig,
    runtime: Vec<InstrRuntime>,
    ifq: InstructionFetchQueue,
    rs_int: ReservationStationPool,
    rs_fp: ReservationStationPool,
    fu_int: FunctionalUnitPool,
    fu_fp: FunctionalUnitPool,
    cdb: CommonDataBus,
    map_table: MapTable,
    fetch_cursor: usize,
    cycle: u64,
}

impl TomasuloEngine {
    fn new(config: TomasuloConfig, num_insn: usize) -> Self {
        Self {
            ifq: InstructionFetchQueue::new(config.ifq_size),
            rs_int: ReservationStationPool::new(config.rs_int),
            rs_fp: ReservationStationPool::new(config.rs_fp),
            fu_int: FunctionalUnitPool::new(config.fu_int, config.int_latency),
            fu_fp: FunctionalUnitPool::new(config.fu_fp, config.fp_latency),
            cdb: CommonDataBus::new(),
            map_table: MapTable::new(config.num_registers),
            runtime: vec![InstrRuntime::default(); num_insn + 1],
            fetch_cursor: 1,
            cycle: 1,
            config,
        }
    }

    /// Runs until the drain condition (§4.7) holds, returning the total
    /// cycle count.
    ///
    /// An empty (or all-trap) trace is already drained before a single
    /// substage runs, so it short-circuits to cycle 1 (§8's empty-trace
    /// boundary case). Otherwise the cycle counter is advanced past the
    /// cycle whose substages emptied the pipeline before the drain check is
    /// evaluated — one cycle "of retire" past the last CDB broadcast — the
    /// convention the worked examples in §8 (e.g. Scenario A: cdb=7,
    /// total_cycles=8) assume.
    fn run(&mut self, trace: &dyn Trace) -> u64 {
        // Skipping leading traps is a cursor-only bookkeeping step, not
        // itself a pipeline activity, so a trace consisting only of traps
        // drains before any cycle's substages run, at cycle 1 — same as a
        // literally empty trace (§8's boundary case).
        self.skip_leading_traps(trace);
        if self.is_done(trace) {
            return self.cycle;
        }

        loop {
            self.tick(trace);
            self.cycle += 1;

            if self.is_done(trace) {
                return self.cycle;
            }
        }
    }

    fn tick(&mut self, trace: &dyn Trace) {
        self.fetch_to_dispatch(trace);
        self.dispatch_to_issue();
        self.issue_to_execute(trace);
        self.execute_to_cdb(trace);
        self.cdb_to_retire();

        #[cfg(debug_assertions)]
        self.check_invariants();
    }

    // ---- §4.1 / §4.2: Fetch and Fetch→Dispatch -----------------------

    fn skip_leading_traps(&mut self, trace: &dyn Trace) {
        let num_insn = trace.sim_num_insn();

        while self.fetch_cursor <= num_insn {
            let instr = trace
                .get_instr(self.fetch_cursor)
                .expect("fetch cursor within range must resolve");
            if instr.category.is_trap() {
                trace!("cycle {}: fetch skips trap instruction {}", self.cycle, instr.index);
                self.fetch_cursor += 1;
                continue;
            }
            break;
        }
    }

    fn fetch(&mut self, trace: &dyn Trace) {
        let num_insn = trace.sim_num_insn();
        self.skip_leading_traps(trace);

        if self.fetch_cursor > num_insn {
            return;
        }

        if !self.ifq.is_full() {
            self.ifq.push_back(self.fetch_cursor);
            trace!("cycle {}: fetch instruction {}", self.cycle, self.fetch_cursor);
            self.fetch_cursor += 1;
        }
    }

    fn fetch_to_dispatch(&mut self, trace: &dyn Trace) {
        self.fetch(trace);

        let Some(head_index) = self.ifq.front() else {
            return;
        };
        let head = trace.get_instr(head_index).expect("IFQ entry must resolve in the trace");

        if head.category.is_branch() {
            self.ifq.pop_front();
            self.runtime[head_index].dispatch_cycle = self.cycle;
            debug!("cycle {}: dispatch branch {} (no RS/FU)", self.cycle, head_index);
            return;
        }

        if head.category.uses_int_fu() {
            if let Some(slot) = self.rs_int.free_slot() {
                self.dispatch_into(trace, head_index, PoolKind::Int, slot);
            }
            return;
        }

        if head.category.uses_fp_fu() {
            if let Some(slot) = self.rs_fp.free_slot() {
                self.dispatch_into(trace, head_index, PoolKind::Fp, slot);
            }
        }
    }

    fn dispatch_into(&mut self, trace: &dyn Trace, instr_index: usize, pool: PoolKind, slot: usize) {
        let instr = trace.get_instr(instr_index).expect("dispatch target must resolve");

        // Q snapshot is taken from the map table before this instruction's
        // own outputs are renamed, per §4.2 — though since an instruction
        // never renames against its own dispatch, the order is equivalent
        // either way.
        let mut q = [None; 3];
        for (slot, reg) in q.iter_mut().zip(instr.r_in.iter()) {
            if let Some(reg) = reg {
                *slot = self.map_table.producer_of(*reg);
            }
        }

        for reg in instr.r_out.iter().flatten() {
            if *reg != 0 {
                self.map_table.set(*reg, instr_index);
            }
        }

        self.runtime[instr_index].q = q;
        self.runtime[instr_index].dispatch_cycle = self.cycle;

        match pool {
            PoolKind::Int => self.rs_int.occupy(slot, instr_index),
            PoolKind::Fp => self.rs_fp.occupy(slot, instr_index),
        }

        self.ifq.pop_front();
        debug!(
            "cycle {}: dispatch instruction {} into {} RS[{}]",
            self.cycle,
            instr_index,
            pool.label(),
            slot
        );
    }

    // ---- §4.3: Dispatch→Issue -----------------------------------------

    fn dispatch_to_issue(&mut self) {
        Self::dispatch_to_issue_pool(&self.rs_int, &mut self.runtime, self.cycle, PoolKind::Int);
        Self::dispatch_to_issue_pool(&self.rs_fp, &mut self.runtime, self.cycle, PoolKind::Fp);
    }

    fn dispatch_to_issue_pool(
        rs: &ReservationStationPool,
        runtime: &mut [InstrRuntime],
        cycle: u64,
        pool: PoolKind,
    ) {
        for idx in rs.occupants().collect::<Vec<_>>() {
            let rt = &mut runtime[idx];
            if !rt.is_issued() && rt.dispatch_cycle < cycle {
                rt.issue_cycle = cycle;
                debug!("cycle {}: issue instruction {} ({})", cycle, idx, pool.label());
            }
        }
    }

    // ---- §4.4: Issue→Execute -------------------------------------------

    fn issue_to_execute(&mut self, trace: &dyn Trace) {
        Self::issue_to_execute_pool(&self.rs_int, &mut self.fu_int, &mut self.runtime, self.cycle, trace, PoolKind::Int);
        Self::issue_to_execute_pool(&self.rs_fp, &mut self.fu_fp, &mut self.runtime, self.cycle, trace, PoolKind::Fp);
    }

    fn issue_to_execute_pool(
        rs: &ReservationStationPool,
        fu: &mut FunctionalUnitPool,
        runtime: &mut [InstrRuntime],
        cycle: u64,
        trace: &dyn Trace,
        pool: PoolKind,
    ) {
        loop {
            let Some(fu_slot) = fu.free_slot() else {
                break;
            };

            // Among ready candidates not already occupying an FU, the
            // oldest (smallest program-order index) wins (§4.4, §5). An
            // instruction only becomes execute-eligible a cycle after it
            // was issued, mirroring dispatch→issue's own "strictly older"
            // precondition (§4.8's "no same-cycle hand-off" rule).
            let candidate = rs
                .occupants()
                .filter(|&idx| {
                    let rt = &runtime[idx];
                    !rt.in_fu && rt.is_issued() && rt.issue_cycle < cycle && rt.is_ready()
                })
                .min();

            let Some(idx) = candidate else {
                break;
            };

            assert!(runtime[idx].is_ready(), "execute entry with a pending Q[]");
            let _ = trace.get_instr(idx);

            fu.occupy(fu_slot, idx);
            runtime[idx].execute_cycle = cycle;
            runtime[idx].in_fu = true;
            debug!("cycle {}: execute instruction {} ({} FU[{}])", cycle, idx, pool.label(), fu_slot);
        }
    }

    // ---- §4.5: Execute→CDB ----------------------------------------------

    fn execute_to_cdb(&mut self, trace: &dyn Trace) {
        // Stores vacate on completion with no broadcast and no wake-up.
        Self::retire_completed_stores(&mut self.rs_int, &mut self.fu_int, &mut self.runtime, self.cycle, trace);
        Self::retire_completed_stores(&mut self.rs_fp, &mut self.fu_fp, &mut self.runtime, self.cycle, trace);

        // Among all remaining non-store complete instructions, the oldest
        // wins the single CDB slot this cycle.
        let mut winner: Option<(usize, PoolKind)> = None;
        for (idx, pool) in Self::complete_non_store_candidates(&self.fu_int, &self.runtime, self.cycle, trace, PoolKind::Int)
            .into_iter()
            .chain(Self::complete_non_store_candidates(&self.fu_fp, &self.runtime, self.cycle, trace, PoolKind::Fp))
        {
            winner = match winner {
                Some((w, _)) if w <= idx => winner,
                _ => Some((idx, pool)),
            };
        }

        if let Some((idx, pool)) = winner {
            self.runtime[idx].cdb_cycle = self.cycle;
            self.cdb.broadcast(idx);
            match pool {
                PoolKind::Int => {
                    self.fu_int.free(idx);
                    self.rs_int.free(idx);
                },
                PoolKind::Fp => {
                    self.fu_fp.free(idx);
                    self.rs_fp.free(idx);
                },
            }
            self.runtime[idx].in_fu = false;
            debug!("cycle {}: instruction {} broadcasts on the CDB", self.cycle, idx);
        }
    }

    fn retire_completed_stores(
        rs: &mut ReservationStationPool,
        fu: &mut FunctionalUnitPool,
        runtime: &mut [InstrRuntime],
        cycle: u64,
        trace: &dyn Trace,
    ) {
        let done: Vec<usize> = fu
            .occupants()
            .filter(|&idx| {
                let is_store = trace.get_instr(idx).map(|i| i.category.is_store()).unwrap_or(false);
                is_store && fu.is_complete(runtime[idx].execute_cycle, cycle)
            })
            .collect();

        for idx in done {
            fu.free(idx);
            rs.free(idx);
            runtime[idx].in_fu = false;
            debug!("cycle {}: store {} completes without broadcasting", cycle, idx);
        }
    }

    fn complete_non_store_candidates(
        fu: &FunctionalUnitPool,
        runtime: &[InstrRuntime],
        cycle: u64,
        trace: &dyn Trace,
        pool: PoolKind,
    ) -> Vec<(usize, PoolKind)> {
        fu.occupants()
            .filter(|&idx| {
                let is_store = trace.get_instr(idx).map(|i| i.category.is_store()).unwrap_or(false);
                !is_store && fu.is_complete(runtime[idx].execute_cycle, cycle)
            })
            .map(|idx| (idx, pool))
            .collect()
    }

    // ---- §4.6: CDB→Retire ------------------------------------------------

    fn cdb_to_retire(&mut self) {
        if let Some(broadcaster) = self.cdb.current() {
            Self::wake_dependents(&mut self.rs_int, &mut self.runtime, broadcaster);
            Self::wake_dependents(&mut self.rs_fp, &mut self.runtime, broadcaster);
        }
        self.cdb.clear();
    }

    fn wake_dependents(rs: &mut ReservationStationPool, runtime: &mut [InstrRuntime], broadcaster: usize) {
        for idx in rs.occupants().collect::<Vec<_>>() {
            for producer in runtime[idx].q.iter_mut() {
                if *producer == Some(broadcaster) {
                    *producer = None;
                }
            }
        }
    }

    // ---- §4.7: Completion check -------------------------------------------

    fn is_done(&self, trace: &dyn Trace) -> bool {
        self.fetch_cursor > trace.sim_num_insn()
            && self.ifq.is_empty()
            && self.rs_int.is_empty()
            && self.rs_fp.is_empty()
            && self.fu_int.is_empty()
            && self.fu_fp.is_empty()
    }

    // ---- §7/§8: invariant checks (debug builds only) ----------------------

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        for idx in self.rs_int.occupants().chain(self.rs_fp.occupants()) {
            let rt = &self.runtime[idx];
            assert!(rt.is_dispatched(), "RS entry without a dispatch timestamp");
            if rt.is_issued() {
                assert!(rt.issue_cycle > rt.dispatch_cycle, "issue did not strictly follow dispatch");
            }
            if rt.execute_cycle != 0 {
                assert!(rt.execute_cycle > rt.issue_cycle, "execute did not strictly follow issue");
            }
            assert!(
                rt.cdb_cycle == 0,
                "instruction with a non-zero cdb_cycle still occupies a reservation station after retire"
            );
        }
    }

    fn timestamps(&self) -> Vec<InstrTimestamps> {
        self.runtime
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, rt)| InstrTimestamps {
                index,
                dispatch_cycle: rt.dispatch_cycle,
                issue_cycle: rt.issue_cycle,
                execute_cycle: rt.execute_cycle,
                cdb_cycle: rt.cdb_cycle,
            })
            .collect()
    }
}

/// `runTomasulo(trace) -> total_cycles` (§6): the only externally visible
/// operation of the core.
pub fn run_tomasulo(trace: &dyn Trace, config: TomasuloConfig) -> u64 {
    let mut engine = TomasuloEngine::new(config, trace.sim_num_insn());
    engine.run(trace)
}

/// A superset of `run_tomasulo` that also returns the per-instruction stage
/// timestamps, for hosts that report on individual instructions (the CLI,
/// tests) rather than just the aggregate cycle count.
pub fn run_tomasulo_report(trace: &dyn Trace, config: TomasuloConfig) -> TomasuloReport {
    let mut engine = TomasuloEngine::new(config, trace.sim_num_insn());
    let total_cycles = engine.run(trace);
    TomasuloReport {
        total_cycles,
        timestamps: engine.timestamps(),
    }
}
