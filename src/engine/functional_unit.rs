// functional_unit.rs
//
// A functional unit pool (§3): a bag of FU slots, each occupied for a fixed
// latency window. Remaining latency is derived from the occupant's
// `execute_cycle`, not tracked as a separate countdown, so a losing CDB
// candidate's completeness is simply recomputed each cycle rather than
// re-triggered.

pub struct FunctionalUnitPool {
    slots: Vec<Option<usize>>,
    latency: u64,
}

impl FunctionalUnitPool {
    pub fn new(size: usize, latency: u64) -> Self {
        Self {
            slots: vec![None; size],
            latency,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    pub fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_none())
    }

    pub fn occupy(&mut self, slot: usize, instr_index: usize) {
        assert!(self.slots[slot].is_none(), "issue into a busy functional unit slot");
        self.slots[slot] = Some(instr_index);
    }

    pub fn free(&mut self, instr_index: usize) {
        for slot in &mut self.slots {
            if *slot == Some(instr_index) {
                *slot = None;
                return;
            }
        }
    }

    pub fn occupants(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// An occupant started on `execute_cycle` is complete at `current_cycle`
    /// once it has occupied the unit for exactly `latency` cycles (§4.5).
    pub fn is_complete(&self, execute_cycle: u64, current_cycle: u64) -> bool {
        current_cycle - execute_cycle >= self.latency
    }
}
