// reservation_station.rs
//
// A reservation station pool (§3): a bag of fixed-capacity slots, each
// holding at most one instruction (by program-order index). Tie-breaking
// between multiple ready candidates always favors the smaller index —
// the oldest instruction in program order (§4.4, §5).

pub struct ReservationStationPool {
    slots: Vec<Option<usize>>,
}

impl ReservationStationPool {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    pub fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_none())
    }

    /// Occupies `slot` with `instr_index`. Asserts the slot was free:
    /// dispatching into a full reservation station is a simulator bug,
    /// per §7 — it must have been guarded by a stall.
    pub fn occupy(&mut self, slot: usize, instr_index: usize) {
        assert!(self.slots[slot].is_none(), "dispatch into a busy reservation station slot");
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
}
