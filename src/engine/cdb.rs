// cdb.rs
//
// The Common Data Bus (§3): a single slot holding at most one broadcasting
// instruction per cycle, shared across both functional unit pools.

pub struct CommonDataBus {
    broadcaster: Option<usize>,
}

impl CommonDataBus {
    pub fn new() -> Self {
        Self { broadcaster: None }
    }

    pub fn broadcast(&mut self, instr_index: usize) {
        assert!(
            self.broadcaster.is_none(),
            "two instructions broadcast on the CDB in the same cycle"
        );
        self.broadcaster = Some(instr_index);
    }

    pub fn current(&self) -> Option<usize> {
        self.broadcaster
    }

    pub fn clear(&mut self) {
        self.broadcaster = None;
    }
}
