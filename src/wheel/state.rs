use std::sync::Arc;

use crate::items::Item;
use crate::wheel::window::{self, VisibleSlot};

/// Where a wheel is in its spin cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Spinning { target_index: usize, total_ticks: u32 },
    Settling { target_index: usize },
    Stopped { chosen: usize },
}

/// Snapshot of one wheel, published to the renderer after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelState {
    pub items: Arc<[Item]>,
    pub current_index: usize,
    pub rotation: u64,
    pub ticks: u32,
    pub phase: Phase,
}

impl WheelState {
    pub fn new(items: Arc<[Item]>) -> Self {
        Self {
            items,
            current_index: 0,
            rotation: 0,
            ticks: 0,
            phase: Phase::Idle,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, Phase::Spinning { .. } | Phase::Settling { .. })
    }

    pub fn chosen_item(&self) -> Option<&Item> {
        match self.phase {
            Phase::Stopped { chosen } => self.items.get(chosen),
            _ => None,
        }
    }

    /// Moves one slot forward, counting a rotation when the index wraps to 0.
    pub fn step_forward(&mut self) {
        if self.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.len();
        if self.current_index == 0 {
            self.rotation += 1;
        }
    }

    /// Moves one slot backward. Wrapping below the first lap lands on the
    /// last lap of the repeated sequence the renderer reads for `radius`.
    pub fn step_backward(&mut self, radius: usize) {
        if self.is_empty() {
            return;
        }
        let len = self.len();
        self.current_index = (self.current_index + len - 1) % len;
        if self.current_index == len - 1 {
            let laps = window::repeat_count(len, radius.max(1)) as u64;
            self.rotation = (self.rotation % laps + laps - 1) % laps;
        }
    }

    pub fn visible_slots(&self, radius: usize) -> Vec<VisibleSlot> {
        // Every state keeps current_index < len, so only an empty wheel yields nothing.
        window::visible_slots(self.len(), self.current_index, self.rotation, radius).unwrap_or_default()
    }
}
