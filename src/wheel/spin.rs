use std::sync::Arc;
use std::time::Duration;

use crate::items::Item;
use crate::wheel::state::{Phase, WheelState};
use crate::wheel::{WheelConfig, WheelError};

/// Longest spin a plan may describe.
pub const MAX_SPIN: Duration = Duration::from_secs(60 * 60);

/// Tick budget for one spin.
///
/// The baseline is a whole number of laps, so after `total_ticks` forward
/// steps from `start_index` the wheel rests on `target_index` without a snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinPlan {
    pub target_index: usize,
    pub total_ticks: u32,
}

impl SpinPlan {
    pub fn new(
        len: usize,
        start_index: usize,
        target_index: usize,
        config: &WheelConfig,
    ) -> Result<Self, WheelError> {
        if config.tick.is_zero() {
            return Err(WheelError::ZeroTick);
        }
        let too_long = WheelError::SpinTooLong { max_secs: MAX_SPIN.as_secs() };
        if config.tick > MAX_SPIN {
            return Err(too_long);
        }

        let len = len.max(1);
        let extra = (target_index % len + len - start_index % len) % len;
        let len = u32::try_from(len).map_err(|_| too_long)?;
        let base_ticks = base_ticks(config.base_delay, config.tick).ok_or(too_long)?;

        let total_ticks = len
            .checked_mul(config.full_rotations)
            .and_then(|laps| laps.checked_add(base_ticks.div_ceil(len).checked_mul(len)?))
            .and_then(|baseline| baseline.checked_add(extra as u32))
            .ok_or(too_long)?;
        match config.tick.checked_mul(total_ticks) {
            Some(duration) if duration <= MAX_SPIN => Ok(Self {
                target_index,
                total_ticks,
            }),
            _ => Err(too_long),
        }
    }

    pub fn duration(&self, tick: Duration) -> Duration {
        tick.checked_mul(self.total_ticks).unwrap_or(Duration::MAX)
    }
}

fn base_ticks(base_delay: Duration, tick: Duration) -> Option<u32> {
    let tick = tick.as_millis().max(1);
    u32::try_from(base_delay.as_millis().div_ceil(tick)).ok()
}

/// The spin state machine, with no clock of its own.
///
/// The driver calls [`PickController::on_tick`] once per tick and
/// [`PickController::on_deadline`] once the spin duration has elapsed.
#[derive(Debug, Clone)]
pub struct PickController {
    state: WheelState,
}

impl PickController {
    pub fn new(items: Arc<[Item]>) -> Self {
        Self { state: WheelState::new(items) }
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    /// Starts a fresh spin towards `target_index` and returns its plan.
    pub fn begin(&mut self, target_index: usize, config: &WheelConfig) -> Result<SpinPlan, WheelError> {
        if self.state.is_spinning() {
            return Err(WheelError::AlreadySpinning);
        }
        let len = self.state.len();
        if len <= 1 {
            return Err(WheelError::NotEnoughItems { len });
        }
        if target_index >= len {
            return Err(WheelError::IndexOutOfRange { index: target_index, len });
        }

        // Every spin starts from a fresh state at index 0
        let plan = SpinPlan::new(len, 0, target_index, config)?;
        let items = Arc::clone(&self.state.items);
        self.state = WheelState::new(items);
        self.state.phase = Phase::Spinning {
            target_index,
            total_ticks: plan.total_ticks,
        };
        Ok(plan)
    }

    /// Advances one slot. Returns false once the tick budget is spent.
    pub fn on_tick(&mut self) -> bool {
        match self.state.phase {
            Phase::Spinning { total_ticks, .. } if self.state.ticks < total_ticks => {
                self.state.step_forward();
                self.state.ticks += 1;
                true
            }
            _ => false,
        }
    }

    pub fn ticks_remaining(&self) -> u32 {
        match self.state.phase {
            Phase::Spinning { total_ticks, .. } => total_ticks.saturating_sub(self.state.ticks),
            _ => 0,
        }
    }

    pub fn on_deadline(&mut self) {
        if let Phase::Spinning { target_index, .. } = self.state.phase {
            self.state.phase = Phase::Settling { target_index };
        }
    }

    /// Finishes a settling spin and returns the chosen item.
    pub fn settle(&mut self) -> Option<Item> {
        let Phase::Settling { target_index } = self.state.phase else {
            return None;
        };
        debug_assert_eq!(self.state.current_index, target_index);
        self.state.current_index = target_index;
        self.state.phase = Phase::Stopped { chosen: target_index };
        self.state.items.get(target_index).cloned()
    }
}
