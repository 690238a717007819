pub mod handle;
pub mod spin;
pub mod state;
pub mod window;

use std::time::Duration;

use thiserror::Error;

pub use handle::WheelHandle;
pub use state::{Phase, WheelState};
pub use window::{SlotStyle, VisibleSlot};

pub const DEFAULT_TICK_MS: u64 = 80;
pub const DEFAULT_RADIUS: usize = 4;
pub const DEFAULT_FULL_ROTATIONS: u32 = 4;
pub const DEFAULT_BASE_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelConfig {
    /// Time between two forward steps of a spinning wheel.
    pub tick: Duration,
    /// Slots shown on each side of the center slot.
    pub radius: usize,
    /// Full laps every spin makes before the base delay.
    pub full_rotations: u32,
    pub base_delay: Duration,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            radius: DEFAULT_RADIUS,
            full_rotations: DEFAULT_FULL_ROTATIONS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WheelError {
    #[error("cannot build a wheel from an empty item list")]
    EmptyItems,
    #[error("picking needs at least two items, got {len}")]
    NotEnoughItems { len: usize },
    #[error("index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("wheel radius must be at least 1")]
    ZeroRadius,
    #[error("the wheel is already spinning")]
    AlreadySpinning,
    #[error("tick interval must be non-zero")]
    ZeroTick,
    #[error("spin settings describe a spin longer than {max_secs} s")]
    SpinTooLong { max_secs: u64 },
}

impl WheelError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}
