//! Receive state machine: start-edge detection, half-bit start confirmation,
//! mid-bit data sampling, and stop-bit validation.

use crate::event::LossKind;
use crate::queue::ByteQueue;
use crate::sync::LineSynchronizer;

/// Receiver phase; exactly one is active per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RxPhase {
    /// Watching the synchronized line for a start edge.
    #[default]
    Idle,
    /// Counting toward the half-bit start confirmation point.
    Start,
    /// Latching data bits at baud boundaries, LSB first.
    Data,
    /// Validating the stop bit.
    Stop,
}

/// Per-cycle receiver outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RxTick {
    /// Byte assembled and enqueued this cycle (a one-cycle valid pulse).
    pub received: Option<u8>,
    /// Condition that silently discarded data this cycle.
    pub dropped: Option<LossKind>,
}

/// Receive state machine.
///
/// The synchronizer pipeline shifts every cycle regardless of phase, so the
/// machine only ever acts on a line sample that has settled for two cycles.
/// Re-checking the line at the half-bit point centers all later bit sampling
/// away from edge jitter and rejects sub-half-bit glitches as false starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Receiver {
    phase: RxPhase,
    shift_byte: u8,
    bit_index: u8,
    tick_counter: u32,
    sync: LineSynchronizer,
}

impl Receiver {
    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> RxPhase {
        self.phase
    }

    /// Returns true while a frame is being assembled.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.phase, RxPhase::Idle)
    }

    /// Re-homes the machine to idle and restores the synchronizer to mark.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances the receiver by exactly one clock cycle.
    ///
    /// A byte that survives stop-bit validation is pushed to `queue`; a full
    /// queue or a low stop bit discards it silently, reported only through
    /// [`RxTick::dropped`].
    pub fn step(
        &mut self,
        baud_divisor: u32,
        rx_enable: bool,
        raw_line: bool,
        queue: &mut ByteQueue,
    ) -> RxTick {
        let line = self.sync.sample(raw_line);
        let boundary = self.tick_counter + 1 >= baud_divisor;
        let mut tick = RxTick {
            received: None,
            dropped: None,
        };

        match self.phase {
            RxPhase::Idle => {
                if rx_enable && !line {
                    self.tick_counter = 0;
                    self.phase = RxPhase::Start;
                }
            }
            RxPhase::Start => {
                if self.tick_counter >= baud_divisor / 2 {
                    if line {
                        // Glitch shorter than half a bit period.
                        self.phase = RxPhase::Idle;
                        tick.dropped = Some(LossKind::FalseStart);
                    } else {
                        self.tick_counter = 0;
                        self.bit_index = 0;
                        self.phase = RxPhase::Data;
                    }
                } else {
                    self.tick_counter += 1;
                }
            }
            RxPhase::Data => {
                if boundary {
                    if line {
                        self.shift_byte |= 1 << self.bit_index;
                    } else {
                        self.shift_byte &= !(1 << self.bit_index);
                    }
                    self.tick_counter = 0;
                    if self.bit_index == 7 {
                        self.phase = RxPhase::Stop;
                    } else {
                        self.bit_index += 1;
                    }
                } else {
                    self.tick_counter += 1;
                }
            }
            RxPhase::Stop => {
                if boundary {
                    if line {
                        if queue.push(self.shift_byte) {
                            tick.received = Some(self.shift_byte);
                        } else {
                            tick.dropped = Some(LossKind::Overflow);
                        }
                    } else {
                        tick.dropped = Some(LossKind::FramingError);
                    }
                    self.tick_counter = 0;
                    self.phase = RxPhase::Idle;
                } else {
                    self.tick_counter += 1;
                }
            }
        }

        tick
    }
}
