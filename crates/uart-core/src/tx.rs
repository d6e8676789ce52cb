//! Transmit state machine: serializes queued bytes with start/data/stop
//! framing, LSB first, one bit per baud period.

use crate::queue::ByteQueue;

/// Transmitter phase; exactly one is active per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TxPhase {
    /// Line held at mark, waiting for a byte.
    #[default]
    Idle,
    /// Driving the start bit low.
    Start,
    /// Shifting data bits out, LSB first.
    Data,
    /// Driving the stop bit high.
    Stop,
}

/// Per-cycle transmitter outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxTick {
    /// Level driven onto the transmit line this cycle.
    pub line: bool,
    /// True whenever a frame is in flight.
    pub busy: bool,
    /// Byte dequeued at the start of a new frame this cycle.
    pub accepted: Option<u8>,
    /// Byte whose stop bit completed this cycle.
    pub completed: Option<u8>,
}

/// Transmit state machine.
///
/// The enable input is consulted only in [`TxPhase::Idle`]; disabling
/// mid-frame never aborts an in-progress byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Transmitter {
    phase: TxPhase,
    shift_byte: u8,
    bit_index: u8,
    tick_counter: u32,
}

impl Transmitter {
    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TxPhase {
        self.phase
    }

    /// Returns true while a frame is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        !matches!(self.phase, TxPhase::Idle)
    }

    /// Re-homes the machine to idle with cleared shift state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances the transmitter by exactly one clock cycle.
    ///
    /// The tick counter resets to zero on every phase transition; a baud
    /// boundary fires when it reaches `baud_divisor - 1`.
    pub fn step(&mut self, baud_divisor: u32, tx_enable: bool, queue: &mut ByteQueue) -> TxTick {
        let boundary = self.tick_counter + 1 >= baud_divisor;
        match self.phase {
            TxPhase::Idle => {
                let mut accepted = None;
                if tx_enable {
                    if let Some(byte) = queue.pop() {
                        self.shift_byte = byte;
                        self.tick_counter = 0;
                        self.phase = TxPhase::Start;
                        accepted = Some(byte);
                    }
                }
                TxTick {
                    line: true,
                    busy: accepted.is_some(),
                    accepted,
                    completed: None,
                }
            }
            TxPhase::Start => {
                if boundary {
                    self.tick_counter = 0;
                    self.bit_index = 0;
                    self.phase = TxPhase::Data;
                } else {
                    self.tick_counter += 1;
                }
                TxTick {
                    line: false,
                    busy: true,
                    accepted: None,
                    completed: None,
                }
            }
            TxPhase::Data => {
                let line = self.shift_byte >> self.bit_index & 1 == 1;
                if boundary {
                    self.tick_counter = 0;
                    if self.bit_index == 7 {
                        self.phase = TxPhase::Stop;
                    } else {
                        self.bit_index += 1;
                    }
                } else {
                    self.tick_counter += 1;
                }
                TxTick {
                    line,
                    busy: true,
                    accepted: None,
                    completed: None,
                }
            }
            TxPhase::Stop => {
                let mut completed = None;
                if boundary {
                    self.tick_counter = 0;
                    self.phase = TxPhase::Idle;
                    completed = Some(self.shift_byte);
                } else {
                    self.tick_counter += 1;
                }
                TxTick {
                    line: true,
                    busy: true,
                    accepted: None,
                    completed,
                }
            }
        }
    }
}
