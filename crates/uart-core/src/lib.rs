//! Cycle-stepped model of an asynchronous serial (UART) protocol core.
//!
//! The core is a pair of cooperating state machines — a transmitter that
//! serializes queued bytes onto a single line with start/data/stop framing,
//! and a receiver that watches a synchronized line sample for start edges,
//! mid-bit-samples eight data bits, and validates the stop bit — dispatched
//! by a register layer holding persistent configuration and counters.
//!
//! Execution is fully synchronous and deterministic: one call to
//! [`Uart::step`] advances the entire core by exactly one clock cycle, and
//! no component runs ahead of another within a cycle. Hosts drive the clock
//! (a simulation loop, a testbench, a hardware-description generator) and
//! exchange bytes through non-blocking queues at the boundary.

/// Persistent configuration and baud divisor derivation.
pub mod config;
pub use config::{
    baud_divisor_for, DivisorError, UartConfig, DEFAULT_BAUD_DIVISOR, OVERSAMPLE,
    REFERENCE_CLOCK_HZ,
};

/// Deterministic per-cycle event taxonomy and trace sinks.
pub mod event;
pub use event::{LossKind, NoopSink, TraceSink, UartEvent};

/// Non-blocking byte FIFOs at the core boundary.
pub mod queue;
pub use queue::ByteQueue;

/// Packed register-map boundary constants and helpers.
pub mod registers;
pub use registers::{
    pack_status, ControlWord, CTRL_RESET, CTRL_RX_ENABLE, CTRL_TX_ENABLE, REG_BAUD_DIV,
    REG_CONTROL, REG_RX_COUNT, REG_STATUS, REG_TX_COUNT, STATUS_RX_VALID, STATUS_TX_BUSY,
};

/// Receive state machine with start confirmation and mid-bit sampling.
pub mod rx;
pub use rx::{Receiver, RxPhase, RxTick};

/// Full-state snapshot export/import.
pub mod snapshot;
pub use snapshot::{SnapshotVersion, UartSnapshot};

/// Receive-line input synchronizer.
pub mod sync;
pub use sync::LineSynchronizer;

/// Transmit state machine.
pub mod tx;
pub use tx::{Transmitter, TxPhase, TxTick};

/// Register/dispatch layer and the cycle-step entry point.
pub mod uart;
pub use uart::{CycleInput, CycleOutput, Uart, UartOptions};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
