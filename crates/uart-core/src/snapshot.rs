//! Full-state snapshots for save/restore and deterministic replay fixtures.

use crate::config::UartConfig;
use crate::queue::ByteQueue;
use crate::rx::Receiver;
use crate::tx::Transmitter;
use crate::uart::Uart;

/// Stable snapshot schema identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u16)]
pub enum SnapshotVersion {
    /// Initial schema revision for uart-core v0.1.x.
    V1 = 1,
}

impl SnapshotVersion {
    /// Converts a wire value to a known snapshot version.
    #[must_use]
    pub const fn from_u16(version: u16) -> Option<Self> {
        match version {
            1 => Some(Self::V1),
            _ => None,
        }
    }
}

/// Complete core state captured between two clock cycles.
///
/// Restoring a snapshot reproduces cycle-exact continuation: stepping the
/// restored core and the original with identical inputs yields identical
/// outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct UartSnapshot {
    /// Snapshot schema version.
    pub version: SnapshotVersion,
    /// Persistent configuration registers.
    pub config: UartConfig,
    /// Transmit machine state.
    pub tx: Transmitter,
    /// Receive machine state, including the synchronizer pipeline.
    pub rx: Receiver,
    /// Frames completed by the transmitter.
    pub tx_count: u32,
    /// Bytes delivered to the receive queue.
    pub rx_count: u32,
    /// Transmit line level.
    pub txd: bool,
    /// Published busy flag.
    pub tx_busy: bool,
    /// Published valid pulse flag.
    pub rx_valid: bool,
    /// Bytes waiting to be transmitted.
    pub tx_queue: ByteQueue,
    /// Received bytes not yet drained by the host.
    pub rx_queue: ByteQueue,
}

impl Uart {
    /// Captures the complete core state between cycles.
    #[must_use]
    pub fn snapshot(&self) -> UartSnapshot {
        UartSnapshot {
            version: SnapshotVersion::V1,
            config: self.config,
            tx: self.tx,
            rx: self.rx,
            tx_count: self.tx_count,
            rx_count: self.rx_count,
            txd: self.txd,
            tx_busy: self.tx_busy,
            rx_valid: self.rx_valid,
            tx_queue: self.tx_queue.clone(),
            rx_queue: self.rx_queue.clone(),
        }
    }

    /// Rebuilds a core that continues cycle-exactly from `snapshot`.
    #[must_use]
    pub fn from_snapshot(snapshot: &UartSnapshot) -> Self {
        Self {
            config: snapshot.config,
            tx: snapshot.tx,
            rx: snapshot.rx,
            tx_queue: snapshot.tx_queue.clone(),
            rx_queue: snapshot.rx_queue.clone(),
            tx_count: snapshot.tx_count,
            rx_count: snapshot.rx_count,
            txd: snapshot.txd,
            tx_busy: snapshot.tx_busy,
            rx_valid: snapshot.rx_valid,
        }
    }
}
