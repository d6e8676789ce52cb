//! Packed register-map boundary for hosts that need word-level access.
//!
//! Internal logic only ever works with named fields; these constants and
//! helpers reconstruct the packed control/status words at the external
//! boundary for bit-compatibility with the original register map.

/// Control register offset.
pub const REG_CONTROL: u32 = 0x00;

/// Status register offset.
pub const REG_STATUS: u32 = 0x04;

/// Baud divisor register offset.
pub const REG_BAUD_DIV: u32 = 0x08;

/// Transmitted frame counter register offset.
pub const REG_TX_COUNT: u32 = 0x0C;

/// Received byte counter register offset.
pub const REG_RX_COUNT: u32 = 0x10;

/// Control word bit: transmitter enable.
pub const CTRL_TX_ENABLE: u32 = 1 << 0;

/// Control word bit: receiver enable.
pub const CTRL_RX_ENABLE: u32 = 1 << 1;

/// Control word bit: synchronous reset.
pub const CTRL_RESET: u32 = 1 << 2;

/// Status word bit: transmitter has a frame in flight.
pub const STATUS_TX_BUSY: u32 = 1 << 0;

/// Status word bit: receiver delivered a byte this cycle.
pub const STATUS_RX_VALID: u32 = 1 << 1;

/// Packed control word as written by a register-map host.
///
/// Only bits 0..=2 carry meaning; higher bits are ignored on unpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ControlWord(u32);

impl ControlWord {
    /// Wraps a raw control register value.
    #[must_use]
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// Builds a control word from named flags.
    #[must_use]
    pub const fn from_flags(tx_enable: bool, rx_enable: bool, reset: bool) -> Self {
        let mut bits = 0;
        if tx_enable {
            bits |= CTRL_TX_ENABLE;
        }
        if rx_enable {
            bits |= CTRL_RX_ENABLE;
        }
        if reset {
            bits |= CTRL_RESET;
        }
        Self(bits)
    }

    /// Raw register value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Transmitter enable (bit 0).
    #[must_use]
    pub const fn tx_enable(self) -> bool {
        self.0 & CTRL_TX_ENABLE != 0
    }

    /// Receiver enable (bit 1).
    #[must_use]
    pub const fn rx_enable(self) -> bool {
        self.0 & CTRL_RX_ENABLE != 0
    }

    /// Synchronous reset (bit 2).
    #[must_use]
    pub const fn reset(self) -> bool {
        self.0 & CTRL_RESET != 0
    }
}

/// Packs status flags into the status register layout.
///
/// Reserved bits (2 and up) are always zero.
#[must_use]
pub const fn pack_status(tx_busy: bool, rx_valid: bool) -> u32 {
    let mut bits = 0;
    if tx_busy {
        bits |= STATUS_TX_BUSY;
    }
    if rx_valid {
        bits |= STATUS_RX_VALID;
    }
    bits
}
