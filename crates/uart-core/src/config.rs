//! Persistent configuration registers and baud divisor derivation.

use thiserror::Error;

/// Reference core clock frequency assumed by divisor derivation, in hertz.
pub const REFERENCE_CLOCK_HZ: u32 = 100_000_000;

/// Oversampling factor assumed by the divisor formula.
pub const OVERSAMPLE: u32 = 16;

/// Power-on baud divisor: 115200 baud at the 100 MHz reference clock.
pub const DEFAULT_BAUD_DIVISOR: u32 = 54;

/// Errors from deriving a baud divisor for a requested baud rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DivisorError {
    /// A baud rate of zero has no meaningful divisor.
    #[error("baud rate must be nonzero")]
    ZeroBaudRate,
    /// The requested rate divides the reference clock down to zero cycles.
    #[error("baud rate {0} is too high for the 100 MHz reference clock")]
    RateTooHigh(u32),
}

/// Persistent UART configuration held by the register/dispatch layer.
///
/// Mutated every cycle from the external control word; the stored divisor
/// only changes when a nonzero value is supplied, so an active divisor is
/// always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct UartConfig {
    /// Core clock cycles per serial bit period. Always at least 1.
    pub baud_divisor: u32,
    /// Transmitter enable, consulted only while the transmitter is idle.
    pub tx_enable: bool,
    /// Receiver enable, consulted only while the receiver is idle.
    pub rx_enable: bool,
    /// Synchronous reset request latched from the control word.
    pub reset: bool,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_divisor: DEFAULT_BAUD_DIVISOR,
            tx_enable: false,
            rx_enable: false,
            reset: false,
        }
    }
}

impl UartConfig {
    /// Applies a divisor register write.
    ///
    /// Zero means "keep the previous divisor" and is never propagated as an
    /// active divisor, which would make baud-boundary comparisons degenerate.
    pub fn apply_divisor(&mut self, raw: u32) {
        if raw > 0 {
            self.baud_divisor = raw;
        }
    }
}

/// Derives the clock divisor for a requested baud rate.
///
/// Computes `REFERENCE_CLOCK_HZ / (baud_rate * OVERSAMPLE)` with integer
/// floor. This is a pure helper for hosts; the core itself only consumes an
/// already-derived divisor.
///
/// # Errors
///
/// Returns [`DivisorError::ZeroBaudRate`] for a zero rate and
/// [`DivisorError::RateTooHigh`] when the floor reaches zero.
pub fn baud_divisor_for(baud_rate: u32) -> Result<u32, DivisorError> {
    if baud_rate == 0 {
        return Err(DivisorError::ZeroBaudRate);
    }
    let divisor = REFERENCE_CLOCK_HZ / baud_rate.saturating_mul(OVERSAMPLE);
    if divisor == 0 {
        return Err(DivisorError::RateTooHigh(baud_rate));
    }
    Ok(divisor)
}
