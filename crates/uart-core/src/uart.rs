//! Register/dispatch layer tying the divisor, queues, and both state
//! machines into a single cycle-stepped core.

use crate::config::UartConfig;
use crate::event::{NoopSink, TraceSink, UartEvent};
use crate::queue::ByteQueue;
use crate::registers::{
    pack_status, ControlWord, REG_BAUD_DIV, REG_CONTROL, REG_RX_COUNT, REG_STATUS, REG_TX_COUNT,
};
use crate::rx::Receiver;
use crate::tx::Transmitter;

/// Inputs sampled by the core for one clock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleInput {
    /// Packed control word (bit 0 TX enable, bit 1 RX enable, bit 2 reset).
    pub control: ControlWord,
    /// Divisor register write; zero keeps the previously stored divisor.
    pub baud_divisor: u32,
    /// Raw receive-line sample for this cycle.
    pub rxd: bool,
}

impl Default for CycleInput {
    fn default() -> Self {
        Self {
            control: ControlWord::default(),
            baud_divisor: 0,
            rxd: true,
        }
    }
}

/// Outputs republished by the core at the end of one clock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutput {
    /// Level driven onto the transmit line.
    pub txd: bool,
    /// Transmitter has a frame in flight.
    pub tx_busy: bool,
    /// Receiver delivered a byte to the receive queue this cycle.
    pub rx_valid: bool,
    /// Frames completed by the transmitter since the last reset.
    pub tx_count: u32,
    /// Bytes delivered to the receive queue since the last reset.
    pub rx_count: u32,
}

impl CycleOutput {
    /// Packs the status flags into the status register layout.
    #[must_use]
    pub const fn status_word(&self) -> u32 {
        pack_status(self.tx_busy, self.rx_valid)
    }
}

/// Queue sizing options for a core instance.
///
/// The functional model defaults to unbounded queues; bounded capacities
/// exist to exercise backpressure behavior deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UartOptions {
    /// Transmit queue capacity, or `None` for unbounded.
    pub tx_queue_capacity: Option<usize>,
    /// Receive queue capacity, or `None` for unbounded.
    pub rx_queue_capacity: Option<usize>,
}

/// Cycle-stepped UART core.
///
/// One call to [`Uart::step`] advances the whole core by exactly one clock
/// edge: control inputs are latched, then the transmitter steps, then the
/// receiver, and status and counters are republished. Neither machine's
/// same-cycle output feeds the other within the cycle, so this sequential
/// evaluation produces the same bit as true parallel evaluation would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uart {
    pub(crate) config: UartConfig,
    pub(crate) tx: Transmitter,
    pub(crate) rx: Receiver,
    pub(crate) tx_queue: ByteQueue,
    pub(crate) rx_queue: ByteQueue,
    pub(crate) tx_count: u32,
    pub(crate) rx_count: u32,
    pub(crate) txd: bool,
    pub(crate) tx_busy: bool,
    pub(crate) rx_valid: bool,
}

impl Default for Uart {
    fn default() -> Self {
        Self::new()
    }
}

impl Uart {
    /// Creates a core with unbounded queues and power-on configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(UartOptions::default())
    }

    /// Creates a core with the given queue sizing.
    #[must_use]
    pub fn with_options(options: UartOptions) -> Self {
        let queue = |capacity: Option<usize>| {
            capacity.map_or_else(ByteQueue::unbounded, ByteQueue::bounded)
        };
        Self {
            config: UartConfig::default(),
            tx: Transmitter::default(),
            rx: Receiver::default(),
            tx_queue: queue(options.tx_queue_capacity),
            rx_queue: queue(options.rx_queue_capacity),
            tx_count: 0,
            rx_count: 0,
            txd: true,
            tx_busy: false,
            rx_valid: false,
        }
    }

    /// Current persistent configuration.
    #[must_use]
    pub const fn config(&self) -> &UartConfig {
        &self.config
    }

    /// Current transmit line level.
    #[must_use]
    pub const fn txd(&self) -> bool {
        self.txd
    }

    /// Frames completed by the transmitter since the last reset.
    #[must_use]
    pub const fn tx_count(&self) -> u32 {
        self.tx_count
    }

    /// Bytes delivered to the receive queue since the last reset.
    #[must_use]
    pub const fn rx_count(&self) -> u32 {
        self.rx_count
    }

    /// Offers a byte to the transmit queue, returning whether it was
    /// accepted. Rejection only happens on a bounded queue with no room.
    pub fn push_tx_byte(&mut self, byte: u8) -> bool {
        self.tx_queue.push(byte)
    }

    /// Drains the oldest received byte, if any.
    pub fn pop_rx_byte(&mut self) -> Option<u8> {
        self.rx_queue.pop()
    }

    /// Number of bytes waiting to be transmitted.
    #[must_use]
    pub fn tx_queue_len(&self) -> usize {
        self.tx_queue.len()
    }

    /// Number of received bytes not yet drained by the host.
    #[must_use]
    pub fn rx_queue_len(&self) -> usize {
        self.rx_queue.len()
    }

    /// Advances the core by one clock cycle.
    pub fn step(&mut self, input: CycleInput) -> CycleOutput {
        self.step_traced(input, &mut NoopSink)
    }

    /// Advances the core by one clock cycle, reporting events to `sink`.
    ///
    /// Per invocation: control bits and a nonzero divisor write are latched
    /// into the stored configuration; a latched reset zeroes counters and
    /// flags, forces the line to mark, and re-homes both machines without
    /// driving them this cycle; otherwise the transmitter steps once, then
    /// the receiver. Reset does not drain either queue.
    pub fn step_traced(&mut self, input: CycleInput, sink: &mut impl TraceSink) -> CycleOutput {
        self.config.tx_enable = input.control.tx_enable();
        self.config.rx_enable = input.control.rx_enable();
        self.config.reset = input.control.reset();
        self.config.apply_divisor(input.baud_divisor);

        if self.config.reset {
            self.tx_count = 0;
            self.rx_count = 0;
            self.txd = true;
            self.tx_busy = false;
            self.rx_valid = false;
            self.tx.reset();
            self.rx.reset();
        } else {
            let tx_tick = self.tx.step(
                self.config.baud_divisor,
                self.config.tx_enable,
                &mut self.tx_queue,
            );
            let rx_tick = self.rx.step(
                self.config.baud_divisor,
                self.config.rx_enable,
                input.rxd,
                &mut self.rx_queue,
            );

            self.txd = tx_tick.line;
            self.tx_busy = tx_tick.busy;
            self.rx_valid = rx_tick.received.is_some();
            if tx_tick.completed.is_some() {
                self.tx_count = self.tx_count.wrapping_add(1);
            }
            if rx_tick.received.is_some() {
                self.rx_count = self.rx_count.wrapping_add(1);
            }

            if let Some(byte) = tx_tick.accepted {
                sink.on_event(UartEvent::TxAccepted { byte });
            }
            if let Some(byte) = tx_tick.completed {
                sink.on_event(UartEvent::TxCompleted { byte });
            }
            if let Some(byte) = rx_tick.received {
                sink.on_event(UartEvent::RxReceived { byte });
            }
            if let Some(kind) = rx_tick.dropped {
                sink.on_event(UartEvent::RxDropped { kind });
            }
        }

        self.output()
    }

    /// Reads one register of the packed external map, or `None` for an
    /// undefined offset.
    #[must_use]
    pub fn read_register(&self, offset: u32) -> Option<u32> {
        match offset {
            REG_CONTROL => Some(
                ControlWord::from_flags(
                    self.config.tx_enable,
                    self.config.rx_enable,
                    self.config.reset,
                )
                .bits(),
            ),
            REG_STATUS => Some(pack_status(self.tx_busy, self.rx_valid)),
            REG_BAUD_DIV => Some(self.config.baud_divisor),
            REG_TX_COUNT => Some(self.tx_count),
            REG_RX_COUNT => Some(self.rx_count),
            _ => None,
        }
    }

    const fn output(&self) -> CycleOutput {
        CycleOutput {
            txd: self.txd,
            tx_busy: self.tx_busy,
            rx_valid: self.rx_valid,
            tx_count: self.tx_count,
            rx_count: self.rx_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CycleInput, Uart, UartOptions};
    use crate::registers::{
        ControlWord, REG_BAUD_DIV, REG_CONTROL, REG_RX_COUNT, REG_STATUS, REG_TX_COUNT,
        STATUS_TX_BUSY,
    };

    fn enabled_input(rxd: bool) -> CycleInput {
        CycleInput {
            control: ControlWord::from_flags(true, true, false),
            baud_divisor: 0,
            rxd,
        }
    }

    #[test]
    fn idle_core_drives_mark_and_clear_status() {
        let mut uart = Uart::new();
        let out = uart.step(CycleInput::default());
        assert!(out.txd);
        assert!(!out.tx_busy);
        assert!(!out.rx_valid);
        assert_eq!(out.status_word(), 0);
        assert_eq!(out.tx_count, 0);
        assert_eq!(out.rx_count, 0);
    }

    #[test]
    fn divisor_write_of_zero_keeps_stored_value() {
        let mut uart = Uart::new();
        let _ = uart.step(CycleInput {
            baud_divisor: 27,
            ..CycleInput::default()
        });
        assert_eq!(uart.config().baud_divisor, 27);

        let _ = uart.step(CycleInput::default());
        assert_eq!(uart.config().baud_divisor, 27);
    }

    #[test]
    fn control_word_bits_land_in_config() {
        let mut uart = Uart::new();
        let _ = uart.step(CycleInput {
            control: ControlWord::new(0b011),
            ..CycleInput::default()
        });
        assert!(uart.config().tx_enable);
        assert!(uart.config().rx_enable);
        assert!(!uart.config().reset);
    }

    #[test]
    fn transmission_only_starts_when_enabled() {
        let mut uart = Uart::new();
        assert!(uart.push_tx_byte(0x42));

        for _ in 0..10 {
            let out = uart.step(CycleInput::default());
            assert!(!out.tx_busy);
        }
        assert_eq!(uart.tx_queue_len(), 1);

        let out = uart.step(enabled_input(true));
        assert!(out.tx_busy);
        assert_eq!(uart.tx_queue_len(), 0);
    }

    #[test]
    fn busy_status_bit_tracks_frame_in_flight() {
        let mut uart = Uart::new();
        let _ = uart.step(CycleInput {
            baud_divisor: 4,
            ..enabled_input(true)
        });
        assert!(uart.push_tx_byte(0xA5));

        let out = uart.step(enabled_input(true));
        assert_eq!(out.status_word() & STATUS_TX_BUSY, STATUS_TX_BUSY);
        assert_eq!(uart.read_register(REG_STATUS), Some(out.status_word()));
    }

    #[test]
    fn reset_cycle_restores_power_on_observables() {
        let mut uart = Uart::new();
        let _ = uart.step(CycleInput {
            baud_divisor: 4,
            ..enabled_input(true)
        });
        assert!(uart.push_tx_byte(0x11));
        assert!(uart.push_tx_byte(0x22));

        // Run partway into a frame so state is decidedly not pristine.
        for _ in 0..7 {
            let _ = uart.step(enabled_input(false));
        }
        assert!(uart.tx.is_busy());

        let out = uart.step(CycleInput {
            control: ControlWord::from_flags(true, true, true),
            ..CycleInput::default()
        });
        assert!(out.txd);
        assert!(!out.tx_busy);
        assert!(!out.rx_valid);
        assert_eq!(out.tx_count, 0);
        assert_eq!(out.rx_count, 0);
        assert!(!uart.tx.is_busy());
        assert!(!uart.rx.is_active());
        // Queues survive reset.
        assert_eq!(uart.tx_queue_len(), 1);
    }

    #[test]
    fn reset_preserves_stored_divisor() {
        let mut uart = Uart::new();
        let _ = uart.step(CycleInput {
            baud_divisor: 13,
            ..CycleInput::default()
        });
        let _ = uart.step(CycleInput {
            control: ControlWord::from_flags(false, false, true),
            ..CycleInput::default()
        });
        assert_eq!(uart.read_register(REG_BAUD_DIV), Some(13));
    }

    #[test]
    fn register_map_reflects_core_state() {
        let mut uart = Uart::new();
        let _ = uart.step(CycleInput {
            baud_divisor: 54,
            ..enabled_input(true)
        });

        assert_eq!(uart.read_register(REG_CONTROL), Some(0b011));
        assert_eq!(uart.read_register(REG_STATUS), Some(0));
        assert_eq!(uart.read_register(REG_BAUD_DIV), Some(54));
        assert_eq!(uart.read_register(REG_TX_COUNT), Some(0));
        assert_eq!(uart.read_register(REG_RX_COUNT), Some(0));
        assert_eq!(uart.read_register(0x14), None);
        assert_eq!(uart.read_register(0x01), None);
    }

    #[test]
    fn bounded_tx_queue_rejects_excess_bytes() {
        let mut uart = Uart::with_options(UartOptions {
            tx_queue_capacity: Some(2),
            rx_queue_capacity: None,
        });
        assert!(uart.push_tx_byte(1));
        assert!(uart.push_tx_byte(2));
        assert!(!uart.push_tx_byte(3));
        assert_eq!(uart.tx_queue_len(), 2);
    }
}
