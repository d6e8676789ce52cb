//! Deterministic per-cycle event reporting.
//!
//! Protocol-level data loss is silent by design: no status bit, no counter,
//! no retry. Hosts that want visibility anyway observe it through a
//! [`TraceSink`] without changing observable protocol behavior.

/// Conditions under which the core silently discards data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum LossKind {
    /// Line rose again before the start-bit confirmation point.
    FalseStart,
    /// Stop bit sampled low; the assembled byte was discarded.
    FramingError,
    /// Receive queue had no room for a fully valid byte.
    Overflow,
}

/// Events emitted in deterministic cycle order while stepping with a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum UartEvent {
    /// Transmitter dequeued a byte and began a frame.
    TxAccepted {
        /// Byte pulled from the transmit queue.
        byte: u8,
    },
    /// Transmitter finished a frame's stop bit.
    TxCompleted {
        /// Byte whose frame just completed.
        byte: u8,
    },
    /// Receiver assembled a byte and delivered it to the receive queue.
    RxReceived {
        /// Byte pushed to the receive queue.
        byte: u8,
    },
    /// Receiver discarded data.
    RxDropped {
        /// Condition that caused the discard.
        kind: LossKind,
    },
}

/// Sink for deterministic per-cycle events.
pub trait TraceSink {
    /// Records one event in emission order.
    fn on_event(&mut self, event: UartEvent);
}

/// Sink that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl TraceSink for NoopSink {
    fn on_event(&mut self, _event: UartEvent) {}
}

impl TraceSink for Vec<UartEvent> {
    fn on_event(&mut self, event: UartEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::{NoopSink, TraceSink, UartEvent};

    #[test]
    fn vec_sink_records_emission_order() {
        let mut sink = Vec::new();
        sink.on_event(UartEvent::TxAccepted { byte: 0x48 });
        sink.on_event(UartEvent::TxCompleted { byte: 0x48 });
        assert_eq!(
            sink,
            vec![
                UartEvent::TxAccepted { byte: 0x48 },
                UartEvent::TxCompleted { byte: 0x48 },
            ]
        );
    }

    #[test]
    fn noop_sink_discards_events() {
        let mut sink = NoopSink;
        sink.on_event(UartEvent::RxReceived { byte: 0xFF });
    }
}
