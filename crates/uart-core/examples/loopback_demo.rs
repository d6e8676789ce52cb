//! Loopback demonstration: pushes "Hello" through the transmitter with the
//! line wired back to the receiver and prints what comes out.

use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use uart_core::{baud_divisor_for, ControlWord, CycleInput, Uart};

const MAX_CYCLES: usize = 100_000;

fn main() {
    let divisor = baud_divisor_for(115_200).expect("115200 baud is derivable");
    let payload = *b"Hello";

    let mut uart = Uart::new();
    for byte in payload {
        assert!(uart.push_tx_byte(byte));
    }

    println!("divisor={divisor} payload={payload:02X?}");

    let mut line = true;
    let mut received = Vec::new();
    for cycle in 0..MAX_CYCLES {
        let out = uart.step(CycleInput {
            control: ControlWord::from_flags(true, true, false),
            baud_divisor: divisor,
            rxd: line,
        });
        line = out.txd;

        while let Some(byte) = uart.pop_rx_byte() {
            println!("cycle {cycle}: received {byte:#04X}");
            received.push(byte);
        }
        if received.len() == payload.len() {
            break;
        }
    }

    println!(
        "tx_count={} rx_count={} received={:02X?}",
        uart.tx_count(),
        uart.rx_count(),
        received
    );
    assert_eq!(received, payload);
}
