//! Console UART protocol task
//!
//! Feeds every received byte to the protocol engine and writes back the
//! encoded responses before the next read.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use thermoctl_core::dispatch::{
    EngineEvent, ProtocolEngine, MAX_OUTPUT_PER_BYTE, OUTPUT_CAPACITY,
};
use thermoctl_protocol::LineEndingPolicy;

use crate::channels::STORE;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

// Output is drained once per read; one read's replies must fit the queue
const _: () = assert!(RX_BUF_SIZE * MAX_OUTPUT_PER_BYTE <= OUTPUT_CAPACITY);

/// Serial task - runs the command protocol on the console UART
#[embassy_executor::task]
pub async fn serial_task(
    mut tx: BufferedUartTx,
    mut rx: BufferedUartRx,
    line_endings: LineEndingPolicy,
) {
    info!("Serial task started ({:?} line endings)", line_endings);

    let mut engine = ProtocolEngine::new(&STORE, line_endings);
    let mut buf = [0u8; RX_BUF_SIZE];
    let mut dropped = 0;

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    if let Some(event) = engine.feed_byte(byte) {
                        log_event(&event);
                    }
                }

                let output = engine.drain_output();
                if !output.is_empty() {
                    if let Err(e) = tx.write_all(&output).await {
                        warn!("UART write error: {:?}", e);
                    }
                }

                if engine.dropped_responses() != dropped {
                    dropped = engine.dropped_responses();
                    warn!("Output queue full, {} responses dropped so far", dropped);
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

fn log_event(event: &EngineEvent) {
    match event {
        EngineEvent::Dispatched(dispatch) => {
            if let Some(change) = dispatch.change {
                info!("Applied {:?}", change);
            } else if let Some(code) = dispatch.rejection() {
                warn!("Rejected {:?}: {:?}", dispatch.command, code);
            } else {
                debug!("Answered {:?}", dispatch.command);
            }
        }
        EngineEvent::Framing(cause) => {
            warn!("Framing error: {:?}", cause);
        }
    }
}
