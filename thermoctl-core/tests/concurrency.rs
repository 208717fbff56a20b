//! Store invariants under concurrent access
//!
//! Runs on the host with the `std` critical-section implementation, so the
//! store's lock is a real global mutex here.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

use thermoctl_core::control::ButtonAction;
use thermoctl_core::dispatch::ProtocolEngine;
use thermoctl_core::store::ControlStore;
use thermoctl_protocol::LineEndingPolicy;

const WRITERS: usize = 4;
const ITERATIONS: u32 = 20_000;

/// Small xorshift generator so each thread gets its own sequence
struct XorShift(u32);

impl XorShift {
    fn next(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }

    fn range(&mut self, lo: i16, hi: i16) -> i16 {
        lo + (self.next() % (hi - lo + 1) as u32) as i16
    }
}

#[test]
fn test_setpoint_never_observed_out_of_bounds() {
    let store: Arc<ControlStore> = Arc::new(ControlStore::new());
    let done = Arc::new(AtomicBool::new(false));
    let checks = Arc::new(AtomicU32::new(0));

    let reader = {
        let store = Arc::clone(&store);
        let done = Arc::clone(&done);
        let checks = Arc::clone(&checks);
        thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                let snapshot = store.snapshot();
                assert!(
                    snapshot.setpoint_in_bounds(),
                    "setpoint {} outside [{}, {}]",
                    snapshot.setpoint(),
                    snapshot.min_temp(),
                    snapshot.max_temp()
                );
                checks.fetch_add(1, Ordering::Relaxed);
            }
        })
    };

    let writers: Vec<_> = (0..WRITERS)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut rng = XorShift(0x9E37_79B9 ^ (i as u32 + 1));
                for _ in 0..ITERATIONS {
                    match rng.next() % 4 {
                        0 => store.set_max_temp(rng.range(50, 100)),
                        1 => store.set_min_temp(rng.range(0, 50)),
                        2 => store.set_setpoint(rng.range(-50, 150)),
                        _ => {
                            ButtonAction::Increment.apply(&*store);
                        }
                    }
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    done.store(true, Ordering::Relaxed);
    reader.join().unwrap();

    assert!(checks.load(Ordering::Relaxed) > 0);
    assert!(store.snapshot().setpoint_in_bounds());
}

#[test]
fn test_protocol_and_buttons_share_store() {
    let store: Arc<ControlStore> = Arc::new(ControlStore::new());

    let buttons = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..ITERATIONS {
                let action = if i % 2 == 0 {
                    ButtonAction::Increment
                } else {
                    ButtonAction::Decrement
                };
                action.apply(&*store);
            }
        })
    };

    let serial = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            let mut engine = ProtocolEngine::new(&*store, LineEndingPolicy::Ignore);
            // Alternate max 50 / max 80 while the buttons move the setpoint
            for i in 0..ITERATIONS / 10 {
                let frame: &[u8] = if i % 2 == 0 { b"#M050226!" } else { b"#M080229!" };
                for &b in frame {
                    engine.feed_byte(b);
                }
                assert_eq!(&engine.drain_output()[..], b"#Eo180!");
            }
        })
    };

    buttons.join().unwrap();
    serial.join().unwrap();

    let snapshot = store.snapshot();
    assert!(snapshot.setpoint_in_bounds());
    assert_eq!(snapshot.max_temp(), 80);
}
