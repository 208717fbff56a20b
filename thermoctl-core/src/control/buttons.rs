//! Front-panel button actions
//!
//! Four buttons, each a read-modify-write on the store:
//!
//! | button | action |
//! |--------|--------|
//! | SW0 | toggle the master enable |
//! | SW1 | setpoint + 1 °C |
//! | SW2 | report a status snapshot |
//! | SW3 | setpoint − 1 °C |

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::store::{ControlState, ControlStore};

/// Button function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    TogglePower,
    Increment,
    Decrement,
    Status,
}

/// Result of a button press, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonOutcome {
    /// New master enable
    Power(bool),
    /// New setpoint
    Setpoint(i16),
    /// Increment refused at the upper bound (carried)
    AtMaximum(i16),
    /// Decrement refused at the lower bound (carried)
    AtMinimum(i16),
    /// Store contents at the time of the press
    Status(ControlState),
}

impl ButtonAction {
    /// Apply this action to the store
    pub fn apply<M: RawMutex>(self, store: &ControlStore<M>) -> ButtonOutcome {
        match self {
            ButtonAction::TogglePower => ButtonOutcome::Power(store.toggle_system_on()),
            ButtonAction::Increment => {
                let adj = store.adjust_setpoint(1);
                if adj.hit_max() {
                    ButtonOutcome::AtMaximum(adj.max_temp)
                } else {
                    ButtonOutcome::Setpoint(adj.setpoint)
                }
            }
            ButtonAction::Decrement => {
                let adj = store.adjust_setpoint(-1);
                if adj.hit_min() {
                    ButtonOutcome::AtMinimum(adj.min_temp)
                } else {
                    ButtonOutcome::Setpoint(adj.setpoint)
                }
            }
            ButtonAction::Status => ButtonOutcome::Status(store.snapshot()),
        }
    }
}

/// Rejects presses closer than the debounce window to the last accepted one
///
/// `now_ms` is a monotonic millisecond counter truncated to `u32`; the
/// window is measured with wrapping arithmetic so it survives rollover.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window_ms: u32,
    last_ms: Option<u32>,
}

impl Debouncer {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_ms: None,
        }
    }

    /// Register a press at `now_ms`; returns whether it counts
    pub fn accept(&mut self, now_ms: u32) -> bool {
        match self.last_ms {
            Some(last) if now_ms.wrapping_sub(last) < self.window_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_toggle_power() {
        let store: ControlStore<NoopRawMutex> = ControlStore::new();
        assert_eq!(ButtonAction::TogglePower.apply(&store), ButtonOutcome::Power(true));
        assert_eq!(ButtonAction::TogglePower.apply(&store), ButtonOutcome::Power(false));
    }

    #[test]
    fn test_increment_stops_at_max() {
        let store: ControlStore<NoopRawMutex> =
            ControlStore::with_state(ControlState::with_limits(0, 30, 29, 1000));

        assert_eq!(ButtonAction::Increment.apply(&store), ButtonOutcome::Setpoint(30));
        assert_eq!(ButtonAction::Increment.apply(&store), ButtonOutcome::AtMaximum(30));
        assert_eq!(store.get_setpoint(), 30);
    }

    #[test]
    fn test_decrement_stops_at_min() {
        let store: ControlStore<NoopRawMutex> =
            ControlStore::with_state(ControlState::with_limits(20, 30, 21, 1000));

        assert_eq!(ButtonAction::Decrement.apply(&store), ButtonOutcome::Setpoint(20));
        assert_eq!(ButtonAction::Decrement.apply(&store), ButtonOutcome::AtMinimum(20));
        assert_eq!(store.get_setpoint(), 20);
    }

    #[test]
    fn test_status_snapshot() {
        let store: ControlStore<NoopRawMutex> = ControlStore::new();
        store.set_current_temp(33);
        match ButtonAction::Status.apply(&store) {
            ButtonOutcome::Status(snapshot) => assert_eq!(snapshot.current_temp(), 33),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_debouncer() {
        let mut debouncer = Debouncer::new(50);
        assert!(debouncer.accept(1000));
        assert!(!debouncer.accept(1020));
        assert!(!debouncer.accept(1049));
        assert!(debouncer.accept(1050));
        // Rejected presses do not extend the window
        assert!(!debouncer.accept(1060));
        assert!(debouncer.accept(1100));
    }

    #[test]
    fn test_debouncer_across_rollover() {
        let mut debouncer = Debouncer::new(50);
        assert!(debouncer.accept(u32::MAX - 10));
        assert!(!debouncer.accept(20));
        assert!(debouncer.accept(40));
    }

    #[test]
    fn test_debouncer_first_press_at_zero() {
        let mut debouncer = Debouncer::new(50);
        assert!(debouncer.accept(0));
        assert!(!debouncer.accept(10));
    }
}
