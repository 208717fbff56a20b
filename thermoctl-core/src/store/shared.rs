//! Lock-guarded control-state store
//!
//! One coarse lock covers the whole [`ControlState`]. Every accessor is a
//! single short critical section that never blocks on anything else, so
//! cross-field invariants (setpoint vs. bounds) are never observed half
//! applied. Callers must not nest accessor calls.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::blocking_mutex::Mutex;

use super::state::{ControlState, SetpointAdjustment};

/// Shared store of the controller's control variables
///
/// Const-constructible so it can live in a `static`:
///
/// ```ignore
/// static STORE: ControlStore = ControlStore::new();
/// ```
pub struct ControlStore<M: RawMutex = CriticalSectionRawMutex> {
    inner: Mutex<M, RefCell<ControlState>>,
}

impl<M: RawMutex> Default for ControlStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> ControlStore<M> {
    /// Create a store holding the built-in defaults
    pub const fn new() -> Self {
        Self::with_state(ControlState::new())
    }

    /// Create a store holding `state`
    pub const fn with_state(state: ControlState) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(state)),
        }
    }

    fn read<U>(&self, f: impl FnOnce(&ControlState) -> U) -> U {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    fn write<U>(&self, f: impl FnOnce(&mut ControlState) -> U) -> U {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Replace the whole state (boot-time configuration)
    pub fn reinitialize(&self, state: ControlState) {
        self.write(|s| *s = state);
    }

    /// Consistent copy of every field
    pub fn snapshot(&self) -> ControlState {
        self.read(|s| *s)
    }

    pub fn get_system_on(&self) -> bool {
        self.read(ControlState::system_on)
    }

    pub fn set_system_on(&self, on: bool) {
        self.write(|s| s.set_system_on(on));
    }

    /// Flip the master enable, returning the new value
    pub fn toggle_system_on(&self) -> bool {
        self.write(|s| {
            let on = !s.system_on();
            s.set_system_on(on);
            on
        })
    }

    pub fn get_setpoint(&self) -> i16 {
        self.read(ControlState::setpoint)
    }

    /// Store the setpoint clamped into the current bounds
    pub fn set_setpoint(&self, value: i16) {
        self.write(|s| s.set_setpoint(value));
    }

    /// Move the setpoint by `delta` within the bounds
    ///
    /// Read, clamp and store happen in one critical section.
    pub fn adjust_setpoint(&self, delta: i16) -> SetpointAdjustment {
        self.write(|s| s.adjust_setpoint(delta))
    }

    pub fn get_current_temp(&self) -> i16 {
        self.read(ControlState::current_temp)
    }

    pub fn set_current_temp(&self, value: i16) {
        self.write(|s| s.set_current_temp(value));
    }

    pub fn get_max_temp(&self) -> i16 {
        self.read(ControlState::max_temp)
    }

    /// Store the upper bound, lowering the setpoint to it if needed
    pub fn set_max_temp(&self, value: i16) {
        self.write(|s| s.set_max_temp(value));
    }

    /// Store the upper bound if it is not below the lower bound
    ///
    /// Comparison and store share one critical section. Returns whether
    /// the value was applied.
    pub fn try_set_max_temp(&self, value: i16) -> bool {
        self.write(|s| s.try_set_max_temp(value))
    }

    pub fn get_min_temp(&self) -> i16 {
        self.read(ControlState::min_temp)
    }

    /// Store the lower bound, raising the setpoint to it if needed
    pub fn set_min_temp(&self, value: i16) {
        self.write(|s| s.set_min_temp(value));
    }

    /// Store the lower bound if it is not above the upper bound
    pub fn try_set_min_temp(&self, value: i16) -> bool {
        self.write(|s| s.try_set_min_temp(value))
    }

    pub fn get_sampling_rate_ms(&self) -> u32 {
        self.read(ControlState::sampling_rate_ms)
    }

    /// Store the sampler period clamped into `[10, 60000]`
    pub fn set_sampling_rate_ms(&self, value: u32) {
        self.write(|s| s.set_sampling_rate_ms(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_store_defaults() {
        let store: ControlStore = ControlStore::new();
        assert_eq!(store.snapshot(), ControlState::new());
    }

    #[test]
    fn test_store_accessors() {
        let store: ControlStore<NoopRawMutex> = ControlStore::new();

        store.set_system_on(true);
        assert!(store.get_system_on());

        store.set_current_temp(-7);
        assert_eq!(store.get_current_temp(), -7);

        store.set_max_temp(50);
        store.set_setpoint(70);
        assert_eq!(store.get_max_temp(), 50);
        assert_eq!(store.get_setpoint(), 50);

        store.set_min_temp(55);
        assert_eq!(store.get_min_temp(), 55);
        assert_eq!(store.get_setpoint(), 55);

        store.set_sampling_rate_ms(9);
        assert_eq!(store.get_sampling_rate_ms(), 10);
    }

    #[test]
    fn test_toggle_system_on() {
        let store: ControlStore<NoopRawMutex> = ControlStore::new();
        assert!(store.toggle_system_on());
        assert!(!store.toggle_system_on());
        assert!(!store.get_system_on());
    }

    #[test]
    fn test_adjust_setpoint() {
        let store: ControlStore<NoopRawMutex> =
            ControlStore::with_state(ControlState::with_limits(10, 30, 30, 1000));
        let adj = store.adjust_setpoint(1);
        assert_eq!((adj.setpoint, adj.min_temp, adj.max_temp), (30, 10, 30));
        assert_eq!(store.adjust_setpoint(-5).setpoint, 25);
    }

    #[test]
    fn test_reinitialize() {
        let store: ControlStore<NoopRawMutex> = ControlStore::new();
        store.set_system_on(true);
        let configured = ControlState::with_limits(5, 45, 20, 500);
        store.reinitialize(configured);
        assert_eq!(store.snapshot(), configured);
    }
}
