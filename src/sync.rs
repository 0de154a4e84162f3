//! # Tick Signal
//!
//! The single datum shared between the SysTick interrupt and the
//! foreground dispatcher loop.
//!
//! Ticks are **coalesced, not queued**: the flag holds at most one pending
//! tick. Expiries that land while a tick is already pending are absorbed;
//! they are counted for diagnostics but never cause an extra scheduling
//! pass. A foreground loop that stalls longer than one tick therefore
//! under-executes tasks rather than catching up.
//!
//! The interrupt side only ever sets the flag; the foreground side reads
//! and clears it in one atomic swap before dispatching, so no expiry can
//! fall between the read and the clear.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::arch;
use crate::config::LOW_POWER_IDLE;
use crate::timer::TickHandler;

/// Interrupt-to-foreground tick flag.
///
/// Lives in a `static` so the timer interrupt can reach it for the whole
/// program lifetime.
pub struct TickSignal {
    pending: AtomicBool,
    coalesced: AtomicU32,
}

impl TickSignal {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            coalesced: AtomicU32::new(0),
        }
    }

    /// Mark a tick as pending. Called from interrupt context.
    #[inline]
    pub fn raise(&self) {
        if self.pending.swap(true, Ordering::Release) {
            self.coalesced.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Consume the pending tick, if any. Returns whether one was pending.
    #[inline]
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::Acquire)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Number of expiries absorbed because a tick was already pending.
    pub fn coalesced(&self) -> u32 {
        self.coalesced.load(Ordering::Relaxed)
    }

    /// Block until a tick is pending. Does not consume it.
    pub fn wait(&self) {
        while !self.is_pending() {
            if LOW_POWER_IDLE {
                arch::sleep_unless(|| self.is_pending());
            } else {
                core::hint::spin_loop();
            }
        }
    }
}

impl Default for TickSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl TickHandler for TickSignal {
    #[inline]
    fn on_tick(&self) {
        self.raise();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears() {
        let signal = TickSignal::new();
        assert!(!signal.take());
        signal.raise();
        assert!(signal.is_pending());
        assert!(signal.take());
        assert!(!signal.is_pending());
        assert!(!signal.take());
    }

    #[test]
    fn test_repeated_raise_coalesces() {
        let signal = TickSignal::new();
        signal.raise();
        signal.raise();
        signal.raise();
        assert_eq!(signal.coalesced(), 2);
        assert!(signal.take());
        assert!(!signal.take());
    }

    #[test]
    fn test_wait_returns_when_pending() {
        let signal = TickSignal::new();
        signal.on_tick();
        signal.wait();
        // wait() observes but does not consume
        assert!(signal.take());
    }

    #[test]
    fn test_wait_wakes_on_raise_from_other_context() {
        static SIGNAL: TickSignal = TickSignal::new();

        let isr = std::thread::spawn(|| {
            std::thread::sleep(std::time::Duration::from_millis(5));
            SIGNAL.raise();
        });
        SIGNAL.wait();
        assert!(SIGNAL.take());
        isr.join().unwrap();
    }
}
