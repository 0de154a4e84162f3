//! # Tick Timer
//!
//! Abstraction over the periodic hardware timer that drives the scheduler.
//! The Cortex-M3 SysTick implementation lives in
//! [`arch::cortex_m3`](crate::arch); host tests use [`mock::MockTimer`].
//!
//! ## Reload Derivation
//!
//! A down-counter with reload value `R` expires every `R + 1` input
//! cycles. For a period of `p` µs and an input clock of `f / d` Hz:
//!
//! ```text
//! counts = floor((f / d) × p / 1_000_000)
//! R      = counts − 1
//! ```
//!
//! Both divisions truncate, so the achieved period is never longer than
//! requested and may be a fraction of a count shorter.

use crate::config::MICROS_PER_SECOND;
use crate::error::TimerError;

/// Widest value the SysTick reload register accepts (24 bits).
pub const SYSTICK_MAX_RELOAD: u32 = 0x00FF_FFFF;

/// Callable invoked from interrupt context on every timer expiry.
///
/// Implementations must be O(1) and non-blocking, and must not run task
/// logic; their only permitted effect is signaling the foreground loop.
pub trait TickHandler: Sync {
    fn on_tick(&self);
}

/// A periodic timer raising one interrupt per configured period.
pub trait TickTimer {
    /// Load a reload value so that the timer expires every `period_us`
    /// microseconds given a `clock_hz` input clock.
    fn configure(&mut self, period_us: u32, clock_hz: u32) -> Result<(), TimerError>;

    /// Reset the live counter and begin counting. The first expiry is one
    /// full period after this returns.
    fn start(&mut self) -> Result<(), TimerError>;

    /// Halt counting. The counter value is undefined afterwards.
    fn stop(&mut self);

    /// Install the expiry callback, replacing any earlier one. Expiries
    /// with no callback installed are ignored.
    fn register_callback(&mut self, handler: &'static dyn TickHandler);
}

impl<T: TickTimer + ?Sized> TickTimer for &mut T {
    fn configure(&mut self, period_us: u32, clock_hz: u32) -> Result<(), TimerError> {
        (**self).configure(period_us, clock_hz)
    }

    fn start(&mut self) -> Result<(), TimerError> {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn register_callback(&mut self, handler: &'static dyn TickHandler) {
        (**self).register_callback(handler)
    }
}

/// Fixed divisor between the core clock and the timer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    /// Count processor clock cycles.
    Core,
    /// Count the external reference clock (processor clock / 8).
    CoreDiv8,
}

impl Prescaler {
    #[inline]
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Core => 1,
            Prescaler::CoreDiv8 => 8,
        }
    }
}

/// Compute the reload register value for a `period_us` tick.
///
/// # Errors
/// - [`TimerError::ZeroPeriod`] / [`TimerError::ZeroClock`] for zero inputs
/// - [`TimerError::PeriodTooShort`] if the period is under two counts
/// - [`TimerError::ReloadOutOfRange`] if the reload exceeds `max_reload`
pub fn reload_for(
    period_us: u32,
    clock_hz: u32,
    prescaler: Prescaler,
    max_reload: u32,
) -> Result<u32, TimerError> {
    if period_us == 0 {
        return Err(TimerError::ZeroPeriod);
    }
    if clock_hz == 0 {
        return Err(TimerError::ZeroClock);
    }

    let input_hz = u64::from(clock_hz / prescaler.divisor());
    let counts = input_hz * u64::from(period_us) / MICROS_PER_SECOND;

    if counts < 2 {
        return Err(TimerError::PeriodTooShort);
    }
    let reload = counts - 1;
    if reload > u64::from(max_reload) {
        return Err(TimerError::ReloadOutOfRange { counts });
    }
    Ok(reload as u32)
}

// ---------------------------------------------------------------------------
// Host test double
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// Software timer that records how it was driven. `fire()` plays the
    /// role of the hardware expiry.
    #[derive(Default)]
    pub struct MockTimer {
        pub reload: Option<u32>,
        pub configured_with: Option<(u32, u32)>,
        pub running: bool,
        pub starts: u32,
        pub stops: u32,
        pub fail_start: bool,
        latched: bool,
        handler: Option<&'static dyn TickHandler>,
    }

    impl MockTimer {
        pub fn new() -> Self {
            Self::default()
        }

        /// A timer whose `start()` always fails.
        pub fn failing_start() -> Self {
            Self { fail_start: true, ..Self::default() }
        }

        pub fn has_handler(&self) -> bool {
            self.handler.is_some()
        }

        /// Emulate one expiry. Returns whether a handler ran.
        pub fn fire(&mut self) -> bool {
            if !self.running {
                return false;
            }
            match self.handler {
                Some(handler) => {
                    handler.on_tick();
                    true
                }
                None => false,
            }
        }

        /// Emulate an expiry while exceptions are masked: it stays pending
        /// until [`deliver_latched`](Self::deliver_latched).
        pub fn latch(&mut self) {
            if self.running {
                self.latched = true;
            }
        }

        /// Unmask and take a latched expiry, if one is still pending.
        pub fn deliver_latched(&mut self) -> bool {
            if !core::mem::take(&mut self.latched) {
                return false;
            }
            self.fire()
        }
    }

    impl TickTimer for MockTimer {
        fn configure(&mut self, period_us: u32, clock_hz: u32) -> Result<(), TimerError> {
            let reload = reload_for(period_us, clock_hz, Prescaler::Core, SYSTICK_MAX_RELOAD)?;
            self.reload = Some(reload);
            self.configured_with = Some((period_us, clock_hz));
            Ok(())
        }

        fn start(&mut self) -> Result<(), TimerError> {
            if self.reload.is_none() {
                return Err(TimerError::NotConfigured);
            }
            if self.fail_start {
                return Err(TimerError::StartFailed);
            }
            self.latched = false;
            self.running = true;
            self.starts += 1;
            Ok(())
        }

        fn stop(&mut self) {
            self.running = false;
            self.stops += 1;
        }

        fn register_callback(&mut self, handler: &'static dyn TickHandler) {
            self.handler = Some(handler);
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
