//! # Cortex-M3 Port Layer
//!
//! SysTick driver implementing [`TickTimer`].
//!
//! SysTick is a 24-bit down-counter that reloads from `SYST_RVR` when it
//! reaches zero and raises the `SysTick` exception on every wrap. Its input
//! is either the processor clock or the fixed external reference
//! (processor clock / 8 on STM32F1), selected by [`Prescaler`].
//!
//! ## Callback Dispatch
//!
//! The exception handler cannot borrow a driver instance, so the installed
//! [`TickHandler`] is kept in a critical-section mutex and looked up on
//! every expiry. An expiry with nothing installed returns immediately.

use core::cell::Cell;

use cortex_m::interrupt::{self, Mutex};
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::{SCB, SYST};

use crate::error::TimerError;
use crate::timer::{reload_for, Prescaler, TickHandler, TickTimer, SYSTICK_MAX_RELOAD};

/// Handler called by the `SysTick` exception.
static HANDLER: Mutex<Cell<Option<&'static dyn TickHandler>>> = Mutex::new(Cell::new(None));

// ---------------------------------------------------------------------------
// SysTick driver
// ---------------------------------------------------------------------------

/// Owns the SysTick peripheral for the lifetime of the scheduler.
pub struct SysTickTimer {
    syst: SYST,
    prescaler: Prescaler,
    configured: bool,
}

impl SysTickTimer {
    /// Take the SysTick peripheral. The counter and its interrupt are left
    /// disabled until [`TickTimer::start`].
    pub fn new(mut syst: SYST, prescaler: Prescaler) -> Self {
        syst.disable_counter();
        syst.disable_interrupt();
        Self {
            syst,
            prescaler,
            configured: false,
        }
    }
}

impl TickTimer for SysTickTimer {
    fn configure(&mut self, period_us: u32, clock_hz: u32) -> Result<(), TimerError> {
        let reload = reload_for(period_us, clock_hz, self.prescaler, SYSTICK_MAX_RELOAD)?;

        self.syst.set_clock_source(match self.prescaler {
            Prescaler::Core => SystClkSource::Core,
            Prescaler::CoreDiv8 => SystClkSource::External,
        });
        self.syst.set_reload(reload);
        self.configured = true;

        crate::log_debug!("systick: reload {} for {} us at {} Hz", reload, period_us, clock_hz);
        Ok(())
    }

    fn start(&mut self) -> Result<(), TimerError> {
        if !self.configured {
            return Err(TimerError::NotConfigured);
        }
        // Writing CVR clears it; the counter then loads RVR on the next
        // cycle, so the first wrap is a full period away.
        self.syst.clear_current();
        // An expiry latched before the last stop() stays pending in ICSR.
        SCB::clear_pendst();
        self.syst.enable_interrupt();
        self.syst.enable_counter();
        Ok(())
    }

    fn stop(&mut self) {
        self.syst.disable_counter();
        self.syst.disable_interrupt();
    }

    fn register_callback(&mut self, handler: &'static dyn TickHandler) {
        interrupt::free(|cs| HANDLER.borrow(cs).set(Some(handler)));
    }
}

// ---------------------------------------------------------------------------
// SysTick handler
// ---------------------------------------------------------------------------

/// SysTick exception handler. Forwards each expiry to the installed
/// [`TickHandler`].
#[no_mangle]
pub extern "C" fn SysTick() {
    let handler = interrupt::free(|cs| HANDLER.borrow(cs).get());
    if let Some(handler) = handler {
        handler.on_tick();
    }
}
