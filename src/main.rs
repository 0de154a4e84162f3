//! # TickOS Example Firmware
//!
//! Runs three periodic tasks on an STM32F103 at the default 8 MHz HSI
//! clock with a 1 ms tick:
//!
//! | Task | Period | Initial delay | Behavior |
//! |------|--------|---------------|----------|
//! | `sample_inputs` | 10 ms | 0 | Counts samples |
//! | `update_outputs` | 50 ms | 3 ticks | Consumes the latest sample count |
//! | `heartbeat` | 500 ms | 7 ticks | Reports liveness and coalesced ticks |
//!
//! The delays keep the three tasks off the ticks where their periods
//! line up, so no pass runs all of them together.

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m_rt::entry;
use panic_halt as _;

#[cfg(feature = "defmt")]
use defmt_rtt as _;

use tickos::arch::{self, cortex_m3::SysTickTimer};
use tickos::{config, log_error, log_info, FixedClock, Scheduler, TaskDescriptor, TickSignal};

/// Tick flag shared with the SysTick handler.
static TICK: TickSignal = TickSignal::new();

static SAMPLES: AtomicU32 = AtomicU32::new(0);
static PUBLISHED: AtomicU32 = AtomicU32::new(0);
static BEATS: AtomicU32 = AtomicU32::new(0);

// ---------------------------------------------------------------------------
// Task bodies
// ---------------------------------------------------------------------------

fn sample_inputs() {
    SAMPLES.fetch_add(1, Ordering::Relaxed);
}

fn update_outputs() {
    let samples = SAMPLES.load(Ordering::Relaxed);
    PUBLISHED.store(samples, Ordering::Relaxed);
}

fn heartbeat() {
    let beat = BEATS.fetch_add(1, Ordering::Relaxed) + 1;
    log_info!(
        "heartbeat {}: {} samples published, {} ticks coalesced",
        beat,
        PUBLISHED.load(Ordering::Relaxed),
        TICK.coalesced()
    );
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Firmware entry point. Builds the task table, initializes the
/// scheduler and hands control to it. Does not return.
#[entry]
fn main() -> ! {
    let Some(cp) = cortex_m::Peripherals::take() else {
        arch::halt();
    };

    let tasks = [
        TaskDescriptor::new(&sample_inputs, 10_000),
        TaskDescriptor::new(&update_outputs, 50_000).with_initial_delay(3),
        TaskDescriptor::new(&heartbeat, 500_000).with_initial_delay(7),
    ];

    let clock = FixedClock::new(config::SYSTEM_CLOCK_HZ);
    let timer = SysTickTimer::new(cp.SYST, config::SYSTICK_PRESCALER);

    match Scheduler::init(&tasks, &clock, timer, &TICK) {
        Ok(scheduler) => scheduler.start(),
        Err(err) => {
            log_error!("init failed: {}", err);
            arch::halt()
        }
    }
}
