//! # TickOS Configuration
//!
//! Compile-time constants governing the tick timer and the dispatcher.
//! All limits are fixed at build time; the task count is the length of
//! the task table handed to [`Scheduler::init`](crate::scheduler::Scheduler::init).

use crate::timer::Prescaler;

/// Length of one scheduler tick in microseconds. Every task period is
/// expressed as a whole number of these; a period that is not a multiple
/// is truncated toward zero.
pub const TICK_PERIOD_US: u32 = 1_000;

/// Core clock in Hz reported by the default [`FixedClock`](crate::clock::FixedClock).
/// STM32F103 out of reset runs from the 8 MHz HSI oscillator.
pub const SYSTEM_CLOCK_HZ: u32 = 8_000_000;

/// SysTick clock source. `Core` counts processor cycles, `CoreDiv8`
/// counts the fixed external reference (HCLK / 8).
pub const SYSTICK_PRESCALER: Prescaler = Prescaler::Core;

/// When true the foreground loop sleeps with `wfi` between ticks instead
/// of busy-polling the tick flag.
pub const LOW_POWER_IDLE: bool = true;

/// Microseconds per second, used by the reload derivation.
pub const MICROS_PER_SECOND: u64 = 1_000_000;
