//! # Task Model
//!
//! A task is a zero-argument callback run to completion every
//! `period_us` microseconds. Descriptors are built once, in the firmware's
//! task table, and never change; the scheduler pairs each with a
//! [`TaskRuntime`] countdown.
//!
//! ## Countdown Rule
//!
//! On every scheduling pass, for each task in table order:
//!
//! ```text
//! if remaining == 0 {
//!     run()
//!     remaining = period_ticks
//! }
//! remaining -= 1
//! ```
//!
//! Reload-then-decrement in the same step gives exactly `period_ticks`
//! passes between two runs. A task whose countdown starts at `D` first
//! runs on pass `D + 1`.

use crate::error::{Error, TimerError};

// ---------------------------------------------------------------------------
// Task descriptor (immutable)
// ---------------------------------------------------------------------------

/// Static description of a periodic task.
#[derive(Clone, Copy)]
pub struct TaskDescriptor<'a> {
    runnable: &'a dyn Fn(),
    period_us: u32,
    initial_delay_ticks: u32,
}

impl<'a> TaskDescriptor<'a> {
    /// A task running every `period_us` microseconds, first on the first tick.
    pub const fn new(runnable: &'a dyn Fn(), period_us: u32) -> Self {
        Self {
            runnable,
            period_us,
            initial_delay_ticks: 0,
        }
    }

    /// Hold the first run back by `ticks` ticks. Used to stagger tasks
    /// whose periods would otherwise line up on the same tick.
    pub const fn with_initial_delay(mut self, ticks: u32) -> Self {
        self.initial_delay_ticks = ticks;
        self
    }

    #[inline]
    pub const fn period_us(&self) -> u32 {
        self.period_us
    }

    #[inline]
    pub const fn initial_delay_ticks(&self) -> u32 {
        self.initial_delay_ticks
    }

    /// Run the task body to completion.
    #[inline]
    pub fn run(&self) {
        (self.runnable)()
    }
}

impl core::fmt::Debug for TaskDescriptor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TaskDescriptor")
            .field("period_us", &self.period_us)
            .field("initial_delay_ticks", &self.initial_delay_ticks)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Per-task runtime state
// ---------------------------------------------------------------------------

/// Countdown state owned by the scheduler, one per descriptor.
///
/// `period_ticks` is frozen at init and is always at least 1;
/// `remaining_ticks` is the only field that changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRuntime {
    period_ticks: u32,
    remaining_ticks: u32,
}

impl TaskRuntime {
    /// Placeholder used to size the runtime array before init fills it.
    pub const EMPTY: Self = Self {
        period_ticks: 1,
        remaining_ticks: 0,
    };

    /// Derive the countdown for task `index` against a `tick_us` tick.
    ///
    /// # Errors
    /// [`Error::PeriodBelowTick`] if the period is shorter than one tick,
    /// [`TimerError::ZeroPeriod`] if `tick_us` is zero.
    pub fn derive(index: usize, task: &TaskDescriptor<'_>, tick_us: u32) -> Result<Self, Error> {
        let period_ticks = task
            .period_us
            .checked_div(tick_us)
            .ok_or(Error::Timer(TimerError::ZeroPeriod))?;
        if period_ticks == 0 {
            return Err(Error::PeriodBelowTick {
                task: index,
                period_us: task.period_us,
                tick_us,
            });
        }
        Ok(Self {
            period_ticks,
            remaining_ticks: task.initial_delay_ticks,
        })
    }

    #[inline]
    pub const fn period_ticks(&self) -> u32 {
        self.period_ticks
    }

    #[inline]
    pub const fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    #[inline]
    pub const fn is_due(&self) -> bool {
        self.remaining_ticks == 0
    }

    /// Advance by one tick, running `task` if it is due. Returns whether
    /// the task ran.
    pub fn step(&mut self, task: &TaskDescriptor<'_>) -> bool {
        let due = self.is_due();
        if due {
            task.run();
            self.remaining_ticks = self.period_ticks;
        }
        self.remaining_ticks -= 1;
        due
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
