//! # Scheduler
//!
//! Tick-driven cooperative dispatcher. Turns the periodic timer interrupt
//! into fixed-period invocation of a static task table.
//!
//! ## Lifecycle
//!
//! ```text
//!  (no value)  ── init() ──►  Scheduler  ── start() ──►  running (never returns)
//! Uninitialized              Initialized                 Running
//! ```
//!
//! `init()` either yields a fully configured scheduler or a configuration
//! [`Error`]; there is no partially initialized state. `start()` consumes
//! the scheduler, so nothing can touch task state once it is running.
//!
//! ## Dispatch Loop
//!
//! 1. The timer interrupt calls [`TickSignal::on_tick`], which only sets a flag
//! 2. The foreground loop waits for the flag, clears it, and runs one pass
//! 3. A pass visits every task in table order and runs the ones whose
//!    countdown reached zero (see [`TaskRuntime::step`])
//!
//! Task bodies run synchronously and are never preempted by other tasks;
//! a slow body delays every later task in the same pass and the start of
//! the next pass. Ticks that arrive while a pass is still running are
//! coalesced into one.

use crate::arch;
use crate::clock::ClockSource;
use crate::config::TICK_PERIOD_US;
use crate::error::{Error, TimerError};
use crate::sync::TickSignal;
use crate::task::{TaskDescriptor, TaskRuntime};
use crate::timer::TickTimer;
use crate::{log_debug, log_error, log_info, log_trace, log_warn};

// ---------------------------------------------------------------------------
// Scheduler struct
// ---------------------------------------------------------------------------

/// The dispatcher. Owns the per-task countdowns and the tick timer.
///
/// `N` is the task count, fixed by the length of the task table; the
/// runtime state is an inline array and is never resized.
pub struct Scheduler<'a, T: TickTimer, const N: usize> {
    /// Task table, in dispatch order.
    tasks: &'a [TaskDescriptor<'a>; N],

    /// Countdown per task, same order as `tasks`. Touched only by the
    /// foreground pass.
    runtime: [TaskRuntime; N],

    timer: T,

    /// Shared with the timer interrupt.
    signal: &'static TickSignal,

    tick_period_us: u32,

    /// Completed passes (wrapping).
    passes: u32,
}

impl<'a, T: TickTimer, const N: usize> Scheduler<'a, T, N> {
    /// Initialize with the build-time tick length, [`TICK_PERIOD_US`].
    pub fn init<C: ClockSource + ?Sized>(
        tasks: &'a [TaskDescriptor<'a>; N],
        clock: &C,
        timer: T,
        signal: &'static TickSignal,
    ) -> Result<Self, Error> {
        Self::init_with_tick(tasks, clock, timer, signal, TICK_PERIOD_US)
    }

    /// Initialize with an explicit tick length.
    ///
    /// 1. Derive every task's period in ticks and load its initial delay
    /// 2. Query the core clock
    /// 3. Program the timer and install `signal` as its expiry callback
    ///
    /// The timer is configured but not started.
    ///
    /// # Errors
    /// - [`Error::PeriodBelowTick`] if any task period is under one tick
    /// - [`Error::ClockUnavailable`] if the clock cannot report a frequency
    /// - [`Error::Timer`] if the timer rejects the tick length
    ///
    /// Checks run in that order; the timer is left untouched unless every
    /// task is valid and the clock is known.
    pub fn init_with_tick<C: ClockSource + ?Sized>(
        tasks: &'a [TaskDescriptor<'a>; N],
        clock: &C,
        mut timer: T,
        signal: &'static TickSignal,
        tick_period_us: u32,
    ) -> Result<Self, Error> {
        if tick_period_us == 0 {
            log_error!("scheduler: tick length is zero");
            return Err(TimerError::ZeroPeriod.into());
        }

        let mut runtime = [TaskRuntime::EMPTY; N];
        for (index, (task, slot)) in tasks.iter().zip(runtime.iter_mut()).enumerate() {
            *slot = TaskRuntime::derive(index, task, tick_period_us).map_err(|err| {
                log_error!("scheduler: {}", err);
                err
            })?;

            if task.period_us() % tick_period_us != 0 {
                log_warn!(
                    "scheduler: task {} period {} us truncated to {} ticks",
                    index,
                    task.period_us(),
                    slot.period_ticks()
                );
            }
            log_debug!(
                "scheduler: task {} every {} ticks, first after {}",
                index,
                slot.period_ticks(),
                slot.remaining_ticks()
            );
        }

        let Some(clock_hz) = clock.frequency_hz() else {
            log_error!("scheduler: {}", Error::ClockUnavailable);
            return Err(Error::ClockUnavailable);
        };

        timer.configure(tick_period_us, clock_hz).map_err(|err| {
            log_error!("scheduler: tick timer: {}", err);
            Error::from(err)
        })?;
        timer.register_callback(signal);

        log_info!(
            "scheduler: {} tasks, {} us tick, core clock {} Hz",
            N,
            tick_period_us,
            clock_hz
        );

        Ok(Self {
            tasks,
            runtime,
            timer,
            signal,
            tick_period_us,
            passes: 0,
        })
    }

    /// Start the tick timer and dispatch forever. **Does not return.**
    ///
    /// If the timer fails to start the system halts; it never falls back
    /// to an earlier state.
    pub fn start(mut self) -> ! {
        if let Err(err) = self.launch() {
            log_error!("scheduler: cannot start: {}", err);
            self.timer.stop();
            arch::halt();
        }

        loop {
            self.signal.wait();
            self.poll();
        }
    }

    fn launch(&mut self) -> Result<(), Error> {
        self.timer.start()?;
        log_info!("scheduler: running");
        Ok(())
    }

    /// Consume one pending tick and run a pass for it. Returns `false`
    /// without doing anything if no tick was pending.
    ///
    /// The flag is cleared before the pass, so a tick raised while tasks
    /// run is kept for the next call.
    pub fn poll(&mut self) -> bool {
        if !self.signal.take() {
            return false;
        }
        self.run_pass();
        true
    }

    /// One scheduling pass over every task, in table order. Returns the
    /// number of tasks that ran.
    pub fn run_pass(&mut self) -> usize {
        let mut ran = 0;
        for (task, runtime) in self.tasks.iter().zip(self.runtime.iter_mut()) {
            if runtime.step(task) {
                ran += 1;
            }
        }
        self.passes = self.passes.wrapping_add(1);
        log_trace!("scheduler: pass {} ran {} tasks", self.passes, ran);
        ran
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    #[inline]
    pub const fn task_count(&self) -> usize {
        N
    }

    #[inline]
    pub fn tick_period_us(&self) -> u32 {
        self.tick_period_us
    }

    /// Passes run so far (wraps at `u32::MAX`).
    #[inline]
    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn period_ticks(&self, index: usize) -> Option<u32> {
        self.runtime.get(index).map(TaskRuntime::period_ticks)
    }

    pub fn remaining_ticks(&self, index: usize) -> Option<u32> {
        self.runtime.get(index).map(TaskRuntime::remaining_ticks)
    }

    pub fn signal(&self) -> &'static TickSignal {
        self.signal
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
