//! # Clock Source
//!
//! The scheduler asks for the core clock exactly once, during `init()`,
//! to derive the tick timer reload. Clock-tree setup belongs to the
//! board bring-up code; this module only defines how the frequency is
//! reported.

/// Reports the current core clock frequency.
pub trait ClockSource {
    /// Core clock in Hz, or `None` if it cannot be determined.
    ///
    /// `None` is fatal for [`Scheduler::init`](crate::scheduler::Scheduler::init):
    /// programming the timer against a guessed frequency would mis-time
    /// every task.
    fn frequency_hz(&self) -> Option<u32>;
}

impl<C: ClockSource + ?Sized> ClockSource for &C {
    fn frequency_hz(&self) -> Option<u32> {
        (**self).frequency_hz()
    }
}

/// A clock whose frequency is known at build time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    hz: u32,
}

impl FixedClock {
    pub const fn new(hz: u32) -> Self {
        Self { hz }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(crate::config::SYSTEM_CLOCK_HZ)
    }
}

impl ClockSource for FixedClock {
    fn frequency_hz(&self) -> Option<u32> {
        // 0 Hz means the frequency was never filled in
        (self.hz > 0).then_some(self.hz)
    }
}
