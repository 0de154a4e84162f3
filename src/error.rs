//! # Errors
//!
//! Every failure in TickOS is a configuration error detected before the
//! dispatcher loop starts. Once running there is no return path, so
//! nothing here describes a run-time fault.

use core::fmt;

/// Failure to program or start the tick timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// Requested tick period was 0 µs.
    ZeroPeriod,
    /// Timer input clock was reported as 0 Hz.
    ZeroClock,
    /// Period is shorter than two timer counts; a zero reload never
    /// raises the interrupt.
    PeriodTooShort,
    /// Period needs more counts than the reload register holds.
    ReloadOutOfRange {
        /// Timer counts the requested period would take.
        counts: u64,
    },
    /// `start()` was called before a successful `configure()`.
    NotConfigured,
    /// The counter refused to start.
    StartFailed,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::ZeroPeriod => write!(f, "tick period is zero"),
            TimerError::ZeroClock => write!(f, "timer clock is zero"),
            TimerError::PeriodTooShort => write!(f, "tick period shorter than two timer counts"),
            TimerError::ReloadOutOfRange { counts } => {
                write!(f, "tick period needs {} counts, reload register overflows", counts)
            }
            TimerError::NotConfigured => write!(f, "timer started before configuration"),
            TimerError::StartFailed => write!(f, "timer failed to start"),
        }
    }
}

/// Scheduler initialization error.
///
/// Returned by [`Scheduler::init`](crate::scheduler::Scheduler::init); any of
/// these prevents `start()` from ever being reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A task asked for a period shorter than one tick, so its period in
    /// ticks would be zero.
    PeriodBelowTick {
        /// Index of the offending task in the task table.
        task: usize,
        /// Requested period.
        period_us: u32,
        /// Configured tick length.
        tick_us: u32,
    },
    /// The clock source could not report the core frequency.
    ClockUnavailable,
    /// The tick timer rejected its configuration.
    Timer(TimerError),
}

impl From<TimerError> for Error {
    fn from(err: TimerError) -> Self {
        Error::Timer(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PeriodBelowTick { task, period_us, tick_us } => write!(
                f,
                "task {} period {} us is shorter than the {} us tick",
                task, period_us, tick_us
            ),
            Error::ClockUnavailable => write!(f, "core clock frequency unavailable"),
            Error::Timer(err) => write!(f, "tick timer: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_error_converts() {
        let err: Error = TimerError::NotConfigured.into();
        assert_eq!(err, Error::Timer(TimerError::NotConfigured));
    }

    #[test]
    fn test_display_names_the_task() {
        let err = Error::PeriodBelowTick { task: 2, period_us: 500, tick_us: 1_000 };
        assert_eq!(
            std::format!("{}", err),
            "task 2 period 500 us is shorter than the 1000 us tick"
        );
    }
}
