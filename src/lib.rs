//! # TickOS: tick-driven cooperative dispatcher
//!
//! A minimal task dispatcher for ARM Cortex-M3 microcontrollers. A
//! periodic hardware timer interrupt is turned into deterministic,
//! fixed-period invocation of a static table of application tasks.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │           Application tasks (fn() callbacks)            │
//! ├────────────────────────────────────────────────────────┤
//! │             Task table (main.rs, build time)            │
//! ├──────────────────────────┬─────────────────────────────┤
//! │  Scheduler               │  Task model                 │
//! │  scheduler.rs            │  task.rs                    │
//! │  ─ init()  ─ start()     │  ─ TaskDescriptor           │
//! │  ─ poll()  ─ run_pass()  │  ─ TaskRuntime::step()      │
//! ├──────────────────────────┴─────────────────────────────┤
//! │  Tick signal (sync.rs): the only interrupt/foreground   │
//! │  shared state: one coalescing flag                      │
//! ├──────────────────────────┬─────────────────────────────┤
//! │  Tick timer (timer.rs)   │  Clock source (clock.rs)    │
//! ├──────────────────────────┴─────────────────────────────┤
//! │          Arch port (arch/cortex_m3.rs): SysTick         │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Execution Model
//!
//! - One foreground context and one interrupt context; no threads and
//!   no preemption between tasks
//! - The SysTick interrupt only raises a flag; task bodies always run in
//!   the foreground loop
//! - Ticks that arrive before the loop consumed the previous one are
//!   coalesced, never queued
//! - A task body that does not return stalls the whole system
//!
//! ## Memory Model
//!
//! - **No heap**: task table and countdowns are fixed-size arrays
//! - **No `alloc`**: pure `core`
//! - **No global task state**: the scheduler value owns every countdown;
//!   only the tick flag is a `static`

#![cfg_attr(not(test), no_std)]

pub mod log;

pub mod arch;
pub mod clock;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod sync;
pub mod task;
pub mod timer;

pub use clock::{ClockSource, FixedClock};
pub use error::{Error, TimerError};
pub use scheduler::Scheduler;
pub use sync::TickSignal;
pub use task::TaskDescriptor;
pub use timer::{Prescaler, TickHandler, TickTimer};
