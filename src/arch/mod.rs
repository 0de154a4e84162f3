//! # Architecture Abstraction Layer
//!
//! Idle and halt primitives used by the dispatcher loop, plus the
//! Cortex-M3 SysTick port. Off-target (host tests) the primitives fall
//! back to spinning so the portable code builds unchanged.

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub mod cortex_m3;

/// Sleep until the next interrupt unless `ready()` already holds.
///
/// On Cortex-M the check and the `wfi` run with interrupts masked: an
/// interrupt that becomes pending in between still wakes the core, and
/// its handler runs as soon as the mask is lifted. No wakeup is lost.
#[inline]
pub fn sleep_unless<F: Fn() -> bool>(ready: F) {
    #[cfg(all(target_arch = "arm", target_os = "none"))]
    cortex_m::interrupt::free(|_cs| {
        if !ready() {
            cortex_m::asm::wfi();
        }
    });

    #[cfg(not(all(target_arch = "arm", target_os = "none")))]
    if !ready() {
        core::hint::spin_loop();
    }
}

/// Stop the system. Used when the scheduler cannot start.
pub fn halt() -> ! {
    #[cfg(all(target_arch = "arm", target_os = "none"))]
    cortex_m::interrupt::disable();

    loop {
        #[cfg(all(target_arch = "arm", target_os = "none"))]
        cortex_m::asm::wfi();

        #[cfg(not(all(target_arch = "arm", target_os = "none")))]
        core::hint::spin_loop();
    }
}
