//! Sleep intention and wake-from-interrupt support.
//!
//! The foreground calls [`sleep`] and stays in low power mode across
//! interrupts until a client calls [`wakeup`]. The dispatcher notices the
//! changed intention and lets the core return to thread mode.

use core::sync::atomic::{AtomicBool, Ordering};
use cortex_m::peripheral::SCB;
use cortex_m::{asm, interrupt};

static STAY_ASLEEP: AtomicBool = AtomicBool::new(false);

/// SCB->SCR sleep-on-exit bit
const SCR_SLEEPONEXIT: u32 = 1 << 1;

/// Low power state as seen by the interrupt dispatcher.
pub trait PowerControl {
    /// Whether the core means to sleep again once the interrupt returns.
    fn stay_asleep(&self) -> bool;
    /// Return to active mode when the current interrupt returns.
    fn resume_on_exit(&self);
}

/// Cortex-M sleep-on-exit
pub struct SleepOnExit;

impl PowerControl for SleepOnExit {
    fn stay_asleep(&self) -> bool {
        STAY_ASLEEP.load(Ordering::Relaxed)
    }

    fn resume_on_exit(&self) {
        // SAFETY: single word read-modify-write of SCR from handler mode
        unsafe { (*SCB::PTR).scr.modify(|scr| scr & !SCR_SLEEPONEXIT) };
    }
}

/// Sleep until a client calls [`wakeup`].
pub fn sleep(scb: &mut SCB) {
    STAY_ASLEEP.store(true, Ordering::Relaxed);
    scb.set_sleeponexit();
    loop {
        // a pending interrupt still ends `wfi` while PRIMASK is set
        interrupt::disable();
        let asleep = doze(&STAY_ASLEEP, asm::wfi);
        // SAFETY: re-enables what was masked above, no critical section spans it
        unsafe { interrupt::enable() };
        if !asleep {
            break;
        }
    }
    scb.clear_sleeponexit();
}

/// Run `wait` if `intention` still asks for sleep. Must be called with
/// interrupts masked so a wakeup cannot land between the check and `wait`.
fn doze(intention: &AtomicBool, wait: impl FnOnce()) -> bool {
    let asleep = intention.load(Ordering::Relaxed);
    if asleep {
        wait();
    }
    asleep
}

/// Leave [`sleep`] after the current interrupt returns.
pub fn wakeup() {
    STAY_ASLEEP.store(false, Ordering::Relaxed);
}
