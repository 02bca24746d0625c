#![cfg_attr(not(test), no_std)]

mod fmt;

pub mod alarm;
pub mod datetime;
pub mod dispatch;
mod error;
pub mod format;
pub mod power;
pub mod prescale;
pub mod registers;
pub mod registry;
mod rtc;

pub use alarm::{Alarm, AlarmField, Weekday};
pub use datetime::{DateTime, SavedTime};
pub use dispatch::InterruptCause;
pub use error::Error;
pub use format::TimeFormat;
pub use power::{PowerControl, SleepOnExit};
pub use prescale::Channel;
pub use registers::RtcRegisters;
pub use registry::RtcClient;
pub use rtc::Rtc;

#[cfg(feature = "probe")]
use defmt_rtt as _; // global logger
#[cfg(feature = "probe")]
use panic_probe as _;

#[cfg(feature = "probe")]
defmt::timestamp! {"{=u64}", {
        use core::sync::atomic::{AtomicUsize, Ordering};

        static COUNT: AtomicUsize = AtomicUsize::new(0);
        // NOTE(no-CAS) `timestamps` runs with interrupts disabled
        let n = COUNT.load(Ordering::Relaxed);
        COUNT.store(n + 1, Ordering::Relaxed);
        n as u64
    }
}
