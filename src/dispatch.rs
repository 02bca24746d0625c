//! RTC interrupt vector dispatch.
//!
//! The RTC has a single interrupt line. `RTCIV` reports the highest priority
//! pending source (alarm, then RT0PS, then RT1PS) and clears its flag, so each
//! invocation handles one cause and any other pending cause re-enters.

use crate::power::PowerControl;
use crate::registers::{RTCIV_RT0PSIFG, RTCIV_RT1PSIFG, RTCIV_RTCAIFG};
use crate::rtc::Rtc;
use tock_registers::interfaces::Readable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptCause {
    /// Calendar alarm matched
    Alarm,
    /// RT0PS tick
    Channel0,
    /// RT1PS tick
    Channel1,
}

impl InterruptCause {
    /// Sources without a client slot (ready, time event, oscillator fault)
    /// decode to `None`.
    pub fn from_vector(vector: u16) -> Option<Self> {
        match vector {
            RTCIV_RTCAIFG => Some(InterruptCause::Alarm),
            RTCIV_RT0PSIFG => Some(InterruptCause::Channel0),
            RTCIV_RT1PSIFG => Some(InterruptCause::Channel1),
            _ => None,
        }
    }
}

impl<'a> Rtc<'a> {
    /// Body of the RTC interrupt handler.
    ///
    /// Runs the client registered for the pending cause, if any. When a
    /// client changed the sleep intention, the core is told to stay awake
    /// after the interrupt returns. Returns the decoded cause.
    ///
    /// Must only be called from the RTC interrupt.
    pub fn handle_interrupt<P: PowerControl>(&self, power: &P) -> Option<InterruptCause> {
        let stay_asleep = power.stay_asleep();

        let vector = self.registers.iv.get();
        let cause = InterruptCause::from_vector(vector);
        match cause.and_then(|cause| self.registry.client_for(cause)) {
            Some(client) => client.fired(),
            None => trace!("rtc: unhandled vector {=u16:x}", vector),
        }

        if stay_asleep != power.stay_asleep() {
            power.resume_on_exit();
        }
        cause
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::fake;
    use crate::registry::RtcClient;
    use crate::Alarm;
    use core::cell::Cell;

    struct FakePower {
        asleep: Cell<bool>,
        resumed: Cell<u32>,
    }

    impl FakePower {
        fn sleeping() -> Self {
            Self {
                asleep: Cell::new(true),
                resumed: Cell::new(0),
            }
        }
    }

    impl PowerControl for FakePower {
        fn stay_asleep(&self) -> bool {
            self.asleep.get()
        }

        fn resume_on_exit(&self) {
            self.resumed.set(self.resumed.get() + 1);
        }
    }

    struct Counter {
        hits: Cell<u32>,
    }

    impl Counter {
        fn new() -> Self {
            Self { hits: Cell::new(0) }
        }
    }

    impl RtcClient for Counter {
        fn fired(&self) {
            self.hits.set(self.hits.get() + 1);
        }
    }

    /// Client that asks the foreground to wake up.
    struct Waker<'p> {
        power: &'p FakePower,
    }

    impl<'p> RtcClient for Waker<'p> {
        fn fired(&self) {
            self.power.asleep.set(false);
        }
    }

    #[test]
    fn vectors_decode() {
        assert_eq!(InterruptCause::from_vector(0x06), Some(InterruptCause::Alarm));
        assert_eq!(InterruptCause::from_vector(0x08), Some(InterruptCause::Channel0));
        assert_eq!(InterruptCause::from_vector(0x0A), Some(InterruptCause::Channel1));
        for vector in [0x00, 0x02, 0x04, 0x0C, 0x0E].iter() {
            assert_eq!(InterruptCause::from_vector(*vector), None);
        }
    }

    #[test]
    fn runs_only_the_matching_client() {
        let regs = fake::registers();
        let (fast, slow, alarm) = (Counter::new(), Counter::new(), Counter::new());
        let power = FakePower::sleeping();
        let rtc = Rtc::new(&regs);
        rtc.attach_periodic(1 << 10, &fast).unwrap();
        rtc.attach_periodic(1, &slow).unwrap();
        rtc.attach_alarm(Alarm::new().minute(0), &alarm).unwrap();

        fake::raise(&regs, 0x08);
        assert_eq!(rtc.handle_interrupt(&power), Some(InterruptCause::Channel0));
        fake::raise(&regs, 0x0A);
        assert_eq!(rtc.handle_interrupt(&power), Some(InterruptCause::Channel1));
        fake::raise(&regs, 0x0A);
        rtc.handle_interrupt(&power);
        fake::raise(&regs, 0x06);
        assert_eq!(rtc.handle_interrupt(&power), Some(InterruptCause::Alarm));

        assert_eq!(fast.hits.get(), 1);
        assert_eq!(slow.hits.get(), 2);
        assert_eq!(alarm.hits.get(), 1);
        assert_eq!(power.resumed.get(), 0);
    }

    #[test]
    fn unregistered_alarm_is_absorbed() {
        let regs = fake::registers();
        let power = FakePower::sleeping();
        let rtc = Rtc::new(&regs);

        fake::raise(&regs, 0x06);
        assert_eq!(rtc.handle_interrupt(&power), Some(InterruptCause::Alarm));
        assert!(power.asleep.get());
        assert_eq!(power.resumed.get(), 0);
    }

    #[test]
    fn other_sources_are_absorbed() {
        let regs = fake::registers();
        let tick = Counter::new();
        let power = FakePower::sleeping();
        let rtc = Rtc::new(&regs);
        rtc.attach_periodic(1, &tick).unwrap();

        for vector in [0x00, 0x02, 0x04, 0x0C].iter() {
            fake::raise(&regs, *vector);
            assert_eq!(rtc.handle_interrupt(&power), None);
        }
        assert_eq!(tick.hits.get(), 0);
    }

    #[test]
    fn detached_channel_is_not_invoked() {
        let regs = fake::registers();
        let tick = Counter::new();
        let power = FakePower::sleeping();
        let rtc = Rtc::new(&regs);
        rtc.attach_periodic(1 << 8, &tick).unwrap();
        rtc.detach_periodic(&tick).unwrap();

        fake::raise(&regs, 0x08);
        rtc.handle_interrupt(&power);
        assert_eq!(tick.hits.get(), 0);
    }

    #[test]
    fn client_wakeup_resumes_on_exit() {
        let regs = fake::registers();
        let power = FakePower::sleeping();
        let waker = Waker { power: &power };
        let rtc = Rtc::new(&regs);
        rtc.attach_periodic(1, &waker).unwrap();

        fake::raise(&regs, 0x0A);
        rtc.handle_interrupt(&power);
        assert!(!power.asleep.get());
        assert_eq!(power.resumed.get(), 1);

        // already awake, nothing changes
        fake::raise(&regs, 0x0A);
        rtc.handle_interrupt(&power);
        assert_eq!(power.resumed.get(), 1);
    }
}
