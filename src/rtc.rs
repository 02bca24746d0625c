//! # RTC_B calendar real-time clock
//!
//! Calendar keeping, periodic prescaler interrupts and the calendar alarm.
//! Interrupt dispatch lives in [`crate::dispatch`].
//!
//! Configuration of an interrupt source is only changed while its enable bit
//! is clear, so [`Rtc::handle_interrupt`] never observes a torn setup.

use crate::alarm::{Alarm, Weekday};
use crate::datetime::{month_name, DateTime, SavedTime, SNAPSHOT_LEN};
use crate::format::{Rendered, TimeFormat};
use crate::prescale::{self, Channel, RESET_INTERVAL};
use crate::registers::{RtcRegisters, RTCAx, RTCCTL0, RTCCTL1, RTCPSxCTL};
use crate::registry::{Registry, RtcClient};
use crate::Error;
use core::cell::Cell;
use core::fmt;
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::ReadWrite;

const MAX_YEAR: u16 = 4095;

pub struct Rtc<'a> {
    pub(crate) registers: &'a RtcRegisters,
    pub(crate) registry: Registry<'a>,
    format: Cell<TimeFormat>,
}

impl<'a> Rtc<'a> {
    pub const fn new(registers: &'a RtcRegisters) -> Self {
        Self {
            registers,
            registry: Registry::new(),
            format: Cell::new(TimeFormat::empty()),
        }
    }

    /// Reset the clock to zero and start counting.
    pub fn begin(&self) -> Result<(), Error> {
        self.reset(None)
    }

    /// Reset the clock to `now` and start counting.
    pub fn begin_at(&self, now: &DateTime) -> Result<(), Error> {
        self.reset(Some(now))
    }

    fn reset(&self, now: Option<&DateTime>) -> Result<(), Error> {
        let regs = self.registers;
        if regs.ctl0.is_set(RTCCTL0::RTCOFIFG) {
            warn!("rtc: 32 kHz oscillator fault");
            return Err(Error::OscillatorFault);
        }

        regs.ctl0.set(0);
        regs.ctl1.write(RTCCTL1::RTCHOLD::SET);
        regs.ctl2.set(0);
        regs.ctl3.set(0);
        match now {
            Some(now) => self.load(now),
            None => {
                regs.sec.set(0);
                regs.min.set(0);
                regs.hour.set(0);
                regs.dow.set(0);
                regs.day.set(0);
                regs.mon.set(0);
                regs.year.set(0);
            }
        }
        self.write_alarm([0; 4]);
        for channel in Channel::ALL.iter() {
            self.prescale_control(*channel)
                .write(RTCPSxCTL::RTIP.val(u16::from(RESET_INTERVAL)));
        }
        regs.ps.set(0);

        // every source is disabled now, stale clients would never fire again
        let _ = self.registry.release_alarm();
        for channel in Channel::ALL.iter() {
            let _ = self.registry.release_channel(*channel);
        }

        regs.ctl1.modify(RTCCTL1::RTCHOLD::CLEAR);
        info!("rtc: started");
        Ok(())
    }

    /// Stop counting and mask every RTC interrupt.
    pub fn end(&self) {
        let regs = self.registers;
        regs.ctl1.modify(RTCCTL1::RTCHOLD::SET);
        regs.ps0ctl.modify(RTCPSxCTL::RTPSIE::CLEAR);
        regs.ps1ctl.modify(RTCPSxCTL::RTPSIE::CLEAR);
        regs.ctl0
            .modify(RTCCTL0::RTCAIE::CLEAR + RTCCTL0::RTCTEVIE::CLEAR + RTCCTL0::RTCOFIE::CLEAR);
        info!("rtc: stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.registers.ctl1.is_set(RTCCTL1::RTCHOLD)
    }

    fn load(&self, now: &DateTime) {
        self.set_second(now.second);
        self.set_minute(now.minute);
        self.set_hour(now.hour);
        self.set_day_of_week(now.day_of_week);
        self.set_day(now.day);
        self.set_month(now.month);
        self.set_year(now.year);
    }

    pub fn set_day_of_week(&self, day: Weekday) {
        self.registers.dow.set(u8::from(day));
    }

    pub fn set_month(&self, month: u8) {
        self.registers.mon.set(month.max(1).min(12));
    }

    pub fn set_day(&self, day: u8) {
        self.registers.day.set(day.max(1).min(31));
    }

    pub fn set_year(&self, year: u16) {
        self.registers.year.set(year.min(MAX_YEAR));
    }

    pub fn set_hour(&self, hour: u8) {
        self.registers.hour.set(hour.min(23));
    }

    pub fn set_minute(&self, minute: u8) {
        self.registers.min.set(minute.min(59));
    }

    pub fn set_second(&self, second: u8) {
        self.registers.sec.set(second.min(59));
    }

    /// Spin until the calendar registers hold a consistent value. Not to be
    /// used from interrupt context.
    fn wait_ready(&self) {
        while !self.registers.ctl1.is_set(RTCCTL1::RTCRDY) {
            core::hint::spin_loop();
        }
    }

    pub fn day_of_week(&self) -> Weekday {
        self.wait_ready();
        Weekday::from_ordinal(self.registers.dow.get())
    }

    pub fn month(&self) -> u8 {
        self.wait_ready();
        self.registers.mon.get()
    }

    pub fn day(&self) -> u8 {
        self.wait_ready();
        self.registers.day.get()
    }

    pub fn year(&self) -> u16 {
        self.wait_ready();
        self.registers.year.get()
    }

    pub fn hour(&self) -> u8 {
        self.wait_ready();
        self.registers.hour.get()
    }

    pub fn minute(&self) -> u8 {
        self.wait_ready();
        self.registers.min.get()
    }

    pub fn second(&self) -> u8 {
        self.wait_ready();
        self.registers.sec.get()
    }

    /// Read all calendar fields at once.
    pub fn time(&self) -> DateTime {
        self.wait_ready();
        let regs = self.registers;
        DateTime {
            year: regs.year.get(),
            day_of_week: Weekday::from_ordinal(regs.dow.get()),
            month: regs.mon.get(),
            day: regs.day.get(),
            hour: regs.hour.get(),
            minute: regs.min.get(),
            second: regs.sec.get(),
        }
    }

    pub fn set_time_format(&self, format: TimeFormat) {
        self.format.set(format);
    }

    pub fn time_format(&self) -> TimeFormat {
        self.format.get()
    }

    /// Current time rendered with the configured [`TimeFormat`].
    pub fn time_string(&self) -> Rendered {
        self.time().display(self.format.get())
    }

    pub fn save(&self) -> SavedTime {
        SavedTime::new(&self.time())
    }

    pub fn restore(&self, saved: &SavedTime) -> Result<(), Error> {
        let snapshot = saved.snapshot().ok_or(Error::NoSavedTime)?;
        self.restore_from_buffer(&snapshot);
        Ok(())
    }

    /// Load a packed snapshot while the clock is held.
    pub fn restore_from_buffer(&self, snapshot: &[u8; SNAPSHOT_LEN]) {
        let regs = self.registers;
        regs.ctl1.modify(RTCCTL1::RTCHOLD::SET);
        regs.dow.set(snapshot[2]);
        regs.mon.set(snapshot[3]);
        regs.day.set(snapshot[4]);
        regs.hour.set(snapshot[5]);
        regs.min.set(snapshot[6]);
        regs.sec.set(snapshot[7]);
        regs.year.set(u16::from_le_bytes([snapshot[0], snapshot[1]]));
        regs.ctl1.modify(RTCCTL1::RTCHOLD::CLEAR);
    }

    fn prescale_control(&self, channel: Channel) -> &ReadWrite<u16, RTCPSxCTL::Register> {
        match channel {
            Channel::Channel0 => &self.registers.ps0ctl,
            Channel::Channel1 => &self.registers.ps1ctl,
        }
    }

    /// Call `client` `mask` times per second. `mask` must be a power of two
    /// from 1 to 16384. Returns the prescale timer serving the request.
    pub fn attach_periodic(&self, mask: u16, client: &'a dyn RtcClient) -> Result<Channel, Error> {
        let (channel, interval) = prescale::decode(mask)?;
        if self.registry.channel(channel).is_some() {
            return Err(Error::AlreadyOwned);
        }

        let control = self.prescale_control(channel);
        control.modify(RTCPSxCTL::RTPSIE::CLEAR + RTCPSxCTL::RTPSIFG::CLEAR);
        self.registry.claim_channel(channel, client)?;
        control.write(RTCPSxCTL::RTIP.val(u16::from(interval)) + RTCPSxCTL::RTPSIE::SET);

        debug!(
            "rtc: RTCPS{=usize} attached, interval {=u8}",
            channel.index(),
            interval
        );
        Ok(channel)
    }

    pub fn detach_periodic(&self, client: &dyn RtcClient) -> Result<Channel, Error> {
        let channel = self.registry.find(client).ok_or(Error::NotFound)?;
        self.prescale_control(channel).set(0);
        self.registry.release_channel(channel)?;

        debug!("rtc: RTCPS{=usize} detached", channel.index());
        Ok(channel)
    }

    pub fn periodic_client(&self, channel: Channel) -> Option<&'a dyn RtcClient> {
        self.registry.channel(channel)
    }

    /// `RTIP` interval field of a prescale timer
    pub fn prescale_interval(&self, channel: Channel) -> u8 {
        self.prescale_control(channel).read(RTCPSxCTL::RTIP) as u8
    }

    pub fn periodic_enabled(&self, channel: Channel) -> bool {
        self.prescale_control(channel).is_set(RTCPSxCTL::RTPSIE)
    }

    fn alarm_registers(&self) -> [&ReadWrite<u8, RTCAx::Register>; 4] {
        let regs = self.registers;
        [&regs.amin, &regs.ahour, &regs.adow, &regs.aday]
    }

    fn write_alarm(&self, values: [u8; 4]) {
        for (register, value) in self.alarm_registers().iter().zip(values.iter()) {
            register.set(*value);
        }
    }

    /// Arm the calendar alarm. Out of range match values are clamped; an
    /// alarm without any match field is rejected.
    pub fn attach_alarm(&self, alarm: Alarm, client: &'a dyn RtcClient) -> Result<(), Error> {
        if self.registry.alarm().is_some() {
            return Err(Error::AlreadyOwned);
        }
        if alarm.is_empty() {
            return Err(Error::InvalidParameter);
        }

        let ctl0 = &self.registers.ctl0;
        ctl0.modify(RTCCTL0::RTCAIE::CLEAR + RTCCTL0::RTCAIFG::CLEAR);
        self.write_alarm(alarm.encode());
        self.registry.claim_alarm(client)?;
        ctl0.modify(RTCCTL0::RTCAIFG::CLEAR);
        ctl0.modify(RTCCTL0::RTCAIE::SET);

        debug!("rtc: alarm attached");
        Ok(())
    }

    pub fn detach_alarm(&self) -> Result<(), Error> {
        if self.registry.alarm().is_none() {
            return Err(Error::NotFound);
        }

        self.registers
            .ctl0
            .modify(RTCCTL0::RTCAIE::CLEAR + RTCCTL0::RTCAIFG::CLEAR);
        self.registry.release_alarm()?;
        self.write_alarm([0; 4]);

        debug!("rtc: alarm detached");
        Ok(())
    }

    pub fn alarm_client(&self) -> Option<&'a dyn RtcClient> {
        self.registry.alarm()
    }

    pub fn alarm_enabled(&self) -> bool {
        self.registers.ctl0.is_set(RTCCTL0::RTCAIE)
    }

    /// Match fields currently programmed into the alarm registers.
    pub fn alarm(&self) -> Alarm {
        let [minute, hour, dow, day] = self.alarm_registers();
        Alarm::from_registers([minute.get(), hour.get(), dow.get(), day.get()])
    }

    /// Dump clock state and interrupt configuration.
    pub fn debug<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "-= RTC_B DEBUG =-")?;
        let state = if self.is_running() { "RUNNING" } else { "HALTED" };
        writeln!(out, "RTC state: {}", state)?;

        let now = self.time();
        writeln!(out, "DOW: {}", now.day_of_week.name())?;
        writeln!(out, "Month: {}", month_name(now.month))?;
        writeln!(out, "Day: {}", now.day)?;
        writeln!(out, "Year: {}", now.year)?;
        writeln!(out, "Hour: {}", now.hour)?;
        writeln!(out, "Minute: {}", now.minute)?;
        writeln!(out, "Second: {}", now.second)?;

        for channel in Channel::ALL.iter() {
            let n = channel.index();
            match self.periodic_client(*channel) {
                Some(client) => {
                    let addr = core::ptr::addr_of!(*client).cast::<()>();
                    writeln!(out, "RTCPS{} client: configured; ptr={:p}", n, addr)?
                }
                None => writeln!(out, "RTCPS{} client: unconfigured", n)?,
            }
            writeln!(
                out,
                "RTCPS{} interval setting: {}",
                n,
                self.prescale_interval(*channel)
            )?;
        }

        if !self.alarm_enabled() {
            writeln!(out, "Alarm: disabled")?;
        } else {
            let alarm = self.alarm();
            writeln!(out, "Alarm: enabled")?;
            match alarm.minute {
                Some(minute) => writeln!(out, "(minute: {})", minute)?,
                None => writeln!(out, "(minute: not used)")?,
            }
            match alarm.hour {
                Some(hour) => writeln!(out, "(hour: {})", hour)?,
                None => writeln!(out, "(hour: not used)")?,
            }
            match alarm.day_of_week {
                Some(day) => writeln!(out, "(day of week: {})", day.name())?,
                None => writeln!(out, "(day of week: not used)")?,
            }
            match alarm.day_of_month {
                Some(day) => writeln!(out, "(day: {})", day)?,
                None => writeln!(out, "(day: not used)")?,
            }
        }
        writeln!(out, "--------------------------")
    }
}
