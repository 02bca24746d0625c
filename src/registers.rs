//! RTC_B register block
//!
//! Byte-wide control, calendar and alarm registers; word-wide prescaler
//! control, prescaler counters, interrupt vector and year.

use tock_registers::registers::ReadWrite;
use tock_registers::{register_bitfields, register_structs};

register_structs! {
    /// RTC_B
    pub RtcRegisters {
        /// Real-Time Clock Control 0
        (0x00 => pub(crate) ctl0: ReadWrite<u8, RTCCTL0::Register>),
        /// Real-Time Clock Control 1
        (0x01 => pub(crate) ctl1: ReadWrite<u8, RTCCTL1::Register>),
        /// Real-Time Clock Control 2 (calibration)
        (0x02 => pub(crate) ctl2: ReadWrite<u8>),
        /// Real-Time Clock Control 3 (calibration frequency)
        (0x03 => pub(crate) ctl3: ReadWrite<u8>),
        (0x04 => _reserved0),
        /// Real-Time Prescale Timer 0 Control
        (0x08 => pub(crate) ps0ctl: ReadWrite<u16, RTCPSxCTL::Register>),
        /// Real-Time Prescale Timer 1 Control
        (0x0A => pub(crate) ps1ctl: ReadWrite<u16, RTCPSxCTL::Register>),
        /// Real-Time Prescale Timer Counters (RT0PS low byte, RT1PS high byte)
        (0x0C => pub(crate) ps: ReadWrite<u16>),
        /// Real-Time Clock Interrupt Vector. Reading returns the highest
        /// pending source and clears its flag.
        (0x0E => pub(crate) iv: ReadWrite<u16>),
        /// Seconds
        (0x10 => pub(crate) sec: ReadWrite<u8>),
        /// Minutes
        (0x11 => pub(crate) min: ReadWrite<u8>),
        /// Hours
        (0x12 => pub(crate) hour: ReadWrite<u8>),
        /// Day of Week
        (0x13 => pub(crate) dow: ReadWrite<u8>),
        /// Day of Month
        (0x14 => pub(crate) day: ReadWrite<u8>),
        /// Month
        (0x15 => pub(crate) mon: ReadWrite<u8>),
        /// Year
        (0x16 => pub(crate) year: ReadWrite<u16>),
        /// Minute Alarm
        (0x18 => pub(crate) amin: ReadWrite<u8, RTCAx::Register>),
        /// Hour Alarm
        (0x19 => pub(crate) ahour: ReadWrite<u8, RTCAx::Register>),
        /// Day of Week Alarm
        (0x1A => pub(crate) adow: ReadWrite<u8, RTCAx::Register>),
        /// Day of Month Alarm
        (0x1B => pub(crate) aday: ReadWrite<u8, RTCAx::Register>),
        // BIN2BCD and BCD2BIN conversion registers
        (0x1C => _reserved1),
        (0x20 => @END),
    }
}

register_bitfields! [u8,
    /// Real-Time Clock Control 0
    pub(crate) RTCCTL0 [
        /// Real-time clock ready interrupt flag
        RTCRDYIFG OFFSET(0) NUMBITS(1) [],
        /// Real-time clock alarm interrupt flag
        RTCAIFG OFFSET(1) NUMBITS(1) [],
        /// Real-time clock time event interrupt flag
        RTCTEVIFG OFFSET(2) NUMBITS(1) [],
        /// 32 kHz crystal oscillator fault interrupt flag
        RTCOFIFG OFFSET(3) NUMBITS(1) [],
        /// Real-time clock ready interrupt enable
        RTCRDYIE OFFSET(4) NUMBITS(1) [],
        /// Real-time clock alarm interrupt enable
        RTCAIE OFFSET(5) NUMBITS(1) [],
        /// Real-time clock time event interrupt enable
        RTCTEVIE OFFSET(6) NUMBITS(1) [],
        /// 32 kHz crystal oscillator fault interrupt enable
        RTCOFIE OFFSET(7) NUMBITS(1) []
    ],
    /// Real-Time Clock Control 1
    pub(crate) RTCCTL1 [
        /// Real-time clock time event
        RTCTEV OFFSET(0) NUMBITS(2) [
            /// Minute changed
            Minute = 0,
            /// Hour changed
            Hour = 1,
            /// Every day at midnight
            Midnight = 2,
            /// Every day at noon
            Noon = 3
        ],
        /// Real-time clock ready. Calendar registers are safe to read.
        RTCRDY OFFSET(4) NUMBITS(1) [],
        /// Real-time clock hold
        RTCHOLD OFFSET(6) NUMBITS(1) [],
        /// Real-time clock BCD select
        RTCBCD OFFSET(7) NUMBITS(1) []
    ],
    /// Alarm registers: match enable and value
    pub(crate) RTCAx [
        /// Alarm value
        VALUE OFFSET(0) NUMBITS(7) [],
        /// Alarm enable
        AE OFFSET(7) NUMBITS(1) []
    ]
];

register_bitfields! [u16,
    /// Real-Time Prescale Timer x Control
    pub(crate) RTCPSxCTL [
        /// Prescale timer interrupt flag
        RTPSIFG OFFSET(0) NUMBITS(1) [],
        /// Prescale timer interrupt enable
        RTPSIE OFFSET(1) NUMBITS(1) [],
        /// Prescale timer interrupt interval, divide by 2^(RTIP + 1)
        RTIP OFFSET(2) NUMBITS(3) [
            Div2 = 0,
            Div4 = 1,
            Div8 = 2,
            Div16 = 3,
            Div32 = 4,
            Div64 = 5,
            Div128 = 6,
            Div256 = 7
        ]
    ]
];

/// `RTCIV` value for the alarm flag
pub(crate) const RTCIV_RTCAIFG: u16 = 0x06;
/// `RTCIV` value for the prescaler 0 flag
pub(crate) const RTCIV_RT0PSIFG: u16 = 0x08;
/// `RTCIV` value for the prescaler 1 flag
pub(crate) const RTCIV_RT1PSIFG: u16 = 0x0A;

/// RTC_B block on MSP430FR58xx/59xx parts
pub const RTC_B_BASE: usize = 0x04A0;

impl RtcRegisters {
    /// Borrow the register block mapped at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the address of an RTC_B compatible block, and no other
    /// driver instance may use it.
    pub unsafe fn at(base: usize) -> &'static RtcRegisters {
        &*(base as *const RtcRegisters)
    }
}

/// Host memory stand-in for the register block.
#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use tock_registers::interfaces::{ReadWriteable, Writeable};

    pub(crate) fn registers() -> RtcRegisters {
        // SAFETY: every register is plain integer storage
        unsafe { core::mem::zeroed() }
    }

    /// Pretend the calendar registers have latched.
    pub(crate) fn set_ready(regs: &RtcRegisters) {
        regs.ctl1.modify(RTCCTL1::RTCRDY::SET);
    }

    /// Pretend the hardware raised `vector` in `RTCIV`.
    pub(crate) fn raise(regs: &RtcRegisters, vector: u16) {
        regs.iv.set(vector);
    }
}
