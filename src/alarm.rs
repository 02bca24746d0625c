use core::convert::From;

/// Alarm registers carry the match enable in bit 7
const ALARM_ENABLE: u8 = 0x80;
const ALARM_VALUE: u8 = 0x7F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Ordinals past Sunday are clamped to Sunday.
    pub fn from_ordinal(ordinal: u8) -> Self {
        use Weekday::*;
        match ordinal {
            0 => Monday,
            1 => Tuesday,
            2 => Wednesday,
            3 => Thursday,
            4 => Friday,
            5 => Saturday,
            _ => Sunday,
        }
    }

    pub fn name(self) -> &'static str {
        use Weekday::*;
        match self {
            Monday => "Monday",
            Tuesday => "Tuesday",
            Wednesday => "Wednesday",
            Thursday => "Thursday",
            Friday => "Friday",
            Saturday => "Saturday",
            Sunday => "Sunday",
        }
    }

    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl From<Weekday> for u8 {
    fn from(value: Weekday) -> u8 {
        value as u8
    }
}

/// The four match fields of the calendar alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmField {
    Minute,
    Hour,
    DayOfWeek,
    DayOfMonth,
}

impl AlarmField {
    /// Inclusive range of match values
    pub fn range(self) -> (u8, u8) {
        use AlarmField::*;
        match self {
            Minute => (0, 59),
            Hour => (0, 23),
            DayOfWeek => (0, 6),
            DayOfMonth => (1, 31),
        }
    }

    /// Pack an optional match value into its register form. Values outside
    /// the field's range are clamped, `None` leaves the field unused.
    pub fn encode(self, value: Option<u8>) -> u8 {
        match value {
            Some(value) => {
                let (low, high) = self.range();
                ALARM_ENABLE | value.max(low).min(high)
            }
            None => 0,
        }
    }

    pub fn decode(self, register: u8) -> Option<u8> {
        if register & ALARM_ENABLE == ALARM_ENABLE {
            Some(register & ALARM_VALUE)
        } else {
            None
        }
    }
}

/// Calendar alarm match set. Fields left as `None` are don't-care.
///
/// ```
/// use rtc_b::{Alarm, Weekday};
///
/// // every Monday at 07:30
/// let alarm = Alarm::new().day_of_week(Weekday::Monday).hour(7).minute(30);
/// assert!(!alarm.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alarm {
    pub minute: Option<u8>,
    pub hour: Option<u8>,
    pub day_of_week: Option<Weekday>,
    pub day_of_month: Option<u8>,
}

impl Alarm {
    pub const fn new() -> Self {
        Self {
            minute: None,
            hour: None,
            day_of_week: None,
            day_of_month: None,
        }
    }

    #[must_use]
    pub fn minute(mut self, minute: u8) -> Self {
        self.minute = Some(minute);
        self
    }

    #[must_use]
    pub fn hour(mut self, hour: u8) -> Self {
        self.hour = Some(hour);
        self
    }

    #[must_use]
    pub fn day_of_week(mut self, day: Weekday) -> Self {
        self.day_of_week = Some(day);
        self
    }

    #[must_use]
    pub fn day_of_month(mut self, day: u8) -> Self {
        self.day_of_month = Some(day);
        self
    }

    /// An alarm without any match field never fires.
    pub fn is_empty(&self) -> bool {
        self.minute.is_none()
            && self.hour.is_none()
            && self.day_of_week.is_none()
            && self.day_of_month.is_none()
    }

    /// Register values for RTCAMIN, RTCAHOUR, RTCADOW and RTCADAY.
    pub fn encode(&self) -> [u8; 4] {
        [
            AlarmField::Minute.encode(self.minute),
            AlarmField::Hour.encode(self.hour),
            AlarmField::DayOfWeek.encode(self.day_of_week.map(u8::from)),
            AlarmField::DayOfMonth.encode(self.day_of_month),
        ]
    }

    pub fn from_registers(registers: [u8; 4]) -> Self {
        let [minute, hour, dow, day] = registers;
        Self {
            minute: AlarmField::Minute.decode(minute),
            hour: AlarmField::Hour.decode(hour),
            day_of_week: AlarmField::DayOfWeek
                .decode(dow)
                .map(Weekday::from_ordinal),
            day_of_month: AlarmField::DayOfMonth.decode(day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(AlarmField::Hour.encode(Some(25)), 0x80 | 23);
        assert_eq!(AlarmField::Minute.encode(Some(70)), 0x80 | 59);
        assert_eq!(AlarmField::DayOfMonth.encode(Some(40)), 0x80 | 31);
        assert_eq!(AlarmField::DayOfMonth.encode(Some(0)), 0x80 | 1);
        assert_eq!(AlarmField::DayOfWeek.encode(Some(9)), 0x80 | 6);
    }

    #[test]
    fn unused_fields_are_cleared() {
        for field in [
            AlarmField::Minute,
            AlarmField::Hour,
            AlarmField::DayOfWeek,
            AlarmField::DayOfMonth,
        ]
        .iter()
        {
            assert_eq!(field.encode(None), 0);
            assert_eq!(field.decode(0), None);
        }
    }

    #[test]
    fn decode_uses_enable_bit() {
        assert_eq!(AlarmField::Hour.decode(0x80), Some(0));
        assert_eq!(AlarmField::Hour.decode(0x97), Some(23));
        assert_eq!(AlarmField::Hour.decode(0x17), None);
    }

    #[test]
    fn weekday_ordinals_clamp_to_sunday() {
        assert_eq!(Weekday::from_ordinal(0), Weekday::Monday);
        assert_eq!(Weekday::from_ordinal(6), Weekday::Sunday);
        assert_eq!(Weekday::from_ordinal(200), Weekday::Sunday);
        assert_eq!(u8::from(Weekday::Thursday), 3);
        assert_eq!(Weekday::Wednesday.short_name(), "Wed");
    }

    #[test]
    fn hour_and_minute_alarm() {
        let alarm = Alarm::new().hour(25).minute(70);
        assert!(!alarm.is_empty());
        assert_eq!(alarm.encode(), [0x80 | 59, 0x80 | 23, 0, 0]);
        assert_eq!(
            Alarm::from_registers(alarm.encode()),
            Alarm::new().hour(23).minute(59)
        );
    }

    #[test]
    fn empty_alarm() {
        assert!(Alarm::new().is_empty());
        assert!(Alarm::default().is_empty());
        assert_eq!(Alarm::new().encode(), [0; 4]);
    }
}
