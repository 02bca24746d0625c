//! Human readable rendering of a [`DateTime`].

use crate::datetime::{month_name, month_short_name, DateTime};
use bitflags::bitflags;
use core::fmt;

bitflags! {
    /// Rendering options. The empty set renders
    /// `Monday January 5 2015 1:07 PM`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TimeFormat: u16 {
        /// 24 hour clock, no AM/PM suffix
        const USE_24HR = 0x0001;
        /// Three letter day and month names
        const SHORT_WORDS = 0x0002;
        /// Day before month (European style)
        const DAY_BEFORE_MONTH = 0x0004;
        /// Numeric M/D/YYYY date
        const SHORT_DATE = 0x0008;
        /// Append seconds to the time
        const INCLUDE_SECONDS = 0x0010;
    }
}

/// `Display` adapter returned by [`DateTime::display`].
pub struct Rendered {
    time: DateTime,
    format: TimeFormat,
}

impl DateTime {
    pub fn display(&self, format: TimeFormat) -> Rendered {
        Rendered {
            time: *self,
            format,
        }
    }
}

impl Rendered {
    fn write_date(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.time;
        let day_first = self.format.contains(TimeFormat::DAY_BEFORE_MONTH);

        if self.format.contains(TimeFormat::SHORT_DATE) {
            return if day_first {
                write!(f, "{}/{}/{} ", t.day, t.month, t.year)
            } else {
                write!(f, "{}/{}/{} ", t.month, t.day, t.year)
            };
        }

        let (weekday, month) = if self.format.contains(TimeFormat::SHORT_WORDS) {
            (t.day_of_week.short_name(), month_short_name(t.month))
        } else {
            (t.day_of_week.name(), month_name(t.month))
        };
        if day_first {
            write!(f, "{} {} {} {} ", weekday, t.day, month, t.year)
        } else {
            write!(f, "{} {} {} {} ", weekday, month, t.day, t.year)
        }
    }

    fn write_time(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.time;
        let use_24hr = self.format.contains(TimeFormat::USE_24HR);

        let hour = match t.hour {
            h if use_24hr => h,
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        write!(f, "{}:{:02}", hour, t.minute)?;
        if self.format.contains(TimeFormat::INCLUDE_SECONDS) {
            write!(f, ":{:02}", t.second)?;
        }
        if !use_24hr {
            f.write_str(if t.hour >= 12 { " PM" } else { " AM" })?;
        }
        Ok(())
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_date(f)?;
        self.write_time(f)
    }
}
