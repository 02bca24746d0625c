use crate::alarm::Weekday;

/// Length of the packed calendar snapshot
pub const SNAPSHOT_LEN: usize = 8;

/// Trailing byte marking a valid [`SavedTime`]
pub const SAVED_TIME_MAGIC: u8 = 0xA8;

const MONTHS: [&str; 13] = [
    "INVALID",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_SHORT: [&str; 13] = [
    "INV", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month name, `INVALID` outside 1..=12
pub fn month_name(month: u8) -> &'static str {
    MONTHS.get(usize::from(month)).copied().unwrap_or(MONTHS[0])
}

pub fn month_short_name(month: u8) -> &'static str {
    MONTHS_SHORT
        .get(usize::from(month))
        .copied()
        .unwrap_or(MONTHS_SHORT[0])
}

/// Calendar time as held by the RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub day_of_week: Weekday,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    /// Pack as `{year low, year high, day of week, month, day, hour, minute, second}`.
    pub fn to_bytes(&self) -> [u8; SNAPSHOT_LEN] {
        let [year_low, year_high] = self.year.to_le_bytes();
        [
            year_low,
            year_high,
            u8::from(self.day_of_week),
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        ]
    }

    pub fn from_bytes(bytes: &[u8; SNAPSHOT_LEN]) -> Self {
        Self {
            year: u16::from_le_bytes([bytes[0], bytes[1]]),
            day_of_week: Weekday::from_ordinal(bytes[2]),
            month: bytes[3],
            day: bytes[4],
            hour: bytes[5],
            minute: bytes[6],
            second: bytes[7],
        }
    }
}

/// Calendar snapshot followed by a magic cookie, laid out for a
/// non-volatile segment that survives power loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedTime([u8; SNAPSHOT_LEN + 1]);

impl SavedTime {
    /// A segment that has never been written
    pub const fn empty() -> Self {
        Self([0; SNAPSHOT_LEN + 1])
    }

    pub fn new(time: &DateTime) -> Self {
        let mut bytes = [0; SNAPSHOT_LEN + 1];
        bytes[..SNAPSHOT_LEN].copy_from_slice(&time.to_bytes());
        bytes[SNAPSHOT_LEN] = SAVED_TIME_MAGIC;
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; SNAPSHOT_LEN + 1]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SNAPSHOT_LEN + 1] {
        &self.0
    }

    /// The packed snapshot, if the cookie is present.
    pub fn snapshot(&self) -> Option<[u8; SNAPSHOT_LEN]> {
        if self.0[SNAPSHOT_LEN] != SAVED_TIME_MAGIC {
            return None;
        }
        let mut snapshot = [0; SNAPSHOT_LEN];
        snapshot.copy_from_slice(&self.0[..SNAPSHOT_LEN]);
        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_layout() {
        let now = DateTime {
            year: 2015,
            day_of_week: Weekday::Friday,
            month: 3,
            day: 13,
            hour: 21,
            minute: 4,
            second: 58,
        };
        let bytes = now.to_bytes();
        assert_eq!(bytes, [0xDF, 0x07, 4, 3, 13, 21, 4, 58]);
        assert_eq!(DateTime::from_bytes(&bytes), now);
    }

    #[test]
    fn saved_time_needs_cookie() {
        assert_eq!(SavedTime::empty().snapshot(), None);
        let mut bytes = [1, 2, 3, 4, 5, 6, 7, 8, 0];
        assert_eq!(SavedTime::from_bytes(bytes).snapshot(), None);
        bytes[8] = SAVED_TIME_MAGIC;
        assert_eq!(
            SavedTime::from_bytes(bytes).snapshot(),
            Some([1, 2, 3, 4, 5, 6, 7, 8])
        );
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_short_name(12), "Dec");
        assert_eq!(month_name(0), "INVALID");
        assert_eq!(month_short_name(13), "INV");
    }
}
