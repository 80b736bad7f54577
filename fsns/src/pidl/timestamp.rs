//! Packed date/time stamps carried by file segments.

use std::fmt;
use std::time::SystemTime;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

const EPOCH_YEAR: i32 = 1980;
const LAST_YEAR: i32 = EPOCH_YEAR + 127;

/// A modification stamp in packed date/time form.
///
/// The date word holds `(year - 1980) << 9 | month << 5 | day` and the time
/// word holds `hour << 11 | minute << 5 | second / 2`, so a stamp has two
/// second resolution. Ordering compares the date word, then the time word.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fsns::pidl::DosDateTime;
///
/// let when = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .unwrap()
///     .and_hms_opt(14, 30, 7)
///     .unwrap();
/// let stamp = DosDateTime::from_naive(when);
/// assert_eq!(stamp.to_string(), "2024-03-09 14:30");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DosDateTime {
    date: u16,
    time: u16,
}

impl DosDateTime {
    /// Build a stamp from its raw words.
    #[must_use]
    pub const fn from_raw(date: u16, time: u16) -> Self {
        Self { date, time }
    }

    /// The packed date word.
    #[must_use]
    pub const fn date(self) -> u16 {
        self.date
    }

    /// The packed time word.
    #[must_use]
    pub const fn time(self) -> u16 {
        self.time
    }

    /// Pack a calendar time. Times outside 1980..=2107 clamp to the range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_naive(value: NaiveDateTime) -> Self {
        if value.year() < EPOCH_YEAR {
            return Self::from_raw(1 << 5 | 1, 0);
        }
        if value.year() > LAST_YEAR {
            return Self::from_raw(127 << 9 | 12 << 5 | 31, 23 << 11 | 59 << 5 | 29);
        }

        let date = ((value.year() - EPOCH_YEAR) as u16) << 9
            | (value.month() as u16) << 5
            | value.day() as u16;
        let time = (value.hour() as u16) << 11 | (value.minute() as u16) << 5 | (value.second() / 2) as u16;
        Self { date, time }
    }

    /// Pack a filesystem timestamp in local time.
    #[must_use]
    pub fn from_system_time(value: SystemTime) -> Self {
        Self::from_naive(DateTime::<Local>::from(value).naive_local())
    }

    /// Unpack into a calendar time. Returns `None` for the zero stamp or any
    /// out-of-range field.
    #[must_use]
    pub fn to_naive(self) -> Option<NaiveDateTime> {
        let year = EPOCH_YEAR + i32::from(self.date >> 9);
        let month = u32::from((self.date >> 5) & 0x0F);
        let day = u32::from(self.date & 0x1F);
        let hour = u32::from(self.time >> 11);
        let minute = u32::from((self.time >> 5) & 0x3F);
        let second = u32::from(self.time & 0x1F) * 2;

        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
    }
}

impl fmt::Display for DosDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_naive() {
            Some(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M")),
            None => Ok(()),
        }
    }
}
