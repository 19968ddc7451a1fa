// Timestamp domain model and local-calendar conversions
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike};
use serde::Serialize;

/// Calendar fields of a sample time, exactly as they appear in the payload.
///
/// The fields are not validated against the calendar. A payload time that
/// cannot be read yields [`Timestamp::ZERO`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Timestamp {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub microsecond: i32,
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp {
        year: 0,
        month: 0,
        day: 0,
        hour: 0,
        minute: 0,
        second: 0,
        microsecond: 0,
    };

    /// Parse `Y-M-D h:m:s.f`, falling back to `Y-M-D h:m:s`.
    ///
    /// Anything else yields the all-zero timestamp rather than an error.
    pub fn parse(text: &str) -> Self {
        if let Some(ts) = Self::scan(text, true) {
            return ts;
        }
        if let Some(ts) = Self::scan(text, false) {
            return ts;
        }
        Self::ZERO
    }

    fn scan(text: &str, with_fraction: bool) -> Option<Self> {
        let mut cursor = FieldCursor::new(text);
        let year = cursor.int()?;
        cursor.literal('-')?;
        let month = cursor.int()?;
        cursor.literal('-')?;
        let day = cursor.int()?;
        cursor.whitespace();
        let hour = cursor.int()?;
        cursor.literal(':')?;
        let minute = cursor.int()?;
        cursor.literal(':')?;
        let second = cursor.int()?;
        let microsecond = if with_fraction {
            cursor.literal('.')?;
            cursor.int()?
        } else {
            0
        };

        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
        })
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Seconds since the Unix epoch, interpreting the fields in the local zone.
    ///
    /// Out-of-range fields carry into the next larger unit, so month 0 is
    /// December of the previous year and day 0 the last day of the previous
    /// month. A local time skipped by a DST transition uses the offset in force
    /// at the matching UTC instant; an ambiguous one resolves to the earliest.
    pub fn to_numeric(&self) -> f64 {
        let seconds = self
            .normalized()
            .map(local_epoch_seconds)
            .unwrap_or_default();
        seconds as f64 + f64::from(self.microsecond) / 1_000_000.0
    }

    /// Inverse of [`Timestamp::to_numeric`] in the local zone.
    pub fn from_numeric(value: f64) -> Self {
        let mut seconds = value.floor() as i64;
        let mut micros = ((value - value.floor()) * 1_000_000.0).round() as i64;
        if micros >= 1_000_000 {
            seconds += 1;
            micros -= 1_000_000;
        }

        match Local.timestamp_opt(seconds, 0).earliest() {
            Some(dt) => Self {
                year: dt.year(),
                month: dt.month() as i32,
                day: dt.day() as i32,
                hour: dt.hour() as i32,
                minute: dt.minute() as i32,
                second: dt.second() as i32,
                microsecond: micros as i32,
            },
            None => Self::ZERO,
        }
    }

    fn normalized(&self) -> Option<NaiveDateTime> {
        let months = i64::from(self.year) * 12 + i64::from(self.month) - 1;
        let year = i32::try_from(months.div_euclid(12)).ok()?;
        let month = months.rem_euclid(12) as u32 + 1;

        let base = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
        let offset = TimeDelta::try_days(i64::from(self.day) - 1)?
            .checked_add(&TimeDelta::try_hours(i64::from(self.hour))?)?
            .checked_add(&TimeDelta::try_minutes(i64::from(self.minute))?)?
            .checked_add(&TimeDelta::try_seconds(i64::from(self.second))?)?;
        base.checked_add_signed(offset)
    }
}

fn local_epoch_seconds(naive: NaiveDateTime) -> i64 {
    match Local.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.timestamp(),
        None => {
            // DST gap
            let utc = naive.and_utc();
            let offset = Local.offset_from_utc_datetime(&naive);
            utc.timestamp() - i64::from(offset.local_minus_utc())
        }
    }
}

/// Reads `%d`-style integers and single literals from a timestamp string.
struct FieldCursor<'a> {
    rest: &'a str,
}

impl<'a> FieldCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn literal(&mut self, expected: char) -> Option<()> {
        self.rest = self.rest.strip_prefix(expected)?;
        Some(())
    }

    fn int(&mut self) -> Option<i32> {
        self.whitespace();
        let bytes = self.rest.as_bytes();
        let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
        let digits = bytes[sign_len..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            return None;
        }

        let (number, rest) = self.rest.split_at(sign_len + digits);
        let value = number.parse::<i32>().ok()?;
        self.rest = rest;
        Some(value)
    }
}
