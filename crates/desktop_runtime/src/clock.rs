//! Wall-clock math for the clock and calendar widgets.
//!
//! Timezones are `local`, `UTC`, or a fixed offset written `UTC+hh:mm` / `UTC-hh:mm`. Anything
//! else falls back to local time.

const MS_PER_MINUTE: i64 = 60_000;
const MINUTES_PER_DAY: i64 = 24 * 60;

const WEEKDAYS: [&str; 7] = [
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
];
const MONTHS: [&str; 12] = [
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockZone {
    Local,
    /// Fixed offset east of UTC, in minutes.
    Fixed(i32),
}

impl ClockZone {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("utc") || raw.eq_ignore_ascii_case("gmt") {
            return Self::Fixed(0);
        }
        let Some(offset) = raw.strip_prefix("UTC").or_else(|| raw.strip_prefix("utc")) else {
            return Self::Local;
        };
        parse_offset(offset).map(Self::Fixed).unwrap_or(Self::Local)
    }

    /// Offset to apply given the browser's local offset (minutes east of UTC).
    pub fn offset_minutes(self, local_offset_minutes: i32) -> i32 {
        match self {
            Self::Local => local_offset_minutes,
            Self::Fixed(offset) => offset,
        }
    }
}

fn parse_offset(raw: &str) -> Option<i32> {
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

/// The browser's current offset from UTC in minutes east; `0` off-browser.
pub fn local_offset_minutes() -> i32 {
    #[cfg(target_arch = "wasm32")]
    {
        -(js_sys::Date::new_0().get_timezone_offset() as i32)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        0
    }
}

/// Broken-down wall time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub weekday: usize,
    pub hour: u32,
    pub minute: u32,
}

impl WallTime {
    pub fn at(unix_ms: i64, offset_minutes: i32) -> Self {
        let minutes = unix_ms.div_euclid(MS_PER_MINUTE) + i64::from(offset_minutes);
        let days = minutes.div_euclid(MINUTES_PER_DAY);
        let minute_of_day = minutes.rem_euclid(MINUTES_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        Self {
            year,
            month,
            day,
            weekday: days.rem_euclid(7) as usize,
            hour: (minute_of_day / 60) as u32,
            minute: (minute_of_day % 60) as u32,
        }
    }

    pub fn time_label(&self, use_24_hour: bool) -> String {
        if use_24_hour {
            return format!("{:02}:{:02}", self.hour, self.minute);
        }
        let suffix = if self.hour < 12 { "AM" } else { "PM" };
        let hour = match self.hour % 12 {
            0 => 12,
            hour => hour,
        };
        format!("{hour}:{:02} {suffix}", self.minute)
    }

    pub fn weekday_name(&self) -> &'static str {
        WEEKDAYS[self.weekday % 7]
    }

    pub fn month_name(&self) -> &'static str {
        MONTHS[(self.month.clamp(1, 12) - 1) as usize]
    }

    pub fn date_label(&self) -> String {
        format!("{} {} {}", self.month_name(), self.day, self.year)
    }
}

/// Days since 1970-01-01 to `(year, month, day)` in the proleptic Gregorian calendar.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // 2024-02-29 13:05 UTC, a Thursday.
    const LEAP_DAY_LUNCH: i64 = 1_709_211_900_000;

    #[test]
    fn timezone_tokens_parse_or_fall_back_to_local() {
        assert_eq!(ClockZone::parse("local"), ClockZone::Local);
        assert_eq!(ClockZone::parse("UTC"), ClockZone::Fixed(0));
        assert_eq!(ClockZone::parse("UTC+05:30"), ClockZone::Fixed(330));
        assert_eq!(ClockZone::parse("UTC-8"), ClockZone::Fixed(-480));
        assert_eq!(ClockZone::parse("UTC+25:00"), ClockZone::Local);
        assert_eq!(ClockZone::parse("Mars/Olympus"), ClockZone::Local);
        assert_eq!(ClockZone::Local.offset_minutes(60), 60);
        assert_eq!(ClockZone::Fixed(0).offset_minutes(60), 0);
    }

    #[test]
    fn wall_time_breaks_down_dates() {
        let utc = WallTime::at(LEAP_DAY_LUNCH, 0);
        assert_eq!((utc.year, utc.month, utc.day), (2024, 2, 29));
        assert_eq!((utc.hour, utc.minute), (13, 5));
        assert_eq!(utc.weekday_name(), "Thursday");
        assert_eq!(utc.date_label(), "February 29 2024");

        let tokyo = WallTime::at(LEAP_DAY_LUNCH, 12 * 60);
        assert_eq!((tokyo.month, tokyo.day, tokyo.hour), (3, 1, 1));
        assert_eq!(tokyo.weekday_name(), "Friday");

        let epoch_minus = WallTime::at(-1, 0);
        assert_eq!((epoch_minus.year, epoch_minus.month, epoch_minus.day), (1969, 12, 31));
    }

    #[test]
    fn labels_follow_hour_format() {
        let utc = WallTime::at(LEAP_DAY_LUNCH, 0);
        assert_eq!(utc.time_label(true), "13:05");
        assert_eq!(utc.time_label(false), "1:05 PM");
        let midnight = WallTime::at(0, 0);
        assert_eq!(midnight.time_label(false), "12:00 AM");
        assert_eq!(midnight.time_label(true), "00:00");
    }
}
