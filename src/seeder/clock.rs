use chrono::{DateTime, Duration, FixedOffset, Local, NaiveTime, TimeZone, Utc};
use serde::Deserialize;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Source of the reference instant every relative offset is computed against.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Millisecond-precision duration from fractional seconds, `None` when it cannot be represented.
pub fn seconds(secs: f64) -> Option<Duration> {
    let millis = (secs * 1000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(millis as i64)
}

/// `now` shifted `days_prior` whole or fractional days into the past.
pub fn days_before(now: DateTime<Utc>, days_prior: f64) -> Option<DateTime<Utc>> {
    now.checked_sub_signed(seconds(days_prior * SECONDS_PER_DAY)?)
}

/// Time zone whose calendar defines "start of day".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum CalendarZone {
    Utc,
    Local,
    Fixed(FixedOffset),
}

impl CalendarZone {
    pub fn start_of_day(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            CalendarZone::Utc => start_of_day_in(&Utc, instant),
            CalendarZone::Local => start_of_day_in(&Local, instant),
            CalendarZone::Fixed(offset) => start_of_day_in(offset, instant),
        }
    }
}

impl Default for CalendarZone {
    fn default() -> Self {
        CalendarZone::Local
    }
}

fn start_of_day_in<Tz: TimeZone>(tz: &Tz, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let local = instant.with_timezone(tz).naive_local();
    let midnight = local.date().and_time(NaiveTime::MIN);
    // Midnight may not exist on a DST transition day; fall back to the elapsed local time.
    match tz.from_local_datetime(&midnight).earliest() {
        Some(start) => Some(start.with_timezone(&Utc)),
        None => instant.checked_sub_signed(local - midnight),
    }
}

impl TryFrom<String> for CalendarZone {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "utc" | "z" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            other => parse_offset(other).map(Self::Fixed).ok_or_else(|| {
                format!(
                    "{} is not a supported calendar zone. \
                    Use `utc`, `local` or an offset such as `+02:00`.",
                    other
                )
            }),
        }
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None if rest.len() == 4 => (rest[..2].parse::<i32>().ok()?, rest[2..].parse::<i32>().ok()?),
        None => (rest.parse::<i32>().ok()?, 0),
    };
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
