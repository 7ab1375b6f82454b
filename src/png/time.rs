use super::*;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// `tIME`: Image last-modification time.
///
/// Last image modification time, UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(nonstandard_style)]
pub struct tIME {
  /// 4-digit year.
  pub year: u16,
  /// 1-12
  pub month: u8,
  /// 1-31
  pub day: u8,
  /// 0-23
  pub hour: u8,
  /// 0-59
  pub minute: u8,
  /// 0-60 (use 60 for leap seconds)
  pub second: u8,
}
impl TryFrom<&[u8]> for tIME {
  type Error = PngError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    match *data {
      [y0, y1, month, day, hour, minute, second] => {
        Ok(tIME { year: u16_be([y0, y1]), month, day, hour, minute, second })
      }
      _ => Err(PngError::Format("tIME must be 7 bytes")),
    }
  }
}
impl tIME {
  /// The 7-byte chunk payload for this time.
  #[inline]
  #[must_use]
  pub const fn to_bytes(&self) -> [u8; 7] {
    let [y0, y1] = self.year.to_be_bytes();
    [y0, y1, self.month, self.day, self.hour, self.minute, self.second]
  }

  /// Converts to a point in time.
  ///
  /// Gives `None` when any field is outside its calendar range. A leap
  /// second (60) lands on the first second of the next minute.
  #[must_use]
  pub fn to_system_time(&self) -> Option<SystemTime> {
    if !(1..=12).contains(&self.month)
      || !(1..=days_in_month(self.year, self.month)).contains(&self.day)
      || self.hour > 23
      || self.minute > 59
      || self.second > 60
    {
      return None;
    }
    let days = days_from_civil(self.year as i64, self.month as i64, self.day as i64);
    let seconds = days * SECONDS_PER_DAY
      + (self.hour as i64) * 3600
      + (self.minute as i64) * 60
      + (self.second as i64);
    if seconds >= 0 {
      UNIX_EPOCH.checked_add(Duration::from_secs(seconds as u64))
    } else {
      UNIX_EPOCH.checked_sub(Duration::from_secs(seconds.unsigned_abs()))
    }
  }

  /// Converts from a point in time, dropping any fraction of a second.
  ///
  /// Gives `None` when the year doesn't fit in a `u16`.
  #[must_use]
  pub fn from_system_time(time: SystemTime) -> Option<Self> {
    let seconds: i64 = match time.duration_since(UNIX_EPOCH) {
      Ok(after) => i64::try_from(after.as_secs()).ok()?,
      Err(before) => {
        let d = before.duration();
        // round toward the past so that a fractional second doesn't bump
        // the time forward
        let whole = i64::try_from(d.as_secs()).ok()?;
        -whole.checked_add(i64::from(d.subsec_nanos() > 0))?
      }
    };
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    let in_day = seconds.rem_euclid(SECONDS_PER_DAY);
    let (year, month, day) = civil_from_days(days);
    Some(tIME {
      year: u16::try_from(year).ok()?,
      month: month as u8,
      day: day as u8,
      hour: (in_day / 3600) as u8,
      minute: ((in_day % 3600) / 60) as u8,
      second: (in_day % 60) as u8,
    })
  }
}

const fn is_leap_year(year: u16) -> bool {
  (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const fn days_in_month(year: u16, month: u8) -> u8 {
  match month {
    1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
    4 | 6 | 9 | 11 => 30,
    2 if is_leap_year(year) => 29,
    2 => 28,
    _ => 0,
  }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
const fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
  let y = if month <= 2 { year - 1 } else { year };
  let era = (if y >= 0 { y } else { y - 399 }) / 400;
  let yoe = y - era * 400;
  let mp = if month > 2 { month - 3 } else { month + 9 };
  let doy = (153 * mp + 2) / 5 + day - 1;
  let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
  era * 146_097 + doe - 719_468
}

/// The inverse of [`days_from_civil`], giving `(year, month, day)`.
const fn civil_from_days(days: i64) -> (i64, i64, i64) {
  let z = days + 719_468;
  let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
  let doe = z - era * 146_097;
  let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
  let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
  let mp = (5 * doy + 2) / 153;
  let day = doy - (153 * mp + 2) / 5 + 1;
  let month = if mp < 10 { mp + 3 } else { mp - 9 };
  let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
  (year, month, day)
}
