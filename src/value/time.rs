//! `HH:MM` time-of-day values.

use std::fmt;
use std::str::FromStr;

use crate::error::PickerError;

// ---------------------------------------------------------------------------
// TimeOfDay
// ---------------------------------------------------------------------------

/// A wall-clock time with minute precision.
///
/// Always holds `hour < 24` and `minute < 60`. Whether the minute lies on the
/// picker's step grid is a property of the minute column, not of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// `07:00`, used for the parts of an inbound value that are missing.
    pub const DEFAULT: TimeOfDay = TimeOfDay { hour: 7, minute: 0 };

    /// Create a time, or `None` when either part is out of range.
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub const fn hour(self) -> u8 {
        self.hour
    }

    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Parse leniently: every numeric, in-range part present in `input`
    /// replaces the matching part of `default`; anything else keeps the
    /// default.
    ///
    /// ```
    /// use shift_picker::TimeOfDay;
    /// let t = TimeOfDay::parse_lenient("09", TimeOfDay::DEFAULT);
    /// assert_eq!(t.to_string(), "09:00");
    /// ```
    pub fn parse_lenient(input: &str, default: TimeOfDay) -> TimeOfDay {
        let (hour, minute) = parse_time_parts(input);
        TimeOfDay {
            hour: hour.filter(|h| *h < 24).unwrap_or(default.hour),
            minute: minute.filter(|m| *m < 60).unwrap_or(default.minute),
        }
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = PickerError;

    /// Strict `HH:MM`: two digits, a colon, two digits, both parts in range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| PickerError::InvalidTime {
            input: s.to_owned(),
            message: message.to_owned(),
        };

        let (h, m) = s.split_once(':').ok_or_else(|| invalid("expected HH:MM"))?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid("expected two-digit hour and minute"));
        }
        let hour: u8 = h.parse().map_err(|_| invalid("hour is not a number"))?;
        let minute: u8 = m.parse().map_err(|_| invalid("minute is not a number"))?;
        TimeOfDay::new(hour, minute).ok_or_else(|| invalid("hour or minute out of range"))
    }
}

/// Split an inbound `HH:MM` string into whichever numeric parts it carries.
///
/// Parts are returned even when out of range (`"25:07"` gives
/// `(Some(25), Some(7))`) so the picker columns can apply their own domain
/// fallback. Non-numeric or missing parts are `None`.
pub fn parse_time_parts(input: &str) -> (Option<u8>, Option<u8>) {
    let input = input.trim();
    let (h, m) = match input.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None => (input, None),
    };
    let number = |part: &str| {
        let part = part.trim();
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            None
        } else {
            part.parse::<u8>().ok()
        }
    };
    (number(h), m.and_then(number))
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(TimeOfDay::new(7, 5).unwrap().to_string(), "07:05");
        assert_eq!(TimeOfDay::new(23, 55).unwrap().to_string(), "23:55");
        assert_eq!(TimeOfDay::DEFAULT.to_string(), "07:00");
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(TimeOfDay::new(24, 0).is_none());
        assert!(TimeOfDay::new(0, 60).is_none());
        assert!(TimeOfDay::new(0, 0).is_some());
    }

    #[test]
    fn serialize_then_parse_is_identity_on_the_picker_grid() {
        for hour in 0..24 {
            for minute in (0..60).step_by(5) {
                let t = TimeOfDay::new(hour, minute).unwrap();
                let parsed: TimeOfDay = t.to_string().parse().unwrap();
                assert_eq!(parsed, t);
                assert_eq!(TimeOfDay::parse_lenient(&t.to_string(), TimeOfDay::DEFAULT), t);
            }
        }
    }

    #[test]
    fn strict_parse_rejects_malformed() {
        for bad in ["", "7:00", "07-00", "07:0", "ab:cd", "24:00", "12:60", "07:00:00"] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn strict_parse_error_carries_input() {
        let err = "7pm".parse::<TimeOfDay>().unwrap_err();
        assert!(matches!(err, PickerError::InvalidTime { ref input, .. } if input == "7pm"));
    }

    #[test]
    fn lenient_parse_keeps_defaults_for_missing_parts() {
        let d = TimeOfDay::DEFAULT;
        assert_eq!(TimeOfDay::parse_lenient("", d), d);
        assert_eq!(TimeOfDay::parse_lenient("09", d).to_string(), "09:00");
        assert_eq!(TimeOfDay::parse_lenient("09:", d).to_string(), "09:00");
        assert_eq!(TimeOfDay::parse_lenient(":30", d).to_string(), "07:30");
        assert_eq!(TimeOfDay::parse_lenient("xx:45", d).to_string(), "07:45");
        assert_eq!(TimeOfDay::parse_lenient("99:99", d), d);
    }

    #[test]
    fn parts_keep_out_of_range_numbers() {
        assert_eq!(parse_time_parts("25:07"), (Some(25), Some(7)));
        assert_eq!(parse_time_parts(" 08 : 15 "), (Some(8), Some(15)));
        assert_eq!(parse_time_parts("-1:+5"), (None, None));
        assert_eq!(parse_time_parts("12"), (Some(12), None));
        assert_eq!(parse_time_parts("300:00"), (None, Some(0)));
    }
}
