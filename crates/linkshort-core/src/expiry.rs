use crate::error::CoreError;
use jiff::Timestamp;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Expiry choices offered when creating a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExpiryOption {
    #[default]
    Never,
    TenMinutes,
    OneHour,
    ThreeHours,
    OneDay,
    ThreeDays,
    OneWeek,
    TwoWeeks,
    OneMonth,
}

impl ExpiryOption {
    pub const ALL: [ExpiryOption; 9] = [
        ExpiryOption::Never,
        ExpiryOption::TenMinutes,
        ExpiryOption::OneHour,
        ExpiryOption::ThreeHours,
        ExpiryOption::OneDay,
        ExpiryOption::ThreeDays,
        ExpiryOption::OneWeek,
        ExpiryOption::TwoWeeks,
        ExpiryOption::OneMonth,
    ];

    /// Lifetime in minutes, `None` for links that never expire.
    pub fn minutes(self) -> Option<i64> {
        match self {
            ExpiryOption::Never => None,
            ExpiryOption::TenMinutes => Some(10),
            ExpiryOption::OneHour => Some(60),
            ExpiryOption::ThreeHours => Some(180),
            ExpiryOption::OneDay => Some(1_440),
            ExpiryOption::ThreeDays => Some(4_320),
            ExpiryOption::OneWeek => Some(10_080),
            ExpiryOption::TwoWeeks => Some(20_160),
            ExpiryOption::OneMonth => Some(43_200),
        }
    }

    /// Short name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ExpiryOption::Never => "never",
            ExpiryOption::TenMinutes => "10m",
            ExpiryOption::OneHour => "1h",
            ExpiryOption::ThreeHours => "3h",
            ExpiryOption::OneDay => "1d",
            ExpiryOption::ThreeDays => "3d",
            ExpiryOption::OneWeek => "1w",
            ExpiryOption::TwoWeeks => "2w",
            ExpiryOption::OneMonth => "1mo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExpiryOption::Never => "No Expiry",
            ExpiryOption::TenMinutes => "10 Minutes",
            ExpiryOption::OneHour => "1 Hour",
            ExpiryOption::ThreeHours => "3 Hours",
            ExpiryOption::OneDay => "1 Day",
            ExpiryOption::ThreeDays => "3 Days",
            ExpiryOption::OneWeek => "1 Week",
            ExpiryOption::TwoWeeks => "2 Weeks",
            ExpiryOption::OneMonth => "1 Month",
        }
    }

    /// Absolute expiry in epoch milliseconds, counted from `now`.
    pub fn expires_at(self, now: Timestamp) -> Option<i64> {
        self.minutes()
            .map(|minutes| now.as_millisecond() + minutes * MILLIS_PER_MINUTE)
    }
}

impl Display for ExpiryOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExpiryOption {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(ExpiryOption::Never);
        }
        ExpiryOption::ALL
            .into_iter()
            .find(|option| option.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownExpiry(s.to_string()))
    }
}

/// Renders the time left until `expires_at` (epoch millis) as `Nd`, `Nh` or `Nm`.
pub fn format_remaining(expires_at: i64, now: Timestamp) -> String {
    let diff = expires_at - now.as_millisecond();
    if diff <= 0 {
        return "Expired".to_string();
    }
    let minutes = diff / MILLIS_PER_MINUTE;
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!("{days}d")
    } else if hours > 0 {
        format!("{hours}h")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> Timestamp {
        Timestamp::from_millisecond(millis).unwrap()
    }

    #[test]
    fn never_has_no_expiry() {
        assert_eq!(ExpiryOption::Never.expires_at(at(1_000)), None);
    }

    #[test]
    fn expiry_is_relative_to_now() {
        let now = at(1_700_000_000_000);
        assert_eq!(
            ExpiryOption::OneHour.expires_at(now),
            Some(1_700_000_000_000 + 3_600_000)
        );
        assert_eq!(
            ExpiryOption::OneMonth.expires_at(now),
            Some(1_700_000_000_000 + 43_200 * 60_000)
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!("1d".parse::<ExpiryOption>().unwrap(), ExpiryOption::OneDay);
        assert_eq!("1MO".parse::<ExpiryOption>().unwrap(), ExpiryOption::OneMonth);
        assert_eq!("".parse::<ExpiryOption>().unwrap(), ExpiryOption::Never);
        assert!("5y".parse::<ExpiryOption>().is_err());
    }

    #[test]
    fn every_option_round_trips_through_its_name() {
        for option in ExpiryOption::ALL {
            assert_eq!(option.to_string().parse::<ExpiryOption>().unwrap(), option);
        }
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(ExpiryOption::Never.label(), "No Expiry");
        assert_eq!(ExpiryOption::OneMonth.label(), "1 Month");
    }

    #[test]
    fn remaining_time() {
        let now = at(0);
        assert_eq!(format_remaining(0, now), "Expired");
        assert_eq!(format_remaining(-5, now), "Expired");
        assert_eq!(format_remaining(5 * 60_000 + 10, now), "5m");
        assert_eq!(format_remaining(3 * 3_600_000, now), "3h");
        assert_eq!(format_remaining(50 * 3_600_000, now), "2d");
    }
}
