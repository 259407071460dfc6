/// Utilities for date and time formatting
///
/// Dates arrive from the backend as UTC timestamps and are shown in the
/// `YYYY-MM-DD` style used across the audit screens.
use chrono::{DateTime, Utc};

/// "2024-03-15T14:02:26Z" -> "2024-03-15"
pub fn format_date(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// "2024-03-15T14:02:26Z" -> "2024-03-15 14:02:26"
pub fn format_datetime(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Date part of an ISO string without parsing it, for loosely typed fields
/// such as `price_date`.
pub fn format_date_str(value: &str) -> String {
    value.split('T').next().unwrap_or(value).to_string()
}

/// "刚刚", "5分钟前", "3天前"... relative to `now`.
pub fn format_relative(target: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = MINUTE * 60;
    const DAY: i64 = HOUR * 24;
    const MONTH: i64 = DAY * 30;
    const YEAR: i64 = DAY * 365;

    let diff = (*now - *target).num_seconds();
    if diff < MINUTE {
        "刚刚".to_string()
    } else if diff < HOUR {
        format!("{}分钟前", diff / MINUTE)
    } else if diff < DAY {
        format!("{}小时前", diff / HOUR)
    } else if diff < MONTH {
        format!("{}天前", diff / DAY)
    } else if diff < YEAR {
        format!("{}个月前", diff / MONTH)
    } else {
        format!("{}年前", diff / YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_format_date() {
        let dt = at(2024, 3, 15, 14, 2, 26);
        assert_eq!(format_date(Some(&dt)), "2024-03-15");
        assert_eq!(format_datetime(Some(&dt)), "2024-03-15 14:02:26");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn test_format_date_str() {
        assert_eq!(format_date_str("2024-03-15T14:02:26.123Z"), "2024-03-15");
        assert_eq!(format_date_str("2024-03"), "2024-03");
    }

    #[test]
    fn test_format_relative() {
        let now = at(2024, 6, 1, 12, 0, 0);
        assert_eq!(format_relative(&(now - Duration::seconds(30)), &now), "刚刚");
        assert_eq!(format_relative(&(now - Duration::minutes(5)), &now), "5分钟前");
        assert_eq!(format_relative(&(now - Duration::hours(3)), &now), "3小时前");
        assert_eq!(format_relative(&(now - Duration::days(2)), &now), "2天前");
        assert_eq!(format_relative(&(now - Duration::days(65)), &now), "2个月前");
        assert_eq!(format_relative(&(now - Duration::days(800)), &now), "2年前");
    }
}
