//! 时间工具函数 - 业务时区转换
//!
//! 订单只存 UTC Unix millis; 日期区间、月份分组和展示用的 date/time
//! 都在这里按业务时区换算。

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 业务时区的今天
pub fn today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

const MINUTES_PER_DAY: i64 = 24 * 60;
const GAP_STEP_MINUTES: i64 = 15;

/// 日期零点 → Unix millis (业务时区)
///
/// 本地零点落在夏令时跳变区间时, 取当天第一个存在的本地时刻。
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    // 所有时区偏移都是 15 分钟的整数倍
    (0..=MINUTES_PER_DAY / GAP_STEP_MINUTES)
        .find_map(|step| {
            (midnight + Duration::minutes(step * GAP_STEP_MINUTES))
                .and_local_timezone(tz)
                .earliest()
        })
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}

/// 日期最后一毫秒 (23:59:59.999) → Unix millis (业务时区)
///
/// 即次日零点减 1ms, 供 `<=` (含) 语义的区间查询使用。
pub fn day_end_inclusive_millis(date: NaiveDate, tz: Tz) -> i64 {
    match date.succ_opt() {
        Some(next) => day_start_millis(next, tz) - 1,
        None => i64::MAX,
    }
}

/// Unix millis → 业务时区时间
pub fn to_local(millis: i64, tz: Tz) -> DateTime<Tz> {
    tz.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.with_timezone(&tz))
}

/// Unix millis → "YYYY-MM" (业务时区)
pub fn month_key(millis: i64, tz: Tz) -> String {
    to_local(millis, tz).format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Manila;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(date("2024-03-01"), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(parse_date("03/01/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_day_bounds_in_manila() {
        // 2024-03-01T00:00:00+08:00 == 2024-02-29T16:00:00Z
        let start = day_start_millis(date("2024-03-01"), Manila);
        assert_eq!(start, 1_709_222_400_000);

        let end = day_end_inclusive_millis(date("2024-03-01"), Manila);
        assert_eq!(end, start + 86_400_000 - 1);
    }

    #[test]
    fn test_day_start_skips_dst_gap() {
        // Havana springs forward at local midnight: 2024-03-10 00:00 does not exist
        let tz = chrono_tz::America::Havana;
        let day = date("2024-03-10");
        assert!(
            day.and_time(NaiveTime::MIN)
                .and_local_timezone(tz)
                .earliest()
                .is_none()
        );

        let first_valid = tz
            .from_local_datetime(&day.and_hms_opt(1, 0, 0).unwrap())
            .single()
            .unwrap();
        assert_eq!(day_start_millis(day, tz), first_valid.timestamp_millis());
        assert_eq!(to_local(day_start_millis(day, tz), tz).date_naive(), day);

        // Previous day ends right before the jump
        assert_eq!(
            day_end_inclusive_millis(date("2024-03-09"), tz),
            first_valid.timestamp_millis() - 1
        );
    }

    #[test]
    fn test_month_key_uses_business_timezone() {
        // 2024-03-31T17:00:00Z is already April 1st in Manila
        let millis = 1_711_904_400_000;
        assert_eq!(month_key(millis, Manila), "2024-04");
        assert_eq!(month_key(millis, chrono_tz::UTC), "2024-03");
    }
}
