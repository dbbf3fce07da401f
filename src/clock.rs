use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

pub const DATE_PLACEHOLDER: &str = "----年--月--日 --曜日";
pub const TIME_PLACEHOLDER: &str = "--:--:--";
pub const TICK_MS: u32 = 1_000;

/// Wall-clock reading in the visitor's local time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClockSnapshot(NaiveDateTime);

impl ClockSnapshot {
    /// `month` is 1-based. Returns `None` for impossible calendar values,
    /// which is what a broken host clock looks like from here.
    pub fn from_local_fields(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, minute, second)
            .map(Self)
    }

    pub fn date_label(&self) -> String {
        let date = self.0.date();
        format!(
            "{}年{}月{}日{}",
            date.year(),
            date.month(),
            date.day(),
            weekday_ja(date.weekday())
        )
    }

    pub fn time_label(&self) -> String {
        let time = self.0.time();
        format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())
    }
}

pub fn date_label(snapshot: Option<&ClockSnapshot>) -> String {
    snapshot
        .map(ClockSnapshot::date_label)
        .unwrap_or_else(|| DATE_PLACEHOLDER.to_string())
}

pub fn time_label(snapshot: Option<&ClockSnapshot>) -> String {
    snapshot
        .map(ClockSnapshot::time_label)
        .unwrap_or_else(|| TIME_PLACEHOLDER.to_string())
}

/// Delay that lines the next tick up with the start of the next second.
pub fn delay_to_next_second(millisecond: u32) -> u32 {
    TICK_MS - millisecond % TICK_MS
}

fn weekday_ja(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "月曜日",
        Weekday::Tue => "火曜日",
        Weekday::Wed => "水曜日",
        Weekday::Thu => "木曜日",
        Weekday::Fri => "金曜日",
        Weekday::Sat => "土曜日",
        Weekday::Sun => "日曜日",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_label_includes_weekday() {
        let snapshot = ClockSnapshot::from_local_fields(2026, 10, 19, 9, 5, 3).expect("valid date");
        assert_eq!(snapshot.date_label(), "2026年10月19日月曜日");
    }

    #[test]
    fn time_label_is_zero_padded_24_hour() {
        let morning = ClockSnapshot::from_local_fields(2024, 3, 1, 9, 5, 3).expect("valid time");
        assert_eq!(morning.time_label(), "09:05:03");

        let evening = ClockSnapshot::from_local_fields(2024, 3, 1, 23, 59, 59).expect("valid time");
        assert_eq!(evening.time_label(), "23:59:59");
    }

    #[test]
    fn invalid_fields_fall_back_to_placeholders() {
        let snapshot = ClockSnapshot::from_local_fields(2024, 2, 30, 10, 0, 0);
        assert!(snapshot.is_none());
        assert_eq!(date_label(snapshot.as_ref()), DATE_PLACEHOLDER);
        assert_eq!(time_label(snapshot.as_ref()), TIME_PLACEHOLDER);
    }

    #[test]
    fn next_tick_aligns_to_second_boundary() {
        assert_eq!(delay_to_next_second(0), 1_000);
        assert_eq!(delay_to_next_second(250), 750);
        assert_eq!(delay_to_next_second(999), 1);
    }
}
