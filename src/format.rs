use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

/// Renders `date_time` according to a PHP-style token pattern. Recognized
/// tokens: `Y y m n d j w N D l F M h g H G i s A a U t L`. A backslash
/// escapes the next character; anything unrecognized passes through as a
/// literal.
pub(crate) fn format_tokens(date_time: &NaiveDateTime, spec: &str) -> String {
    let mut out = String::with_capacity(spec.len());
    let mut chars = spec.chars();
    while let Some(token) = chars.next() {
        match token {
            '\\' => {
                if let Some(literal) = chars.next() {
                    out.push(literal);
                }
            }
            'Y' => out.push_str(&format!("{:04}", date_time.year())),
            'y' => out.push_str(&format!("{:02}", date_time.year().rem_euclid(100))),
            'm' => out.push_str(&format!("{:02}", date_time.month())),
            'n' => out.push_str(&date_time.month().to_string()),
            'd' => out.push_str(&format!("{:02}", date_time.day())),
            'j' => out.push_str(&date_time.day().to_string()),
            'H' => out.push_str(&format!("{:02}", date_time.hour())),
            'G' => out.push_str(&date_time.hour().to_string()),
            'h' => out.push_str(&format!("{:02}", date_time.hour12().1)),
            'g' => out.push_str(&date_time.hour12().1.to_string()),
            'i' => out.push_str(&format!("{:02}", date_time.minute())),
            's' => out.push_str(&format!("{:02}", date_time.second())),
            'A' => out.push_str(if date_time.hour12().0 { "PM" } else { "AM" }),
            'a' => out.push_str(if date_time.hour12().0 { "pm" } else { "am" }),
            'w' => out.push_str(&date_time.weekday().num_days_from_sunday().to_string()),
            'N' => out.push_str(&date_time.weekday().number_from_monday().to_string()),
            'l' => out.push_str(day_name(date_time.weekday())),
            'D' => out.push_str(&day_name(date_time.weekday())[..3]),
            'F' => out.push_str(month_name(date_time.month())),
            'M' => out.push_str(&month_name(date_time.month())[..3]),
            'U' => out.push_str(&date_time.and_utc().timestamp().to_string()),
            't' => out.push_str(&days_in_month(date_time.year(), date_time.month()).to_string()),
            'L' => out.push_str(if is_leap_year(date_time.year()) { "1" } else { "0" }),
            other => out.push(other),
        }
    }
    out
}

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => unreachable!("month out of range"),
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|date| date.pred_opt())
        .map(|date| date.day())
        .expect("last day of month is representable")
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}
