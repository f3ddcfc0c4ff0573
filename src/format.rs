//! Display formatting for counts, upload dates and playback times.
//!
//! English rendering only; numbers follow the compact/grouped styles used
//! by view and subscriber counts, dates follow the "N days ago" rules of
//! the video listing pages.

use chrono::{DateTime, Utc};

const COMPACT_SUFFIXES: [&str; 4] = ["K", "M", "B", "T"];

/// Compact notation: `999`, `1.2K`, `12K`, `1.5M`, `2B`.
///
/// Values below ten units keep one decimal, larger ones are rounded to
/// whole units. Rounding that reaches 1000 moves to the next suffix.
pub fn compact_number(n: i64) -> String {
    let abs = n.unsigned_abs() as f64;
    if abs < 1000.0 {
        return n.to_string();
    }
    let sign = if n < 0 { "-" } else { "" };

    let mut idx = ((abs.log10() / 3.0).floor() as usize).clamp(1, COMPACT_SUFFIXES.len());
    loop {
        let scaled = abs / 1000f64.powi(idx as i32);
        let rounded = if scaled < 10.0 {
            (scaled * 10.0).round() / 10.0
        } else {
            scaled.round()
        };
        if rounded >= 1000.0 && idx < COMPACT_SUFFIXES.len() {
            idx += 1;
            continue;
        }
        let digits = if rounded.fract() == 0.0 {
            format!("{:.0}", rounded)
        } else {
            format!("{:.1}", rounded)
        };
        return format!("{}{}{}", sign, digits, COMPACT_SUFFIXES[idx - 1]);
    }
}

/// Thousands-separated notation: `1,234,567`.
pub fn grouped_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Upload date relative to `now`.
///
/// Old dates collapse to a year or month, recent ones become "N days/hr./
/// min./sec. ago", and future dates (premieres) show a clock time.
pub fn relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds_ago = (now - date).num_milliseconds() as f64 / 1000.0;
    let minutes_ago = (seconds_ago / 60.0).floor();
    let hours_ago = (minutes_ago / 60.0).floor();
    let days_ago = (hours_ago / 24.0).floor();

    if days_ago >= 365.0 {
        return date.format("%Y").to_string();
    }
    if days_ago >= 31.0 {
        return date.format("%b %Y").to_string();
    }
    if days_ago >= 3.0 {
        return date.format("%b %-d").to_string();
    }
    if days_ago >= 1.0 {
        return match days_ago as i64 {
            1 => "yesterday".to_string(),
            n => format!("{} days ago", n),
        };
    }
    if hours_ago >= 1.0 {
        return format!("{} hr. ago", hours_ago as i64);
    }
    if minutes_ago >= 1.0 {
        return format!("{} min. ago", minutes_ago as i64);
    }
    if seconds_ago >= 0.0 {
        return match seconds_ago.floor() as i64 {
            0 => "now".to_string(),
            n => format!("{} sec. ago", n),
        };
    }
    if days_ago >= -1.0 {
        return date.format("%-I:%M %p").to_string();
    }
    date.format("%b %-d, %-I:%M %p").to_string()
}

/// Full day date: `Mar 5, 2024`.
pub fn day_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Unix seconds to a UTC date, if representable.
pub fn from_timestamp(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

/// Format a duration in seconds as `MM:SS`, or `H:MM:SS` from one hour.
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds.max(0.0) as u64;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}
