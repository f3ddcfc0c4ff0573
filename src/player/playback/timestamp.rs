//! Start-time parsing for `?t=` style timestamps.
//!
//! Accepts plain seconds (`"45"`, `"12.5"`) and compound durations such as
//! `"1h03m12s"` or `"4m22.5s"`. Unlike the usual video-site format, the
//! seconds component may carry a fractional part.

/// Errors from parsing a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("Timestamp is empty")]
    Empty,

    #[error("Timestamp '{input}' has no numeric component")]
    NoNumber { input: String },
}

/// Duration units in the only order they may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Unit {
    Hours,
    Minutes,
    Seconds,
}

impl Unit {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'h' => Some(Self::Hours),
            'm' => Some(Self::Minutes),
            's' => Some(Self::Seconds),
            _ => None,
        }
    }

    fn seconds(self) -> f64 {
        match self {
            Self::Hours => 3600.0,
            Self::Minutes => 60.0,
            Self::Seconds => 1.0,
        }
    }
}

/// Parse a timestamp into seconds.
///
/// Components must appear in hours → minutes → seconds order and each may
/// be omitted. A number without a unit is read as seconds and ends the
/// timestamp. Anything after the last recognised component is ignored.
///
/// # Errors
/// Returns an error when the input contains no leading numeric component
/// or its value overflows to infinity.
pub fn parse_timestamp(input: &str) -> Result<f64, TimestampError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::Empty);
    }

    let no_number = || TimestampError::NoNumber {
        input: input.to_string(),
    };

    // A bare number that overflows is rejected, not rescanned as components
    if let Ok(seconds) = trimmed.parse::<f64>() {
        return if seconds.is_finite() {
            Ok(seconds)
        } else {
            Err(no_number())
        };
    }

    let mut rest = trimmed;
    let mut total = 0.0;
    let mut components = 0;
    let mut last_unit: Option<Unit> = None;

    while let Some((value, after)) = take_number(rest) {
        let unit = after.chars().next().and_then(Unit::from_char);
        match unit {
            Some(unit) if last_unit.map_or(true, |last| unit > last) => {
                total += value * unit.seconds();
                components += 1;
                last_unit = Some(unit);
                rest = &after[1..];
            }
            // Out-of-order unit: the remainder counts as zero
            Some(_) => break,
            None => {
                total += value;
                components += 1;
                break;
            }
        }
    }

    if components == 0 || !total.is_finite() {
        return Err(no_number());
    }
    Ok(total)
}

/// Split a leading unsigned decimal number (`12`, `12.5`, `.5`) off `s`.
fn take_number(s: &str) -> Option<(f64, &str)> {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;

    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() {
            seen_digit = true;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    let value = s[..end].parse::<f64>().ok()?;
    Some((value, &s[end..]))
}
