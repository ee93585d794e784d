use std::str::FromStr;

use crate::error::Error;

// A period counts calendar slots like "5 months"; it only gets a concrete
// length in seconds once it is anchored to a date. A month added to
// January 15 and a month added to February 15 are the same period but
// different durations.

/// A calendar period, the structured form of an ISO-8601 duration string
/// such as `P1Y2M3DT4H5M6S`. All components are non-negative; direction
/// comes from whether the period is added or subtracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Period {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Period {
    pub fn years(years: u32) -> Self {
        Period {
            years,
            ..Default::default()
        }
    }

    pub fn months(months: u32) -> Self {
        Period {
            months,
            ..Default::default()
        }
    }

    pub fn days(days: u32) -> Self {
        Period {
            days,
            ..Default::default()
        }
    }

    pub fn hours(hours: u32) -> Self {
        Period {
            hours,
            ..Default::default()
        }
    }

    pub fn minutes(minutes: u32) -> Self {
        Period {
            minutes,
            ..Default::default()
        }
    }

    pub fn seconds(seconds: u32) -> Self {
        Period {
            seconds,
            ..Default::default()
        }
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parses the ISO-8601 duration grammar: `P[nY][nM][nW][nD][T[nH][nM][nS]]`.
    /// At least one component must be present and designators must appear
    /// in grammar order. Weeks are folded into days.
    fn from_str(s: &str) -> Result<Self, Error> {
        let bad = || {
            Error::InvalidArgument(format!(
                "{s:?} is not an ISO-8601 period; expected forms like \"P3D\" or \"PT2H\""
            ))
        };

        let rest = s.strip_prefix('P').ok_or_else(bad)?;
        let (date_part, time_part) = match rest.split_once('T') {
            Some((date, time)) => (date, Some(time)),
            None => (rest, None),
        };

        let date_fields = scan_fields(date_part, &['Y', 'M', 'W', 'D']).ok_or_else(bad)?;
        let time_fields = match time_part {
            // A trailing "T" with nothing after it is not a valid duration.
            Some("") => return Err(bad()),
            Some(time) => scan_fields(time, &['H', 'M', 'S']).ok_or_else(bad)?,
            None => Vec::new(),
        };
        if date_fields.is_empty() && time_fields.is_empty() {
            return Err(bad());
        }

        let mut period = Period::default();
        for (designator, value) in date_fields {
            match designator {
                'Y' => period.years = value,
                'M' => period.months = value,
                'W' => {
                    let days = value.checked_mul(7).ok_or_else(bad)?;
                    period.days = period.days.checked_add(days).ok_or_else(bad)?;
                }
                'D' => period.days = period.days.checked_add(value).ok_or_else(bad)?,
                _ => unreachable!(),
            }
        }
        for (designator, value) in time_fields {
            match designator {
                'H' => period.hours = value,
                'M' => period.minutes = value,
                'S' => period.seconds = value,
                _ => unreachable!(),
            }
        }
        Ok(period)
    }
}

/// Splits `part` into `(designator, value)` pairs, requiring each
/// designator to be drawn from `order` without going backwards. Returns
/// None on a malformed field or an out-of-order designator.
fn scan_fields(part: &str, order: &[char]) -> Option<Vec<(char, u32)>> {
    let mut fields = Vec::new();
    let mut chars = part.chars().peekable();
    let mut position = 0;
    while chars.peek().is_some() {
        let mut value: u32 = 0;
        let mut digits = 0;
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            value = value.checked_mul(10)?.checked_add(digit)?;
            chars.next();
            digits += 1;
        }
        let designator = chars.next()?;
        if digits == 0 {
            return None;
        }
        let offset = order[position..].iter().position(|&c| c == designator)?;
        position += offset + 1;
        fields.push((designator, value));
    }
    Some(fields)
}

/// Operand accepted by the generic `add`/`sub` on a moment: either an
/// already-built [`Period`] or an ISO-8601 builder string still to be
/// parsed.
#[derive(Debug, Clone, Copy)]
pub enum PeriodArg<'a> {
    Period(Period),
    Spec(&'a str),
}

impl PeriodArg<'_> {
    pub(crate) fn resolve(self) -> Result<Period, Error> {
        match self {
            PeriodArg::Period(period) => Ok(period),
            PeriodArg::Spec(spec) => spec.parse(),
        }
    }
}

impl From<Period> for PeriodArg<'static> {
    fn from(period: Period) -> Self {
        PeriodArg::Period(period)
    }
}

impl<'a> From<&'a str> for PeriodArg<'a> {
    fn from(spec: &'a str) -> Self {
        PeriodArg::Spec(spec)
    }
}
