use std::str::FromStr;

use crate::error::Error;

/// Coarseness level at which two moments are compared, ordered from
/// coarsest to finest. Equality at a level implies checking every coarser
/// level as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    Years,
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl FromStr for Granularity {
    type Err = Error;

    /// Accepts both the single-letter format tokens ("y", "m", "d", "h",
    /// "i", "s") and the full unit names.
    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "y" | "year" => Ok(Granularity::Years),
            "m" | "month" => Ok(Granularity::Months),
            "d" | "day" => Ok(Granularity::Days),
            "h" | "hour" => Ok(Granularity::Hours),
            "i" | "minute" => Ok(Granularity::Minutes),
            "s" | "second" => Ok(Granularity::Seconds),
            _ => Err(Error::InvalidArgument(format!(
                "unknown granularity {s:?}; expected one of \"y\", \"m\", \"d\", \"h\", \"i\", \"s\""
            ))),
        }
    }
}
