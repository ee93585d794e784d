use std::fmt;

use chrono::{Datelike, Duration, Local, Months, NaiveDateTime, Timelike};

use crate::error::Error;
use crate::format::format_tokens;
use crate::granularity::Granularity;
use crate::parse::parse_date_time;
use crate::period::{Period, PeriodArg};

/// How [`Moment`] renders through `Display`, chosen at construction time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The Unix timestamp, as a string. The default.
    #[default]
    Timestamp,
    /// A token pattern fed to [`Moment::format`].
    Pattern(String),
}

/// A wrapped calendar instant with chainable accessors, arithmetic,
/// comparison and iteration. Calendar math is delegated to chrono; the
/// wrapped value is always valid and a failed mutation leaves it
/// untouched.
///
/// Arithmetic mutates in place and hands the receiver back, so operations
/// chain:
///
/// ```
/// use momento::Moment;
///
/// let mut moment = Moment::parse("2012-12-20")?;
/// moment.add_days(5)?.add_months(3)?;
/// assert_eq!((moment.month(), moment.day()), (3, 25));
/// # Ok::<(), momento::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Moment {
    date_time: NaiveDateTime,
    output: OutputFormat,
}

/// Comparison operand: another wrapped moment or a raw chrono value.
#[derive(Debug, Clone)]
pub enum DateOperand {
    Moment(Moment),
    Instant(NaiveDateTime),
}

impl DateOperand {
    fn into_date_time(self) -> NaiveDateTime {
        match self {
            DateOperand::Moment(moment) => moment.date_time,
            DateOperand::Instant(date_time) => date_time,
        }
    }
}

impl From<Moment> for DateOperand {
    fn from(moment: Moment) -> Self {
        DateOperand::Moment(moment)
    }
}

impl From<&Moment> for DateOperand {
    fn from(moment: &Moment) -> Self {
        DateOperand::Moment(moment.clone())
    }
}

impl From<NaiveDateTime> for DateOperand {
    fn from(date_time: NaiveDateTime) -> Self {
        DateOperand::Instant(date_time)
    }
}

impl From<NaiveDateTime> for Moment {
    fn from(date_time: NaiveDateTime) -> Self {
        Moment {
            date_time,
            output: OutputFormat::default(),
        }
    }
}

impl Moment {
    /// The current local wall-clock instant.
    pub fn now() -> Self {
        Moment::from(Local::now().naive_local())
    }

    /// Wraps a parseable date/time string. Accepts `YYYY-MM-DD`,
    /// `YYYY:MM:DD HH:MM:SS`, `YYYY/MM/DD` and friends, plus `now` and
    /// `@<timestamp>`.
    pub fn parse(input: &str) -> Result<Self, Error> {
        Ok(Moment::from(parse_date_time(input)?))
    }

    /// Selects the `Display` rendition.
    pub fn with_format(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// The wrapped chrono value.
    pub fn date_time(&self) -> NaiveDateTime {
        self.date_time
    }

    /// Unix timestamp of the wrapped instant, taken as UTC.
    pub fn timestamp(&self) -> i64 {
        self.date_time.and_utc().timestamp()
    }

    /// Renders the moment through the PHP-style token formatter
    /// (`Y m d j w D h H i s` and friends).
    pub fn format(&self, spec: &str) -> String {
        format_tokens(&self.date_time, spec)
    }

    pub fn year(&self) -> i32 {
        self.date_time.year()
    }

    /// Month number, 1-12.
    pub fn month(&self) -> u32 {
        self.date_time.month()
    }

    /// Day of month, 1-31.
    pub fn day(&self) -> u32 {
        self.date_time.day()
    }

    /// Weekday index, 0 = Sunday .. 6 = Saturday.
    pub fn weekday(&self) -> u32 {
        self.date_time.weekday().num_days_from_sunday()
    }

    /// Abbreviated weekday name, "Mon".."Sun".
    pub fn weekday_abbrev(&self) -> String {
        self.format("D")
    }

    /// Hour on the 12-hour clock, 1-12.
    pub fn hour12(&self) -> u32 {
        self.date_time.hour12().1
    }

    /// Hour on the 24-hour clock, 0-23.
    pub fn hour(&self) -> u32 {
        self.date_time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.date_time.minute()
    }

    pub fn second(&self) -> u32 {
        self.date_time.second()
    }

    /// Adds days; a negative amount subtracts.
    pub fn add_days(&mut self, days: i64) -> Result<&mut Self, Error> {
        self.shift_by(Duration::try_days(days).ok_or(Error::OutOfRange)?)
    }

    /// Subtracts days unconditionally.
    pub fn sub_days(&mut self, days: i64) -> Result<&mut Self, Error> {
        self.add_days(days.checked_neg().ok_or(Error::OutOfRange)?)
    }

    /// Adds calendar months; a negative amount subtracts. A month-end day
    /// clamps to the last valid day of the target month, chrono's overflow
    /// rule.
    pub fn add_months(&mut self, months: i32) -> Result<&mut Self, Error> {
        self.shift_months(months as i64)
    }

    /// Subtracts calendar months unconditionally.
    pub fn sub_months(&mut self, months: i32) -> Result<&mut Self, Error> {
        self.shift_months(-(months as i64))
    }

    /// Adds calendar years; a negative amount subtracts. February 29 clamps
    /// to February 28 in a non-leap target year.
    pub fn add_years(&mut self, years: i32) -> Result<&mut Self, Error> {
        self.shift_months(years as i64 * 12)
    }

    /// Subtracts calendar years unconditionally.
    pub fn sub_years(&mut self, years: i32) -> Result<&mut Self, Error> {
        self.shift_months(years as i64 * -12)
    }

    /// Adds hours; a negative amount subtracts.
    pub fn add_hours(&mut self, hours: i64) -> Result<&mut Self, Error> {
        self.shift_by(Duration::try_hours(hours).ok_or(Error::OutOfRange)?)
    }

    /// Subtracts hours unconditionally.
    pub fn sub_hours(&mut self, hours: i64) -> Result<&mut Self, Error> {
        self.add_hours(hours.checked_neg().ok_or(Error::OutOfRange)?)
    }

    /// Adds minutes; a negative amount subtracts.
    pub fn add_minutes(&mut self, minutes: i64) -> Result<&mut Self, Error> {
        self.shift_by(Duration::try_minutes(minutes).ok_or(Error::OutOfRange)?)
    }

    /// Subtracts minutes unconditionally.
    pub fn sub_minutes(&mut self, minutes: i64) -> Result<&mut Self, Error> {
        self.add_minutes(minutes.checked_neg().ok_or(Error::OutOfRange)?)
    }

    /// Adds seconds; a negative amount subtracts.
    pub fn add_seconds(&mut self, seconds: i64) -> Result<&mut Self, Error> {
        self.shift_by(Duration::try_seconds(seconds).ok_or(Error::OutOfRange)?)
    }

    /// Subtracts seconds unconditionally.
    pub fn sub_seconds(&mut self, seconds: i64) -> Result<&mut Self, Error> {
        self.add_seconds(seconds.checked_neg().ok_or(Error::OutOfRange)?)
    }

    /// Adds a period, given either as a [`Period`] value or an ISO-8601
    /// builder string such as `"P3D"` or `"PT2H"`.
    pub fn add<'a>(&mut self, period: impl Into<PeriodArg<'a>>) -> Result<&mut Self, Error> {
        let period = period.into().resolve()?;
        self.apply_period(&period, 1)
    }

    /// Subtracts a period, same operand forms as [`Moment::add`].
    pub fn sub<'a>(&mut self, period: impl Into<PeriodArg<'a>>) -> Result<&mut Self, Error> {
        let period = period.into().resolve()?;
        self.apply_period(&period, -1)
    }

    fn apply_period(&mut self, period: &Period, sign: i64) -> Result<&mut Self, Error> {
        let months = period.years as i64 * 12 + period.months as i64;
        let seconds = period.days as i64 * 86_400
            + period.hours as i64 * 3_600
            + period.minutes as i64 * 60
            + period.seconds as i64;
        // Compute fully before writing back so a failed step leaves the
        // moment untouched.
        let shifted = shifted_months(self.date_time, sign * months)?;
        let delta = Duration::try_seconds(sign * seconds).ok_or(Error::OutOfRange)?;
        self.date_time = shifted.checked_add_signed(delta).ok_or(Error::OutOfRange)?;
        Ok(self)
    }

    fn shift_by(&mut self, delta: Duration) -> Result<&mut Self, Error> {
        self.date_time = self
            .date_time
            .checked_add_signed(delta)
            .ok_or(Error::OutOfRange)?;
        Ok(self)
    }

    fn shift_months(&mut self, months: i64) -> Result<&mut Self, Error> {
        self.date_time = shifted_months(self.date_time, months)?;
        Ok(self)
    }

    /// Whether the moment lies in the past. Strict mode compares raw
    /// timestamps; non-strict mode compares calendar days, so a moment
    /// later today already counts as past.
    pub fn is_past(&self, strict: bool) -> bool {
        self.is_past_at(Local::now().naive_local(), strict)
    }

    /// Negation of [`Moment::is_past`] under the same mode.
    pub fn is_future(&self, strict: bool) -> bool {
        !self.is_past(strict)
    }

    /// Deterministic variant of [`Moment::is_past`] against an explicit
    /// "now".
    pub fn is_past_at(&self, now: NaiveDateTime, strict: bool) -> bool {
        if strict {
            now.and_utc().timestamp() > self.timestamp()
        } else {
            // Both sides truncate to the start of their calendar day, so
            // a moment later today is already non-future.
            self.date_time.date() <= now.date()
        }
    }

    /// Deterministic variant of [`Moment::is_future`].
    pub fn is_future_at(&self, now: NaiveDateTime, strict: bool) -> bool {
        !self.is_past_at(now, strict)
    }

    /// Whether the two moments agree on every field from years down to
    /// `granularity` inclusive.
    pub fn equal(&self, other: impl Into<DateOperand>, granularity: Granularity) -> bool {
        let other = other.into().into_date_time();
        let this = self.date_time;
        let fields = [
            (Granularity::Years, this.year() == other.year()),
            (Granularity::Months, this.month() == other.month()),
            (Granularity::Days, this.day() == other.day()),
            (Granularity::Hours, this.hour() == other.hour()),
            (Granularity::Minutes, this.minute() == other.minute()),
            (Granularity::Seconds, this.second() == other.second()),
        ];
        fields
            .iter()
            .filter(|(level, _)| *level <= granularity)
            .all(|(_, field_matches)| *field_matches)
    }

    /// Raw Unix timestamp equality, independent of the granularity chain.
    pub fn equal_timestamp(&self, other: impl Into<DateOperand>) -> bool {
        self.timestamp() == other.into().into_date_time().and_utc().timestamp()
    }
}

fn shifted_months(date_time: NaiveDateTime, months: i64) -> Result<NaiveDateTime, Error> {
    let shifted = if months >= 0 {
        let months = u32::try_from(months).map_err(|_| Error::OutOfRange)?;
        date_time.checked_add_months(Months::new(months))
    } else {
        let months = u32::try_from(-months).map_err(|_| Error::OutOfRange)?;
        date_time.checked_sub_months(Months::new(months))
    };
    shifted.ok_or(Error::OutOfRange)
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.output {
            OutputFormat::Timestamp => write!(f, "{}", self.timestamp()),
            OutputFormat::Pattern(spec) => f.write_str(&self.format(spec)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moment(s: &str) -> Moment {
        Moment::parse(s).unwrap()
    }

    #[test]
    fn date_accessors() {
        let m = moment("2016-05-09");
        assert_eq!(m.year(), 2016);
        assert_eq!(m.month(), 5);
        assert_eq!(m.day(), 9);
        assert_eq!(m.weekday(), 1);
        assert_eq!(m.weekday_abbrev(), "Mon");
        assert_eq!((m.hour(), m.minute(), m.second()), (0, 0, 0));
    }

    #[test]
    fn time_accessors() {
        let m = moment("2008:08:07 18:11:31");
        assert_eq!(m.hour12(), 6);
        assert_eq!(m.hour(), 18);
        assert_eq!(m.minute(), 11);
        assert_eq!(m.second(), 31);
    }

    #[test]
    fn format_round_trips_parsed_fields() {
        let m = moment("2008:08:07 18:11:31");
        assert_eq!(m.format("Y-m-d H:i:s"), "2008-08-07 18:11:31");
    }

    #[test]
    fn add_and_sub_chain() {
        let mut m = moment("2012/12/20");
        m.add_days(5).unwrap();
        assert_eq!(m.day(), 25);
        m.add_days(10).unwrap();
        assert_eq!(m.day(), 4);
        assert_eq!((m.year(), m.month()), (2013, 1));
        m.add_months(3).unwrap();
        assert_eq!(m.month(), 4);
        m.sub_months(6).unwrap();
        assert_eq!((m.year(), m.month()), (2012, 10));
        m.add_years(16).unwrap();
        assert_eq!(m.year(), 2028);
        m.sub_years(100).unwrap();
        assert_eq!(m.year(), 1928);
    }

    #[test]
    fn add_then_sub_restores_the_instant() {
        let mut m = moment("1999-01-31 08:30:00");
        let before = m.timestamp();
        m.add_days(400).unwrap().sub_days(400).unwrap();
        m.add_hours(7).unwrap().sub_hours(7).unwrap();
        m.add_minutes(123).unwrap().sub_minutes(123).unwrap();
        m.add_seconds(86_401).unwrap().sub_seconds(86_401).unwrap();
        assert_eq!(m.timestamp(), before);
    }

    #[test]
    fn negative_add_is_sub() {
        let start = "2000-06-15 12:00:00";
        for n in [1, 7, 30] {
            let mut a = moment(start);
            let mut b = moment(start);
            a.add_days(-n).unwrap();
            b.sub_days(n).unwrap();
            assert!(a.equal_timestamp(&b));
        }
        let mut a = moment(start);
        let mut b = moment(start);
        a.add_months(-5).unwrap();
        b.sub_months(5).unwrap();
        assert!(a.equal_timestamp(&b));

        let mut a = moment(start);
        let mut b = moment(start);
        a.add_years(-3).unwrap();
        b.sub_years(3).unwrap();
        assert!(a.equal_timestamp(&b));

        let mut a = moment(start);
        let mut b = moment(start);
        a.add_hours(-26).unwrap();
        b.sub_hours(26).unwrap();
        assert!(a.equal_timestamp(&b));

        let mut a = moment(start);
        let mut b = moment(start);
        a.add_minutes(-90).unwrap();
        b.sub_minutes(90).unwrap();
        assert!(a.equal_timestamp(&b));

        let mut a = moment(start);
        let mut b = moment(start);
        a.add_seconds(-61).unwrap();
        b.sub_seconds(61).unwrap();
        assert!(a.equal_timestamp(&b));
    }

    #[test]
    fn month_end_clamps_to_last_valid_day() {
        let mut m = moment("2000-01-31");
        m.add_months(1).unwrap();
        assert_eq!((m.month(), m.day()), (2, 29));

        let mut m = moment("2000-02-29");
        m.add_years(1).unwrap();
        assert_eq!((m.year(), m.month(), m.day()), (2001, 2, 28));
    }

    #[test]
    fn add_period_value_and_spec() {
        let mut m = moment("2012-12-20");
        m.add("P3D").unwrap();
        assert_eq!(m.day(), 23);
        m.add(Period::hours(2)).unwrap();
        assert_eq!(m.hour(), 2);
        m.sub("PT2H").unwrap().sub(Period::days(3)).unwrap();
        assert_eq!(m.format("Y-m-d H:i:s"), "2012-12-20 00:00:00");
    }

    #[test]
    fn add_rejects_bad_period_spec() {
        let mut m = moment("2012-12-20");
        let before = m.timestamp();
        assert!(matches!(m.add("three days"), Err(Error::InvalidArgument(_))));
        assert!(matches!(m.sub("P"), Err(Error::InvalidArgument(_))));
        // A failed mutation leaves the moment untouched.
        assert_eq!(m.timestamp(), before);
    }

    #[test]
    fn equal_granularity_chain() {
        let a = moment("2010-04-05 10:20:30");
        let b = moment("2010-04-05 10:20:30");
        for granularity in [
            Granularity::Years,
            Granularity::Months,
            Granularity::Days,
            Granularity::Hours,
            Granularity::Minutes,
            Granularity::Seconds,
        ] {
            assert!(a.equal(&b, granularity));
        }

        let c = moment("2010-04-05 10:20:31");
        assert!(a.equal(&c, Granularity::Minutes));
        assert!(!a.equal(&c, Granularity::Seconds));

        // A matching month in a different year is not equal at months:
        // every coarser field participates.
        let d = moment("2011-04-05 10:20:30");
        assert!(!d.equal(&a, Granularity::Months));
    }

    #[test]
    fn equal_uses_the_24_hour_field() {
        let a = moment("2010-04-05 01:00:00");
        let b = moment("2010-04-05 13:00:00");
        assert!(!a.equal(&b, Granularity::Hours));
    }

    #[test]
    fn equal_accepts_raw_instants() {
        let a = moment("2010-04-05 10:20:30");
        assert!(a.equal(a.date_time(), Granularity::Seconds));
        assert!(a.equal_timestamp(a.date_time()));
        assert!(!a.equal_timestamp(moment("2010-04-05 10:20:31").date_time()));
    }

    #[test]
    fn past_and_future() {
        let past = moment("1980-10-10");
        assert!(past.is_past(false));
        assert!(!past.is_future(false));
        assert!(past.is_past(true));

        let mut future = Moment::now();
        future.add_days(23).unwrap();
        assert!(future.is_future(false));
        assert!(!future.is_past(false));

        let mut after = Moment::now();
        after.add_seconds(8).unwrap();
        assert!(after.is_future(true));
    }

    #[test]
    fn non_strict_counts_later_today_as_past() {
        let now = moment("2020-06-15 08:00:00").date_time();
        let later_today = moment("2020-06-15 23:59:00");
        assert!(later_today.is_past_at(now, false));
        assert!(!later_today.is_past_at(now, true));
        assert!(later_today.is_future_at(now, true));

        let tomorrow = moment("2020-06-16 00:00:01");
        assert!(!tomorrow.is_past_at(now, false));
        assert!(tomorrow.is_future_at(now, false));
    }

    #[test]
    fn display_defaults_to_timestamp() {
        let m = moment("1970-01-01 00:00:10");
        assert_eq!(m.to_string(), "10");

        let m = moment("2016-05-09").with_format(OutputFormat::Pattern("d/m/Y".into()));
        assert_eq!(m.to_string(), "09/05/2016");
    }
}
