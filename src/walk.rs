use chrono::{Duration, NaiveDateTime};

use crate::moment::Moment;

/// Lazy day-by-day walk between two moments: a bounded sequence of
/// `(step index, moment)` pairs. Begin-inclusive, end-exclusive, stepping
/// one day at a time, and never longer than [`DayWalk::MAX_STEPS`] — a
/// span of 100 days still yields only the first 20 days. A pure function
/// of its two endpoints, so it can be restarted at will.
#[derive(Debug, Clone)]
pub struct DayWalk {
    cursor: NaiveDateTime,
    end: NaiveDateTime,
    index: usize,
}

impl DayWalk {
    /// Hard cap on the number of steps a walk yields.
    pub const MAX_STEPS: usize = 20;

    pub(crate) fn new(a: &Moment, b: &Moment) -> Self {
        // Begin and end are chosen by raw timestamp; the walk itself never
        // reorders the caller's endpoints.
        let (begin, end) = if b.timestamp() > a.timestamp() {
            (a.date_time(), b.date_time())
        } else {
            (b.date_time(), a.date_time())
        };
        DayWalk {
            cursor: begin,
            end,
            index: 0,
        }
    }
}

impl Iterator for DayWalk {
    type Item = (usize, Moment);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= Self::MAX_STEPS || self.cursor >= self.end {
            return None;
        }
        let item = (self.index, Moment::from(self.cursor));
        self.index += 1;
        match self.cursor.checked_add_signed(Duration::days(1)) {
            Some(next) => self.cursor = next,
            // The calendar range ends here; exhaust the walk.
            None => self.index = Self::MAX_STEPS,
        }
        Some(item)
    }
}

impl Moment {
    /// Walks day by day between `self` and `other`, whichever order they
    /// are in. See [`DayWalk`] for the boundary and cap rules.
    pub fn walk_to(&self, other: &Moment) -> DayWalk {
        DayWalk::new(self, other)
    }

    /// Callback form of [`Moment::walk_to`]: invokes `step` once per day
    /// with the step index, the day's moment, the caller's accumulator,
    /// and the two endpoints in call order (receiver first, even when it
    /// is the later of the two).
    pub fn iterate<A, F>(&self, other: &Moment, accumulator: &mut A, mut step: F)
    where
        F: FnMut(usize, &Moment, &mut A, &Moment, &Moment),
    {
        for (index, day) in self.walk_to(other) {
            step(index, &day, accumulator, self, other);
        }
    }
}
