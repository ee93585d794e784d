pub use error::Error;
pub use granularity::Granularity;
pub use moment::{DateOperand, Moment, OutputFormat};
pub use period::{Period, PeriodArg};
pub use walk::DayWalk;

mod error;
mod format;
mod granularity;
mod moment;
mod parse;
mod period;
mod walk;
