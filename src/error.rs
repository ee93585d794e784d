/// Everything here fails fast and synchronously; the caller decides what
/// to do about it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A period spec or granularity token that the grammar does not accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A date string that none of the supported formats can parse.
    #[error("cannot parse {0:?} as a date/time")]
    Parse(String),

    /// Arithmetic would leave the range representable by the underlying
    /// date-time primitive.
    #[error("moment is out of range")]
    OutOfRange,
}
