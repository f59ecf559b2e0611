use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KyattoError {
    ParseError(String),
    DivisionByZero,
    Underflow { minuend: u64, subtrahend: u64 },
    Overflow { lhs: u64, rhs: u64 },
    FieldOverflow(String),
}

impl Error for KyattoError {}

impl fmt::Display for KyattoError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KyattoError::ParseError(msg) => write!(fmt, "{}", msg),
            KyattoError::DivisionByZero => write!(fmt, "Attempted to divide by zero"),
            KyattoError::Underflow {
                minuend,
                subtrahend,
            } => write!(
                fmt,
                "Cannot subtract {}cs from {}cs: the result would be negative",
                subtrahend, minuend
            ),
            KyattoError::Overflow { lhs, rhs } => write!(
                fmt,
                "Adding {}cs to {}cs overflows the duration range",
                rhs, lhs
            ),
            KyattoError::FieldOverflow(fields) => write!(
                fmt,
                "Timestamp {} is too long to count in centiseconds",
                fields
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, KyattoError>;
