use crate::error::{KyattoError, Result};
use crate::string;
use crate::subtitle::{SubtitleFormat, Timestamp};

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, DivAssign, Sub, SubAssign};
use std::str::FromStr;

use lazy_static::lazy_static;
use nom::character::complete::digit1;
use nom::combinator::{all_consuming, map_res};
use nom::error::{convert_error, VerboseError};
use nom::{Err as NomErr, IResult};
use regex::Regex;
use tracing::debug;

const CS_PER_SECOND: u64 = 100;
const CS_PER_MINUTE: u64 = 60 * CS_PER_SECOND;
const CS_PER_HOUR: u64 = 60 * CS_PER_MINUTE;

const FIELD_COUNT: usize = 4;

lazy_static! {
    static ref FIELD_SEPARATORS: Regex = Regex::new("[:.]").unwrap();
}

/// Advanced SubStation Alpha.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ass;

impl SubtitleFormat for Ass {
    fn name(&self) -> &'static str {
        "Advanced SubStation Alpha"
    }

    fn extension(&self) -> &'static str {
        "ass"
    }

    fn version(&self) -> &'static str {
        "v4.00+"
    }
}

/// A timestamp as written in ASS dialogue lines, `H:MM:SS.CC`.
///
/// The fields are stored as given and are only brought back into range when
/// the whole duration is set, which every arithmetic operation does. Two
/// timestamps compare equal when their durations are equal, so `0:60:00.00`
/// and `1:00:00.00` are the same instant.
///
/// The operators panic on underflow, overflow and division by zero, like
/// `std::time::Duration` does. Use the named methods to get a `Result`.
/// Fields set by hand can add up to more centiseconds than a `u64` holds;
/// `checked_duration` and the arithmetic methods report that as an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssTimestamp {
    hours: u64,
    minutes: u64,
    seconds: u64,
    centiseconds: u64,
}

impl AssTimestamp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(hours: u64, minutes: u64, seconds: u64, centiseconds: u64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            centiseconds,
        }
    }

    /// Parses `H:MM:SS.CC`. Any mix of `:` and `.` separators is accepted, but
    /// there must be exactly four fields and each must be a plain decimal
    /// number.
    pub fn from_string(input: &str) -> Result<Self> {
        let tokens = string::split_with(input, &FIELD_SEPARATORS);
        if tokens.len() != FIELD_COUNT {
            debug!("Rejected timestamp '{}' with {} fields", input, tokens.len());
            return Err(KyattoError::ParseError(format!(
                "Invalid timestamp '{}': expected {} fields, found {}",
                input,
                FIELD_COUNT,
                tokens.len()
            )));
        }

        let mut values = [0u64; FIELD_COUNT];
        for (value, token) in values.iter_mut().zip(&tokens) {
            *value = parse_field(input, token)?;
        }

        let timestamp = Self::from_fields(values[0], values[1], values[2], values[3]);
        let duration = timestamp.checked_duration().map_err(|_| {
            KyattoError::ParseError(format!(
                "Invalid timestamp '{}': too long to count in centiseconds",
                input
            ))
        })?;
        debug!("Parsed '{}' as {}cs", input, duration);
        Ok(timestamp)
    }

    /// Builds the canonical timestamp for a duration in centiseconds. Hours
    /// wrap around at 24.
    pub fn from_duration(duration: u64) -> Self {
        let mut timestamp = Self::default();
        timestamp.set_duration(duration);
        timestamp
    }

    pub fn add_timestamp(&mut self, other: AssTimestamp) -> Result<()> {
        let (lhs, rhs) = (self.checked_duration()?, other.checked_duration()?);
        let sum = lhs
            .checked_add(rhs)
            .ok_or(KyattoError::Overflow { lhs, rhs })?;
        self.set_duration(sum);
        Ok(())
    }

    /// Fails without touching `self` when `other` is later than `self`.
    pub fn subtract_timestamp(&mut self, other: AssTimestamp) -> Result<()> {
        let (minuend, subtrahend) = (self.checked_duration()?, other.checked_duration()?);
        let difference = minuend.checked_sub(subtrahend).ok_or(KyattoError::Underflow {
            minuend,
            subtrahend,
        })?;
        self.set_duration(difference);
        Ok(())
    }

    pub fn divide_by_timestamp(&mut self, other: AssTimestamp) -> Result<()> {
        let divisor = other.checked_duration()?;
        self.divide_by_number(divisor)
    }

    pub fn divide_by_number(&mut self, value: u64) -> Result<()> {
        let quotient = self
            .checked_duration()?
            .checked_div(value)
            .ok_or(KyattoError::DivisionByZero)?;
        self.set_duration(quotient);
        Ok(())
    }

    /// Total centiseconds.
    ///
    /// # Panics
    ///
    /// If the fields add up to more than `u64::MAX`, which only fields set by
    /// hand can do. See `checked_duration`.
    pub fn duration(&self) -> u64 {
        match self.checked_duration() {
            Ok(duration) => duration,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn checked_duration(&self) -> Result<u64> {
        self.hours
            .checked_mul(CS_PER_HOUR)
            .and_then(|cs| cs.checked_add(self.minutes.checked_mul(CS_PER_MINUTE)?))
            .and_then(|cs| cs.checked_add(self.seconds.checked_mul(CS_PER_SECOND)?))
            .and_then(|cs| cs.checked_add(self.centiseconds))
            .ok_or_else(|| KyattoError::FieldOverflow(self.to_string()))
    }

    // Wide enough for any field values.
    fn wide_duration(&self) -> u128 {
        u128::from(self.hours) * u128::from(CS_PER_HOUR)
            + u128::from(self.minutes) * u128::from(CS_PER_MINUTE)
            + u128::from(self.seconds) * u128::from(CS_PER_SECOND)
            + u128::from(self.centiseconds)
    }

    pub fn set_duration(&mut self, duration: u64) {
        self.set_hours((duration / CS_PER_HOUR) % 24);
        self.set_minutes((duration / CS_PER_MINUTE) % 60);
        self.set_seconds((duration / CS_PER_SECOND) % 60);
        self.set_centiseconds(duration % CS_PER_SECOND);
    }

    pub fn formatted_string(&self) -> String {
        self.to_string()
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn centiseconds(&self) -> u64 {
        self.centiseconds
    }

    pub fn set_hours(&mut self, hours: u64) {
        self.hours = hours;
    }

    pub fn set_minutes(&mut self, minutes: u64) {
        self.minutes = minutes;
    }

    pub fn set_seconds(&mut self, seconds: u64) {
        self.seconds = seconds;
    }

    pub fn set_centiseconds(&mut self, centiseconds: u64) {
        self.centiseconds = centiseconds;
    }
}

fn field(input: &str) -> IResult<&str, u64, VerboseError<&str>> {
    all_consuming(map_res(digit1, |s: &str| s.parse()))(input)
}

fn parse_field(input: &str, token: &str) -> Result<u64> {
    match field(token) {
        Ok((_, value)) => Ok(value),
        Err(NomErr::Error(err)) | Err(NomErr::Failure(err)) => {
            debug!("Rejected field '{}' of timestamp '{}'", token, input);
            Err(KyattoError::ParseError(format!(
                "Invalid timestamp '{}': '{}' is not an unsigned decimal number\n{}",
                input,
                token,
                convert_error(token, err)
            )))
        }
        Err(NomErr::Incomplete(_)) => {
            unreachable!("Incomplete data received by non-streaming parser.")
        }
    }
}

impl Timestamp for AssTimestamp {
    fn duration(&self) -> u64 {
        AssTimestamp::duration(self)
    }

    fn set_duration(&mut self, duration: u64) {
        AssTimestamp::set_duration(self, duration)
    }

    fn formatted_string(&self) -> String {
        AssTimestamp::formatted_string(self)
    }
}

impl fmt::Display for AssTimestamp {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        // Hours are never padded, everything else always is.
        write!(
            fmt,
            "{}:{:02}:{:02}.{:02}",
            self.hours, self.minutes, self.seconds, self.centiseconds
        )
    }
}

impl FromStr for AssTimestamp {
    type Err = KyattoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

impl PartialEq for AssTimestamp {
    fn eq(&self, other: &Self) -> bool {
        self.wide_duration() == other.wide_duration()
    }
}

impl Eq for AssTimestamp {}

impl PartialOrd for AssTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AssTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.wide_duration().cmp(&other.wide_duration())
    }
}

impl Hash for AssTimestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.wide_duration().hash(state);
    }
}

impl AddAssign for AssTimestamp {
    fn add_assign(&mut self, rhs: AssTimestamp) {
        if let Err(err) = self.add_timestamp(rhs) {
            panic!("{}", err);
        }
    }
}

impl Add for AssTimestamp {
    type Output = AssTimestamp;

    fn add(self, rhs: AssTimestamp) -> AssTimestamp {
        let mut aux = self;
        aux += rhs;
        aux
    }
}

impl SubAssign for AssTimestamp {
    fn sub_assign(&mut self, rhs: AssTimestamp) {
        if let Err(err) = self.subtract_timestamp(rhs) {
            panic!("{}", err);
        }
    }
}

impl Sub for AssTimestamp {
    type Output = AssTimestamp;

    fn sub(self, rhs: AssTimestamp) -> AssTimestamp {
        let mut aux = self;
        aux -= rhs;
        aux
    }
}

impl DivAssign for AssTimestamp {
    fn div_assign(&mut self, rhs: AssTimestamp) {
        if let Err(err) = self.divide_by_timestamp(rhs) {
            panic!("{}", err);
        }
    }
}

impl Div for AssTimestamp {
    type Output = AssTimestamp;

    fn div(self, rhs: AssTimestamp) -> AssTimestamp {
        let mut aux = self;
        aux /= rhs;
        aux
    }
}

impl DivAssign<u64> for AssTimestamp {
    fn div_assign(&mut self, rhs: u64) {
        if let Err(err) = self.divide_by_number(rhs) {
            panic!("{}", err);
        }
    }
}

impl Div<u64> for AssTimestamp {
    type Output = AssTimestamp;

    fn div(self, rhs: u64) -> AssTimestamp {
        let mut aux = self;
        aux /= rhs;
        aux
    }
}
