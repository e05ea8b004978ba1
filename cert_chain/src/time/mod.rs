// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate validity periods.
//!
//! Both X.509 time encodings are accepted. UTCTime years 50-99 map to
//! 1950-1999 and 00-49 to 2000-2049 (RFC 5280); `der` applies that rule when
//! decoding, so comparisons here work on unix durations only.

use core::cmp::Ordering;
use core::fmt;
use core::time::Duration;

use der::{
    asn1::{GeneralizedTime, UtcTime},
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Tag, Writer,
};

use crate::error::{Error, Result, TimeError};

/// First instant that UTCTime cannot express (2050-01-01T00:00:00Z).
const UTC_TIME_LIMIT_SECS: u64 = 2_524_608_000;

/// A timestamp that can be either UTCTime or GeneralizedTime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Time {
    /// UTCTime format (YYMMDDHHMMSSZ)
    UtcTime(UtcTime),
    /// GeneralizedTime format (YYYYMMDDHHMMSSZ)
    GeneralizedTime(GeneralizedTime),
}

impl Time {
    /// Build a time from seconds since the epoch, using UTCTime through 2049
    /// and GeneralizedTime afterwards.
    pub fn from_unix_secs(secs: u64) -> Result<Self> {
        let duration = Duration::from_secs(secs);
        if secs < UTC_TIME_LIMIT_SECS {
            Ok(Time::UtcTime(UtcTime::from_unix_duration(duration)?))
        } else {
            Ok(Time::GeneralizedTime(GeneralizedTime::from_unix_duration(
                duration,
            )?))
        }
    }

    pub fn to_date_time(&self) -> der::DateTime {
        match self {
            Time::UtcTime(utc) => utc.to_date_time(),
            Time::GeneralizedTime(gen) => gen.to_date_time(),
        }
    }

    pub fn unix_duration(&self) -> Duration {
        self.to_date_time().unix_duration()
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unix_duration().cmp(&other.unix_duration())
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dt = self.to_date_time();
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minutes(),
            dt.seconds()
        )
    }
}

impl<'a> DecodeValue<'a> for Time {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        match header.tag {
            Tag::UtcTime => Ok(Time::UtcTime(UtcTime::decode_value(reader, header)?)),
            Tag::GeneralizedTime => Ok(Time::GeneralizedTime(GeneralizedTime::decode_value(
                reader, header,
            )?)),
            tag => Err(der::Error::from(der::ErrorKind::TagUnexpected {
                expected: Some(Tag::UtcTime),
                actual: tag,
            })),
        }
    }
}

impl<'a> Decode<'a> for Time {
    fn decode<R: Reader<'a>>(reader: &mut R) -> der::Result<Self> {
        let header = Header::decode(reader)?;
        Self::decode_value(reader, header)
    }
}

impl Encode for Time {
    fn encoded_len(&self) -> der::Result<Length> {
        match self {
            Time::UtcTime(utc) => utc.encoded_len(),
            Time::GeneralizedTime(gen) => gen.encoded_len(),
        }
    }

    fn encode(&self, writer: &mut impl Writer) -> der::Result<()> {
        match self {
            Time::UtcTime(utc) => utc.encode(writer),
            Time::GeneralizedTime(gen) => gen.encode(writer),
        }
    }
}

/// Certificate validity period.
///
/// ```text
/// Validity ::= SEQUENCE {
///     notBefore      Time,
///     notAfter       Time
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validity {
    pub not_before: Time,
    pub not_after: Time,
}

impl Validity {
    pub const fn new(not_before: Time, not_after: Time) -> Self {
        Validity {
            not_before,
            not_after,
        }
    }

    /// Check `at` against the period. Both bounds are inclusive.
    pub fn check_at(&self, at: &Time) -> Result<()> {
        if self.not_before > self.not_after {
            return Err(Error::Time(TimeError::InvalidValidityPeriod {
                not_before: alloc::format!("{}", self.not_before),
                not_after: alloc::format!("{}", self.not_after),
            }));
        }
        if at < &self.not_before {
            return Err(Error::Time(TimeError::NotYetValid));
        }
        if at > &self.not_after {
            return Err(Error::expired());
        }
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for Validity {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let not_before = Time::decode(reader)?;
            let not_after = Time::decode(reader)?;
            Ok(Validity {
                not_before,
                not_after,
            })
        })
    }
}

impl EncodeValue for Validity {
    fn value_len(&self) -> der::Result<Length> {
        self.not_before.encoded_len()? + self.not_after.encoded_len()?
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.not_before.encode(writer)?;
        self.not_after.encode(writer)?;
        Ok(())
    }
}

impl der::Sequence<'_> for Validity {}

/// Current wall-clock time.
pub fn current_time() -> Result<Time> {
    #[cfg(feature = "std")]
    {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|_| Error::Time(TimeError::ClockUnavailable))?;
        let now_dt = der::DateTime::from_unix_duration(now)?;
        Ok(Time::GeneralizedTime(GeneralizedTime::from_date_time(now_dt)))
    }

    #[cfg(not(feature = "std"))]
    {
        Err(Error::Time(TimeError::ClockUnavailable))
    }
}
