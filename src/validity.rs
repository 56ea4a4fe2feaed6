//! Validity period encoding for outbound messages.
//!
//! The relative format squeezes anything from five minutes to 63 weeks into one octet, with the
//! granularity getting coarser as the period gets longer. The absolute format is a 7-octet
//! timestamp, one semi-octet-swapped pair of decimal digits per field, ending in a signed
//! timezone offset in quarter-hours.
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Datelike, Timelike, Offset, TimeZone};
use nom::IResult;
use crate::errors::*;

named!(two_digits(&[u8]) -> u32,
       map_res!(
           count!(one_of!("0123456789"), 2),
           |data: Vec<char>| {
               let st: String = data.into_iter().collect();
               st.parse::<u32>()
           }
       )
);
named!(timezone_label(&[u8]) -> (char, u32, u32),
       do_parse!(
           sign: one_of!("+-") >>
           hours: two_digits >>
           minutes: two_digits >>
           eof!() >>
           (sign, hours, minutes)
       )
);

/// Parse a timezone label of the form `+HHMM` or `-HHMM`. An empty label means UTC.
pub fn parse_timezone(label: &str) -> GsmResult<FixedOffset> {
    let secs = if label.is_empty() {
        0
    }
    else {
        let (sign, hours, minutes) = match timezone_label(label.as_bytes()) {
            IResult::Done(_, x) => x,
            _ => return Err(GsmError::InvalidTimezone(label.into()))
        };
        let secs = ((hours * 60 + minutes) * 60) as i32;
        if sign == '-' { -secs } else { secs }
    };
    FixedOffset::east_opt(secs)
        .ok_or_else(|| GsmError::InvalidTimezone(label.into()))
}

/// Encode a duration in the relative validity period format.
///
/// Durations are rounded down to the granularity of the band they fall in; a duration exactly on
/// a band boundary uses the finer band.
pub fn relative_validity(t: Duration) -> GsmResult<u8> {
    if t < Duration::minutes(5) {
        return Err(GsmError::OutOfRange("minimum validity period is five minutes"));
    }
    if t > Duration::weeks(63) {
        return Err(GsmError::OutOfRange("maximum validity period is 63 weeks"));
    }
    let ret = if t <= Duration::hours(12) {
        t.num_seconds() / (60 * 5) - 1
    }
    else if t <= Duration::hours(24) {
        (t - Duration::hours(12)).num_seconds() / (60 * 30) + 143
    }
    else if t <= Duration::days(30) {
        t.num_days() + 166
    }
    else {
        t.num_days() / 7 + 192
    };
    Ok(ret as u8)
}

fn swap_digits(v: u8) -> u8 {
    ((v % 10) << 4) | (v / 10)
}
fn reverse_byte(b: u8) -> u8 {
    let units = b >> 4;
    let tens = b & 0b0000_1111;
    (tens * 10) + units
}
/// Encode a timestamp in the absolute validity period format.
pub fn absolute_validity<Tz: TimeZone>(d: &DateTime<Tz>) -> [u8; 7] {
    let offset = d.offset().fix().local_minus_utc();
    // one unit is 15 minutes
    let mut tz = swap_digits((offset.abs() / (60 * 15)) as u8);
    if offset < 0 {
        tz |= 0b0000_1000;
    }
    [
        swap_digits(d.year().rem_euclid(100) as u8),
        swap_digits(d.month() as u8),
        swap_digits(d.day() as u8),
        swap_digits(d.hour() as u8),
        swap_digits(d.minute() as u8),
        swap_digits(d.second() as u8),
        tz
    ]
}
/// Encode a local time in the absolute validity period format, taking the offset from a label
/// like `+0330` (see `parse_timezone`).
pub fn absolute_validity_from_label(local: &NaiveDateTime, label: &str) -> GsmResult<[u8; 7]> {
    let offset = parse_timezone(label)?;
    let d = offset.from_local_datetime(local)
        .single()
        .ok_or(GsmError::InvalidTimestamp("ambiguous local time"))?;
    Ok(absolute_validity(&d))
}
/// Decode a timestamp in the absolute validity period (or service centre timestamp) format.
///
/// Two-digit years are taken to be in the 2000s.
pub fn decode_absolute_validity(b: &[u8]) -> GsmResult<DateTime<FixedOffset>> {
    if b.len() != 7 {
        return Err(GsmError::InvalidTimestamp("timestamp must be 7 bytes long"));
    }
    let naive = NaiveDate::from_ymd_opt(2000 + reverse_byte(b[0]) as i32,
                                        reverse_byte(b[1]) as u32,
                                        reverse_byte(b[2]) as u32)
        .and_then(|d| d.and_hms_opt(reverse_byte(b[3]) as u32,
                                    reverse_byte(b[4]) as u32,
                                    reverse_byte(b[5]) as u32))
        .ok_or(GsmError::InvalidTimestamp("date or time out of range"))?;
    let quarters = reverse_byte(b[6] & 0b1111_0111) as i32;
    let quarters = if b[6] & 0b0000_1000 > 0 { -quarters } else { quarters };
    let secs = quarters * 60 * 15;
    let offset = FixedOffset::east_opt(secs)
        .ok_or(GsmError::InvalidTimestamp("timezone out of range"))?;
    offset.from_local_datetime(&naive)
        .single()
        .ok_or(GsmError::InvalidTimestamp("ambiguous local time"))
}

/// A validity period, in whichever format it's to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidityPeriod {
    Relative(Duration),
    Absolute(DateTime<FixedOffset>)
}
impl ValidityPeriod {
    /// Serialize this validity period to wire format (one octet, or seven).
    pub fn as_bytes(&self) -> GsmResult<Vec<u8>> {
        match *self {
            ValidityPeriod::Relative(t) => Ok(vec![relative_validity(t)?]),
            ValidityPeriod::Absolute(ref d) => Ok(absolute_validity(d).to_vec())
        }
    }
}
