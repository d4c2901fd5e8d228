//! Canonical text forms for scalars.
//!
//! These are shared by rendering, by [`Property::as_string_array`](crate::Property::as_string_array)
//! and by the decoder when a scalar arrives as bare text.

use crate::error::PropertyError;
use crate::kind::PropertyType;
use chrono::{DateTime, FixedOffset, TimeDelta, Timelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Fractional digits used for floats and decimals.
pub const DECIMAL_PLACES: u32 = 6;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// The Unix epoch in UTC, used when an instant is absent.
pub fn epoch() -> DateTime<FixedOffset> {
    DateTime::<Utc>::UNIX_EPOCH.fixed_offset()
}

/// RFC-3339 with up to nine fractional digits, trailing zeros trimmed.
pub fn format_datetime(dt: &DateTime<FixedOffset>) -> String {
    let mut out = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = dt.nanosecond() % 1_000_000_000;
    if nanos != 0 {
        let digits = format!("{nanos:09}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    if dt.offset().local_minus_utc() == 0 {
        out.push('Z');
    } else {
        out.push_str(&dt.format("%:z").to_string());
    }
    out
}

/// Parse any RFC-3339 instant, keeping its offset.
pub fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>, PropertyError> {
    DateTime::parse_from_rfc3339(s).map_err(|e| PropertyError::parse(PropertyType::DateTime, s, e))
}

fn total_nanos(d: TimeDelta) -> i128 {
    i128::from(d.num_seconds()) * NANOS_PER_SEC as i128 + i128::from(d.subsec_nanos())
}

/// Short span form: `1h0m0s`, `1.5s`, `250ms`, `0s`.
pub fn format_duration(d: TimeDelta) -> String {
    let total = total_nanos(d);
    if total == 0 {
        return "0s".to_owned();
    }
    let mut out = String::new();
    if total < 0 {
        out.push('-');
    }
    let u = total.unsigned_abs();

    if u < NANOS_PER_SEC {
        let (scale, unit) = if u < NANOS_PER_MICRO {
            (1, "ns")
        } else if u < NANOS_PER_MILLI {
            (NANOS_PER_MICRO, "µs")
        } else {
            (NANOS_PER_MILLI, "ms")
        };
        out.push_str(&(u / scale).to_string());
        out.push_str(&fraction(u % scale, scale));
        out.push_str(unit);
        return out;
    }

    let secs = u / NANOS_PER_SEC;
    if u >= NANOS_PER_HOUR {
        out.push_str(&format!("{}h", secs / 3600));
    }
    if u >= NANOS_PER_MINUTE {
        out.push_str(&format!("{}m", (secs / 60) % 60));
    }
    out.push_str(&(secs % 60).to_string());
    out.push_str(&fraction(u % NANOS_PER_SEC, NANOS_PER_SEC));
    out.push('s');
    out
}

// `.5` for 500 of 1000; empty when there is no remainder.
fn fraction(rem: u128, scale: u128) -> String {
    if rem == 0 {
        return String::new();
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{rem:0width$}");
    format!(".{}", digits.trim_end_matches('0'))
}

/// Parse the short span form, e.g. `-1h30m`, `1.5s`, `300ms`, `0`.
pub fn parse_duration(input: &str) -> Result<TimeDelta, PropertyError> {
    let fail = |message: &str| PropertyError::parse(PropertyType::Duration, input, message);

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(fail("invalid duration"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (whole, tail) = rest.split_at(int_len);
        rest = tail;

        let mut frac = "";
        if let Some(tail) = rest.strip_prefix('.') {
            let frac_len = tail.bytes().take_while(u8::is_ascii_digit).count();
            frac = &tail[..frac_len];
            rest = &tail[frac_len..];
        }
        if whole.is_empty() && frac.is_empty() {
            return Err(fail("invalid duration"));
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, tail) = rest.split_at(unit_len);
        rest = tail;
        let scale = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SEC,
            "m" => NANOS_PER_MINUTE,
            "h" => NANOS_PER_HOUR,
            "" => return Err(fail("missing unit in duration")),
            _ => return Err(fail("unknown unit in duration")),
        };

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| fail("invalid duration"))?
        };
        let mut nanos = whole
            .checked_mul(scale)
            .ok_or_else(|| fail("invalid duration"))?;
        if !frac.is_empty() {
            // Beyond 18 digits nothing survives the nanosecond resolution.
            let frac = &frac[..frac.len().min(18)];
            let numerator: u128 = frac.parse().map_err(|_| fail("invalid duration"))?;
            nanos += numerator * scale / 10u128.pow(frac.len() as u32);
        }
        total = total
            .checked_add(nanos)
            .filter(|t| *t <= i64::MAX as u128 + u128::from(negative))
            .ok_or_else(|| fail("invalid duration"))?;
    }

    let signed = if negative {
        -(total as i128)
    } else {
        total as i128
    };
    i64::try_from(signed)
        .map(TimeDelta::nanoseconds)
        .map_err(|_| fail("invalid duration"))
}

/// Accepts `1 t T TRUE true True 0 f F FALSE false False`.
pub fn parse_bool(s: &str) -> Result<bool, PropertyError> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(PropertyError::parse(PropertyType::Bool, s, "invalid syntax")),
    }
}

/// Six fractional digits, rounding half away from zero.
pub fn format_decimal(d: &Decimal) -> String {
    let mut rounded =
        d.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    format!("{rounded:.6}")
}

/// Plain (`12.5`) or scientific (`1.25e1`) decimal text.
pub fn parse_decimal(s: &str) -> Result<Decimal, PropertyError> {
    Decimal::from_str(s)
        .or_else(|e| {
            if s.contains(['e', 'E']) {
                Decimal::from_scientific(s)
            } else {
                Err(e)
            }
        })
        .map_err(|e| PropertyError::parse(PropertyType::Decimal, s, e))
}

/// Six fractional digits.
pub fn format_float(v: f64) -> String {
    format!("{v:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn duration_short_form() {
        let cases = [
            (TimeDelta::zero(), "0s"),
            (TimeDelta::nanoseconds(1), "1ns"),
            (TimeDelta::nanoseconds(1_100), "1.1µs"),
            (TimeDelta::milliseconds(250), "250ms"),
            (TimeDelta::milliseconds(1_500), "1.5s"),
            (TimeDelta::minutes(1), "1m0s"),
            (TimeDelta::hours(1), "1h0m0s"),
            (TimeDelta::seconds(3_723), "1h2m3s"),
            (TimeDelta::seconds(-90), "-1m30s"),
            (TimeDelta::hours(50), "50h0m0s"),
        ];
        for (d, want) in cases {
            assert_eq!(format_duration(d), want);
        }
    }

    #[test]
    fn duration_parses_its_own_output() {
        for nanos in [0i64, 1, 999, 1_500, 2_000_000, 61_000_000_000, -3_600_000_000_001] {
            let d = TimeDelta::nanoseconds(nanos);
            assert_eq!(parse_duration(&format_duration(d)).unwrap(), d);
        }
    }

    #[test]
    fn duration_parse_forms() {
        assert_eq!(parse_duration("1h30m").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_duration("+5s").unwrap(), TimeDelta::seconds(5));
        assert_eq!(parse_duration("1.5h").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_duration(".5s").unwrap(), TimeDelta::milliseconds(500));
        assert_eq!(parse_duration("3us").unwrap(), TimeDelta::microseconds(3));
        assert_eq!(parse_duration("-0").unwrap(), TimeDelta::zero());
    }

    #[test]
    fn duration_parse_rejects_garbage() {
        for bad in ["", "-", "1", "1x", "s", "1h.m", "9999999999999h"] {
            assert!(
                matches!(parse_duration(bad), Err(PropertyError::Parse { .. })),
                "{bad:?} should fail"
            );
        }
    }

    #[test]
    fn datetime_trims_fraction_and_keeps_offset() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let dt = utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(format_datetime(&dt), "2021-03-04T05:06:07Z");

        let dt = dt + TimeDelta::milliseconds(500);
        assert_eq!(format_datetime(&dt), "2021-03-04T05:06:07.5Z");

        let plus2 = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = plus2.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap() + TimeDelta::nanoseconds(1);
        let text = format_datetime(&dt);
        assert_eq!(text, "2021-03-04T05:06:07.000000001+02:00");
        let back = parse_datetime(&text).unwrap();
        assert_eq!(back, dt);
        assert_eq!(back.offset(), dt.offset());
    }

    #[test]
    fn epoch_renders_as_utc() {
        assert_eq!(format_datetime(&epoch()), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn bools() {
        assert!(parse_bool("T").unwrap());
        assert!(!parse_bool("False").unwrap());
        assert!(parse_bool("yes").is_err());
    }

    #[test]
    fn decimals_round_half_away_from_zero() {
        assert_eq!(format_decimal(&Decimal::new(125, 1)), "12.500000");
        assert_eq!(format_decimal(&Decimal::new(-10_000_005, 7)), "-1.000001");
        assert_eq!(format_decimal(&Decimal::new(-1, 8)), "0.000000");
        assert_eq!(parse_decimal("1.25e1").unwrap(), Decimal::new(125, 1));
        assert!(parse_decimal("twelve").is_err());
    }
}
