// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Duration parsing for Go-style duration strings.
//!
//! Kubernetes serializes `metav1.Duration` values in Go format (e.g., "30s", "1h0m0s",
//! "1.5s", "250ms"). This module parses them into Rust `std::time::Duration` and
//! converts them to the whole milliseconds HAProxy timeouts expect.

use anyhow::{bail, Context, Result};
use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Fraction digits beyond this are dropped; they are below nanosecond precision.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parse a Go-style duration string into a Rust `Duration`.
///
/// A duration is a sequence of decimal numbers, each with an optional fraction and a
/// unit suffix. Supported units:
/// - `ns`, `us` (or `µs`), `ms`
/// - `s`, `m`, `h`
///
/// The bare string `"0"` is accepted without a unit, as in Go.
///
/// # Examples
///
/// ```
/// use haproxy_operator::haproxy::duration::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
/// assert_eq!(parse_duration("1h0m0s").unwrap(), Duration::from_secs(3600));
/// assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
///
/// assert!(parse_duration("").is_err());
/// assert!(parse_duration("10").is_err());  // Missing unit
/// assert!(parse_duration("10x").is_err()); // Invalid unit
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The string is empty or negative
/// - A number is missing its unit, or a unit its number
/// - A unit is not recognised
/// - The total does not fit in a `Duration`
pub fn parse_duration(duration_str: &str) -> Result<Duration> {
    if duration_str.is_empty() {
        bail!("Duration string cannot be empty");
    }

    if duration_str.starts_with('-') {
        bail!("Duration '{duration_str}' must not be negative");
    }

    let mut rest = duration_str.strip_prefix('+').unwrap_or(duration_str);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        // Find where the number ends and the unit begins
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .with_context(|| {
                format!("Duration '{duration_str}' must end with a unit (ns, us, ms, s, m, h)")
            })?;
        if number_len == 0 {
            bail!("Duration '{duration_str}' has a unit without a value");
        }
        let (number, tail) = rest.split_at(number_len);

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        let unit_nanos = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SECOND,
            "m" => NANOS_PER_MINUTE,
            "h" => NANOS_PER_HOUR,
            _ => bail!(
                "Unsupported duration unit '{unit}' in '{duration_str}'. Use ns, us, ms, s, m or h"
            ),
        };

        let nanos = scale(number, unit_nanos)
            .with_context(|| format!("Invalid duration '{duration_str}'"))?;
        total_nanos = total_nanos
            .checked_add(nanos)
            .context("Duration value too large (overflow)")?;

        rest = tail;
    }

    let seconds = u64::try_from(total_nanos / NANOS_PER_SECOND)
        .context("Duration value too large (overflow)")?;
    let subsec_nanos = u32::try_from(total_nanos % NANOS_PER_SECOND)
        .context("Duration value too large (overflow)")?;

    Ok(Duration::new(seconds, subsec_nanos))
}

/// Convert a duration to whole milliseconds, truncating any remainder.
///
/// # Errors
///
/// Returns an error if the value does not fit in an `i64`.
pub fn to_millis(duration: Duration) -> Result<i64> {
    i64::try_from(duration.as_millis())
        .context("Duration is too large to express in milliseconds")
}

/// Multiply a decimal number such as `1.5` by a unit expressed in nanoseconds.
fn scale(number: &str, unit_nanos: u128) -> Result<u128> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        bail!("'{number}' is not a number");
    }
    if fraction.contains('.') {
        bail!("'{number}' has more than one decimal point");
    }

    let whole_value: u128 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .with_context(|| format!("'{whole}' is not a valid integer"))?
    };
    let mut nanos = whole_value
        .checked_mul(unit_nanos)
        .context("Duration value too large (overflow)")?;

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if !fraction.is_empty() {
        let fraction_value: u128 = fraction
            .parse()
            .with_context(|| format!("'{fraction}' is not a valid fraction"))?;
        let divisor = 10_u128.pow(u32::try_from(fraction.len())?);
        nanos = nanos
            .checked_add(fraction_value * unit_nanos / divisor)
            .context("Duration value too large (overflow)")?;
    }

    Ok(nanos)
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod duration_tests;
