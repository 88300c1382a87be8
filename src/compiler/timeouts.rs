// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Timeout conversion.
//!
//! Resources carry timeouts as a map from HAProxy timeout name to a Go duration
//! string. Each key is looked up in [`TimeoutName`]; a key that is not a timeout, or
//! not a timeout of the target section kind, fails the whole section.

use super::error::{CompileError, Result};
use crate::haproxy::duration::{parse_duration, to_millis};
use crate::haproxy::model::Timeouts;
use crate::haproxy::types::{SectionKind, TimeoutName};
use std::collections::BTreeMap;
use tracing::debug;

/// Convert a Go duration string to whole milliseconds.
///
/// # Errors
///
/// Returns [`CompileError::InvalidDuration`] naming `field` when the string does not
/// parse or does not fit in milliseconds.
pub fn duration_millis(field: &str, value: &str) -> Result<i64> {
    parse_duration(value)
        .and_then(to_millis)
        .map_err(|err| CompileError::InvalidDuration {
            field: field.to_string(),
            value: value.to_string(),
            reason: format!("{err:#}"),
        })
}

/// Parse every entry of a timeout map, keys in sorted order.
fn parse_all(timeouts: &BTreeMap<String, String>) -> Result<Vec<(TimeoutName, i64)>> {
    timeouts
        .iter()
        .map(|(key, value)| {
            let name = key
                .parse::<TimeoutName>()
                .map_err(|_| CompileError::UnknownTimeout { name: key.clone() })?;
            let millis = duration_millis(&format!("timeouts.{key}"), value)?;
            Ok((name, millis))
        })
        .collect()
}

/// Build the timeouts of a single section of `kind`.
///
/// # Errors
///
/// Returns [`CompileError::UnknownTimeout`] for any key that is not a timeout of
/// `kind`, and [`CompileError::InvalidDuration`] for a malformed value.
pub fn build_timeouts(timeouts: &BTreeMap<String, String>, kind: SectionKind) -> Result<Timeouts> {
    let mut model = Timeouts::default();
    for (name, millis) in parse_all(timeouts)? {
        if !name.applies_to(kind) {
            return Err(CompileError::UnknownTimeout {
                name: name.to_string(),
            });
        }
        *model.slot_mut(name) = Some(millis);
    }
    debug!(kind = %kind, count = timeouts.len(), "Converted timeouts");
    Ok(model)
}

/// Split the timeouts of a `Listen` between its frontend and backend.
///
/// Timeouts valid in a frontend go to the frontend; the rest go to the backend.
///
/// # Errors
///
/// Same as [`build_timeouts`].
pub fn split_listen_timeouts(
    timeouts: &BTreeMap<String, String>,
) -> Result<(Timeouts, Timeouts)> {
    let mut frontend = Timeouts::default();
    let mut backend = Timeouts::default();
    for (name, millis) in parse_all(timeouts)? {
        if name.applies_to(SectionKind::Frontend) {
            *frontend.slot_mut(name) = Some(millis);
        } else {
            *backend.slot_mut(name) = Some(millis);
        }
    }
    Ok((frontend, backend))
}

#[cfg(test)]
#[path = "timeouts_tests.rs"]
mod timeouts_tests;
