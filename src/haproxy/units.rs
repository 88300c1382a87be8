// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Small conversions between resource fields and data model fields.

use crate::constants::ENABLED;

/// Map a boolean option onto the data model's enable token.
///
/// `Some(true)` becomes [`ENABLED`]; `Some(false)` and `None` both omit the setting
/// entirely instead of emitting a "disabled" value.
#[must_use]
pub fn enable_token(value: Option<bool>) -> Option<&'static str> {
    value.unwrap_or(false).then_some(ENABLED)
}

/// Same as [`enable_token`] for fields that are plain booleans.
#[must_use]
pub fn flag(value: bool) -> Option<&'static str> {
    enable_token(Some(value))
}

/// Join a list with `separator`, or `None` when the list is empty.
#[must_use]
pub fn join(values: &[String], separator: &str) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(separator))
    }
}

/// Treat an empty string as an unset field.
#[must_use]
pub fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
