// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Content hashing for generated identifiers.
//!
//! Cookie names, dynamic cookie keys and per-server cookie values are derived from
//! user input with MD5. The digest never depends on the host or on randomness, so
//! recompiling the same resource always yields the same configuration.

use md5::{Digest, Md5};

/// Hash a string with MD5 and render it as 32 lowercase hex characters.
///
/// # Example
///
/// ```rust
/// use haproxy_operator::haproxy::hash::md5_hex;
///
/// assert_eq!(md5_hex("cookie_name"), "e3cb9741ffde596f46710a5d7e3ec587");
/// ```
#[must_use]
pub fn md5_hex(data: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}
