// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Cookie-based persistence.
//!
//! The cookie name is never emitted as written: it is replaced by its MD5 digest so the
//! configuration does not leak resource naming to clients. The same digest doubles as
//! the dynamic cookie key when dynamic cookies are requested.

use super::error::{single_line, CompileError, Result};
use crate::crd::{Cookie, CookieMode};
use crate::haproxy::hash::md5_hex;
use crate::haproxy::model::CookieModel;
use crate::haproxy::types::CookieType;

/// Collapse the mode flags into at most one [`CookieType`].
///
/// # Errors
///
/// Returns [`CompileError::ExclusiveCookieMode`] when two or more flags are set.
pub fn cookie_type(mode: &CookieMode) -> Result<Option<CookieType>> {
    let selected: Vec<CookieType> = [
        (mode.rewrite, CookieType::Rewrite),
        (mode.insert, CookieType::Insert),
        (mode.prefix, CookieType::Prefix),
    ]
    .into_iter()
    .filter_map(|(set, cookie_type)| set.then_some(cookie_type))
    .collect();

    match selected.as_slice() {
        [] => Ok(None),
        [single] => Ok(Some(*single)),
        _ => Err(CompileError::ExclusiveCookieMode {
            modes: selected.iter().map(|mode| mode.as_str()).collect(),
        }),
    }
}

/// Build the `cookie` directive and, for dynamic cookies, the `dynamic-cookie-key`.
///
/// # Errors
///
/// Returns [`CompileError::MissingField`] for an empty name,
/// [`CompileError::InvalidValue`] for a domain or attribute spanning more than one
/// line and [`CompileError::ExclusiveCookieMode`] for ambiguous modes.
pub fn build_cookie(cookie: &Cookie) -> Result<(CookieModel, Option<String>)> {
    if cookie.name.is_empty() {
        return Err(CompileError::missing("cookie.name"));
    }

    let name = md5_hex(&cookie.name);
    let dynamic = cookie.dynamic.unwrap_or(false);

    let model = CookieModel {
        name: name.clone(),
        domains: single_lines("cookie.domain", &cookie.domain)?,
        attrs: single_lines("cookie.attribute", &cookie.attribute)?,
        dynamic,
        httponly: cookie.http_only.unwrap_or(false),
        indirect: cookie.indirect.unwrap_or(false),
        maxidle: cookie.max_idle,
        maxlife: cookie.max_life,
        nocache: cookie.no_cache.unwrap_or(false),
        postonly: cookie.post_only.unwrap_or(false),
        preserve: cookie.preserve.unwrap_or(false),
        cookie_type: cookie_type(&cookie.mode)?,
        secure: cookie.secure.unwrap_or(false),
    };

    Ok((model, dynamic.then_some(name)))
}

fn single_lines(field: &str, values: &[String]) -> Result<Vec<String>> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| single_line(&format!("{field}[{index}]"), value).map(str::to_string))
        .collect()
}

#[cfg(test)]
#[path = "cookie_tests.rs"]
mod cookie_tests;
