// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Load balancing algorithm and hash type.

use super::error::{single_line, CompileError, Result};
use crate::crd::{Balance, HashType};
use crate::haproxy::model::{BalanceModel, HashTypeModel};
use crate::haproxy::types::{BalanceAlgorithm, HashFunction, HashMethod, HashModifier};
use crate::haproxy::units::non_empty;
use std::str::FromStr;

/// Build `balance`. The algorithm is lower-cased; arguments such as `hdr(host)` or
/// `url_param userid` are kept and only the base name is checked.
///
/// # Errors
///
/// Returns [`CompileError::MissingField`] for an empty algorithm and
/// [`CompileError::InvalidValue`] for an unknown one.
pub fn build_balance(balance: &Balance) -> Result<BalanceModel> {
    let algorithm = single_line("balance.algorithm", balance.algorithm.trim())?.to_lowercase();
    if algorithm.is_empty() {
        return Err(CompileError::missing("balance.algorithm"));
    }

    let base = algorithm
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    base.parse::<BalanceAlgorithm>().map_err(|err| {
        CompileError::invalid("balance.algorithm", &balance.algorithm, err.to_string())
    })?;

    Ok(BalanceModel { algorithm })
}

/// Build `hash-type`.
///
/// # Errors
///
/// Returns [`CompileError::MissingField`] without a method and
/// [`CompileError::InvalidValue`] for any unknown token.
pub fn build_hash_type(hash_type: &HashType) -> Result<HashTypeModel> {
    let method = non_empty(&hash_type.method)
        .ok_or_else(|| CompileError::missing("hashType.method"))
        .and_then(|value| token::<HashMethod>("hashType.method", value))?;

    Ok(HashTypeModel {
        method,
        function: non_empty(&hash_type.function)
            .map(|value| token::<HashFunction>("hashType.function", value))
            .transpose()?,
        modifier: non_empty(&hash_type.modifier)
            .map(|value| token::<HashModifier>("hashType.modifier", value))
            .transpose()?,
    })
}

/// Parse a closed token, naming `field` on failure.
pub(crate) fn token<T>(field: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: ToString,
{
    value
        .parse::<T>()
        .map_err(|err| CompileError::invalid(field, value, err.to_string()))
}

#[cfg(test)]
#[path = "balance_tests.rs"]
mod balance_tests;
