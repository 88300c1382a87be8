// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Settings shared by every section kind.

use super::balance::token;
use super::error::Result;
use super::rules::{
    build_acls, build_error_files, build_forwardfor, build_http_request, build_http_response,
};
use crate::crd::BaseSpec;
use crate::haproxy::model::BaseModel;
use crate::haproxy::paths::PathResolver;
use crate::haproxy::types::Mode;
use crate::haproxy::units::non_empty;

/// Parse the proxy mode; an empty string leaves it unset.
///
/// # Errors
///
/// Fails for anything other than `http` or `tcp`.
pub fn build_mode(mode: &str) -> Result<Option<Mode>> {
    non_empty(mode)
        .map(|mode| token::<Mode>("mode", mode))
        .transpose()
}

/// Build the shared settings. Timeouts are left empty: where they go depends on the
/// section kind, so the caller places them.
///
/// # Errors
///
/// Returns the first error of the mode, error files, ACLs, forwardfor or rules.
pub fn build_base(spec: &BaseSpec, paths: &PathResolver) -> Result<BaseModel> {
    Ok(BaseModel {
        mode: build_mode(&spec.mode)?,
        timeouts: Default::default(),
        error_files: build_error_files(&spec.error_files, paths)?,
        forwardfor: build_forwardfor(spec.forwardfor.as_ref())?,
        acls: build_acls(&spec.acl)?,
        http_request: spec
            .http_request
            .as_ref()
            .map(|rules| build_http_request(rules, paths))
            .transpose()?
            .unwrap_or_default(),
        http_response: spec
            .http_response
            .as_ref()
            .map(build_http_response)
            .transpose()?
            .unwrap_or_default(),
    })
}
