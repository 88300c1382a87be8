// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `backend` section model.

use super::balance::{build_balance, build_hash_type};
use super::base::build_base;
use super::cookie::build_cookie;
use super::error::Result;
use super::server::{build_server, build_server_template};
use super::timeouts::{build_timeouts, duration_millis};
use crate::constants::{ENABLED, REDISPATCH_INTERVAL};
use crate::crd::{BackendOptions, BackendSpec};
use crate::haproxy::model::{BackendModel, BaseModel, RedispatchModel};
use crate::haproxy::paths::PathResolver;
use crate::haproxy::types::SectionKind;
use crate::haproxy::units::enable_token;
use tracing::debug;

/// Build the model of a `Backend` resource.
///
/// # Errors
///
/// Returns the first structural omission or invariant violation found.
pub fn build_backend(name: &str, spec: &BackendSpec, paths: &PathResolver) -> Result<BackendModel> {
    let mut base = build_base(&spec.base, paths)?;
    base.timeouts = build_timeouts(&spec.base.timeouts, SectionKind::Backend)?;
    build_backend_model(name, base, &spec.options, paths)
}

/// Add the backend options to an already built base.
///
/// `checkTimeout` is applied first so a `check` entry in the timeout map wins.
///
/// # Errors
///
/// Returns the first error of any option, server or server template.
pub fn build_backend_model(
    name: &str,
    mut base: BaseModel,
    options: &BackendOptions,
    paths: &PathResolver,
) -> Result<BackendModel> {
    if base.timeouts.check.is_none() {
        base.timeouts.check = options
            .check_timeout
            .as_deref()
            .map(|value| duration_millis("checkTimeout", value))
            .transpose()?;
    }

    let mut model = BackendModel {
        name: name.to_string(),
        base,
        balance: options.balance.as_ref().map(build_balance).transpose()?,
        hash_type: options.hash_type.as_ref().map(build_hash_type).transpose()?,
        redispatch: options
            .redispatch
            .unwrap_or(false)
            .then_some(RedispatchModel {
                enabled: ENABLED,
                interval: REDISPATCH_INTERVAL,
            }),
        http_pretend_keepalive: enable_token(options.http_pretend_keepalive),
        ..Default::default()
    };

    if let Some(cookie) = &options.cookie {
        let (cookie, dynamic_cookie_key) = build_cookie(cookie)?;
        model.cookie = Some(cookie);
        model.dynamic_cookie_key = dynamic_cookie_key;
    }

    model.servers = options
        .servers
        .iter()
        .enumerate()
        .map(|(index, server)| build_server(server, &format!("servers[{index}]"), paths))
        .collect::<Result<_>>()?;

    model.server_templates = options
        .server_templates
        .iter()
        .enumerate()
        .map(|(index, template)| {
            build_server_template(template, &format!("serverTemplates[{index}]"), paths)
        })
        .collect::<Result<_>>()?;

    debug!(
        backend = %name,
        servers = model.servers.len(),
        server_templates = model.server_templates.len(),
        "Built backend model"
    );
    Ok(model)
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod backend_tests;
