// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `frontend` section model.

use super::base::build_base;
use super::error::{single_line, Result};
use super::rules::build_backend_switching;
use super::server::build_bind;
use super::timeouts::build_timeouts;
use crate::crd::{Bind, FrontendSpec};
use crate::haproxy::model::{BindModel, FrontendModel};
use crate::haproxy::paths::PathResolver;
use crate::haproxy::types::SectionKind;
use tracing::debug;

/// Build the model of a `Frontend` resource.
///
/// # Errors
///
/// Returns the first structural omission or invariant violation found.
pub fn build_frontend(
    name: &str,
    spec: &FrontendSpec,
    paths: &PathResolver,
) -> Result<FrontendModel> {
    let mut base = build_base(&spec.base, paths)?;
    base.timeouts = build_timeouts(&spec.base.timeouts, SectionKind::Frontend)?;

    let model = FrontendModel {
        name: name.to_string(),
        base,
        binds: build_binds(&spec.binds, paths)?,
        backend_switching: build_backend_switching(&spec.backend_switching)?,
        default_backend: spec
            .default_backend
            .as_ref()
            .map(|reference| {
                single_line("defaultBackend.name", &reference.name).map(str::to_string)
            })
            .transpose()?,
    };

    debug!(frontend = %name, binds = model.binds.len(), "Built frontend model");
    Ok(model)
}

/// Binds in input order.
///
/// # Errors
///
/// Returns the first bind error.
pub fn build_binds(binds: &[Bind], paths: &PathResolver) -> Result<Vec<BindModel>> {
    binds
        .iter()
        .enumerate()
        .map(|(index, bind)| build_bind(bind, &format!("binds[{index}]"), paths))
        .collect()
}

#[cfg(test)]
#[path = "frontend_tests.rs"]
mod frontend_tests;
