// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `Listen` resources: a frontend and a backend sharing one name.
//!
//! The frontend receives the binds, rules, error files and client side timeouts, and
//! routes everything to the backend. The backend receives the mode, the backend
//! options and the timeouts only a backend accepts.

use super::backend::build_backend_model;
use super::base::{build_base, build_mode};
use super::error::Result;
use super::frontend::build_binds;
use super::timeouts::split_listen_timeouts;
use crate::crd::ListenSpec;
use crate::haproxy::model::{BaseModel, BackendModel, FrontendModel};
use crate::haproxy::paths::PathResolver;

/// Build the frontend and backend models of a `Listen` resource.
///
/// # Errors
///
/// Returns the first structural omission or invariant violation found in either half.
pub fn build_listen(
    name: &str,
    spec: &ListenSpec,
    paths: &PathResolver,
) -> Result<(FrontendModel, BackendModel)> {
    let (frontend_timeouts, backend_timeouts) = split_listen_timeouts(&spec.base.timeouts)?;

    let mut frontend_base = build_base(&spec.base, paths)?;
    frontend_base.timeouts = frontend_timeouts;

    let frontend = FrontendModel {
        name: name.to_string(),
        base: frontend_base,
        binds: build_binds(&spec.binds, paths)?,
        backend_switching: Vec::new(),
        default_backend: Some(name.to_string()),
    };

    let backend_base = BaseModel {
        mode: build_mode(&spec.base.mode)?,
        timeouts: backend_timeouts,
        ..Default::default()
    };
    let backend = build_backend_model(name, backend_base, &spec.options, paths)?;

    Ok((frontend, backend))
}

#[cfg(test)]
#[path = "listen_tests.rs"]
mod listen_tests;
