// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Loading configuration resources from YAML manifests.
//!
//! A manifest is a multi-document YAML stream, as accepted by `kubectl apply -f`.
//! Documents whose `apiVersion` is not `config.haproxy.com/v1alpha1` are skipped so
//! that manifests can mix in other Kubernetes objects; an unknown kind within this API
//! group is an error.

use crate::constants::{API_GROUP_VERSION, KIND_BACKEND, KIND_FRONTEND, KIND_LISTEN};
use crate::crd::{Backend, Frontend, Listen};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// One compilable resource.
#[derive(Clone, Debug)]
pub enum ConfigResource {
    Backend(Backend),
    Frontend(Frontend),
    Listen(Listen),
}

impl ConfigResource {
    /// Resource kind, as in the manifest.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Backend(_) => KIND_BACKEND,
            Self::Frontend(_) => KIND_FRONTEND,
            Self::Listen(_) => KIND_LISTEN,
        }
    }

    /// `metadata.name`, or an empty string when unset.
    #[must_use]
    pub fn name(&self) -> &str {
        let name = match self {
            Self::Backend(resource) => resource.metadata.name.as_deref(),
            Self::Frontend(resource) => resource.metadata.name.as_deref(),
            Self::Listen(resource) => resource.metadata.name.as_deref(),
        };
        name.unwrap_or_default()
    }
}

/// Parse every resource in a multi-document YAML string, in document order.
///
/// # Errors
///
/// Returns an error if a document is not valid YAML, has an unknown kind within the
/// configuration API group, or does not match its kind's schema.
pub fn parse_manifests(content: &str) -> Result<Vec<ConfigResource>> {
    let mut resources = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = serde_yaml::Value::deserialize(document)
            .with_context(|| format!("Document {index} is not valid YAML"))?;
        if value.is_null() {
            continue;
        }

        let api_version = value
            .get("apiVersion")
            .and_then(serde_yaml::Value::as_str)
            .unwrap_or_default();
        if api_version != API_GROUP_VERSION {
            debug!(document = index, api_version, "Skipping foreign document");
            continue;
        }

        let kind = value
            .get("kind")
            .and_then(serde_yaml::Value::as_str)
            .unwrap_or_default()
            .to_string();
        let resource = match kind.as_str() {
            KIND_BACKEND => ConfigResource::Backend(from_value(value, index, &kind)?),
            KIND_FRONTEND => ConfigResource::Frontend(from_value(value, index, &kind)?),
            KIND_LISTEN => ConfigResource::Listen(from_value(value, index, &kind)?),
            other => bail!("Document {index} has unsupported kind '{other}'"),
        };
        resources.push(resource);
    }

    Ok(resources)
}

fn from_value<T: serde::de::DeserializeOwned>(
    value: serde_yaml::Value,
    index: usize,
    kind: &str,
) -> Result<T> {
    serde_yaml::from_value(value).with_context(|| format!("Document {index} is not a valid {kind}"))
}

/// Read and parse a manifest file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or [`parse_manifests`] fails.
pub fn load_manifest(path: &Path) -> Result<Vec<ConfigResource>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    parse_manifests(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod manifest_tests;
