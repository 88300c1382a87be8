// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

use haproxy_operator::compiler::{Compiler, CompilerConfig};
use haproxy_operator::haproxy::ConfigDocument;
use haproxy_operator::manifest::load_manifest;
use std::io::Write;
use tempfile::NamedTempFile;

/// Write `content` to a temporary manifest file.
pub fn write_manifest(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp manifest");
    file.write_all(content.as_bytes())
        .expect("write temp manifest");
    file
}

/// Load a manifest from disk and compile every resource into a fresh document.
pub fn compile_manifest(content: &str) -> Result<String, String> {
    let file = write_manifest(content);
    let resources = load_manifest(file.path()).map_err(|e| format!("{e:#}"))?;

    let compiler = Compiler::new(&CompilerConfig::default());
    let mut doc = ConfigDocument::new();
    for resource in &resources {
        compiler
            .compile(resource, &mut doc)
            .map_err(|e| e.to_string())?;
    }
    Ok(doc.to_string())
}
