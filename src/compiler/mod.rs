// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Resource to configuration compiler.
//!
//! Each compilation runs three steps for one resource:
//!
//! 1. **Build** - convert the resource into section models, enforcing the invariants
//!    the CRD schema cannot express (exclusive cookie modes, closed enumerations,
//!    timeout names, required addressing fields)
//! 2. **Validate** - hand every model to the [`SchemaValidator`]
//! 3. **Emit** - write the models into a [`SectionDocument`]
//!
//! Steps 1 and 2 are pure, so a resource that fails them leaves the document
//! untouched. Identical resources always produce identical directives.
//!
//! # Example
//!
//! ```rust
//! use haproxy_operator::compiler::{Compiler, CompilerConfig};
//! use haproxy_operator::crd::{Listen, ListenSpec};
//! use haproxy_operator::haproxy::ConfigDocument;
//!
//! let compiler = Compiler::new(&CompilerConfig::default());
//! let mut doc = ConfigDocument::new();
//!
//! let listen = Listen::new("foo", ListenSpec::default());
//! compiler.compile_listen(&listen, &mut doc).unwrap();
//!
//! assert_eq!(doc.to_string(), "\nfrontend foo\n  default_backend foo\n\nbackend foo\n");
//! ```

pub mod backend;
pub mod balance;
pub mod base;
pub mod cookie;
pub mod emit;
pub mod error;
pub mod frontend;
pub mod listen;
pub mod rules;
pub mod server;
pub mod ssl;
pub mod timeouts;

pub use error::{CompileError, CompileStage, Result};
use error::single_line;

use crate::constants::DEFAULT_CONFIG_ROOT;
use crate::crd::{Backend, Frontend, Listen};
use crate::haproxy::document::SectionDocument;
use crate::haproxy::model::{BackendModel, FrontendModel};
use crate::haproxy::paths::PathResolver;
use crate::haproxy::types::SectionKind;
use crate::haproxy::validator::{DataModelValidator, SchemaValidator};
use crate::manifest::ConfigResource;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Compiler settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompilerConfig {
    /// Directory the certificates, maps and error pages are written to
    pub config_root: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            config_root: DEFAULT_CONFIG_ROOT.to_string(),
        }
    }
}

/// Compiles resources into a [`SectionDocument`].
///
/// The compiler holds no mutable state and can be shared across threads. The
/// document is borrowed mutably for the duration of one emission, so compiling
/// several resources into the same document is serialized by the caller.
#[derive(Clone, Debug)]
pub struct Compiler<V = DataModelValidator> {
    paths: PathResolver,
    validator: V,
}

impl Compiler<DataModelValidator> {
    /// Create a compiler that validates against the HAProxy data model schema.
    #[must_use]
    pub fn new(config: &CompilerConfig) -> Self {
        Self::with_validator(config, DataModelValidator)
    }
}

impl<V: SchemaValidator> Compiler<V> {
    /// Create a compiler with a custom schema validator.
    pub fn with_validator(config: &CompilerConfig, validator: V) -> Self {
        Self {
            paths: PathResolver::new(config.config_root.as_str()),
            validator,
        }
    }

    #[must_use]
    pub fn paths(&self) -> &PathResolver {
        &self.paths
    }

    /// Build and validate the model of a `Backend`.
    ///
    /// # Errors
    ///
    /// Returns model and validation errors.
    pub fn build_backend(&self, backend: &Backend) -> Result<BackendModel> {
        let name = resource_name(backend.metadata.name.as_deref())?;
        let model = backend::build_backend(name, &backend.spec, &self.paths)?;
        debug!(backend = %name, "Model built");
        self.validate_backend(&model)?;
        Ok(model)
    }

    /// Build and validate the model of a `Frontend`.
    ///
    /// # Errors
    ///
    /// Returns model and validation errors.
    pub fn build_frontend(&self, frontend: &Frontend) -> Result<FrontendModel> {
        let name = resource_name(frontend.metadata.name.as_deref())?;
        let model = frontend::build_frontend(name, &frontend.spec, &self.paths)?;
        debug!(frontend = %name, "Model built");
        self.validate_frontend(&model)?;
        Ok(model)
    }

    /// Build and validate both models of a `Listen`.
    ///
    /// # Errors
    ///
    /// Returns model and validation errors.
    pub fn build_listen(&self, listen: &Listen) -> Result<(FrontendModel, BackendModel)> {
        let name = resource_name(listen.metadata.name.as_deref())?;
        let (frontend, backend) = listen::build_listen(name, &listen.spec, &self.paths)?;
        debug!(listen = %name, "Model built");
        self.validate_frontend(&frontend)?;
        self.validate_backend(&backend)?;
        Ok((frontend, backend))
    }

    /// Compile a `Backend` into `doc`.
    ///
    /// # Errors
    ///
    /// Returns the first model, validation or emission error. Only emission errors
    /// can leave partial writes in `doc`.
    pub fn compile_backend<D>(&self, backend: &Backend, doc: &mut D) -> Result<()>
    where
        D: SectionDocument + ?Sized,
    {
        let model = self.build_backend(backend)?;
        emit::emit_backend(doc, &model)?;
        info!(backend = %model.name, servers = model.servers.len(), "Compiled backend");
        Ok(())
    }

    /// Compile a `Frontend` into `doc`.
    ///
    /// # Errors
    ///
    /// Same as [`Compiler::compile_backend`].
    pub fn compile_frontend<D>(&self, frontend: &Frontend, doc: &mut D) -> Result<()>
    where
        D: SectionDocument + ?Sized,
    {
        let model = self.build_frontend(frontend)?;
        emit::emit_frontend(doc, &model)?;
        info!(frontend = %model.name, binds = model.binds.len(), "Compiled frontend");
        Ok(())
    }

    /// Compile a `Listen` into a frontend and a backend in `doc`.
    ///
    /// # Errors
    ///
    /// Same as [`Compiler::compile_backend`].
    pub fn compile_listen<D>(&self, listen: &Listen, doc: &mut D) -> Result<()>
    where
        D: SectionDocument + ?Sized,
    {
        let (frontend, backend) = self.build_listen(listen)?;
        emit::emit_frontend(doc, &frontend)?;
        emit::emit_backend(doc, &backend)?;
        info!(listen = %frontend.name, "Compiled listen");
        Ok(())
    }

    /// Compile any supported resource into `doc`.
    ///
    /// # Errors
    ///
    /// Same as [`Compiler::compile_backend`].
    pub fn compile<D>(&self, resource: &ConfigResource, doc: &mut D) -> Result<()>
    where
        D: SectionDocument + ?Sized,
    {
        match resource {
            ConfigResource::Backend(backend) => self.compile_backend(backend, doc),
            ConfigResource::Frontend(frontend) => self.compile_frontend(frontend, doc),
            ConfigResource::Listen(listen) => self.compile_listen(listen, doc),
        }
    }

    fn validate_backend(&self, model: &BackendModel) -> Result<()> {
        self.validator
            .validate_backend(model)
            .map_err(|err| CompileError::Schema {
                kind: SectionKind::Backend,
                name: model.name.clone(),
                message: err.message,
            })
    }

    fn validate_frontend(&self, model: &FrontendModel) -> Result<()> {
        self.validator
            .validate_frontend(model)
            .map_err(|err| CompileError::Schema {
                kind: SectionKind::Frontend,
                name: model.name.clone(),
                message: err.message,
            })
    }
}

fn resource_name(name: Option<&str>) -> Result<&str> {
    let name = name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CompileError::missing("metadata.name"))?;
    single_line("metadata.name", name)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod mod_tests;
