// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#![allow(unexpected_cfgs)]

//! # HAProxy Operator - configuration compiler
//!
//! This crate turns HAProxy configuration resources (`Backend`, `Frontend`, `Listen`)
//! into a deterministic, ordered HAProxy configuration.
//!
//! ## Overview
//!
//! - Custom Resource Definitions describing proxy sections declaratively
//! - A compiler that validates resources and builds section models
//! - An in-memory section document that renders HAProxy syntax
//!
//! Compiling the same resources twice always yields byte-identical configuration.
//!
//! ## Modules
//!
//! - [`crd`] - Custom Resource Definition types
//! - [`compiler`] - Resource to configuration compilation
//! - [`haproxy`] - Model, token types, serialization and the section document
//! - [`manifest`] - Loading resources from YAML manifests
//! - [`constants`] - Shared constants
//!
//! ## Example
//!
//! ```rust
//! use haproxy_operator::compiler::{Compiler, CompilerConfig};
//! use haproxy_operator::crd::{Backend, BackendOptions, BackendSpec, Server};
//! use haproxy_operator::haproxy::ConfigDocument;
//!
//! let backend = Backend::new(
//!     "web",
//!     BackendSpec {
//!         options: BackendOptions {
//!             servers: vec![Server {
//!                 name: "web01".to_string(),
//!                 address: "10.0.0.10".to_string(),
//!                 port: Some(8080),
//!                 ..Default::default()
//!             }],
//!             ..Default::default()
//!         },
//!         ..Default::default()
//!     },
//! );
//!
//! let mut doc = ConfigDocument::new();
//! Compiler::new(&CompilerConfig::default())
//!     .compile_backend(&backend, &mut doc)
//!     .unwrap();
//!
//! assert_eq!(doc.to_string(), "\nbackend web\n  server web01 10.0.0.10:8080\n");
//! ```

pub mod compiler;
pub mod constants;
pub mod crd;
pub mod haproxy;
pub mod manifest;
