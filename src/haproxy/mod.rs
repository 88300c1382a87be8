// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HAProxy configuration building blocks.
//!
//! This module provides everything the compiler needs below the resource level:
//!
//! - Unit conversion (durations, enable tokens, list joining) and content hashing
//! - Canonical paths for certificates, maps and error pages
//! - Closed token types for every enumerated HAProxy keyword
//! - The configuration model produced by the compiler
//! - Serialization of model fragments into directive text
//! - The section document the compiler writes into, and the schema validator
//!   it consults before writing
//!
//! # Example
//!
//! ```rust
//! use haproxy_operator::haproxy::document::{ConfigDocument, SectionDocument};
//! use haproxy_operator::haproxy::types::SectionKind;
//!
//! let mut doc = ConfigDocument::new();
//! doc.create_section(SectionKind::Backend, "web").unwrap();
//! doc.set(SectionKind::Backend, "web", "balance", "roundrobin").unwrap();
//!
//! assert_eq!(doc.to_string(), "\nbackend web\n  balance roundrobin\n");
//! ```

pub mod document;
pub mod duration;
pub mod hash;
pub mod model;
pub mod paths;
pub mod serialize;
pub mod types;
pub mod units;
pub mod validator;

pub use document::{ConfigDocument, DocumentError, SectionDocument};
pub use paths::PathResolver;
pub use types::SectionKind;
pub use validator::{DataModelValidator, SchemaValidator};
