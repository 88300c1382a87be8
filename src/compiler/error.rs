// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Compilation error types.
//!
//! Every failure aborts the compilation of the whole resource. Variants are grouped by
//! the stage that raises them:
//!
//! - **model**: structural omissions and invariant violations found while building
//! - **validate**: schema rejections, carrying the validator's message verbatim
//! - **emit**: mutations the section document refused

use crate::haproxy::document::DocumentError;
use crate::haproxy::types::SectionKind;
use std::fmt;
use thiserror::Error;

/// Errors raised while compiling a resource into configuration sections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A required field is absent or empty
    ///
    /// `field` is the path inside the resource, e.g. `servers[1].address`.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Path of the missing field
        field: String,
    },

    /// A field holds a value outside its accepted set or range
    #[error("invalid value '{value}' for '{field}': {reason}")]
    InvalidValue {
        /// Path of the offending field
        field: String,
        /// The rejected value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// More than one cookie mode flag is set
    #[error("you can only select one cookie mode, got: {}", .modes.join(", "))]
    ExclusiveCookieMode {
        /// Every mode that was selected
        modes: Vec<&'static str>,
    },

    /// A timeout key is not a timeout the section kind accepts
    #[error("timeout {name} unknown")]
    UnknownTimeout {
        /// The rejected key
        name: String,
    },

    /// A duration string could not be converted to milliseconds
    #[error("invalid duration '{value}' for '{field}': {reason}")]
    InvalidDuration {
        /// Path of the offending field
        field: String,
        /// The rejected duration string
        value: String,
        /// Parser error
        reason: String,
    },

    /// The schema validator rejected the assembled model
    #[error("{message}")]
    Schema {
        /// Section kind of the rejected model
        kind: SectionKind,
        /// Section name of the rejected model
        name: String,
        /// Validator message, unmodified
        message: String,
    },

    /// The section document rejected a mutation
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Step of a compilation that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompileStage {
    /// Building the model from the resource
    Model,
    /// Schema validation of the assembled model
    Validate,
    /// Writing the model into the section document
    Emit,
}

impl CompileStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Validate => "validate",
            Self::Emit => "emit",
        }
    }
}

impl fmt::Display for CompileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CompileError {
    /// The stage that raised this error.
    #[must_use]
    pub fn stage(&self) -> CompileStage {
        match self {
            Self::MissingField { .. }
            | Self::InvalidValue { .. }
            | Self::ExclusiveCookieMode { .. }
            | Self::UnknownTimeout { .. }
            | Self::InvalidDuration { .. } => CompileStage::Model,
            Self::Schema { .. } => CompileStage::Validate,
            Self::Document(_) => CompileStage::Emit,
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used by all builders.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Reject text that would leave its directive line (line breaks, other control
/// characters).
pub(crate) fn single_line<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    if value.chars().any(char::is_control) {
        return Err(CompileError::invalid(
            field,
            value,
            "must not contain line breaks or control characters",
        ));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
