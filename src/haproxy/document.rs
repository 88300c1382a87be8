// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Section-scoped configuration document.
//!
//! The compiler never builds configuration text directly. It mutates a document
//! through the [`SectionDocument`] trait: create a section, edit single-valued
//! directives in place, and insert repeatable directives at explicit positions.
//!
//! [`ConfigDocument`] is the in-memory implementation. It renders HAProxy syntax:
//! frontends before backends, each kind in creation order, directives in a fixed
//! per-kind order, and repeatable directives in insertion order.
//!
//! The trait takes `&mut self`; compiling several resources into one document is
//! serialized by the borrow on the document.

use super::types::SectionKind;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Directive keywords the compiler emits.
pub mod directive {
    pub const MODE: &str = "mode";
    pub const BALANCE: &str = "balance";
    pub const HASH_TYPE: &str = "hash-type";
    pub const COOKIE: &str = "cookie";
    pub const DYNAMIC_COOKIE_KEY: &str = "dynamic-cookie-key";
    pub const OPTION_HTTP_PRETEND_KEEPALIVE: &str = "option http-pretend-keepalive";
    pub const OPTION_FORWARDFOR: &str = "option forwardfor";
    pub const OPTION_REDISPATCH: &str = "option redispatch";
    pub const ERRORFILE: &str = "errorfile";
    pub const ACL: &str = "acl";
    pub const HTTP_REQUEST: &str = "http-request";
    pub const HTTP_RESPONSE: &str = "http-response";
    pub const BIND: &str = "bind";
    pub const USE_BACKEND: &str = "use_backend";
    pub const DEFAULT_BACKEND: &str = "default_backend";
    pub const SERVER: &str = "server";
    pub const SERVER_TEMPLATE: &str = "server-template";

    /// Keyword of a `timeout` directive.
    #[must_use]
    pub fn timeout(name: super::super::types::TimeoutName) -> String {
        format!("timeout {name}")
    }
}

/// Errors raised when a document rejects a mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A section with the same kind and name was already created
    #[error("{kind} '{name}' already exists")]
    SectionExists {
        /// Section kind
        kind: SectionKind,
        /// Section name
        name: String,
    },

    /// The target section was never created
    #[error("{kind} '{name}' does not exist")]
    SectionNotFound {
        /// Section kind
        kind: SectionKind,
        /// Section name
        name: String,
    },

    /// The directive is not valid in this section kind
    #[error("directive '{directive}' is not supported in a {kind} section")]
    UnknownDirective {
        /// Section kind
        kind: SectionKind,
        /// Rejected keyword
        directive: String,
    },

    /// `insert` was used for a single-valued directive
    #[error("directive '{directive}' cannot appear more than once")]
    NotRepeatable {
        /// Rejected keyword
        directive: String,
    },

    /// `insert` position is past the end of the directive list
    #[error("cannot insert '{directive}' at index {index}: only {len} present")]
    IndexOutOfRange {
        /// Target keyword
        directive: String,
        /// Requested position
        index: usize,
        /// Number of existing entries
        len: usize,
    },
}

/// Mutation target for compiled sections.
pub trait SectionDocument {
    /// Create an empty section.
    ///
    /// # Errors
    ///
    /// Fails if a section of the same kind and name already exists.
    fn create_section(&mut self, kind: SectionKind, name: &str) -> Result<(), DocumentError>;

    /// Set a directive, replacing any previous value. An empty `value` renders the
    /// keyword alone (e.g. `option forwardfor`).
    ///
    /// # Errors
    ///
    /// Fails if the section does not exist or the directive is unknown for its kind.
    fn set(
        &mut self,
        kind: SectionKind,
        name: &str,
        directive: &str,
        value: &str,
    ) -> Result<(), DocumentError>;

    /// Insert one occurrence of a repeatable directive at `index`.
    ///
    /// # Errors
    ///
    /// Fails if the section does not exist, the directive is unknown or not repeatable,
    /// or `index` is past the end of the existing entries.
    fn insert(
        &mut self,
        kind: SectionKind,
        name: &str,
        directive: &str,
        value: &str,
        index: usize,
    ) -> Result<(), DocumentError>;
}

struct DirectiveSpec {
    keyword: &'static str,
    repeatable: bool,
}

const fn single(keyword: &'static str) -> DirectiveSpec {
    DirectiveSpec {
        keyword,
        repeatable: false,
    }
}

const fn repeated(keyword: &'static str) -> DirectiveSpec {
    DirectiveSpec {
        keyword,
        repeatable: true,
    }
}

/// Render order of frontend directives.
const FRONTEND_DIRECTIVES: &[DirectiveSpec] = &[
    single("mode"),
    single("option forwardfor"),
    single("timeout client"),
    single("timeout http-keep-alive"),
    single("timeout http-request"),
    repeated("errorfile"),
    repeated("acl"),
    repeated("http-request"),
    repeated("http-response"),
    repeated("bind"),
    repeated("use_backend"),
    single("default_backend"),
];

/// Render order of backend directives.
const BACKEND_DIRECTIVES: &[DirectiveSpec] = &[
    single("mode"),
    single("balance"),
    single("hash-type"),
    single("cookie"),
    single("dynamic-cookie-key"),
    single("option http-pretend-keepalive"),
    single("option forwardfor"),
    single("option redispatch"),
    single("timeout check"),
    single("timeout connect"),
    single("timeout http-keep-alive"),
    single("timeout http-request"),
    single("timeout queue"),
    single("timeout server"),
    single("timeout tunnel"),
    repeated("errorfile"),
    repeated("acl"),
    repeated("http-request"),
    repeated("http-response"),
    repeated("server"),
    repeated("server-template"),
];

fn directives_for(kind: SectionKind) -> &'static [DirectiveSpec] {
    match kind {
        SectionKind::Frontend => FRONTEND_DIRECTIVES,
        SectionKind::Backend => BACKEND_DIRECTIVES,
    }
}

/// One section of a [`ConfigDocument`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    kind: SectionKind,
    name: String,
    /// Values keyed by the directive's position in the kind's render order
    directives: BTreeMap<usize, Vec<String>>,
}

impl Section {
    fn new(kind: SectionKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            directives: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Body lines in render order, without indentation.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let specs = directives_for(self.kind);
        self.directives
            .iter()
            .flat_map(|(position, values)| {
                let keyword = specs[*position].keyword;
                values.iter().map(move |value| {
                    if value.is_empty() {
                        keyword.to_string()
                    } else {
                        format!("{keyword} {value}")
                    }
                })
            })
            .collect()
    }

    /// Values recorded for `directive`, in order.
    #[must_use]
    pub fn values(&self, directive: &str) -> &[String] {
        directives_for(self.kind)
            .iter()
            .position(|spec| spec.keyword == directive)
            .and_then(|position| self.directives.get(&position))
            .map_or(&[], Vec::as_slice)
    }

    fn position(&self, directive: &str) -> Result<(usize, &'static DirectiveSpec), DocumentError> {
        directives_for(self.kind)
            .iter()
            .enumerate()
            .find(|(_, spec)| spec.keyword == directive)
            .ok_or_else(|| DocumentError::UnknownDirective {
                kind: self.kind,
                directive: directive.to_string(),
            })
    }
}

/// In-memory HAProxy configuration.
///
/// # Example
///
/// ```rust
/// use haproxy_operator::haproxy::document::{ConfigDocument, SectionDocument};
/// use haproxy_operator::haproxy::types::SectionKind;
///
/// let mut doc = ConfigDocument::new();
/// doc.create_section(SectionKind::Backend, "web").unwrap();
/// doc.insert(SectionKind::Backend, "web", "server", "b 10.0.0.2:80", 0).unwrap();
/// doc.insert(SectionKind::Backend, "web", "server", "a 10.0.0.1:80", 0).unwrap();
///
/// assert_eq!(
///     doc.to_string(),
///     "\nbackend web\n  server a 10.0.0.1:80\n  server b 10.0.0.2:80\n"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: Vec<Section>,
}

impl ConfigDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sections in creation order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, kind: SectionKind, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.kind == kind && section.name == name)
    }

    fn section_mut(&mut self, kind: SectionKind, name: &str) -> Result<&mut Section, DocumentError> {
        self.sections
            .iter_mut()
            .find(|section| section.kind == kind && section.name == name)
            .ok_or_else(|| DocumentError::SectionNotFound {
                kind,
                name: name.to_string(),
            })
    }
}

impl SectionDocument for ConfigDocument {
    fn create_section(&mut self, kind: SectionKind, name: &str) -> Result<(), DocumentError> {
        if self.section(kind, name).is_some() {
            return Err(DocumentError::SectionExists {
                kind,
                name: name.to_string(),
            });
        }
        self.sections.push(Section::new(kind, name));
        Ok(())
    }

    fn set(
        &mut self,
        kind: SectionKind,
        name: &str,
        directive: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        let section = self.section_mut(kind, name)?;
        let (position, _) = section.position(directive)?;
        section.directives.insert(position, vec![value.to_string()]);
        Ok(())
    }

    fn insert(
        &mut self,
        kind: SectionKind,
        name: &str,
        directive: &str,
        value: &str,
        index: usize,
    ) -> Result<(), DocumentError> {
        let section = self.section_mut(kind, name)?;
        let (position, spec) = section.position(directive)?;
        if !spec.repeatable {
            return Err(DocumentError::NotRepeatable {
                directive: directive.to_string(),
            });
        }

        let values = section.directives.entry(position).or_default();
        if index > values.len() {
            return Err(DocumentError::IndexOutOfRange {
                directive: directive.to_string(),
                index,
                len: values.len(),
            });
        }
        values.insert(index, value.to_string());
        Ok(())
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in SectionKind::ALL {
            for section in self.sections.iter().filter(|section| section.kind == *kind) {
                writeln!(f)?;
                writeln!(f, "{} {}", section.kind, section.name)?;
                for line in section.lines() {
                    writeln!(f, "  {line}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod document_tests;
