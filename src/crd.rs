// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definitions (CRDs) for HAProxy configuration.
//!
//! This module defines the Kubernetes Custom Resource Definitions used to describe
//! HAProxy proxy sections declaratively. Every resource compiles into one or more
//! configuration sections through [`crate::compiler::Compiler`].
//!
//! # Resource Types
//!
//! - [`Backend`] - A `backend` section: servers, balancing, persistence
//! - [`Frontend`] - A `frontend` section: binds, routing rules, default backend
//! - [`Listen`] - A frontend/backend pair sharing one name
//!
//! Enumerated fields (`mode`, `minVersion`, `verify`, balance algorithms, ...) are
//! plain strings on the wire. The compiler parses them into closed types and rejects
//! anything it does not recognise.
//!
//! # Example: Creating a Backend
//!
//! ```rust,no_run
//! use haproxy_operator::crd::{Backend, BackendOptions, BackendSpec, Balance, Server};
//!
//! let backend = Backend::new(
//!     "web",
//!     BackendSpec {
//!         options: BackendOptions {
//!             balance: Some(Balance {
//!                 algorithm: "roundrobin".to_string(),
//!             }),
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
//! ```

use k8s_openapi::api::core::v1::EnvVar;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status shared by all configuration resources.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigStatus {
    /// Phase of the last reconciliation (e.g. "Running", "Failed").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    /// Error reported by the last failed compilation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

/// Optional condition attached to a rule.
///
/// Rendered as a trailing `if <condition>` or `unless <condition>` clause. Both
/// fields must be set together.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Either `if` or `unless`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_type: Option<String>,

    /// ACL expression, e.g. `!{ ssl_fc }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Named access control list.
///
/// Compiles to `acl <name> <criterion> <values...>`.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ACL {
    /// ACL name referenced by rule conditions.
    #[schemars(regex(pattern = r"^[^\s]+$"))]
    pub name: String,

    /// Sample fetch the ACL tests, e.g. `src` or `hdr(host)`.
    pub criterion: String,

    /// Values matched against the criterion.
    #[serde(default)]
    pub values: Vec<String>,
}

/// Value of an HTTP header rule.
///
/// Exactly one of `str` or `env` must be set. When `format` is present, its `%s`
/// placeholder is replaced by the value.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HTTPHeaderValue {
    /// Literal header value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub str: Option<String>,

    /// Environment variable of the HAProxy process, rendered as `${NAME}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvVar>,

    /// Format string containing a single `%s`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// `set-header` / `add-header` rule.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HTTPHeaderRule {
    #[serde(flatten)]
    pub rule: Rule,

    /// Header name.
    pub name: String,

    /// Header value.
    pub value: HTTPHeaderValue,
}

/// `del-header` rule.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HTTPDeleteHeaderRule {
    #[serde(flatten)]
    pub rule: Rule,

    /// Header name.
    pub name: String,
}

/// `set-path` rule.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HTTPPathRule {
    #[serde(flatten)]
    pub rule: Rule,

    /// New request path.
    pub value: String,
}

/// `redirect` rule.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HTTPRedirectRule {
    #[serde(flatten)]
    pub rule: Rule,

    /// Redirect type: `location`, `prefix` or `scheme`.
    #[serde(rename = "type")]
    pub redirect_type: String,

    /// Target location, prefix or scheme.
    pub value: String,

    /// HTTP status code (301, 302, 303, 307 or 308).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

/// `deny` rule.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HTTPDenyRule {
    #[serde(flatten)]
    pub rule: Rule,

    /// Status code returned to the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny_status: Option<i64>,
}

/// Body of an `http-request return` rule.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HTTPReturnContent {
    /// MIME type of the payload, e.g. `text/plain`.
    #[serde(rename = "type")]
    pub content_type: String,

    /// One of `default-errorfile`, `errorfile`, `errorfiles`, `file`, `lf-file`,
    /// `string` or `lf-string`.
    pub format: String,

    /// Payload, file name or error file reference depending on `format`.
    #[serde(default)]
    pub value: String,
}

/// `http-request return` rule.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HTTPReturn {
    #[serde(flatten)]
    pub rule: Rule,

    /// Status code, 200 when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<HTTPReturnContent>,
}

/// Rules evaluated on incoming requests, emitted in this order:
/// set-header, add-header, del-header, set-path, redirect, deny, return.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HTTPRequestRules {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_header: Vec<HTTPHeaderRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_header: Vec<HTTPHeaderRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub del_header: Vec<HTTPDeleteHeaderRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_path: Vec<HTTPPathRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redirect: Vec<HTTPRedirectRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny: Option<HTTPDenyRule>,

    #[serde(default, rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_rule: Option<HTTPReturn>,
}

/// Rules evaluated on outgoing responses, emitted in this order:
/// set-header, add-header, del-header.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HTTPResponseRules {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_header: Vec<HTTPHeaderRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_header: Vec<HTTPHeaderRule>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub del_header: Vec<HTTPDeleteHeaderRule>,
}

/// Static file shipped next to the HAProxy configuration.
///
/// The file itself is written by the secret/file distribution layer; the
/// compiler only references it by its canonical path.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaticHTTPFile {
    /// File name relative to the configuration root.
    pub name: String,

    /// Literal file content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Custom error page for a status code.
///
/// Compiles to `errorfile <code> <canonical-path>`.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorFile {
    /// HTTP status code the page replaces.
    pub code: i64,

    /// Raw HTTP response served for the code.
    pub file: StaticHTTPFile,
}

/// `option forwardfor` settings.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Forwardfor {
    /// Adds the `X-Forwarded-For` header when true.
    pub enabled: bool,

    /// Network excluded from header insertion.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub except: String,

    /// Alternative header name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub header: String,

    /// Only add the header when it is not already present.
    #[serde(default)]
    pub ifnone: bool,
}

/// Settings shared by every section kind.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BaseSpec {
    /// Proxy mode: `http` or `tcp`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub mode: String,

    /// Timeouts keyed by HAProxy timeout name, values in Go duration format (`30s`, `1h`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub timeouts: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_files: Vec<ErrorFile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwardfor: Option<Forwardfor>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acl: Vec<ACL>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_request: Option<HTTPRequestRules>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_response: Option<HTTPResponseRules>,
}

/// Certificate, CA bundle or map file referenced by name.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SSLCertificate {
    /// File name relative to the configuration root.
    pub name: String,

    /// PEM content, written by the file distribution layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// TLS settings of a bind or server.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SSL {
    pub enabled: bool,

    /// Minimum protocol version: `SSLv3`, `TLSv1.0`, `TLSv1.1`, `TLSv1.2` or `TLSv1.3`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub min_version: String,

    /// Peer verification: `none`, `optional` (binds only) or `required`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub verify: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_certificate: Option<SSLCertificate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<SSLCertificate>,

    /// ALPN protocols, emitted only when `verify` is `required`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alpn: Vec<String>,

    /// SNI expression sent to servers, e.g. `str(example.com)`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sni: String,
}

/// Health check settings.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    pub enabled: bool,

    /// Interval between two checks (Go duration).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inter: Option<String>,

    /// Consecutive successes before a server is considered up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rise: Option<i64>,

    /// Consecutive failures before a server is considered down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fall: Option<i64>,
}

/// Parameters shared by servers and server templates.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<Check>,

    /// Emits a persistence cookie value derived from the server address.
    #[serde(default)]
    pub cookie: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<SSL>,

    /// Only used when all non-backup servers are down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_proxy: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_proxy_v2: Option<bool>,

    /// Address resolution order at startup, e.g. `last,libc,none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_addr: Option<String>,
}

/// Backend server.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub name: String,

    /// Hostname or IP address.
    #[serde(default)]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 65_535))]
    pub port: Option<i64>,

    #[serde(flatten)]
    pub params: ServerParams,
}

/// Group of servers resolved from a DNS name.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerTemplate {
    /// Prefix of the generated server names.
    pub prefix: String,

    /// Lower bound of the numeric suffix range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_min: Option<i64>,

    /// Number of servers (upper bound of the range).
    #[serde(default)]
    pub num: i64,

    #[serde(default)]
    pub fqdn: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 65_535))]
    pub port: Option<i64>,

    #[serde(flatten)]
    pub params: ServerParams,
}

/// `crt-list` file referenced by a bind.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateList {
    /// File name relative to the configuration root.
    pub name: String,
}

/// Listening socket of a frontend.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bind {
    pub name: String,

    /// Listen address; all interfaces when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 65_535))]
    pub port: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<SSL>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_certificate_list: Option<CertificateList>,

    /// Expect a PROXY protocol header on accepted connections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_proxy: Option<bool>,
}

/// Load balancing algorithm.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Algorithm name, case-insensitive (e.g. `roundrobin`, `leastconn`, `hdr(host)`).
    pub algorithm: String,
}

/// Hash mapping method for hash-based algorithms.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HashType {
    /// `map-based` or `consistent`.
    pub method: String,

    /// `sdbm`, `djb2`, `wt6` or `crc32`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub function: String,

    /// `avalanche`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub modifier: String,
}

/// Cookie insertion mode. At most one flag may be set.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CookieMode {
    #[serde(default)]
    pub rewrite: bool,

    #[serde(default)]
    pub insert: bool,

    #[serde(default)]
    pub prefix: bool,
}

/// Cookie-based persistence.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    /// Cookie name before hashing.
    pub name: String,

    #[serde(default)]
    pub mode: CookieMode,

    #[serde(default, rename = "httpOnly", skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indirect: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_cache: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,

    /// Derive per-server cookie values from a dynamic key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<bool>,

    /// Seconds of inactivity after which the cookie is ignored.
    #[serde(default)]
    #[schemars(range(min = 0))]
    pub max_idle: i64,

    /// Seconds after creation after which the cookie is ignored.
    #[serde(default)]
    #[schemars(range(min = 0))]
    pub max_life: i64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute: Vec<String>,
}

/// Settings specific to sections that own servers.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackendOptions {
    /// Additional check timeout once a connection is established (Go duration).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_timeout: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub server_templates: Vec<ServerTemplate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Balance>,

    /// Redistribute sessions when a connection to a server fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redispatch: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_type: Option<HashType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<Cookie>,

    #[serde(default, rename = "httpPretendKeepalive", skip_serializing_if = "Option::is_none")]
    pub http_pretend_keepalive: Option<bool>,
}

/// Reference to a backend in the same namespace.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackendReference {
    pub name: String,
}

/// Conditional routing to a backend.
///
/// Compiles to `use_backend <name> if|unless <condition>`.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackendSwitchingRule {
    #[serde(flatten)]
    pub rule: Rule,

    pub backend: BackendReference,
}

/// `Backend` defines an HAProxy backend section.
///
/// # Example
///
/// ```yaml
/// apiVersion: config.haproxy.com/v1alpha1
/// kind: Backend
/// metadata:
///   name: web
/// spec:
///   mode: http
///   balance:
///     algorithm: roundrobin
///   timeouts:
///     connect: 5s
///     server: 30s
///   servers:
///     - name: web01
///       address: 10.0.0.10
///       port: 8080
///       check:
///         enabled: true
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[kube(
    group = "config.haproxy.com",
    version = "v1alpha1",
    kind = "Backend",
    namespaced,
    doc = "Backend describes an HAProxy backend section: its servers, balancing algorithm and persistence.",
    printcolumn = r#"{"name":"Mode","type":"string","jsonPath":".spec.mode"}"#,
    printcolumn = r#"{"name":"Phase","type":"string","jsonPath":".status.phase"}"#
)]
#[kube(status = "ConfigStatus")]
#[serde(rename_all = "camelCase")]
pub struct BackendSpec {
    #[serde(flatten)]
    pub base: BaseSpec,

    #[serde(flatten)]
    pub options: BackendOptions,
}

/// `Frontend` defines an HAProxy frontend section.
///
/// # Example
///
/// ```yaml
/// apiVersion: config.haproxy.com/v1alpha1
/// kind: Frontend
/// metadata:
///   name: public
/// spec:
///   mode: http
///   binds:
///     - name: http
///       port: 80
///   defaultBackend:
///     name: web
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[kube(
    group = "config.haproxy.com",
    version = "v1alpha1",
    kind = "Frontend",
    namespaced,
    doc = "Frontend describes an HAProxy frontend section: its listening sockets and request routing.",
    printcolumn = r#"{"name":"Mode","type":"string","jsonPath":".spec.mode"}"#,
    printcolumn = r#"{"name":"Phase","type":"string","jsonPath":".status.phase"}"#
)]
#[kube(status = "ConfigStatus")]
#[serde(rename_all = "camelCase")]
pub struct FrontendSpec {
    #[serde(flatten)]
    pub base: BaseSpec,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub binds: Vec<Bind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_backend: Option<BackendReference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backend_switching: Vec<BackendSwitchingRule>,
}

/// `Listen` is a frontend and a backend sharing one name.
///
/// The frontend carries the binds and request rules and sends all traffic to the
/// backend, which carries the servers.
///
/// # Example
///
/// ```yaml
/// apiVersion: config.haproxy.com/v1alpha1
/// kind: Listen
/// metadata:
///   name: stats
/// spec:
///   binds:
///     - name: stats
///       port: 8404
///   servers:
///     - name: local
///       address: 127.0.0.1
///       port: 8405
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[kube(
    group = "config.haproxy.com",
    version = "v1alpha1",
    kind = "Listen",
    namespaced,
    doc = "Listen describes a paired HAProxy frontend and backend sharing one name.",
    printcolumn = r#"{"name":"Mode","type":"string","jsonPath":".spec.mode"}"#,
    printcolumn = r#"{"name":"Phase","type":"string","jsonPath":".status.phase"}"#
)]
#[kube(status = "ConfigStatus")]
#[serde(rename_all = "camelCase")]
pub struct ListenSpec {
    #[serde(flatten)]
    pub base: BaseSpec,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub binds: Vec<Bind>,

    #[serde(flatten)]
    pub options: BackendOptions,
}

#[cfg(test)]
#[path = "crd_tests.rs"]
mod crd_tests;
