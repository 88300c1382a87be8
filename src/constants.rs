// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the HAProxy operator.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API group for all HAProxy configuration CRDs
pub const API_GROUP: &str = "config.haproxy.com";

/// API version for all HAProxy configuration CRDs
pub const API_VERSION: &str = "v1alpha1";

/// Fully qualified API version (group/version)
pub const API_GROUP_VERSION: &str = "config.haproxy.com/v1alpha1";

/// Kind name for `Backend` resource
pub const KIND_BACKEND: &str = "Backend";

/// Kind name for `Frontend` resource
pub const KIND_FRONTEND: &str = "Frontend";

/// Kind name for `Listen` resource
pub const KIND_LISTEN: &str = "Listen";

// ============================================================================
// Filesystem Constants
// ============================================================================

/// Directory inside the HAProxy container that holds certificates, maps and error pages
pub const DEFAULT_CONFIG_ROOT: &str = "/usr/local/etc/haproxy";

// ============================================================================
// HAProxy Directive Constants
// ============================================================================

/// Sentinel value the data model uses for an enabled boolean option
pub const ENABLED: &str = "enabled";

/// Number of retries before `option redispatch` moves a session to another server
pub const REDISPATCH_INTERVAL: i64 = 3;

/// Status code used by `http-request return` when none is given
pub const DEFAULT_RETURN_STATUS: i64 = 200;

/// Separator used when joining ALPN protocol lists
pub const ALPN_SEPARATOR: &str = ",";

/// Highest port number accepted for binds and servers
pub const MAX_PORT: i64 = 65_535;

/// Highest server weight HAProxy accepts
pub const MAX_SERVER_WEIGHT: i64 = 256;

/// HTTP status codes HAProxy accepts for `errorfile`
pub const ERRORFILE_CODES: &[i64] = &[
    200, 400, 401, 403, 404, 405, 407, 408, 410, 413, 425, 429, 500, 501, 502, 503, 504,
];

/// HTTP status codes accepted for `http-request redirect ... code`
pub const REDIRECT_CODES: &[i64] = &[301, 302, 303, 307, 308];
