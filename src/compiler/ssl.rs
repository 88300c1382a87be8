// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! TLS settings shared by binds and servers.

use super::error::{single_line, CompileError, Result};
use crate::constants::ALPN_SEPARATOR;
use crate::crd::{SSLCertificate, SSL};
use crate::haproxy::paths::PathResolver;
use crate::haproxy::types::{SslVersion, VerifyMode};
use crate::haproxy::units::{flag, join, non_empty};

/// TLS options after validation, ready to be copied onto a bind or server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SslOptions {
    pub ssl: Option<&'static str>,
    pub ssl_min_ver: Option<SslVersion>,
    /// Only set when verification is required
    pub verify: Option<VerifyMode>,
    /// Only set when verification is required
    pub alpn: Option<String>,
    pub crt: Option<String>,
    pub ca_file: Option<String>,
    pub sni: Option<String>,
}

/// Where the TLS settings are used. Servers cannot verify optionally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SslContext {
    Bind,
    Server,
}

/// Validate and convert TLS settings.
///
/// `verify` and `alpn` are only kept when verification is `required`; any other
/// verification mode drops both.
///
/// # Errors
///
/// Returns [`CompileError::InvalidValue`] for an unrecognised minimum version or
/// verification mode, for `optional` verification on a server, for `sni` on a
/// bind and for text spanning more than one line.
pub fn build_ssl(
    ssl: &SSL,
    field: &str,
    context: SslContext,
    paths: &PathResolver,
) -> Result<SslOptions> {
    let ssl_min_ver = non_empty(&ssl.min_version)
        .map(|value| {
            value.parse::<SslVersion>().map_err(|err| {
                CompileError::invalid(format!("{field}.minVersion"), value, err.to_string())
            })
        })
        .transpose()?;

    let verify = non_empty(&ssl.verify)
        .map(|value| {
            value.parse::<VerifyMode>().map_err(|err| {
                CompileError::invalid(format!("{field}.verify"), value, err.to_string())
            })
        })
        .transpose()?;

    if context == SslContext::Server && verify == Some(VerifyMode::Optional) {
        return Err(CompileError::invalid(
            format!("{field}.verify"),
            "optional",
            "servers accept only none or required",
        ));
    }

    let sni = non_empty(&ssl.sni)
        .map(|value| single_line(&format!("{field}.sni"), value))
        .transpose()?;
    if let (SslContext::Bind, Some(value)) = (context, sni) {
        return Err(CompileError::invalid(
            format!("{field}.sni"),
            value,
            "sni applies only to servers",
        ));
    }

    for (index, protocol) in ssl.alpn.iter().enumerate() {
        single_line(&format!("{field}.alpn[{index}]"), protocol)?;
    }

    let required = verify == Some(VerifyMode::Required);

    Ok(SslOptions {
        ssl: flag(ssl.enabled),
        ssl_min_ver,
        verify: verify.filter(|_| required),
        alpn: join(&ssl.alpn, ALPN_SEPARATOR).filter(|_| required),
        crt: certificate(ssl.certificate.as_ref(), &format!("{field}.certificate"), paths)?,
        ca_file: certificate(
            ssl.ca_certificate.as_ref(),
            &format!("{field}.caCertificate"),
            paths,
        )?,
        sni: sni.map(str::to_string),
    })
}

fn certificate(
    certificate: Option<&SSLCertificate>,
    field: &str,
    paths: &PathResolver,
) -> Result<Option<String>> {
    certificate
        .map(|certificate| canonical_path(&certificate.name, &format!("{field}.name"), paths))
        .transpose()
}

/// Resolve a logical file name below the configuration root.
///
/// # Errors
///
/// Returns [`CompileError::MissingField`] for an empty name and
/// [`CompileError::InvalidValue`] for a name that would leave the root or its line.
pub fn canonical_path(name: &str, field: &str, paths: &PathResolver) -> Result<String> {
    if name.is_empty() {
        return Err(CompileError::missing(field));
    }
    if name.contains('/') {
        return Err(CompileError::invalid(
            field,
            name,
            "file names must not contain '/'",
        ));
    }
    Ok(paths.resolve(single_line(field, name)?))
}

#[cfg(test)]
#[path = "ssl_tests.rs"]
mod ssl_tests;
