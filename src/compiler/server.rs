// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Servers, server templates and binds.
//!
//! These are the repeatable endpoints of a section. Each one is built independently
//! and must carry its addressing fields; a missing address or port is a structural
//! omission that aborts the whole section rather than skipping the entry.

use super::error::{single_line, CompileError, Result};
use super::ssl::{build_ssl, canonical_path, SslContext};
use super::timeouts::duration_millis;
use crate::crd::{Bind, Server, ServerParams, ServerTemplate};
use crate::haproxy::hash::md5_hex;
use crate::haproxy::model::{BindModel, ServerModel, ServerParamsModel, ServerTemplateModel};
use crate::haproxy::paths::PathResolver;
use crate::haproxy::units::{enable_token, flag};

/// Build one `server` line.
///
/// # Errors
///
/// Returns [`CompileError::MissingField`] when the address or port is absent,
/// [`CompileError::InvalidValue`] when the name or address spans more than one line,
/// or any error of the server parameters.
pub fn build_server(server: &Server, field: &str, paths: &PathResolver) -> Result<ServerModel> {
    if server.address.is_empty() {
        return Err(CompileError::missing(format!("{field}.address")));
    }
    let port = server
        .port
        .ok_or_else(|| CompileError::missing(format!("{field}.port")))?;

    Ok(ServerModel {
        name: single_line(&format!("{field}.name"), &server.name)?.to_string(),
        address: single_line(&format!("{field}.address"), &server.address)?.to_string(),
        port,
        params: build_params(
            &server.params,
            &format!("{}:{}", server.address, port),
            field,
            paths,
        )?,
    })
}

/// Build one `server-template` line.
///
/// # Errors
///
/// Returns [`CompileError::MissingField`] when the prefix, FQDN or port is absent and
/// [`CompileError::InvalidValue`] when the numeric range is empty or inverted.
pub fn build_server_template(
    template: &ServerTemplate,
    field: &str,
    paths: &PathResolver,
) -> Result<ServerTemplateModel> {
    if template.prefix.is_empty() {
        return Err(CompileError::missing(format!("{field}.prefix")));
    }
    if template.fqdn.is_empty() {
        return Err(CompileError::missing(format!("{field}.fqdn")));
    }
    let port = template
        .port
        .ok_or_else(|| CompileError::missing(format!("{field}.port")))?;

    if template.num < 1 {
        return Err(CompileError::invalid(
            format!("{field}.num"),
            template.num.to_string(),
            "must be at least 1",
        ));
    }
    if let Some(num_min) = template.num_min {
        if num_min < 1 || num_min > template.num {
            return Err(CompileError::invalid(
                format!("{field}.numMin"),
                num_min.to_string(),
                format!("must be between 1 and num ({})", template.num),
            ));
        }
    }

    Ok(ServerTemplateModel {
        prefix: single_line(&format!("{field}.prefix"), &template.prefix)?.to_string(),
        num_min: template.num_min,
        num: template.num,
        fqdn: single_line(&format!("{field}.fqdn"), &template.fqdn)?.to_string(),
        port,
        params: build_params(
            &template.params,
            &format!("{}:{}", template.fqdn, port),
            field,
            paths,
        )?,
    })
}

/// Options shared by servers and templates. `endpoint` seeds the persistence cookie.
fn build_params(
    params: &ServerParams,
    endpoint: &str,
    field: &str,
    paths: &PathResolver,
) -> Result<ServerParamsModel> {
    let mut model = ServerParamsModel {
        backup: enable_token(params.backup),
        send_proxy: enable_token(params.send_proxy),
        send_proxy_v2: enable_token(params.send_proxy_v2),
        init_addr: params
            .init_addr
            .as_deref()
            .map(|value| single_line(&format!("{field}.initAddr"), value).map(str::to_string))
            .transpose()?,
        weight: params.weight,
        cookie: params.cookie.then(|| md5_hex(endpoint)),
        ..Default::default()
    };

    if let Some(check) = &params.check {
        model.check = flag(check.enabled);
        model.inter = check
            .inter
            .as_deref()
            .map(|inter| duration_millis(&format!("{field}.check.inter"), inter))
            .transpose()?;
        model.rise = check.rise;
        model.fall = check.fall;
    }

    if let Some(ssl) = &params.ssl {
        let options = build_ssl(ssl, &format!("{field}.ssl"), SslContext::Server, paths)?;
        model.ssl = options.ssl;
        model.ssl_min_ver = options.ssl_min_ver;
        model.verify = options.verify;
        model.alpn = options.alpn;
        model.crt = options.crt;
        model.ca_file = options.ca_file;
        model.sni = options.sni;
    }

    Ok(model)
}

/// Build one `bind` line.
///
/// # Errors
///
/// Returns [`CompileError::MissingField`] when the port is absent,
/// [`CompileError::InvalidValue`] when the name or address spans more than one line,
/// or any TLS error. `sni` is rejected on binds.
pub fn build_bind(bind: &Bind, field: &str, paths: &PathResolver) -> Result<BindModel> {
    let port = bind
        .port
        .ok_or_else(|| CompileError::missing(format!("{field}.port")))?;

    let mut model = BindModel {
        name: single_line(&format!("{field}.name"), &bind.name)?.to_string(),
        address: single_line(&format!("{field}.address"), &bind.address)?.to_string(),
        port,
        accept_proxy: enable_token(bind.accept_proxy),
        ..Default::default()
    };

    if let Some(ssl) = &bind.ssl {
        let options = build_ssl(ssl, &format!("{field}.ssl"), SslContext::Bind, paths)?;
        model.ssl = options.ssl;
        model.ssl_min_ver = options.ssl_min_ver;
        model.verify = options.verify;
        model.alpn = options.alpn;
        model.crt = options.crt;
        model.ca_file = options.ca_file;
    }

    if let Some(list) = &bind.ssl_certificate_list {
        model.crt_list = Some(canonical_path(
            &list.name,
            &format!("{field}.sslCertificateList.name"),
            paths,
        )?);
    }

    Ok(model)
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod server_tests;
