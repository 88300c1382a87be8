// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Writing section models into a [`SectionDocument`].
//!
//! Emission is the only step with side effects. It creates the section, sets each
//! single-valued directive once, then inserts repeatable directives one per element at
//! the element's position in the model. The first rejected mutation stops emission;
//! earlier writes stay in the document.

use crate::haproxy::document::{directive, DocumentError, SectionDocument};
use crate::haproxy::model::{BackendModel, BaseModel, FrontendModel};
use crate::haproxy::serialize;
use crate::haproxy::types::SectionKind;

/// Insert `values` in order, each at its own index.
fn insert_all<D, I>(
    doc: &mut D,
    kind: SectionKind,
    name: &str,
    keyword: &str,
    values: I,
) -> Result<(), DocumentError>
where
    D: SectionDocument + ?Sized,
    I: IntoIterator<Item = String>,
{
    for (index, value) in values.into_iter().enumerate() {
        doc.insert(kind, name, keyword, &value, index)?;
    }
    Ok(())
}

fn emit_base<D: SectionDocument + ?Sized>(
    doc: &mut D,
    kind: SectionKind,
    name: &str,
    base: &BaseModel,
) -> Result<(), DocumentError> {
    if let Some(mode) = base.mode {
        doc.set(kind, name, directive::MODE, mode.as_str())?;
    }

    if let Some(forwardfor) = &base.forwardfor {
        if forwardfor.enabled.is_some() {
            doc.set(
                kind,
                name,
                directive::OPTION_FORWARDFOR,
                &serialize::forwardfor(forwardfor),
            )?;
        }
    }

    for (timeout, millis) in base.timeouts.iter() {
        doc.set(kind, name, &directive::timeout(timeout), &millis.to_string())?;
    }

    insert_all(
        doc,
        kind,
        name,
        directive::ERRORFILE,
        base.error_files.iter().map(serialize::errorfile),
    )?;
    insert_all(
        doc,
        kind,
        name,
        directive::ACL,
        base.acls.iter().map(serialize::acl),
    )?;
    insert_all(
        doc,
        kind,
        name,
        directive::HTTP_REQUEST,
        base.http_request.iter().map(serialize::http_request),
    )?;
    insert_all(
        doc,
        kind,
        name,
        directive::HTTP_RESPONSE,
        base.http_response.iter().map(serialize::http_response),
    )
}

/// Create and fill a `backend` section.
///
/// # Errors
///
/// Returns the first mutation the document rejects.
pub fn emit_backend<D: SectionDocument + ?Sized>(
    doc: &mut D,
    model: &BackendModel,
) -> Result<(), DocumentError> {
    let kind = SectionKind::Backend;
    let name = model.name.as_str();

    doc.create_section(kind, name)?;
    emit_base(doc, kind, name, &model.base)?;

    if let Some(balance) = &model.balance {
        doc.set(kind, name, directive::BALANCE, &serialize::balance(balance))?;
    }
    if let Some(hash_type) = &model.hash_type {
        doc.set(kind, name, directive::HASH_TYPE, &serialize::hash_type(hash_type))?;
    }
    if let Some(cookie) = &model.cookie {
        doc.set(kind, name, directive::COOKIE, &serialize::cookie(cookie))?;
    }
    if let Some(key) = &model.dynamic_cookie_key {
        doc.set(kind, name, directive::DYNAMIC_COOKIE_KEY, key)?;
    }
    if model.http_pretend_keepalive.is_some() {
        doc.set(kind, name, directive::OPTION_HTTP_PRETEND_KEEPALIVE, "")?;
    }
    if let Some(redispatch) = &model.redispatch {
        doc.set(
            kind,
            name,
            directive::OPTION_REDISPATCH,
            &serialize::redispatch(redispatch),
        )?;
    }

    insert_all(
        doc,
        kind,
        name,
        directive::SERVER,
        model.servers.iter().map(serialize::server),
    )?;
    insert_all(
        doc,
        kind,
        name,
        directive::SERVER_TEMPLATE,
        model.server_templates.iter().map(serialize::server_template),
    )
}

/// Create and fill a `frontend` section.
///
/// # Errors
///
/// Returns the first mutation the document rejects.
pub fn emit_frontend<D: SectionDocument + ?Sized>(
    doc: &mut D,
    model: &FrontendModel,
) -> Result<(), DocumentError> {
    let kind = SectionKind::Frontend;
    let name = model.name.as_str();

    doc.create_section(kind, name)?;
    emit_base(doc, kind, name, &model.base)?;

    insert_all(
        doc,
        kind,
        name,
        directive::BIND,
        model.binds.iter().map(serialize::bind),
    )?;
    insert_all(
        doc,
        kind,
        name,
        directive::USE_BACKEND,
        model.backend_switching.iter().map(serialize::use_backend),
    )?;

    if let Some(default_backend) = &model.default_backend {
        doc.set(kind, name, directive::DEFAULT_BACKEND, default_backend)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "emit_tests.rs"]
mod emit_tests;
