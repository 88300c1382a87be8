// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! ACLs, HTTP rules, error files and the other ordered rule lists.
//!
//! Rule lists are converted 1:1 and keep the order of the input sequence, since HAProxy
//! evaluates rules in the order they appear. A rule's `if`/`unless` clause is attached
//! only when the rule carries one.

use super::balance::token;
use super::error::{single_line, CompileError, Result};
use super::ssl::canonical_path;
use crate::constants::{DEFAULT_RETURN_STATUS, ENABLED};
use crate::crd::{
    BackendSwitchingRule, ErrorFile, Forwardfor, HTTPHeaderRule, HTTPHeaderValue, HTTPReturn,
    HTTPRequestRules, HTTPResponseRules, Rule, ACL,
};
use crate::haproxy::model::{
    AclModel, BackendSwitchingModel, Condition, ErrorFileModel, ForwardforModel,
    HttpRequestRule, HttpResponseRule, ReturnContent,
};
use crate::haproxy::paths::PathResolver;
use crate::haproxy::types::{ConditionType, RedirectType, ReturnFormat};
use crate::haproxy::units::non_empty;

/// Placeholder a header value format must contain.
const FORMAT_PLACEHOLDER: &str = "%s";

/// Convert the optional `if`/`unless` clause of a rule.
///
/// # Errors
///
/// Fails when only one of `conditionType` and `condition` is set, or the type is
/// neither `if` nor `unless`.
pub fn build_condition(rule: &Rule, field: &str) -> Result<Option<Condition>> {
    let condition_type = rule.condition_type.as_deref().and_then(non_empty);
    let expression = rule.condition.as_deref().and_then(non_empty);

    match (condition_type, expression) {
        (None, None) => Ok(None),
        (Some(condition_type), Some(expression)) => Ok(Some(Condition {
            condition_type: token::<ConditionType>(
                &format!("{field}.conditionType"),
                condition_type,
            )?,
            expression: single_line(&format!("{field}.condition"), expression)?.to_string(),
        })),
        (Some(_), None) => Err(CompileError::missing(format!("{field}.condition"))),
        (None, Some(_)) => Err(CompileError::missing(format!("{field}.conditionType"))),
    }
}

/// Render a header value: a literal or `${NAME}`, optionally placed into a format.
///
/// # Errors
///
/// Fails unless exactly one of `str` and `env` is set, or when the format lacks `%s`.
pub fn header_value(value: &HTTPHeaderValue, field: &str) -> Result<String> {
    let rendered = match (&value.str, &value.env) {
        (Some(literal), None) => single_line(&format!("{field}.str"), literal)?.to_string(),
        (None, Some(env)) => {
            if env.name.is_empty() {
                return Err(CompileError::missing(format!("{field}.env.name")));
            }
            format!("${{{}}}", single_line(&format!("{field}.env.name"), &env.name)?)
        }
        (None, None) => return Err(CompileError::missing(format!("{field}.str"))),
        (Some(_), Some(_)) => {
            return Err(CompileError::invalid(
                field,
                "str and env",
                "exactly one of str or env must be set",
            ))
        }
    };

    match value.format.as_deref() {
        None => Ok(rendered),
        Some(format) if format.contains(FORMAT_PLACEHOLDER) => {
            single_line(&format!("{field}.format"), format)?;
            Ok(format.replacen(FORMAT_PLACEHOLDER, &rendered, 1))
        }
        Some(format) => Err(CompileError::invalid(
            format!("{field}.format"),
            format,
            "format must contain %s",
        )),
    }
}

/// `acl` lines in input order.
///
/// # Errors
///
/// Fails when a name, criterion or value spans more than one line.
pub fn build_acls(acls: &[ACL]) -> Result<Vec<AclModel>> {
    acls.iter()
        .enumerate()
        .map(|(index, acl)| {
            let field = format!("acl[{index}]");
            Ok(AclModel {
                name: single_line(&format!("{field}.name"), &acl.name)?.to_string(),
                criterion: single_line(&format!("{field}.criterion"), &acl.criterion)?
                    .to_string(),
                values: acl
                    .values
                    .iter()
                    .enumerate()
                    .map(|(position, value)| {
                        single_line(&format!("{field}.values[{position}]"), value)
                            .map(str::to_string)
                    })
                    .collect::<Result<_>>()?,
            })
        })
        .collect()
}

/// `errorfile` lines in input order, with canonical paths.
///
/// # Errors
///
/// Fails when a file name is empty or leaves the configuration root.
pub fn build_error_files(
    error_files: &[ErrorFile],
    paths: &PathResolver,
) -> Result<Vec<ErrorFileModel>> {
    error_files
        .iter()
        .enumerate()
        .map(|(index, error_file)| {
            Ok(ErrorFileModel {
                code: error_file.code,
                file: canonical_path(
                    &error_file.file.name,
                    &format!("errorFiles[{index}].file.name"),
                    paths,
                )?,
            })
        })
        .collect()
}

/// `option forwardfor`, or `None` when the resource does not mention it.
///
/// # Errors
///
/// Fails when `except` or `header` spans more than one line.
pub fn build_forwardfor(forwardfor: Option<&Forwardfor>) -> Result<Option<ForwardforModel>> {
    forwardfor
        .map(|forwardfor| {
            Ok(ForwardforModel {
                enabled: forwardfor.enabled.then_some(ENABLED),
                except: non_empty(single_line("forwardfor.except", &forwardfor.except)?)
                    .map(str::to_string),
                header: non_empty(single_line("forwardfor.header", &forwardfor.header)?)
                    .map(str::to_string),
                ifnone: forwardfor.ifnone,
            })
        })
        .transpose()
}

type HeaderParts = (String, String, Option<Condition>);

fn header_rule(rule: &HTTPHeaderRule, field: &str) -> Result<HeaderParts> {
    if rule.name.is_empty() {
        return Err(CompileError::missing(format!("{field}.name")));
    }
    Ok((
        single_line(&format!("{field}.name"), &rule.name)?.to_string(),
        header_value(&rule.value, &format!("{field}.value"))?,
        build_condition(&rule.rule, field)?,
    ))
}

/// Render the payload of a `return` rule according to its format.
fn return_value(
    format: ReturnFormat,
    value: &str,
    field: &str,
    paths: &PathResolver,
) -> Result<Option<String>> {
    if format == ReturnFormat::DefaultErrorfile {
        return Ok(None);
    }
    if value.is_empty() {
        return Err(CompileError::missing(field));
    }
    single_line(field, value)?;
    let rendered = match format {
        ReturnFormat::String | ReturnFormat::LfString => format!(
            "\"{}\"",
            value.replace('\\', "\\\\").replace('"', "\\\"")
        ),
        ReturnFormat::File | ReturnFormat::LfFile => canonical_path(value, field, paths)?,
        ReturnFormat::Errorfile | ReturnFormat::Errorfiles | ReturnFormat::DefaultErrorfile => {
            value.to_string()
        }
    };
    Ok(Some(rendered))
}

fn build_return(rule: &HTTPReturn, paths: &PathResolver) -> Result<HttpRequestRule> {
    let content = rule
        .content
        .as_ref()
        .map(|content| -> Result<ReturnContent> {
            let format = token::<ReturnFormat>("httpRequest.return.content.format", &content.format)?;
            if content.content_type.is_empty() {
                return Err(CompileError::missing("httpRequest.return.content.type"));
            }
            Ok(ReturnContent {
                content_type: single_line(
                    "httpRequest.return.content.type",
                    &content.content_type,
                )?
                .to_string(),
                format,
                value: return_value(
                    format,
                    &content.value,
                    "httpRequest.return.content.value",
                    paths,
                )?,
            })
        })
        .transpose()?;

    Ok(HttpRequestRule::Return {
        status: rule.status.unwrap_or(DEFAULT_RETURN_STATUS),
        content,
        condition: build_condition(&rule.rule, "httpRequest.return")?,
    })
}

/// `http-request` rules: set-header, add-header, del-header, set-path, redirect,
/// deny, return; each group in input order.
///
/// # Errors
///
/// Returns the first error of any rule.
pub fn build_http_request(
    rules: &HTTPRequestRules,
    paths: &PathResolver,
) -> Result<Vec<HttpRequestRule>> {
    let mut model = Vec::new();

    for (index, rule) in rules.set_header.iter().enumerate() {
        let (name, value, condition) =
            header_rule(rule, &format!("httpRequest.setHeader[{index}]"))?;
        model.push(HttpRequestRule::SetHeader {
            name,
            value,
            condition,
        });
    }

    for (index, rule) in rules.add_header.iter().enumerate() {
        let (name, value, condition) =
            header_rule(rule, &format!("httpRequest.addHeader[{index}]"))?;
        model.push(HttpRequestRule::AddHeader {
            name,
            value,
            condition,
        });
    }

    for (index, rule) in rules.del_header.iter().enumerate() {
        let field = format!("httpRequest.delHeader[{index}]");
        if rule.name.is_empty() {
            return Err(CompileError::missing(format!("{field}.name")));
        }
        model.push(HttpRequestRule::DelHeader {
            name: single_line(&format!("{field}.name"), &rule.name)?.to_string(),
            condition: build_condition(&rule.rule, &field)?,
        });
    }

    for (index, rule) in rules.set_path.iter().enumerate() {
        let field = format!("httpRequest.setPath[{index}]");
        if rule.value.is_empty() {
            return Err(CompileError::missing(format!("{field}.value")));
        }
        model.push(HttpRequestRule::SetPath {
            value: single_line(&format!("{field}.value"), &rule.value)?.to_string(),
            condition: build_condition(&rule.rule, &field)?,
        });
    }

    for (index, rule) in rules.redirect.iter().enumerate() {
        let field = format!("httpRequest.redirect[{index}]");
        if rule.value.is_empty() {
            return Err(CompileError::missing(format!("{field}.value")));
        }
        model.push(HttpRequestRule::Redirect {
            redirect_type: token::<RedirectType>(&format!("{field}.type"), &rule.redirect_type)?,
            value: single_line(&format!("{field}.value"), &rule.value)?.to_string(),
            code: rule.code,
            condition: build_condition(&rule.rule, &field)?,
        });
    }

    if let Some(deny) = &rules.deny {
        model.push(HttpRequestRule::Deny {
            deny_status: deny.deny_status,
            condition: build_condition(&deny.rule, "httpRequest.deny")?,
        });
    }

    if let Some(rule) = &rules.return_rule {
        model.push(build_return(rule, paths)?);
    }

    Ok(model)
}

/// `http-response` rules: set-header, add-header, del-header; each group in input
/// order.
///
/// # Errors
///
/// Returns the first error of any rule.
pub fn build_http_response(rules: &HTTPResponseRules) -> Result<Vec<HttpResponseRule>> {
    let mut model = Vec::new();

    for (index, rule) in rules.set_header.iter().enumerate() {
        let (name, value, condition) =
            header_rule(rule, &format!("httpResponse.setHeader[{index}]"))?;
        model.push(HttpResponseRule::SetHeader {
            name,
            value,
            condition,
        });
    }

    for (index, rule) in rules.add_header.iter().enumerate() {
        let (name, value, condition) =
            header_rule(rule, &format!("httpResponse.addHeader[{index}]"))?;
        model.push(HttpResponseRule::AddHeader {
            name,
            value,
            condition,
        });
    }

    for (index, rule) in rules.del_header.iter().enumerate() {
        let field = format!("httpResponse.delHeader[{index}]");
        if rule.name.is_empty() {
            return Err(CompileError::missing(format!("{field}.name")));
        }
        model.push(HttpResponseRule::DelHeader {
            name: single_line(&format!("{field}.name"), &rule.name)?.to_string(),
            condition: build_condition(&rule.rule, &field)?,
        });
    }

    Ok(model)
}

/// `use_backend` rules in input order. Every rule needs a condition.
///
/// # Errors
///
/// Fails when a rule has no backend name or no condition.
pub fn build_backend_switching(
    rules: &[BackendSwitchingRule],
) -> Result<Vec<BackendSwitchingModel>> {
    rules
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            let field = format!("backendSwitching[{index}]");
            if rule.backend.name.is_empty() {
                return Err(CompileError::missing(format!("{field}.backend.name")));
            }
            let condition = build_condition(&rule.rule, &field)?
                .ok_or_else(|| CompileError::missing(format!("{field}.condition")))?;
            Ok(BackendSwitchingModel {
                backend: single_line(&format!("{field}.backend.name"), &rule.backend.name)?
                    .to_string(),
                condition,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
