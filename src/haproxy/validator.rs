// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Schema validation of assembled section models.
//!
//! The compiler treats validation as a capability: it hands the finished model to a
//! [`SchemaValidator`] and passes any rejection message through untouched. Tests can
//! substitute their own implementation.
//!
//! [`DataModelValidator`] enforces the constraints of the HAProxy data model schema
//! that the closed token types cannot express: name patterns, numeric ranges and
//! accepted status codes. Messages follow the schema validator convention
//! `<path> in body should ...`.

use super::model::{
    AclModel, BackendModel, BaseModel, BindModel, ErrorFileModel, FrontendModel,
    HttpRequestRule, ServerParamsModel,
};
use crate::constants::{ERRORFILE_CODES, MAX_PORT, MAX_SERVER_WEIGHT, REDIRECT_CODES};
use thiserror::Error;

/// A model rejected by a [`SchemaValidator`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Final acceptance gate for assembled models.
pub trait SchemaValidator {
    /// # Errors
    ///
    /// Returns the first schema violation found in `model`.
    fn validate_backend(&self, model: &BackendModel) -> Result<(), ValidationError>;

    /// # Errors
    ///
    /// Returns the first schema violation found in `model`.
    fn validate_frontend(&self, model: &FrontendModel) -> Result<(), ValidationError>;
}

/// Validator for the HAProxy data model schema.
#[derive(Clone, Copy, Debug, Default)]
pub struct DataModelValidator;

impl SchemaValidator for DataModelValidator {
    fn validate_backend(&self, model: &BackendModel) -> Result<(), ValidationError> {
        section_name("name", &model.name)?;
        base(&model.base)?;

        if let Some(cookie) = &model.cookie {
            required("cookie.name", &cookie.name)?;
            minimum("cookie.maxidle", cookie.maxidle, 0)?;
            minimum("cookie.maxlife", cookie.maxlife, 0)?;
        }
        if let Some(redispatch) = &model.redispatch {
            if redispatch.interval == 0 {
                return Err(ValidationError::new(
                    "redispatch.interval in body should not be 0",
                ));
            }
        }

        for (index, server) in model.servers.iter().enumerate() {
            let path = format!("server.{index}");
            section_name(&format!("{path}.name"), &server.name)?;
            required(&format!("{path}.address"), &server.address)?;
            port(&format!("{path}.port"), server.port)?;
            server_params(&path, &server.params)?;
        }

        for (index, template) in model.server_templates.iter().enumerate() {
            let path = format!("server_template.{index}");
            required(&format!("{path}.prefix"), &template.prefix)?;
            required(&format!("{path}.fqdn"), &template.fqdn)?;
            port(&format!("{path}.port"), template.port)?;
            minimum(&format!("{path}.num_or_range"), template.num, 1)?;
            server_params(&path, &template.params)?;
        }

        Ok(())
    }

    fn validate_frontend(&self, model: &FrontendModel) -> Result<(), ValidationError> {
        section_name("name", &model.name)?;
        base(&model.base)?;

        for (index, bind) in model.binds.iter().enumerate() {
            bind_model(&format!("bind.{index}"), bind)?;
        }

        for (index, rule) in model.backend_switching.iter().enumerate() {
            section_name(&format!("backend_switching_rule.{index}.name"), &rule.backend)?;
            required(
                &format!("backend_switching_rule.{index}.cond_test"),
                &rule.condition.expression,
            )?;
        }

        if let Some(default_backend) = &model.default_backend {
            section_name("default_backend", default_backend)?;
        }

        Ok(())
    }
}

fn base(model: &BaseModel) -> Result<(), ValidationError> {
    for (name, millis) in model.timeouts.iter() {
        minimum(&format!("{}_timeout", name.as_str().replace('-', "_")), millis, 0)?;
    }

    for (index, error_file) in model.error_files.iter().enumerate() {
        errorfile(&format!("error_files.{index}"), error_file)?;
    }

    for (index, acl) in model.acls.iter().enumerate() {
        acl_model(&format!("acl.{index}"), acl)?;
    }

    for (index, rule) in model.http_request.iter().enumerate() {
        http_request_rule(&format!("http_request_rule.{index}"), rule)?;
    }

    Ok(())
}

fn server_params(path: &str, params: &ServerParamsModel) -> Result<(), ValidationError> {
    if let Some(weight) = params.weight {
        range(&format!("{path}.weight"), weight, 0, MAX_SERVER_WEIGHT)?;
    }
    if let Some(inter) = params.inter {
        minimum(&format!("{path}.inter"), inter, 0)?;
    }
    if let Some(rise) = params.rise {
        minimum(&format!("{path}.rise"), rise, 1)?;
    }
    if let Some(fall) = params.fall {
        minimum(&format!("{path}.fall"), fall, 1)?;
    }
    Ok(())
}

fn bind_model(path: &str, bind: &BindModel) -> Result<(), ValidationError> {
    section_name(&format!("{path}.name"), &bind.name)?;
    port(&format!("{path}.port"), bind.port)
}

fn errorfile(path: &str, error_file: &ErrorFileModel) -> Result<(), ValidationError> {
    if !ERRORFILE_CODES.contains(&error_file.code) {
        return Err(ValidationError::new(format!(
            "{path}.code in body should be one of {ERRORFILE_CODES:?}"
        )));
    }
    required(&format!("{path}.file"), &error_file.file)
}

fn acl_model(path: &str, acl: &AclModel) -> Result<(), ValidationError> {
    if acl.name.is_empty() || acl.name.contains(char::is_whitespace) {
        return Err(ValidationError::new(format!(
            "{path}.acl_name in body should match '^[^\\s]+$'"
        )));
    }
    required(&format!("{path}.criterion"), &acl.criterion)
}

fn http_request_rule(path: &str, rule: &HttpRequestRule) -> Result<(), ValidationError> {
    match rule {
        HttpRequestRule::Redirect {
            code: Some(code), ..
        } if !REDIRECT_CODES.contains(code) => Err(ValidationError::new(format!(
            "{path}.redir_code in body should be one of {REDIRECT_CODES:?}"
        ))),
        HttpRequestRule::Deny {
            deny_status: Some(status),
            ..
        } => range(&format!("{path}.deny_status"), *status, 200, 599),
        HttpRequestRule::Return { status, .. } => {
            range(&format!("{path}.return_status_code"), *status, 200, 599)
        }
        _ => Ok(()),
    }
}

/// Names of sections, servers and binds: `^[A-Za-z0-9-_.:]+$`.
fn section_name(path: &str, value: &str) -> Result<(), ValidationError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new(format!(
            "{path} in body should match '^[A-Za-z0-9-_.:]+$'"
        )))
    }
}

fn required(path: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::new(format!("{path} in body is required")))
    } else {
        Ok(())
    }
}

fn port(path: &str, value: i64) -> Result<(), ValidationError> {
    range(path, value, 1, MAX_PORT)
}

fn minimum(path: &str, value: i64, min: i64) -> Result<(), ValidationError> {
    if value < min {
        Err(ValidationError::new(format!(
            "{path} in body should be greater than or equal to {min}"
        )))
    } else {
        Ok(())
    }
}

fn range(path: &str, value: i64, min: i64, max: i64) -> Result<(), ValidationError> {
    minimum(path, value, min)?;
    if value > max {
        Err(ValidationError::new(format!(
            "{path} in body should be less than or equal to {max}"
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod validator_tests;
