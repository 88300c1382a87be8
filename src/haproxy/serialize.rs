// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Serialization of model fragments into directive values.
//!
//! Each function returns the text that follows the directive keyword, e.g. for
//! `server web01 10.0.0.1:80 check` the value is `web01 10.0.0.1:80 check`. Option
//! order is fixed per directive so identical models always produce identical text.

use super::model::{
    AclModel, BackendSwitchingModel, BalanceModel, BindModel, Condition, CookieModel,
    ErrorFileModel, ForwardforModel, HashTypeModel, HttpRequestRule, HttpResponseRule,
    RedispatchModel, ReturnContent, ServerModel, ServerParamsModel, ServerTemplateModel,
};
use std::fmt::Display;

/// Collects space separated words of a directive value.
#[derive(Default)]
struct Words(Vec<String>);

impl Words {
    fn word(&mut self, word: impl Into<String>) -> &mut Self {
        self.0.push(word.into());
        self
    }

    /// Push `keyword` alone when the flag is set.
    fn flag(&mut self, keyword: &str, flag: Option<&'static str>) -> &mut Self {
        if flag.is_some() {
            self.0.push(keyword.to_string());
        }
        self
    }

    /// Push `keyword` alone when `set` is true.
    fn bool(&mut self, keyword: &str, set: bool) -> &mut Self {
        if set {
            self.0.push(keyword.to_string());
        }
        self
    }

    /// Push `keyword value` when the value is present.
    fn option<T: Display>(&mut self, keyword: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.0.push(format!("{keyword} {value}"));
        }
        self
    }

    fn condition(&mut self, condition: Option<&Condition>) -> &mut Self {
        if let Some(condition) = condition {
            self.0.push(condition_clause(condition));
        }
        self
    }

    fn finish(&mut self) -> String {
        std::mem::take(&mut self.0).join(" ")
    }
}

/// `if <expression>` or `unless <expression>`.
#[must_use]
pub fn condition_clause(condition: &Condition) -> String {
    format!("{} {}", condition.condition_type, condition.expression)
}

fn server_params(words: &mut Words, params: &ServerParamsModel) {
    words
        .flag("backup", params.backup)
        .flag("check", params.check)
        .flag("send-proxy", params.send_proxy)
        .flag("send-proxy-v2", params.send_proxy_v2)
        .flag("ssl", params.ssl)
        .option("alpn", params.alpn.as_deref())
        .option("ca-file", params.ca_file.as_deref())
        .option("cookie", params.cookie.as_deref())
        .option("crt", params.crt.as_deref())
        .option("fall", params.fall)
        .option("init-addr", params.init_addr.as_deref())
        .option("inter", params.inter)
        .option("rise", params.rise)
        .option("sni", params.sni.as_deref())
        .option("ssl-min-ver", params.ssl_min_ver)
        .option("verify", params.verify)
        .option("weight", params.weight);
}

/// `<name> <address>:<port> [options]`
#[must_use]
pub fn server(server: &ServerModel) -> String {
    let mut words = Words::default();
    words
        .word(server.name.as_str())
        .word(format!("{}:{}", server.address, server.port));
    server_params(&mut words, &server.params);
    words.finish()
}

/// `<prefix> <min>-<num> <fqdn>:<port> [options]`, or `<prefix> <num> ...` without a
/// lower bound.
#[must_use]
pub fn server_template(template: &ServerTemplateModel) -> String {
    let range = match template.num_min {
        Some(min) => format!("{min}-{}", template.num),
        None => template.num.to_string(),
    };

    let mut words = Words::default();
    words
        .word(template.prefix.as_str())
        .word(range)
        .word(format!("{}:{}", template.fqdn, template.port));
    server_params(&mut words, &template.params);
    words.finish()
}

/// `<address>:<port> name <name> [ssl options]`
#[must_use]
pub fn bind(bind: &BindModel) -> String {
    Words::default()
        .word(format!("{}:{}", bind.address, bind.port))
        .option("name", Some(bind.name.as_str()))
        .flag("accept-proxy", bind.accept_proxy)
        .option("alpn", bind.alpn.as_deref())
        .option("crt", bind.crt.as_deref())
        .option("ca-file", bind.ca_file.as_deref())
        .flag("ssl", bind.ssl)
        .option("verify", bind.verify)
        .option("crt-list", bind.crt_list.as_deref())
        .option("ssl-min-ver", bind.ssl_min_ver)
        .finish()
}

#[must_use]
pub fn balance(balance: &BalanceModel) -> String {
    balance.algorithm.clone()
}

/// `<method> [function] [modifier]`
#[must_use]
pub fn hash_type(hash_type: &HashTypeModel) -> String {
    let mut words = Words::default();
    words.word(hash_type.method.as_str());
    if let Some(function) = hash_type.function {
        words.word(function.as_str());
    }
    if let Some(modifier) = hash_type.modifier {
        words.word(modifier.as_str());
    }
    words.finish()
}

/// `<name> domain <d>... attr <a>... [flags] [maxidle n] [maxlife n] [type] [secure]`
#[must_use]
pub fn cookie(cookie: &CookieModel) -> String {
    let mut words = Words::default();
    words.word(cookie.name.as_str());
    for domain in &cookie.domains {
        words.option("domain", Some(domain));
    }
    for attr in &cookie.attrs {
        words.option("attr", Some(attr));
    }
    words
        .bool("dynamic", cookie.dynamic)
        .bool("httponly", cookie.httponly)
        .bool("indirect", cookie.indirect)
        .option("maxidle", (cookie.maxidle > 0).then_some(cookie.maxidle))
        .option("maxlife", (cookie.maxlife > 0).then_some(cookie.maxlife))
        .bool("nocache", cookie.nocache)
        .bool("postonly", cookie.postonly)
        .bool("preserve", cookie.preserve);
    if let Some(cookie_type) = cookie.cookie_type {
        words.word(cookie_type.as_str());
    }
    words.bool("secure", cookie.secure).finish()
}

/// `[except <network>] [header <name>] [if-none]`; empty for the bare option.
#[must_use]
pub fn forwardfor(forwardfor: &ForwardforModel) -> String {
    Words::default()
        .option("except", forwardfor.except.as_deref())
        .option("header", forwardfor.header.as_deref())
        .bool("if-none", forwardfor.ifnone)
        .finish()
}

#[must_use]
pub fn redispatch(redispatch: &RedispatchModel) -> String {
    redispatch.interval.to_string()
}

/// `<code> <path>`
#[must_use]
pub fn errorfile(error_file: &ErrorFileModel) -> String {
    format!("{} {}", error_file.code, error_file.file)
}

/// `<name> <criterion> <values...>`
#[must_use]
pub fn acl(acl: &AclModel) -> String {
    let mut words = Words::default();
    words.word(acl.name.as_str()).word(acl.criterion.as_str());
    for value in &acl.values {
        words.word(value.as_str());
    }
    words.finish()
}

fn return_content(words: &mut Words, content: &ReturnContent) {
    words
        .option("content-type", Some(content.content_type.as_str()))
        .word(content.format.as_str());
    if let Some(value) = &content.value {
        words.word(value.as_str());
    }
}

/// Value of one `http-request` directive.
#[must_use]
pub fn http_request(rule: &HttpRequestRule) -> String {
    let mut words = Words::default();
    match rule {
        HttpRequestRule::SetHeader {
            name,
            value,
            condition,
        } => words
            .word("set-header")
            .word(name.as_str())
            .word(value.as_str())
            .condition(condition.as_ref()),
        HttpRequestRule::AddHeader {
            name,
            value,
            condition,
        } => words
            .word("add-header")
            .word(name.as_str())
            .word(value.as_str())
            .condition(condition.as_ref()),
        HttpRequestRule::DelHeader { name, condition } => words
            .word("del-header")
            .word(name.as_str())
            .condition(condition.as_ref()),
        HttpRequestRule::SetPath { value, condition } => words
            .word("set-path")
            .word(value.as_str())
            .condition(condition.as_ref()),
        HttpRequestRule::Redirect {
            redirect_type,
            value,
            code,
            condition,
        } => words
            .word("redirect")
            .word(redirect_type.as_str())
            .word(value.as_str())
            .option("code", *code)
            .condition(condition.as_ref()),
        HttpRequestRule::Deny {
            deny_status,
            condition,
        } => words
            .word("deny")
            .option("deny_status", *deny_status)
            .condition(condition.as_ref()),
        HttpRequestRule::Return {
            status,
            content,
            condition,
        } => {
            words.word("return").option("status", Some(status));
            if let Some(content) = content {
                return_content(&mut words, content);
            }
            words.condition(condition.as_ref())
        }
    };
    words.finish()
}

/// Value of one `http-response` directive.
#[must_use]
pub fn http_response(rule: &HttpResponseRule) -> String {
    let mut words = Words::default();
    match rule {
        HttpResponseRule::SetHeader {
            name,
            value,
            condition,
        } => words
            .word("set-header")
            .word(name.as_str())
            .word(value.as_str())
            .condition(condition.as_ref()),
        HttpResponseRule::AddHeader {
            name,
            value,
            condition,
        } => words
            .word("add-header")
            .word(name.as_str())
            .word(value.as_str())
            .condition(condition.as_ref()),
        HttpResponseRule::DelHeader { name, condition } => words
            .word("del-header")
            .word(name.as_str())
            .condition(condition.as_ref()),
    };
    words.finish()
}

/// `<backend> if|unless <condition>`
#[must_use]
pub fn use_backend(rule: &BackendSwitchingModel) -> String {
    format!("{} {}", rule.backend, condition_clause(&rule.condition))
}

#[cfg(test)]
#[path = "serialize_tests.rs"]
mod serialize_tests;
