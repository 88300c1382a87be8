// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Configuration model produced by the compiler.
//!
//! The model sits between resources and directive text. Every value in it has already
//! been validated and converted: durations are milliseconds, file names are canonical
//! paths, enumerated values are closed token types, and boolean options use the
//! enable token ([`crate::constants::ENABLED`]) or are absent.
//!
//! A model is built fresh for each compilation and discarded once it is emitted.

use super::types::{
    ConditionType, CookieType, HashFunction, HashMethod, HashModifier, Mode, RedirectType,
    ReturnFormat, SslVersion, TimeoutName, VerifyMode,
};

/// Trailing `if`/`unless` clause of a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    pub condition_type: ConditionType,
    pub expression: String,
}

/// `acl <name> <criterion> <values...>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AclModel {
    pub name: String,
    pub criterion: String,
    pub values: Vec<String>,
}

/// Timeouts in milliseconds, one field per [`TimeoutName`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub check: Option<i64>,
    pub client: Option<i64>,
    pub connect: Option<i64>,
    pub http_keep_alive: Option<i64>,
    pub http_request: Option<i64>,
    pub queue: Option<i64>,
    pub server: Option<i64>,
    pub tunnel: Option<i64>,
}

impl Timeouts {
    /// The field that stores `name`.
    pub fn slot_mut(&mut self, name: TimeoutName) -> &mut Option<i64> {
        match name {
            TimeoutName::Check => &mut self.check,
            TimeoutName::Client => &mut self.client,
            TimeoutName::Connect => &mut self.connect,
            TimeoutName::HttpKeepAlive => &mut self.http_keep_alive,
            TimeoutName::HttpRequest => &mut self.http_request,
            TimeoutName::Queue => &mut self.queue,
            TimeoutName::Server => &mut self.server,
            TimeoutName::Tunnel => &mut self.tunnel,
        }
    }

    #[must_use]
    pub fn get(&self, name: TimeoutName) -> Option<i64> {
        match name {
            TimeoutName::Check => self.check,
            TimeoutName::Client => self.client,
            TimeoutName::Connect => self.connect,
            TimeoutName::HttpKeepAlive => self.http_keep_alive,
            TimeoutName::HttpRequest => self.http_request,
            TimeoutName::Queue => self.queue,
            TimeoutName::Server => self.server,
            TimeoutName::Tunnel => self.tunnel,
        }
    }

    /// Set timeouts in [`TimeoutName::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (TimeoutName, i64)> + '_ {
        TimeoutName::ALL
            .iter()
            .filter_map(|name| self.get(*name).map(|millis| (*name, millis)))
    }
}

/// `errorfile <code> <path>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorFileModel {
    pub code: i64,
    /// Canonical path of the error page
    pub file: String,
}

/// `option forwardfor`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForwardforModel {
    pub enabled: Option<&'static str>,
    pub except: Option<String>,
    pub header: Option<String>,
    pub ifnone: bool,
}

/// Payload of `http-request return`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnContent {
    pub content_type: String,
    pub format: ReturnFormat,
    /// Value as it must appear in the directive (quoted, canonical path or verbatim).
    pub value: Option<String>,
}

/// One `http-request` rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HttpRequestRule {
    SetHeader {
        name: String,
        value: String,
        condition: Option<Condition>,
    },
    AddHeader {
        name: String,
        value: String,
        condition: Option<Condition>,
    },
    DelHeader {
        name: String,
        condition: Option<Condition>,
    },
    SetPath {
        value: String,
        condition: Option<Condition>,
    },
    Redirect {
        redirect_type: RedirectType,
        value: String,
        code: Option<i64>,
        condition: Option<Condition>,
    },
    Deny {
        deny_status: Option<i64>,
        condition: Option<Condition>,
    },
    Return {
        status: i64,
        content: Option<ReturnContent>,
        condition: Option<Condition>,
    },
}

/// One `http-response` rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HttpResponseRule {
    SetHeader {
        name: String,
        value: String,
        condition: Option<Condition>,
    },
    AddHeader {
        name: String,
        value: String,
        condition: Option<Condition>,
    },
    DelHeader {
        name: String,
        condition: Option<Condition>,
    },
}

/// Settings every section kind carries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseModel {
    pub mode: Option<Mode>,
    pub timeouts: Timeouts,
    pub error_files: Vec<ErrorFileModel>,
    pub forwardfor: Option<ForwardforModel>,
    pub acls: Vec<AclModel>,
    pub http_request: Vec<HttpRequestRule>,
    pub http_response: Vec<HttpResponseRule>,
}

/// Options shared by `server` and `server-template` lines.
///
/// Flag options hold the enable token; valued options hold the rendered value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerParamsModel {
    pub backup: Option<&'static str>,
    pub check: Option<&'static str>,
    pub send_proxy: Option<&'static str>,
    pub send_proxy_v2: Option<&'static str>,
    pub ssl: Option<&'static str>,
    pub alpn: Option<String>,
    pub ca_file: Option<String>,
    pub cookie: Option<String>,
    pub crt: Option<String>,
    pub fall: Option<i64>,
    pub init_addr: Option<String>,
    pub inter: Option<i64>,
    pub rise: Option<i64>,
    pub sni: Option<String>,
    pub ssl_min_ver: Option<SslVersion>,
    pub verify: Option<VerifyMode>,
    pub weight: Option<i64>,
}

/// `server <name> <address>:<port> [options]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerModel {
    pub name: String,
    pub address: String,
    pub port: i64,
    pub params: ServerParamsModel,
}

/// `server-template <prefix> <range> <fqdn>:<port> [options]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerTemplateModel {
    pub prefix: String,
    pub num_min: Option<i64>,
    pub num: i64,
    pub fqdn: String,
    pub port: i64,
    pub params: ServerParamsModel,
}

/// `bind <address>:<port> name <name> [options]`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindModel {
    pub name: String,
    pub address: String,
    pub port: i64,
    pub accept_proxy: Option<&'static str>,
    pub alpn: Option<String>,
    pub crt: Option<String>,
    pub ca_file: Option<String>,
    pub ssl: Option<&'static str>,
    pub verify: Option<VerifyMode>,
    pub crt_list: Option<String>,
    pub ssl_min_ver: Option<SslVersion>,
}

/// `balance <algorithm>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceModel {
    /// Lower-cased algorithm, including any argument (e.g. `hdr(host)`)
    pub algorithm: String,
}

/// `hash-type <method> [function] [modifier]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashTypeModel {
    pub method: HashMethod,
    pub function: Option<HashFunction>,
    pub modifier: Option<HashModifier>,
}

/// `cookie <name> [options]`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CookieModel {
    /// Hashed cookie name
    pub name: String,
    pub domains: Vec<String>,
    pub attrs: Vec<String>,
    pub dynamic: bool,
    pub httponly: bool,
    pub indirect: bool,
    pub maxidle: i64,
    pub maxlife: i64,
    pub nocache: bool,
    pub postonly: bool,
    pub preserve: bool,
    pub cookie_type: Option<CookieType>,
    pub secure: bool,
}

/// `option redispatch [interval]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedispatchModel {
    pub enabled: &'static str,
    pub interval: i64,
}

/// `use_backend <name> if|unless <condition>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendSwitchingModel {
    pub backend: String,
    pub condition: Condition,
}

/// Complete model of a `backend` section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackendModel {
    pub name: String,
    pub base: BaseModel,
    pub balance: Option<BalanceModel>,
    pub hash_type: Option<HashTypeModel>,
    pub cookie: Option<CookieModel>,
    pub dynamic_cookie_key: Option<String>,
    pub redispatch: Option<RedispatchModel>,
    pub http_pretend_keepalive: Option<&'static str>,
    pub servers: Vec<ServerModel>,
    pub server_templates: Vec<ServerTemplateModel>,
}

/// Complete model of a `frontend` section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontendModel {
    pub name: String,
    pub base: BaseModel,
    pub binds: Vec<BindModel>,
    pub backend_switching: Vec<BackendSwitchingModel>,
    pub default_backend: Option<String>,
}
