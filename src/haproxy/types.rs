// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Closed token types for enumerated HAProxy keywords.
//!
//! Resources carry enumerated values as strings. Each type here accepts exactly the
//! tokens HAProxy understands and renders back the same token, so a value that parses
//! is always a value HAProxy accepts.

use std::fmt;
use std::str::FromStr;

/// A string that is not one of the tokens a keyword accepts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported value '{value}', expected one of: {}", .expected.join(", "))]
pub struct UnknownToken {
    /// The rejected input
    pub value: String,
    /// Every accepted token
    pub expected: &'static [&'static str],
}

/// Declare an enum whose variants map 1:1 onto keyword tokens.
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$( Self::$variant ),+];

            /// Every accepted token, in declaration order.
            pub const TOKENS: &'static [&'static str] = &[$( $token ),+];

            /// The keyword token for this value.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $token ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownToken;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $( $token => Ok(Self::$variant), )+
                    _ => Err(UnknownToken {
                        value: value.to_string(),
                        expected: Self::TOKENS,
                    }),
                }
            }
        }
    };
}

token_enum! {
    /// Kind of configuration section.
    pub enum SectionKind {
        Frontend => "frontend",
        Backend => "backend",
    }
}

token_enum! {
    /// Proxy mode.
    pub enum Mode {
        Http => "http",
        Tcp => "tcp",
    }
}

token_enum! {
    /// Protocol versions accepted by `ssl-min-ver`.
    pub enum SslVersion {
        SslV3 => "SSLv3",
        TlsV10 => "TLSv1.0",
        TlsV11 => "TLSv1.1",
        TlsV12 => "TLSv1.2",
        TlsV13 => "TLSv1.3",
    }
}

token_enum! {
    /// Peer certificate verification.
    pub enum VerifyMode {
        None => "none",
        /// Only meaningful on binds.
        Optional => "optional",
        Required => "required",
    }
}

token_enum! {
    /// Persistence cookie mode.
    pub enum CookieType {
        Rewrite => "rewrite",
        Insert => "insert",
        Prefix => "prefix",
    }
}

token_enum! {
    /// Timeouts the compiler knows how to place.
    pub enum TimeoutName {
        Check => "check",
        Client => "client",
        Connect => "connect",
        HttpKeepAlive => "http-keep-alive",
        HttpRequest => "http-request",
        Queue => "queue",
        Server => "server",
        Tunnel => "tunnel",
    }
}

impl TimeoutName {
    /// Whether HAProxy accepts this timeout in a section of `kind`.
    #[must_use]
    pub fn applies_to(self, kind: SectionKind) -> bool {
        match self {
            Self::Client => kind == SectionKind::Frontend,
            Self::HttpKeepAlive | Self::HttpRequest => true,
            Self::Check | Self::Connect | Self::Queue | Self::Server | Self::Tunnel => {
                kind == SectionKind::Backend
            }
        }
    }
}

token_enum! {
    /// Base names of the load balancing algorithms.
    pub enum BalanceAlgorithm {
        RoundRobin => "roundrobin",
        StaticRr => "static-rr",
        LeastConn => "leastconn",
        First => "first",
        Source => "source",
        Uri => "uri",
        UrlParam => "url_param",
        Hdr => "hdr",
        Random => "random",
        RdpCookie => "rdp-cookie",
    }
}

token_enum! {
    /// Hash mapping method.
    pub enum HashMethod {
        MapBased => "map-based",
        Consistent => "consistent",
    }
}

token_enum! {
    /// Hash function.
    pub enum HashFunction {
        Sdbm => "sdbm",
        Djb2 => "djb2",
        Wt6 => "wt6",
        Crc32 => "crc32",
    }
}

token_enum! {
    /// Hash modifier.
    pub enum HashModifier {
        Avalanche => "avalanche",
    }
}

token_enum! {
    /// Rule condition keyword.
    pub enum ConditionType {
        If => "if",
        Unless => "unless",
    }
}

token_enum! {
    /// Payload format of `http-request return`.
    pub enum ReturnFormat {
        DefaultErrorfile => "default-errorfile",
        Errorfile => "errorfile",
        Errorfiles => "errorfiles",
        File => "file",
        LfFile => "lf-file",
        String => "string",
        LfString => "lf-string",
    }
}

token_enum! {
    /// Kind of `http-request redirect`.
    pub enum RedirectType {
        Location => "location",
        Prefix => "prefix",
        Scheme => "scheme",
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
