// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for HAProxy token types

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_tokens_parse_and_render() {
        for version in SslVersion::ALL {
            assert_eq!(version.as_str().parse::<SslVersion>().unwrap(), *version);
        }
        assert_eq!("TLSv1.3".parse::<SslVersion>().unwrap(), SslVersion::TlsV13);
        assert_eq!(SslVersion::SslV3.to_string(), "SSLv3");
        assert_eq!("http-keep-alive".parse::<TimeoutName>().unwrap(), TimeoutName::HttpKeepAlive);
    }

    #[test]
    fn test_unknown_token_lists_expected_values() {
        let err = "XSSLv3".parse::<SslVersion>().unwrap_err();
        assert_eq!(err.value, "XSSLv3");
        assert_eq!(
            err.to_string(),
            "unsupported value 'XSSLv3', expected one of: SSLv3, TLSv1.0, TLSv1.1, TLSv1.2, TLSv1.3"
        );
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert!("HTTP".parse::<Mode>().is_err());
        assert!("udp".parse::<Mode>().is_err());
        assert!("disabled".parse::<VerifyMode>().is_err());
    }

    #[test]
    fn test_timeout_applies_to_frontend() {
        let frontend: Vec<&str> = TimeoutName::ALL
            .iter()
            .filter(|name| name.applies_to(SectionKind::Frontend))
            .map(|name| name.as_str())
            .collect();
        assert_eq!(frontend, vec!["client", "http-keep-alive", "http-request"]);
    }

    #[test]
    fn test_timeout_applies_to_backend() {
        let backend: Vec<&str> = TimeoutName::ALL
            .iter()
            .filter(|name| name.applies_to(SectionKind::Backend))
            .map(|name| name.as_str())
            .collect();
        assert_eq!(
            backend,
            vec![
                "check",
                "connect",
                "http-keep-alive",
                "http-request",
                "queue",
                "server",
                "tunnel"
            ]
        );
    }

    #[test]
    fn test_every_timeout_applies_somewhere() {
        for name in TimeoutName::ALL {
            assert!(
                name.applies_to(SectionKind::Frontend) || name.applies_to(SectionKind::Backend),
                "timeout {name} must be placeable"
            );
        }
    }
}
