// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the compiler entry points

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::crd::{
        BackendOptions, BackendSpec, BaseSpec, Bind, Cookie, CookieMode, ErrorFile, FrontendSpec,
        HTTPHeaderRule, HTTPHeaderValue, HTTPRequestRules, HashType, ListenSpec, SSLCertificate,
        Server, StaticHTTPFile, SSL,
    };
    use crate::haproxy::document::ConfigDocument;
    use crate::haproxy::validator::ValidationError;
    use std::collections::BTreeMap;

    /// Rejects every model with a fixed message.
    struct RejectingValidator;

    impl SchemaValidator for RejectingValidator {
        fn validate_backend(
            &self,
            _model: &BackendModel,
        ) -> std::result::Result<(), ValidationError> {
            Err(ValidationError::new("name in body should match '^[a-z]+$'"))
        }

        fn validate_frontend(
            &self,
            _model: &FrontendModel,
        ) -> std::result::Result<(), ValidationError> {
            Err(ValidationError::new("binds in body is required"))
        }
    }

    fn compiler() -> Compiler {
        Compiler::new(&CompilerConfig::default())
    }

    fn server(name: &str, address: &str, port: i64) -> Server {
        Server {
            name: name.to_string(),
            address: address.to_string(),
            port: Some(port),
            ..Default::default()
        }
    }

    fn backend(spec: BackendSpec) -> Backend {
        Backend::new("foo", spec)
    }

    fn render_backend(spec: BackendSpec) -> String {
        let mut doc = ConfigDocument::new();
        compiler().compile_backend(&backend(spec), &mut doc).unwrap();
        doc.to_string()
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    #[test]
    fn test_config_default_root() {
        let config = CompilerConfig::default();
        assert_eq!(config.config_root, "/usr/local/etc/haproxy");
        assert_eq!(compiler().paths().root(), "/usr/local/etc/haproxy");
    }

    #[test]
    fn test_config_deserializes_camel_case() {
        let config: CompilerConfig =
            serde_json::from_str(r#"{"configRoot": "/etc/haproxy"}"#).unwrap();
        assert_eq!(
            Compiler::new(&config).paths().resolve("ca.crt"),
            "/etc/haproxy/ca.crt"
        );
    }

    // ========================================================================
    // Backend
    // ========================================================================

    #[test]
    fn test_backend_servers_in_input_order() {
        let output = render_backend(BackendSpec {
            options: BackendOptions {
                servers: vec![
                    server("server02", "10.0.0.2", 8080),
                    server("server01", "10.0.0.1", 8080),
                ],
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(
            output,
            "\nbackend foo\n  server server02 10.0.0.2:8080\n  server server01 10.0.0.1:8080\n"
        );
    }

    #[test]
    fn test_backend_timeouts_in_milliseconds() {
        let output = render_backend(BackendSpec {
            base: BaseSpec {
                timeouts: BTreeMap::from([
                    ("server".to_string(), "30s".to_string()),
                    ("tunnel".to_string(), "1h".to_string()),
                ]),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(
            output,
            "\nbackend foo\n  timeout server 30000\n  timeout tunnel 3600000\n"
        );
    }

    #[test]
    fn test_backend_cookie_and_hash_type() {
        let mut doc = ConfigDocument::new();
        compiler()
            .compile_backend(
                &backend(BackendSpec {
                    options: BackendOptions {
                        cookie: Some(Cookie {
                            name: "cookie_name".to_string(),
                            mode: CookieMode {
                                insert: true,
                                ..Default::default()
                            },
                            indirect: Some(true),
                            no_cache: Some(true),
                            dynamic: Some(true),
                            ..Default::default()
                        }),
                        hash_type: Some(HashType {
                            method: "map-based".to_string(),
                            function: "sdbm".to_string(),
                            modifier: "avalanche".to_string(),
                        }),
                        ..Default::default()
                    },
                    ..Default::default()
                }),
                &mut doc,
            )
            .unwrap();

        let section = doc.section(SectionKind::Backend, "foo").unwrap();
        assert_eq!(
            section.values("cookie"),
            ["e3cb9741ffde596f46710a5d7e3ec587 dynamic indirect nocache insert"]
        );
        assert_eq!(
            section.values("dynamic-cookie-key"),
            ["e3cb9741ffde596f46710a5d7e3ec587"]
        );
        assert_eq!(section.values("hash-type"), ["map-based sdbm avalanche"]);
    }

    #[test]
    fn test_server_cookie_is_address_hash() {
        let mut with_cookie = server("server", "localhost", 80);
        with_cookie.params.cookie = true;

        let output = render_backend(BackendSpec {
            options: BackendOptions {
                servers: vec![with_cookie],
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(
            output,
            "\nbackend foo\n  server server localhost:80 cookie 1c3c2192e2912699ccd31119b162666a\n"
        );
    }

    #[test]
    fn test_server_missing_address_leaves_document_untouched() {
        let mut doc = ConfigDocument::new();
        let err = compiler()
            .compile_backend(
                &backend(BackendSpec {
                    options: BackendOptions {
                        servers: vec![server("server", "", 80)],
                        ..Default::default()
                    },
                    ..Default::default()
                }),
                &mut doc,
            )
            .unwrap_err();

        assert_eq!(err.stage(), CompileStage::Model);
        assert_eq!(err.to_string(), "missing required field 'servers[0].address'");
        assert!(doc.sections().is_empty());
    }

    #[test]
    fn test_invalid_mode_fails() {
        let mut doc = ConfigDocument::new();
        let err = compiler()
            .compile_backend(
                &backend(BackendSpec {
                    base: BaseSpec {
                        mode: "udp".to_string(),
                        ..Default::default()
                    },
                    ..Default::default()
                }),
                &mut doc,
            )
            .unwrap_err();
        assert_eq!(err.stage(), CompileStage::Model);
        assert!(doc.sections().is_empty());
    }

    #[test]
    fn test_empty_name_fails() {
        let mut doc = ConfigDocument::new();
        let err = compiler()
            .compile_backend(&Backend::new("", BackendSpec::default()), &mut doc)
            .unwrap_err();
        assert_eq!(err, CompileError::missing("metadata.name"));
    }

    #[test]
    fn test_name_with_line_break_fails() {
        let mut doc = ConfigDocument::new();
        let err = compiler()
            .compile_backend(&Backend::new("foo\nlisten evil", BackendSpec::default()), &mut doc)
            .unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidValue { ref field, .. } if field == "metadata.name"
        ));
        assert!(doc.sections().is_empty());
    }

    #[test]
    fn test_compile_is_deterministic() {
        let spec = BackendSpec {
            base: BaseSpec {
                mode: "http".to_string(),
                timeouts: BTreeMap::from([
                    ("server".to_string(), "30s".to_string()),
                    ("connect".to_string(), "5s".to_string()),
                    ("check".to_string(), "2s".to_string()),
                ]),
                ..Default::default()
            },
            options: BackendOptions {
                redispatch: Some(true),
                servers: vec![server("a", "10.0.0.1", 80), server("b", "10.0.0.2", 80)],
                ..Default::default()
            },
        };
        assert_eq!(render_backend(spec.clone()), render_backend(spec));
    }

    // ========================================================================
    // Frontend
    // ========================================================================

    fn ssl_bind(verify: &str) -> Bind {
        Bind {
            name: "bind".to_string(),
            address: "0.0.0.0".to_string(),
            port: Some(443),
            ssl: Some(SSL {
                enabled: true,
                verify: verify.to_string(),
                alpn: vec!["h2".to_string(), "http/1.1".to_string()],
                certificate: Some(SSLCertificate {
                    name: "test.crt".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn render_frontend(spec: FrontendSpec) -> String {
        let mut doc = ConfigDocument::new();
        compiler()
            .compile_frontend(&Frontend::new("public", spec), &mut doc)
            .unwrap();
        doc.to_string()
    }

    #[test]
    fn test_ssl_bind_verify_required() {
        let output = render_frontend(FrontendSpec {
            binds: vec![ssl_bind("required")],
            ..Default::default()
        });
        assert_eq!(
            output,
            "\nfrontend public\n  bind 0.0.0.0:443 name bind alpn h2,http/1.1 \
             crt /usr/local/etc/haproxy/test.crt ssl verify required\n"
        );
    }

    #[test]
    fn test_ssl_bind_verify_none_drops_alpn() {
        let output = render_frontend(FrontendSpec {
            binds: vec![ssl_bind("none")],
            ..Default::default()
        });
        assert_eq!(
            output,
            "\nfrontend public\n  bind 0.0.0.0:443 name bind crt /usr/local/etc/haproxy/test.crt ssl\n"
        );
    }

    #[test]
    fn test_errorfile_path() {
        let output = render_frontend(FrontendSpec {
            base: BaseSpec {
                error_files: vec![ErrorFile {
                    code: 500,
                    file: StaticHTTPFile {
                        name: "error-file-500.http".to_string(),
                        ..Default::default()
                    },
                }],
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(
            output,
            "\nfrontend public\n  errorfile 500 /usr/local/etc/haproxy/error-file-500.http\n"
        );
    }

    #[test]
    fn test_bind_missing_port_fails() {
        let mut doc = ConfigDocument::new();
        let err = compiler()
            .compile_frontend(
                &Frontend::new(
                    "public",
                    FrontendSpec {
                        binds: vec![Bind {
                            name: "bind".to_string(),
                            ..Default::default()
                        }],
                        ..Default::default()
                    },
                ),
                &mut doc,
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required field 'binds[0].port'");
    }

    // ========================================================================
    // Listen
    // ========================================================================

    #[test]
    fn test_minimal_listen() {
        let mut doc = ConfigDocument::new();
        compiler()
            .compile_listen(&Listen::new("foo", ListenSpec::default()), &mut doc)
            .unwrap();
        assert_eq!(
            doc.to_string(),
            "\nfrontend foo\n  default_backend foo\n\nbackend foo\n"
        );
    }

    #[test]
    fn test_listen_routes_to_its_backend() {
        let mut doc = ConfigDocument::new();
        compiler()
            .compile_listen(
                &Listen::new(
                    "foo",
                    ListenSpec {
                        base: BaseSpec {
                            mode: "http".to_string(),
                            ..Default::default()
                        },
                        binds: vec![Bind {
                            name: "bind01".to_string(),
                            port: Some(80),
                            ..Default::default()
                        }],
                        options: BackendOptions {
                            servers: vec![server("server01", "localhost", 8080)],
                            ..Default::default()
                        },
                    },
                ),
                &mut doc,
            )
            .unwrap();
        assert_eq!(
            doc.to_string(),
            "\nfrontend foo\n  mode http\n  bind :80 name bind01\n  default_backend foo\n\
             \nbackend foo\n  mode http\n  server server01 localhost:8080\n"
        );
    }

    // ========================================================================
    // Failure stages
    // ========================================================================

    #[test]
    fn test_validator_message_passes_through() {
        let compiler = Compiler::with_validator(&CompilerConfig::default(), RejectingValidator);
        let mut doc = ConfigDocument::new();

        let err = compiler
            .compile_backend(&backend(BackendSpec::default()), &mut doc)
            .unwrap_err();
        assert_eq!(err.stage(), CompileStage::Validate);
        assert_eq!(err.to_string(), "name in body should match '^[a-z]+$'");
        assert!(doc.sections().is_empty());

        let err = compiler
            .compile_listen(&Listen::new("foo", ListenSpec::default()), &mut doc)
            .unwrap_err();
        assert_eq!(err.to_string(), "binds in body is required");
        assert!(doc.sections().is_empty());
    }

    #[test]
    fn test_duplicate_section_fails_at_emit() {
        let mut doc = ConfigDocument::new();
        compiler()
            .compile_backend(&backend(BackendSpec::default()), &mut doc)
            .unwrap();

        let err = compiler()
            .compile(
                &ConfigResource::Backend(backend(BackendSpec::default())),
                &mut doc,
            )
            .unwrap_err();
        assert_eq!(err.stage(), CompileStage::Emit);
        assert_eq!(err.to_string(), "backend 'foo' already exists");
    }

    #[test]
    fn test_listen_conflicts_with_backend_of_same_name() {
        let mut doc = ConfigDocument::new();
        compiler()
            .compile_backend(&backend(BackendSpec::default()), &mut doc)
            .unwrap();

        let err = compiler()
            .compile_listen(&Listen::new("foo", ListenSpec::default()), &mut doc)
            .unwrap_err();
        assert_eq!(err.stage(), CompileStage::Emit);
        assert!(doc.section(SectionKind::Frontend, "foo").is_some());
    }

    #[test]
    fn test_header_value_cannot_inject_directives() {
        let mut doc = ConfigDocument::new();
        let spec = FrontendSpec {
            base: BaseSpec {
                http_request: Some(HTTPRequestRules {
                    set_header: vec![HTTPHeaderRule {
                        name: "X-Test".to_string(),
                        value: HTTPHeaderValue {
                            str: Some("a\n  use_backend evil if TRUE".to_string()),
                            ..Default::default()
                        },
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
                ..Default::default()
            },
            ..Default::default()
        };

        let err = compiler()
            .compile_frontend(&Frontend::new("public", spec), &mut doc)
            .unwrap_err();
        assert_eq!(err.stage(), CompileStage::Model);
        assert!(matches!(
            err,
            CompileError::InvalidValue { ref field, .. }
                if field == "httpRequest.setHeader[0].value.str"
        ));
        assert!(doc.sections().is_empty());
        assert!(!doc.to_string().contains("use_backend"));
    }
}
