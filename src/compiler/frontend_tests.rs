// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for frontend model building

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::compiler::CompileError;
    use crate::crd::{BackendReference, BackendSwitchingRule, BaseSpec, Rule};
    use crate::haproxy::types::Mode;
    use std::collections::BTreeMap;

    fn bind(name: &str, port: i64) -> Bind {
        Bind {
            name: name.to_string(),
            port: Some(port),
            ..Default::default()
        }
    }

    #[test]
    fn test_frontend_binds_and_default_backend() {
        let spec = FrontendSpec {
            base: BaseSpec {
                mode: "tcp".to_string(),
                timeouts: BTreeMap::from([("client".to_string(), "30s".to_string())]),
                ..Default::default()
            },
            binds: vec![bind("bind02", 81), bind("bind01", 80)],
            default_backend: Some(BackendReference {
                name: "web".to_string(),
            }),
            backend_switching: vec![BackendSwitchingRule {
                rule: Rule {
                    condition_type: Some("if".to_string()),
                    condition: Some("{ path_beg /api }".to_string()),
                },
                backend: BackendReference {
                    name: "api".to_string(),
                },
            }],
        };

        let model = build_frontend("public", &spec, &PathResolver::default()).unwrap();
        assert_eq!(model.base.mode, Some(Mode::Tcp));
        assert_eq!(model.base.timeouts.client, Some(30_000));
        let binds: Vec<&str> = model.binds.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(binds, vec!["bind02", "bind01"]);
        assert_eq!(model.default_backend.as_deref(), Some("web"));
        assert_eq!(model.backend_switching[0].backend, "api");
    }

    #[test]
    fn test_frontend_rejects_server_timeout() {
        let spec = FrontendSpec {
            base: BaseSpec {
                timeouts: BTreeMap::from([("server".to_string(), "30s".to_string())]),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            build_frontend("public", &spec, &PathResolver::default()).unwrap_err(),
            CompileError::UnknownTimeout {
                name: "server".to_string()
            }
        );
    }

    #[test]
    fn test_frontend_invalid_mode() {
        let spec = FrontendSpec {
            base: BaseSpec {
                mode: "udp".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = build_frontend("public", &spec, &PathResolver::default()).unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidValue { ref field, ref value, .. } if field == "mode" && value == "udp"
        ));
    }

    #[test]
    fn test_bind_without_port_fails() {
        let spec = FrontendSpec {
            binds: vec![Bind {
                name: "bind".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(
            build_frontend("public", &spec, &PathResolver::default()).unwrap_err(),
            CompileError::missing("binds[0].port")
        );
    }

    #[test]
    fn test_default_backend_with_line_break() {
        let spec = FrontendSpec {
            default_backend: Some(BackendReference {
                name: "web\n  use_backend evil if TRUE".to_string(),
            }),
            ..Default::default()
        };
        assert!(matches!(
            build_frontend("public", &spec, &PathResolver::default()).unwrap_err(),
            CompileError::InvalidValue { ref field, .. } if field == "defaultBackend.name"
        ));
    }
}
