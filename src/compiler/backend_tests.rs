// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for backend model building

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::compiler::CompileError;
    use crate::crd::{Balance, BaseSpec, Cookie, CookieMode, HashType, Server, ServerTemplate};
    use crate::haproxy::types::{CookieType, HashMethod};
    use std::collections::BTreeMap;

    fn paths() -> PathResolver {
        PathResolver::default()
    }

    fn server(name: &str, address: &str) -> Server {
        Server {
            name: name.to_string(),
            address: address.to_string(),
            port: Some(80),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_backend() {
        let model = build_backend("web", &BackendSpec::default(), &paths()).unwrap();
        assert_eq!(
            model,
            BackendModel {
                name: "web".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_backend_options() {
        let spec = BackendSpec {
            base: BaseSpec {
                mode: "http".to_string(),
                ..Default::default()
            },
            options: BackendOptions {
                balance: Some(Balance {
                    algorithm: "RoundRobin".to_string(),
                }),
                hash_type: Some(HashType {
                    method: "consistent".to_string(),
                    ..Default::default()
                }),
                redispatch: Some(true),
                http_pretend_keepalive: Some(true),
                cookie: Some(Cookie {
                    name: "cookie_name".to_string(),
                    mode: CookieMode {
                        insert: true,
                        ..Default::default()
                    },
                    dynamic: Some(true),
                    ..Default::default()
                }),
                ..Default::default()
            },
        };

        let model = build_backend("web", &spec, &paths()).unwrap();
        assert_eq!(model.balance.unwrap().algorithm, "roundrobin");
        assert_eq!(model.hash_type.unwrap().method, HashMethod::Consistent);
        assert_eq!(
            model.redispatch,
            Some(RedispatchModel {
                enabled: "enabled",
                interval: 3
            })
        );
        assert_eq!(model.http_pretend_keepalive, Some("enabled"));
        assert_eq!(
            model.cookie.unwrap().cookie_type,
            Some(CookieType::Insert)
        );
        assert_eq!(
            model.dynamic_cookie_key.as_deref(),
            Some("e3cb9741ffde596f46710a5d7e3ec587")
        );
    }

    #[test]
    fn test_redispatch_false_is_omitted() {
        let spec = BackendSpec {
            options: BackendOptions {
                redispatch: Some(false),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(build_backend("web", &spec, &paths()).unwrap().redispatch, None);
    }

    #[test]
    fn test_check_timeout_and_map_precedence() {
        let mut spec = BackendSpec {
            options: BackendOptions {
                check_timeout: Some("2s".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            build_backend("web", &spec, &paths()).unwrap().base.timeouts.check,
            Some(2000)
        );

        spec.base.timeouts = BTreeMap::from([("check".to_string(), "5s".to_string())]);
        assert_eq!(
            build_backend("web", &spec, &paths()).unwrap().base.timeouts.check,
            Some(5000),
            "The timeout map wins over checkTimeout"
        );
    }

    #[test]
    fn test_servers_keep_input_order() {
        let spec = BackendSpec {
            options: BackendOptions {
                servers: vec![
                    server("c", "10.0.0.3"),
                    server("a", "10.0.0.1"),
                    server("b", "10.0.0.2"),
                ],
                server_templates: vec![ServerTemplate {
                    prefix: "srv".to_string(),
                    num: 2,
                    fqdn: "svc.local".to_string(),
                    port: Some(8080),
                    ..Default::default()
                }],
                ..Default::default()
            },
            ..Default::default()
        };

        let model = build_backend("web", &spec, &paths()).unwrap();
        let names: Vec<&str> = model.servers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(model.server_templates.len(), 1);
    }

    #[test]
    fn test_second_server_missing_address_names_index() {
        let spec = BackendSpec {
            options: BackendOptions {
                servers: vec![server("a", "10.0.0.1"), server("b", "")],
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            build_backend("web", &spec, &paths()).unwrap_err(),
            CompileError::missing("servers[1].address")
        );
    }

    #[test]
    fn test_client_timeout_unknown_in_backend() {
        let spec = BackendSpec {
            base: BaseSpec {
                timeouts: BTreeMap::from([("client".to_string(), "30s".to_string())]),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            build_backend("web", &spec, &paths()).unwrap_err().to_string(),
            "timeout client unknown"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let spec = BackendSpec {
            base: BaseSpec {
                timeouts: BTreeMap::from([
                    ("server".to_string(), "30s".to_string()),
                    ("connect".to_string(), "5s".to_string()),
                    ("queue".to_string(), "1m".to_string()),
                ]),
                ..Default::default()
            },
            options: BackendOptions {
                servers: vec![server("a", "10.0.0.1"), server("b", "10.0.0.2")],
                ..Default::default()
            },
        };
        assert_eq!(
            build_backend("web", &spec, &paths()).unwrap(),
            build_backend("web", &spec, &paths()).unwrap()
        );
    }
}
