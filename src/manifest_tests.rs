// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for manifest loading

#[cfg(test)]
mod tests {
    use crate::manifest::*;

    const MANIFEST: &str = r"
apiVersion: config.haproxy.com/v1alpha1
kind: Backend
metadata:
  name: web
spec:
  mode: http
  balance:
    algorithm: roundrobin
  servers:
    - name: web01
      address: 10.0.0.10
      port: 8080
      check:
        enabled: true
        inter: 5s
---
apiVersion: v1
kind: ConfigMap
metadata:
  name: unrelated
---
apiVersion: config.haproxy.com/v1alpha1
kind: Frontend
metadata:
  name: public
spec:
  binds:
    - name: http
      port: 80
  defaultBackend:
    name: web
";

    #[test]
    fn test_parse_multi_document() {
        let resources = parse_manifests(MANIFEST).unwrap();
        assert_eq!(resources.len(), 2, "ConfigMap must be skipped");
        assert_eq!(resources[0].kind(), "Backend");
        assert_eq!(resources[0].name(), "web");
        assert_eq!(resources[1].kind(), "Frontend");
        assert_eq!(resources[1].name(), "public");
    }

    #[test]
    fn test_parse_flattened_fields() {
        let resources = parse_manifests(MANIFEST).unwrap();
        let ConfigResource::Backend(backend) = &resources[0] else {
            panic!("expected a Backend");
        };
        assert_eq!(backend.spec.base.mode, "http");
        let server = &backend.spec.options.servers[0];
        assert_eq!(server.port, Some(8080));
        assert_eq!(
            server.params.check.as_ref().unwrap().inter.as_deref(),
            Some("5s")
        );
    }

    #[test]
    fn test_unknown_kind_in_group() {
        let manifest = "apiVersion: config.haproxy.com/v1alpha1\nkind: Defaults\nmetadata:\n  name: d\n";
        let err = parse_manifests(manifest).unwrap_err();
        assert!(err.to_string().contains("unsupported kind 'Defaults'"));
    }

    #[test]
    fn test_schema_mismatch() {
        let manifest = "apiVersion: config.haproxy.com/v1alpha1\nkind: Backend\nmetadata:\n  name: b\nspec:\n  servers: 3\n";
        let err = parse_manifests(manifest).unwrap_err();
        assert!(err.to_string().contains("not a valid Backend"));
    }

    #[test]
    fn test_empty_documents_are_skipped() {
        assert!(parse_manifests("---\n---\n").unwrap().is_empty());
        assert!(parse_manifests("").unwrap().is_empty());
    }
}
