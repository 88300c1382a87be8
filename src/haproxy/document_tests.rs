// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the in-memory configuration document

#[cfg(test)]
mod tests {
    use super::super::*;

    const BACKEND: SectionKind = SectionKind::Backend;
    const FRONTEND: SectionKind = SectionKind::Frontend;

    #[test]
    fn test_create_section_twice_fails() {
        let mut doc = ConfigDocument::new();
        doc.create_section(BACKEND, "web").unwrap();

        let err = doc.create_section(BACKEND, "web").unwrap_err();
        assert_eq!(
            err,
            DocumentError::SectionExists {
                kind: BACKEND,
                name: "web".to_string()
            }
        );
        assert_eq!(err.to_string(), "backend 'web' already exists");
    }

    #[test]
    fn test_same_name_in_different_kinds() {
        let mut doc = ConfigDocument::new();
        doc.create_section(FRONTEND, "foo").unwrap();
        doc.create_section(BACKEND, "foo").unwrap();
        assert_eq!(doc.sections().len(), 2);
    }

    #[test]
    fn test_mutating_missing_section_fails() {
        let mut doc = ConfigDocument::new();
        assert!(matches!(
            doc.set(BACKEND, "missing", "mode", "http"),
            Err(DocumentError::SectionNotFound { .. })
        ));
        assert!(matches!(
            doc.insert(BACKEND, "missing", "server", "a 1.1.1.1:80", 0),
            Err(DocumentError::SectionNotFound { .. })
        ));
    }

    #[test]
    fn test_unknown_directive_for_kind() {
        let mut doc = ConfigDocument::new();
        doc.create_section(FRONTEND, "public").unwrap();
        let err = doc
            .insert(FRONTEND, "public", "server", "a 1.1.1.1:80", 0)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "directive 'server' is not supported in a frontend section"
        );
    }

    #[test]
    fn test_insert_single_valued_directive_fails() {
        let mut doc = ConfigDocument::new();
        doc.create_section(BACKEND, "web").unwrap();
        assert!(matches!(
            doc.insert(BACKEND, "web", "balance", "roundrobin", 0),
            Err(DocumentError::NotRepeatable { .. })
        ));
    }

    #[test]
    fn test_insert_index_out_of_range() {
        let mut doc = ConfigDocument::new();
        doc.create_section(BACKEND, "web").unwrap();
        let err = doc
            .insert(BACKEND, "web", "server", "a 1.1.1.1:80", 1)
            .unwrap_err();
        assert_eq!(
            err,
            DocumentError::IndexOutOfRange {
                directive: "server".to_string(),
                index: 1,
                len: 0
            }
        );
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let mut doc = ConfigDocument::new();
        doc.create_section(BACKEND, "web").unwrap();
        doc.set(BACKEND, "web", "mode", "tcp").unwrap();
        doc.set(BACKEND, "web", "mode", "http").unwrap();

        let section = doc.section(BACKEND, "web").unwrap();
        assert_eq!(section.values("mode"), ["http".to_string()]);
    }

    #[test]
    fn test_insert_preserves_positions() {
        let mut doc = ConfigDocument::new();
        doc.create_section(BACKEND, "web").unwrap();
        for (index, name) in ["a", "b", "c"].iter().enumerate() {
            doc.insert(BACKEND, "web", "server", &format!("{name} 10.0.0.1:80"), index)
                .unwrap();
        }
        doc.insert(BACKEND, "web", "server", "z 10.0.0.9:80", 1).unwrap();

        let section = doc.section(BACKEND, "web").unwrap();
        let names: Vec<&str> = section
            .values("server")
            .iter()
            .map(|value| value.split(' ').next().unwrap())
            .collect();
        assert_eq!(names, vec!["a", "z", "b", "c"]);
    }

    #[test]
    fn test_render_fixed_directive_order() {
        let mut doc = ConfigDocument::new();
        doc.create_section(BACKEND, "web").unwrap();
        // Written out of render order on purpose
        doc.insert(BACKEND, "web", "server", "s1 10.0.0.1:80", 0).unwrap();
        doc.set(BACKEND, "web", "timeout server", "30000").unwrap();
        doc.set(BACKEND, "web", "option forwardfor", "").unwrap();
        doc.set(BACKEND, "web", "balance", "roundrobin").unwrap();
        doc.set(BACKEND, "web", "mode", "http").unwrap();

        assert_eq!(
            doc.to_string(),
            "\nbackend web\n  mode http\n  balance roundrobin\n  option forwardfor\n  \
             timeout server 30000\n  server s1 10.0.0.1:80\n"
        );
    }

    #[test]
    fn test_render_frontends_before_backends() {
        let mut doc = ConfigDocument::new();
        doc.create_section(BACKEND, "b1").unwrap();
        doc.create_section(FRONTEND, "f1").unwrap();
        doc.create_section(BACKEND, "b0").unwrap();
        doc.set(FRONTEND, "f1", "default_backend", "b1").unwrap();

        assert_eq!(
            doc.to_string(),
            "\nfrontend f1\n  default_backend b1\n\nbackend b1\n\nbackend b0\n"
        );
    }

    #[test]
    fn test_empty_document_renders_nothing() {
        assert_eq!(ConfigDocument::new().to_string(), "");
    }
}
