// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for compilation errors

#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_missing_field_message() {
        let err = CompileError::missing("servers[0].address");
        assert_eq!(
            err.to_string(),
            "missing required field 'servers[0].address'"
        );
        assert_eq!(err.stage(), CompileStage::Model);
    }

    #[test]
    fn test_unknown_timeout_message() {
        let err = CompileError::UnknownTimeout {
            name: "foo".to_string(),
        };
        assert_eq!(err.to_string(), "timeout foo unknown");
    }

    #[test]
    fn test_exclusive_cookie_mode_lists_modes() {
        let err = CompileError::ExclusiveCookieMode {
            modes: vec!["rewrite", "insert"],
        };
        assert_eq!(
            err.to_string(),
            "you can only select one cookie mode, got: rewrite, insert"
        );
    }

    #[test]
    fn test_schema_message_is_verbatim() {
        let err = CompileError::Schema {
            kind: SectionKind::Backend,
            name: "web".to_string(),
            message: "name in body should match '^[A-Za-z0-9-_.:]+$'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "name in body should match '^[A-Za-z0-9-_.:]+$'"
        );
        assert_eq!(err.stage(), CompileStage::Validate);
    }

    #[test]
    fn test_document_error_is_emit_stage() {
        let err: CompileError = DocumentError::SectionExists {
            kind: SectionKind::Frontend,
            name: "public".to_string(),
        }
        .into();
        assert_eq!(err.stage(), CompileStage::Emit);
        assert_eq!(err.stage().to_string(), "emit");
        assert_eq!(err.to_string(), "frontend 'public' already exists");
    }

    #[test]
    fn test_single_line_rejects_control_characters() {
        assert_eq!(single_line("name", "X-Real-IP").unwrap(), "X-Real-IP");

        for value in ["a\n  use_backend evil", "a\r\nb", "a\tb", "a\0"] {
            let err = single_line("value", value).unwrap_err();
            assert!(
                matches!(err, CompileError::InvalidValue { ref field, .. } if field == "value"),
                "{value:?} must be rejected"
            );
            assert_eq!(err.stage(), CompileStage::Model);
        }
    }
}
