//! Tests for the Vigil error handling system.

use std::collections::HashSet;
use std::path::PathBuf;

use vigil_core::errors::error_code::{self, VigilErrorCode};
use vigil_core::errors::*;
use vigil_core::types::SourceType;

#[test]
fn test_all_errors_have_error_code() {
    let validation = ValidationError::InvalidEmail;
    assert!(!validation.error_code().is_empty());

    let source = SourceError::NotFound {
        source_type: SourceType::Dependency,
        path: PathBuf::from("audit.json"),
    };
    assert!(!source.error_code().is_empty());

    let config = ConfigError::FileNotFound {
        path: "/tmp".into(),
    };
    assert!(!config.error_code().is_empty());

    let gate = GateError::EvaluationFailed {
        gate: "critical-vulnerabilities".into(),
        message: "bad shape".into(),
    };
    assert!(!gate.error_code().is_empty());

    let baseline = BaselineError::NotFound {
        path: PathBuf::from("baseline.json"),
    };
    assert!(!baseline.error_code().is_empty());
}

#[test]
fn test_from_conversions() {
    let validation = ValidationError::InvalidEmail;
    let pipeline: PipelineError = validation.into();
    assert!(matches!(
        pipeline,
        PipelineError::Validation(ValidationError::InvalidEmail)
    ));

    let source = SourceError::Unparseable {
        source_type: SourceType::Container,
        message: "not json".into(),
    };
    let pipeline: PipelineError = source.into();
    assert!(matches!(pipeline, PipelineError::Source(_)));

    let config = ConfigError::UnknownEnvironment { name: "qa".into() };
    let pipeline: PipelineError = config.into();
    assert!(matches!(pipeline, PipelineError::Config(_)));

    let gate = GateError::UnknownGate("nope".into());
    let pipeline: PipelineError = gate.into();
    assert!(matches!(pipeline, PipelineError::Gate(_)));
}

#[test]
fn test_code_string_format() {
    let validation = ValidationError::PathTraversal;
    let formatted = validation.code_string();
    assert_eq!(
        formatted,
        "[VALIDATION_ERROR] File name contains a path traversal sequence"
    );

    let url = ValidationError::HostNotAllowlisted;
    assert!(url.code_string().starts_with("[UNSAFE_URL]"));
}

#[test]
fn test_validation_messages_never_echo_input() {
    // Rejection messages end up in logs; they must not carry the raw value.
    let errors = [
        ValidationError::Empty,
        ValidationError::MarkupRejected,
        ValidationError::InvalidEmail,
        ValidationError::InvalidPhone,
        ValidationError::PathTraversal,
        ValidationError::NulByte,
        ValidationError::PrivateAddress,
    ];
    for error in &errors {
        let msg = error.to_string();
        assert!(!msg.is_empty());
        assert!(!msg.contains('<'));
        assert!(!msg.contains("javascript:"));
    }
}

#[test]
fn test_display_human_readable() {
    let errors: Vec<Box<dyn std::fmt::Display>> = vec![
        Box::new(ValidationError::TooLong {
            length: 20_000,
            max: 10_000,
        }),
        Box::new(SourceError::Io {
            path: PathBuf::from("/tmp/zap.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }),
        Box::new(SourceError::UnexpectedShape {
            source_type: SourceType::DynamicScan,
            message: "alerts is not an array".into(),
        }),
        Box::new(ConfigError::ValidationFailed {
            field: "gates.test-coverage.threshold".into(),
            message: "must be finite".into(),
        }),
        Box::new(GateError::MissingSummary {
            gate: "test-coverage".into(),
        }),
        Box::new(BaselineError::Parse {
            path: PathBuf::from("baseline.json"),
            message: "truncated".into(),
        }),
    ];

    for error in &errors {
        let msg = error.to_string();
        assert!(!msg.contains("{ "), "Debug leak in: {}", msg);
        assert!(!msg.is_empty());
    }
}

#[test]
fn test_pipeline_result_accumulates_errors() {
    let mut result = PipelineResult::new(vec!["finding-1".to_string()]);
    assert!(result.is_clean());
    assert_eq!(result.error_count(), 0);

    result.add_error(SourceError::NotFound {
        source_type: SourceType::Dependency,
        path: PathBuf::from("audit.json"),
    });
    result.add_error(SourceError::Unparseable {
        source_type: SourceType::Container,
        message: "truncated".into(),
    });

    assert!(!result.is_clean());
    assert_eq!(result.error_count(), 2);
    // Data stays accessible despite the errors.
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0], "finding-1");
}

#[test]
fn test_pipeline_result_absorb() {
    let mut outer = PipelineResult::new(());
    let mut inner = PipelineResult::new(7usize);
    inner.add_error(ConfigError::UnknownEnvironment { name: "qa".into() });

    let value = outer.absorb(inner);
    assert_eq!(value, 7);
    assert_eq!(outer.error_count(), 1);
}

#[test]
fn test_error_chain_preservation() {
    use std::error::Error;

    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file gone");
    let source_err = SourceError::Io {
        path: PathBuf::from("/tmp/audit.json"),
        source: io_err,
    };

    let source = source_err.source();
    assert!(source.is_some());
    assert!(source.unwrap().to_string().contains("file gone"));
}

#[test]
fn test_error_codes_unique() {
    let codes = [
        error_code::VALIDATION_ERROR,
        error_code::UNSAFE_URL,
        error_code::SOURCE_UNAVAILABLE,
        error_code::SOURCE_PARSE,
        error_code::CONFIG_ERROR,
        error_code::GATE_FAILED,
        error_code::EVALUATION_ERROR,
        error_code::BASELINE_ERROR,
    ];

    let unique: HashSet<&str> = codes.iter().copied().collect();
    assert_eq!(codes.len(), unique.len(), "Duplicate error codes found");
}

#[test]
fn test_source_error_code_split() {
    let unavailable = SourceError::NotFound {
        source_type: SourceType::Dependency,
        path: PathBuf::from("missing.json"),
    };
    assert_eq!(unavailable.error_code(), error_code::SOURCE_UNAVAILABLE);

    let parse = SourceError::Unparseable {
        source_type: SourceType::Dependency,
        message: "bad".into(),
    };
    assert_eq!(parse.error_code(), error_code::SOURCE_PARSE);
}
