use santa_core::errors::{ErrorInfo, SantaError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("n", 1)
        .with_hint("example")
}

#[test]
fn invalid_argument_surface() {
    let err = SantaError::InvalidArgument(sample_info("group_size", "too small"));
    assert!(err.is_invalid_argument());
    assert_eq!(err.info().code, "group_size");
    assert!(err.to_string().starts_with("invalid argument: too small (code: group_size)"));
    assert!(err.to_string().contains("n=1"));
    assert!(err.to_string().ends_with("| hint: example"));
}

#[test]
fn numeric_drift_surface() {
    let err = SantaError::NumericDrift(sample_info("row_sum_drift", "row off"));
    assert!(!err.is_invalid_argument());
    assert_eq!(err.info().code, "row_sum_drift");
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = SantaError::Config(ErrorInfo::new("threshold", "bad threshold"));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["family"], "Config");
    assert_eq!(json["detail"]["code"], "threshold");
    let back: SantaError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}
