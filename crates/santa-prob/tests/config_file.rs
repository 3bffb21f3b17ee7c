use std::fs;

use santa_core::SantaError;
use santa_prob::{EngineConfig, Procedure};

#[test]
fn loads_yaml_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.yaml");
    fs::write(&path, "threshold: 8\ntrials: 5000\nprocedure: ordered\n").unwrap();
    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.threshold, 8);
    assert_eq!(config.trials, 5_000);
    assert_eq!(config.procedure, Procedure::Ordered);
    assert_eq!(config.seed, None);
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, SantaError::Config(_)));
    assert_eq!(err.info().code, "config_read");
}
