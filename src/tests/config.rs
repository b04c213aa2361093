use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;
use super::fixtures::*;
use crate::*;

fn from_vars(work_dir: &Path, vars: &[(&str, &str)]) -> Result<RunnerConfig> {
    let mut env: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    env.entry("TRADE_WORK_DIR".to_string())
        .or_insert_with(|| work_dir.to_string_lossy().into_owned());
    RunnerConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn test_default_config_points_at_rscript() {
    let config = RunnerConfig::default();

    assert_eq!(config.rscript, "Rscript");
    assert_eq!(config.max_concurrent, 4);
    assert!(config.timeout.is_none());
    assert!(config.validate_inputs);
    assert!(config.univariate_script().ends_with("r_scripts/tradetools_intro/trade_univariate.R"));
    assert!(config.bivariate_script().ends_with("r_scripts/tradetools_intro/trade_bivariate.R"));
}

#[test]
fn test_config_validation() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    // Missing scripts only warn
    assert!(config.validate().is_ok());

    let mut no_workers = config.clone();
    no_workers.max_concurrent = 0;
    assert!(matches!(no_workers.validate(), Err(Error::Config(_))));

    let mut missing_work_dir = config.clone();
    missing_work_dir.work_dir = dir.path().join("gone");
    assert!(matches!(missing_work_dir.validate(), Err(Error::Config(_))));

    let mut blank_interpreter = config;
    blank_interpreter.rscript = " ".to_string();
    assert!(matches!(blank_interpreter.validate(), Err(Error::Config(_))));
}

#[test]
fn test_env_values_are_parsed() {
    let dir = tempdir().unwrap();

    let config = from_vars(
        dir.path(),
        &[
            ("TRADE_RSCRIPT", "/opt/R/bin/Rscript"),
            ("TRADE_SCRIPT_DIR", "/srv/tradetools"),
            ("TRADE_MAX_CONCURRENT", "8"),
            ("TRADE_TIMEOUT_SECS", " 15 "),
            ("TRADE_VALIDATE_INPUTS", "Off"),
        ],
    )
    .unwrap();

    assert_eq!(config.rscript, "/opt/R/bin/Rscript");
    assert_eq!(config.univariate_script(), Path::new("/srv/tradetools/trade_univariate.R"));
    assert_eq!(config.work_dir, dir.path());
    assert_eq!(config.max_concurrent, 8);
    assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    assert!(!config.validate_inputs);
}

#[test]
fn test_unset_env_values_fall_back_to_defaults() {
    let dir = tempdir().unwrap();

    let config = from_vars(dir.path(), &[]).unwrap();

    assert_eq!(config.rscript, DEFAULT_RSCRIPT);
    assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
    assert!(config.timeout.is_none());
    assert!(config.validate_inputs);
}

#[test]
fn test_malformed_env_values_are_config_errors() {
    let dir = tempdir().unwrap();
    let cases = [
        ("TRADE_MAX_CONCURRENT", "abc"),
        ("TRADE_MAX_CONCURRENT", "0"),
        ("TRADE_TIMEOUT_SECS", "-1"),
        ("TRADE_TIMEOUT_SECS", "2.5"),
        ("TRADE_VALIDATE_INPUTS", "maybe"),
        ("TRADE_RSCRIPT", ""),
    ];

    for (key, raw) in cases {
        match from_vars(dir.path(), &[(key, raw)]) {
            Err(Error::Config(message)) => assert!(message.contains(key), "{}", message),
            other => panic!("expected config error for {}={:?}, got {:?}", key, raw, other),
        }
    }

    let missing = dir.path().join("missing");
    assert!(matches!(
        from_vars(dir.path(), &[("TRADE_WORK_DIR", missing.to_str().unwrap())]),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_validate_inputs_flag_spellings() {
    let dir = tempdir().unwrap();

    for raw in ["1", "true", "YES", "on"] {
        assert!(from_vars(dir.path(), &[("TRADE_VALIDATE_INPUTS", raw)]).unwrap().validate_inputs);
    }
    for raw in ["0", "False", "no", "OFF"] {
        assert!(!from_vars(dir.path(), &[("TRADE_VALIDATE_INPUTS", raw)]).unwrap().validate_inputs);
    }
}
