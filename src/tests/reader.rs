use tempfile::tempdir;
use super::fixtures::*;
use crate::*;

#[test]
fn test_reads_exact_univariate_values() {
    let dir = tempdir().unwrap();
    let output = write_file(dir.path(), "trade_out.csv", UNIVARIATE_OUTPUT);

    let values = read_result_row(&output, &UNIVARIATE_FIELDS).unwrap();

    assert_eq!(values.len(), 3);
    assert_eq!(values["transcriptome_wide_impact"], 0.42);
    assert_eq!(values["Me"], 150.3);
    assert_eq!(values["mean"], 0.01);
}

#[test]
fn test_reads_integer_and_missing_values() {
    let dir = tempdir().unwrap();
    let output = write_file(
        dir.path(),
        "trade_out.csv",
        "TI_correlation,cor_raw,loglik\nNA,0.5,-1200\n",
    );

    let values = read_result_row(&output, &BIVARIATE_FIELDS).unwrap();

    assert!(values["TI_correlation"].is_nan());
    assert_eq!(values["cor_raw"], 0.5);
    assert_eq!(values["loglik"], -1200.0);
}

#[test]
fn test_infinite_values_are_kept_and_written_as_null() {
    let dir = tempdir().unwrap();
    let output = write_file(
        dir.path(),
        "trade_out.csv",
        "\"transcriptome_wide_impact\",\"Me\",\"mean\"\n\"1\",Inf,-Inf\n",
    );

    let values = read_result_row(&output, &UNIVARIATE_FIELDS).unwrap();

    assert_eq!(values["transcriptome_wide_impact"], 1.0);
    assert_eq!(values["Me"], f64::INFINITY);
    assert_eq!(values["mean"], f64::NEG_INFINITY);

    let result = UnivariateResult {
        transcriptome_wide_impact: values["transcriptome_wide_impact"],
        me: values["Me"],
        mean: values["mean"],
        result_rds: dir.path().join("trade_out.rds"),
    };
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["transcriptome_wide_impact"], 1.0);
    assert!(json["Me"].is_null());
    assert!(json["mean"].is_null());
}

#[test]
fn test_extra_columns_are_ignored() {
    let dir = tempdir().unwrap();
    let output = write_file(
        dir.path(),
        "trade_out.csv",
        "transcriptome_wide_impact,Me,mean,frac_sig\n0.9,12.5,0.2,0.7\n",
    );

    let values = read_result_row(&output, &UNIVARIATE_FIELDS).unwrap();

    assert_eq!(values.len(), 3);
    assert!(!values.contains_key("frac_sig"));
}

#[test]
fn test_first_row_wins_when_several_are_written() {
    let dir = tempdir().unwrap();
    let output = write_file(
        dir.path(),
        "trade_out.csv",
        "transcriptome_wide_impact,Me,mean\n0.42,150.3,0.01\n0.99,1.0,0.5\n",
    );

    let values = read_result_row(&output, &UNIVARIATE_FIELDS).unwrap();

    assert_eq!(values["transcriptome_wide_impact"], 0.42);
}

#[test]
fn test_missing_field_is_output_shape_error() {
    let dir = tempdir().unwrap();
    let output = write_file(dir.path(), "trade_out.csv", "transcriptome_wide_impact,mean\n0.42,0.01\n");

    let err = read_result_row(&output, &UNIVARIATE_FIELDS).unwrap_err();

    assert!(matches!(err, Error::OutputShape(_)));
    assert!(err.to_string().contains("Me"));
}

#[test]
fn test_non_numeric_field_is_output_shape_error() {
    let dir = tempdir().unwrap();
    let output = write_file(
        dir.path(),
        "trade_out.csv",
        "transcriptome_wide_impact,Me,mean\nfailed,150.3,0.01\n",
    );

    assert!(matches!(
        read_result_row(&output, &UNIVARIATE_FIELDS),
        Err(Error::OutputShape(_))
    ));
}

#[test]
fn test_empty_or_missing_output_is_output_shape_error() {
    let dir = tempdir().unwrap();
    let header_only = write_file(dir.path(), "header_only.csv", "transcriptome_wide_impact,Me,mean\n");
    let empty = write_file(dir.path(), "empty.csv", "");
    let missing = dir.path().join("never_written.csv");

    for path in [header_only, empty, missing] {
        assert!(
            matches!(read_result_row(&path, &UNIVARIATE_FIELDS), Err(Error::OutputShape(_))),
            "expected output shape error for {:?}",
            path
        );
    }
}

#[test]
fn test_locate_artifact_requires_sibling_file() {
    let dir = tempdir().unwrap();
    let output = write_file(dir.path(), "trade_abc.csv", UNIVARIATE_OUTPUT);

    assert!(matches!(locate_artifact(&output), Err(Error::OutputShape(_))));

    write_file(dir.path(), "trade_abc.rds", "");
    assert_eq!(locate_artifact(&output).unwrap(), dir.path().join("trade_abc.rds"));
}

#[test]
fn test_remove_output_tolerates_missing_file() {
    let dir = tempdir().unwrap();
    let output = write_file(dir.path(), "trade_abc.csv", UNIVARIATE_OUTPUT);

    remove_output(&output).unwrap();
    assert!(!output.exists());
    remove_output(&output).unwrap();
}

#[test]
fn test_stderr_tail_truncates_long_output() {
    assert_eq!(
        stderr_tail(b"  Error in library(TRADEtools)\n"),
        "Error in library(TRADEtools)"
    );

    let long = "é".repeat(STDERR_TAIL_BYTES);
    let tail = stderr_tail(long.as_bytes());
    assert!(tail.starts_with("..."));
    assert!(tail.len() <= STDERR_TAIL_BYTES + 3);
}
