use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};
use crate::{
    build_bivariate_invocation, build_univariate_invocation, check_annotation_table,
    check_results_table, locate_artifact, read_result_row, remove_output,
    BivariateRequest, Error, Invocation, ProcessRunner, Result, RunnerConfig, UnivariateRequest,
    BIVARIATE_FIELDS, UNIVARIATE_FIELDS,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnivariateResult {
    pub transcriptome_wide_impact: f64,
    /// Effective number of differentially expressed genes.
    #[serde(rename = "Me")]
    pub me: f64,
    pub mean: f64,
    pub result_rds: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BivariateResult {
    #[serde(rename = "TI_correlation")]
    pub ti_correlation: f64,
    pub cor_raw: f64,
    pub loglik: f64,
    pub result_rds: PathBuf,
}

/// Runs TRADE analyses end to end: validate, translate, spawn, read back.
#[derive(Clone)]
pub struct TradeService {
    config: RunnerConfig,
    runner: ProcessRunner,
}

impl TradeService {
    pub fn new(config: RunnerConfig) -> Self {
        let runner = ProcessRunner::from_config(&config);
        Self { config, runner }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub async fn univariate(&self, request: UnivariateRequest) -> Result<UnivariateResult> {
        request.validate()?;

        if self.config.validate_inputs {
            let request = request.clone();
            tokio::task::spawn_blocking(move || {
                check_results_table(&request.results_csv, &request.columns)?;
                if let Some(annot) = request.annot_table() {
                    check_annotation_table(annot)?;
                }
                Ok::<(), Error>(())
            })
            .await??;
        }

        let invocation = build_univariate_invocation(&self.config, &request)?;
        info!(
            "Running univariate TRADE on {:?} (n_sample={}, seed={}) -> {:?}",
            request.results_csv, request.n_sample, request.seed, invocation.output_path
        );

        let (mut values, result_rds) = self.execute(invocation, &UNIVARIATE_FIELDS).await?;
        Ok(UnivariateResult {
            transcriptome_wide_impact: take(&mut values, "transcriptome_wide_impact")?,
            me: take(&mut values, "Me")?,
            mean: take(&mut values, "mean")?,
            result_rds,
        })
    }

    pub async fn bivariate(&self, request: BivariateRequest) -> Result<BivariateResult> {
        request.validate()?;

        if self.config.validate_inputs {
            let request = request.clone();
            tokio::task::spawn_blocking(move || {
                check_results_table(&request.results1_csv, &request.columns)?;
                check_results_table(&request.results2_csv, &request.columns)
            })
            .await??;
        }

        let invocation = build_bivariate_invocation(&self.config, &request)?;
        info!(
            "Running bivariate TRADE on {:?} and {:?} (covariance_matrix_set={}, seed={}) -> {:?}",
            request.results1_csv,
            request.results2_csv,
            request.covariance_matrix_set,
            request.seed,
            invocation.output_path
        );

        let (mut values, result_rds) = self.execute(invocation, &BIVARIATE_FIELDS).await?;
        Ok(BivariateResult {
            ti_correlation: take(&mut values, "TI_correlation")?,
            cor_raw: take(&mut values, "cor_raw")?,
            loglik: take(&mut values, "loglik")?,
            result_rds,
        })
    }

    /// Spawns the invocation and reads back its output row and artifact path.
    /// The temporary table is removed whether or not the run succeeded.
    async fn execute(
        &self,
        invocation: Invocation,
        fields: &'static [&'static str],
    ) -> Result<(HashMap<String, f64>, PathBuf)> {
        let run_result = self.runner.run(&invocation).await;

        let output_path = invocation.output_path.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            let read = run_result.and_then(|_| {
                let values = read_result_row(&output_path, fields)?;
                let artifact = locate_artifact(&output_path)?;
                Ok((values, artifact))
            });
            if let Err(e) = remove_output(&output_path) {
                warn!("Failed to remove temporary output {:?}: {}", output_path, e);
            }
            read
        })
        .await??;

        Ok(outcome)
    }
}

fn take(values: &mut HashMap<String, f64>, field: &str) -> Result<f64> {
    values
        .remove(field)
        .ok_or_else(|| Error::OutputShape(format!("output is missing required field {}", field)))
}
