use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use crate::{
    Error, Result,
    DEFAULT_LFCSE_COL, DEFAULT_LOG2FC_COL, DEFAULT_N_SAMPLE, DEFAULT_PVALUE_COL, DEFAULT_SEED,
    DEFAULT_VAREXPLAINED_THRESHOLD, DEFAULT_WEIGHT_NOCORR,
};

/// Names of the effect-size, standard-error and p-value columns in a results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    #[serde(rename = "log2FoldChange_col", default = "default_log2fc_col")]
    pub log2_fold_change: String,
    #[serde(rename = "lfcSE_col", default = "default_lfcse_col")]
    pub lfc_se: String,
    #[serde(rename = "pvalue_col", default = "default_pvalue_col")]
    pub pvalue: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            log2_fold_change: default_log2fc_col(),
            lfc_se: default_lfcse_col(),
            pvalue: default_pvalue_col(),
        }
    }
}

impl ColumnNames {
    pub fn as_array(&self) -> [&str; 3] {
        [&self.log2_fold_change, &self.lfc_se, &self.pvalue]
    }

    fn validate(&self) -> Result<()> {
        for (flag, name) in [
            ("log2FoldChange_col", &self.log2_fold_change),
            ("lfcSE_col", &self.lfc_se),
            ("pvalue_col", &self.pvalue),
        ] {
            if name.trim().is_empty() {
                return Err(Error::InvalidInput(format!("{} must not be empty", flag)));
            }
        }
        Ok(())
    }
}

/// Basis set of covariance matrices used by the bivariate fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CovarianceMatrixSet {
    MashDefault,
    AdaptiveGrid,
    #[default]
    Combined,
}

impl CovarianceMatrixSet {
    pub const ALL: [CovarianceMatrixSet; 3] = [
        CovarianceMatrixSet::MashDefault,
        CovarianceMatrixSet::AdaptiveGrid,
        CovarianceMatrixSet::Combined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CovarianceMatrixSet::MashDefault => "mash_default",
            CovarianceMatrixSet::AdaptiveGrid => "adaptive_grid",
            CovarianceMatrixSet::Combined => "combined",
        }
    }
}

impl fmt::Display for CovarianceMatrixSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CovarianceMatrixSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CovarianceMatrixSet::ALL
            .into_iter()
            .find(|set| set.as_str() == s)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "covariance_matrix_set must be one of mash_default, adaptive_grid, combined (got {:?})",
                    s
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnivariateRequest {
    /// DESeq2-style results table with gene identifiers as row names.
    pub results_csv: PathBuf,
    /// Binary (0/1) gene-set membership table for enrichment testing.
    #[serde(default)]
    pub annot_table_csv: Option<PathBuf>,
    #[serde(flatten)]
    pub columns: ColumnNames,
    #[serde(default = "default_true")]
    pub model_significant: bool,
    /// Comma-separated gene identifiers, passed through untouched.
    #[serde(default)]
    pub genes_exclude: Option<String>,
    #[serde(default = "default_n_sample")]
    pub n_sample: u32,
    #[serde(default = "default_seed")]
    pub seed: i64,
}

impl UnivariateRequest {
    pub fn new(results_csv: impl Into<PathBuf>) -> Self {
        Self {
            results_csv: results_csv.into(),
            annot_table_csv: None,
            columns: ColumnNames::default(),
            model_significant: true,
            genes_exclude: None,
            n_sample: DEFAULT_N_SAMPLE,
            seed: DEFAULT_SEED,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_path("results_csv", &self.results_csv)?;
        self.columns.validate()
    }

    /// Annotation table, ignoring an empty path.
    pub fn annot_table(&self) -> Option<&Path> {
        self.annot_table_csv
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    pub fn excluded_genes(&self) -> Option<&str> {
        non_empty(self.genes_exclude.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BivariateRequest {
    pub results1_csv: PathBuf,
    /// Second results table; gene naming must match the first exactly.
    pub results2_csv: PathBuf,
    #[serde(flatten)]
    pub columns: ColumnNames,
    #[serde(default)]
    pub genes_exclude: Option<String>,
    /// Estimate sampling covariance for shared samples or controls.
    #[serde(default)]
    pub estimate_sampling_covariance: bool,
    #[serde(default)]
    pub covariance_matrix_set: CovarianceMatrixSet,
    /// Variance-explained cutoff for adaptive grid components, in [0, 1].
    #[serde(default = "default_varexplained_threshold")]
    pub component_varexplained_threshold: f64,
    /// Prior weight on the zero-correlation component; 1 is neutral.
    #[serde(default = "default_weight_nocorr")]
    pub weight_nocorr: f64,
    #[serde(default = "default_n_sample")]
    pub n_sample: u32,
    #[serde(default = "default_seed")]
    pub seed: i64,
}

impl BivariateRequest {
    pub fn new(results1_csv: impl Into<PathBuf>, results2_csv: impl Into<PathBuf>) -> Self {
        Self {
            results1_csv: results1_csv.into(),
            results2_csv: results2_csv.into(),
            columns: ColumnNames::default(),
            genes_exclude: None,
            estimate_sampling_covariance: false,
            covariance_matrix_set: CovarianceMatrixSet::default(),
            component_varexplained_threshold: DEFAULT_VAREXPLAINED_THRESHOLD,
            weight_nocorr: DEFAULT_WEIGHT_NOCORR,
            n_sample: DEFAULT_N_SAMPLE,
            seed: DEFAULT_SEED,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_path("results1_csv", &self.results1_csv)?;
        require_path("results2_csv", &self.results2_csv)?;
        self.columns.validate()?;

        let threshold = self.component_varexplained_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidInput(format!(
                "component_varexplained_threshold must be within [0, 1] (got {})",
                threshold
            )));
        }

        if !self.weight_nocorr.is_finite() || self.weight_nocorr < 0.0 {
            return Err(Error::InvalidInput(format!(
                "weight_nocorr must be a non-negative number (got {})",
                self.weight_nocorr
            )));
        }

        Ok(())
    }

    pub fn excluded_genes(&self) -> Option<&str> {
        non_empty(self.genes_exclude.as_deref())
    }
}

fn require_path(name: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidInput(format!("{} must not be empty", name)));
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn default_log2fc_col() -> String {
    DEFAULT_LOG2FC_COL.to_string()
}

fn default_lfcse_col() -> String {
    DEFAULT_LFCSE_COL.to_string()
}

fn default_pvalue_col() -> String {
    DEFAULT_PVALUE_COL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_n_sample() -> u32 {
    DEFAULT_N_SAMPLE
}

fn default_seed() -> i64 {
    DEFAULT_SEED
}

fn default_varexplained_threshold() -> f64 {
    DEFAULT_VAREXPLAINED_THRESHOLD
}

fn default_weight_nocorr() -> f64 {
    DEFAULT_WEIGHT_NOCORR
}
