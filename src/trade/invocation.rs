use std::ffi::OsString;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use crate::{
    BivariateRequest, Error, Result, RunnerConfig, UnivariateRequest,
    ARTIFACT_EXTENSION, OUTPUT_EXTENSION, OUTPUT_PREFIX,
};

/// A fully built external command plus the output file it will write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    /// Script path followed by `--flag value` pairs.
    pub args: Vec<OsString>,
    pub output_path: PathBuf,
}

impl Invocation {
    /// Sibling of the output table holding the full serialized result object.
    pub fn artifact_path(&self) -> PathBuf {
        artifact_path_for(&self.output_path)
    }
}

pub fn artifact_path_for(output_path: &Path) -> PathBuf {
    output_path.with_extension(ARTIFACT_EXTENSION)
}

/// Boolean token understood by the R scripts' option parser.
pub fn bool_token(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Picks a fresh `trade_<uuid>.csv` path in `work_dir` that does not exist yet.
pub fn allocate_output_path(work_dir: &Path) -> Result<PathBuf> {
    if !work_dir.is_dir() {
        return Err(Error::Config(format!(
            "Work directory {:?} is not available",
            work_dir
        )));
    }

    loop {
        let name = format!("{}{}.{}", OUTPUT_PREFIX, Uuid::new_v4().simple(), OUTPUT_EXTENSION);
        let candidate = work_dir.join(name);
        if !candidate.exists() && !artifact_path_for(&candidate).exists() {
            return Ok(candidate);
        }
    }
}

struct ArgList(Vec<OsString>);

impl ArgList {
    fn new(script: PathBuf) -> Self {
        Self(vec![script.into_os_string()])
    }

    fn flag(&mut self, name: &str, value: impl Into<OsString>) -> &mut Self {
        self.0.push(OsString::from(name));
        self.0.push(value.into());
        self
    }

    fn optional(&mut self, name: &str, value: Option<impl Into<OsString>>) -> &mut Self {
        if let Some(value) = value {
            self.flag(name, value);
        }
        self
    }
}

pub fn build_univariate_invocation(
    config: &RunnerConfig,
    request: &UnivariateRequest,
) -> Result<Invocation> {
    request.validate()?;
    let output_path = allocate_output_path(&config.work_dir)?;

    let mut args = ArgList::new(config.univariate_script());
    args.flag("--results", request.results_csv.as_os_str())
        .flag("--log2FoldChange", &request.columns.log2_fold_change)
        .flag("--lfcSE", &request.columns.lfc_se)
        .flag("--pvalue", &request.columns.pvalue)
        .flag("--model_significant", bool_token(request.model_significant))
        .flag("--n_sample", request.n_sample.to_string())
        .flag("--seed", request.seed.to_string())
        .flag("--output", output_path.as_os_str())
        .optional("--annot_table", request.annot_table().map(Path::as_os_str))
        .optional("--genes_exclude", request.excluded_genes());

    Ok(Invocation {
        program: config.rscript.clone(),
        args: args.0,
        output_path,
    })
}

pub fn build_bivariate_invocation(
    config: &RunnerConfig,
    request: &BivariateRequest,
) -> Result<Invocation> {
    request.validate()?;
    let output_path = allocate_output_path(&config.work_dir)?;

    let mut args = ArgList::new(config.bivariate_script());
    args.flag("--results1", request.results1_csv.as_os_str())
        .flag("--results2", request.results2_csv.as_os_str())
        .flag("--log2FoldChange", &request.columns.log2_fold_change)
        .flag("--lfcSE", &request.columns.lfc_se)
        .flag("--pvalue", &request.columns.pvalue)
        .flag(
            "--estimate_sampling_covariance",
            bool_token(request.estimate_sampling_covariance),
        )
        .flag("--covariance_matrix_set", request.covariance_matrix_set.as_str())
        .flag(
            "--component_varexplained_threshold",
            request.component_varexplained_threshold.to_string(),
        )
        .flag("--weight_nocorr", request.weight_nocorr.to_string())
        .flag("--n_sample", request.n_sample.to_string())
        .flag("--seed", request.seed.to_string())
        .flag("--output", output_path.as_os_str())
        .optional("--genes_exclude", request.excluded_genes());

    Ok(Invocation {
        program: config.rscript.clone(),
        args: args.0,
        output_path,
    })
}
