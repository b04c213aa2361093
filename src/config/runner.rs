use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;
use crate::{
    Error, Result,
    BIVARIATE_SCRIPT, DEFAULT_MAX_CONCURRENT, DEFAULT_RSCRIPT, DEFAULT_SCRIPT_DIR,
    UNIVARIATE_SCRIPT,
};

/// Settings for launching the external TRADEtools scripts.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Interpreter command, looked up on `PATH` when not absolute.
    pub rscript: String,
    /// Directory holding `trade_univariate.R` and `trade_bivariate.R`.
    pub script_dir: PathBuf,
    /// Directory in which per-run output files are allocated.
    pub work_dir: PathBuf,
    pub max_concurrent: usize,
    pub timeout: Option<Duration>,
    /// Check input tables for the configured columns before spawning.
    pub validate_inputs: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            rscript: DEFAULT_RSCRIPT.to_string(),
            script_dir: PathBuf::from(DEFAULT_SCRIPT_DIR),
            work_dir: env::temp_dir(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout: None,
            validate_inputs: true,
        }
    }
}

impl RunnerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from `TRADE_*` values supplied by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let max_concurrent = match lookup("TRADE_MAX_CONCURRENT") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| Error::Config(format!("Invalid TRADE_MAX_CONCURRENT: {}", raw)))?,
            None => defaults.max_concurrent,
        };

        let timeout = match lookup("TRADE_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| Error::Config(format!("Invalid TRADE_TIMEOUT_SECS: {}", raw)))?,
            )),
            None => None,
        };

        let validate_inputs = match lookup("TRADE_VALIDATE_INPUTS") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| Error::Config(format!("Invalid TRADE_VALIDATE_INPUTS: {}", raw)))?,
            None => defaults.validate_inputs,
        };

        let config = Self {
            rscript: lookup("TRADE_RSCRIPT").unwrap_or(defaults.rscript),
            script_dir: lookup("TRADE_SCRIPT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.script_dir),
            work_dir: lookup("TRADE_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            max_concurrent,
            timeout,
            validate_inputs,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rscript.trim().is_empty() {
            return Err(Error::Config("TRADE_RSCRIPT must not be empty".to_string()));
        }
        if self.max_concurrent == 0 {
            return Err(Error::Config("TRADE_MAX_CONCURRENT must be at least 1".to_string()));
        }
        if !self.work_dir.is_dir() {
            return Err(Error::Config(format!(
                "Work directory {:?} does not exist or is not a directory",
                self.work_dir
            )));
        }

        for script in [UNIVARIATE_SCRIPT, BIVARIATE_SCRIPT] {
            let path = self.script_dir.join(script);
            if !path.is_file() {
                warn!("TRADEtools script not found at {:?}", path);
            }
        }

        Ok(())
    }

    pub fn univariate_script(&self) -> PathBuf {
        self.script_dir.join(UNIVARIATE_SCRIPT)
    }

    pub fn bivariate_script(&self) -> PathBuf {
        self.script_dir.join(BIVARIATE_SCRIPT)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
