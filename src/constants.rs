// Column defaults follow DESeq2::results() output
pub const DEFAULT_LOG2FC_COL: &str = "log2FoldChange";
pub const DEFAULT_LFCSE_COL: &str = "lfcSE";
pub const DEFAULT_PVALUE_COL: &str = "pvalue";

pub const DEFAULT_SEED: i64 = 42;
pub const DEFAULT_N_SAMPLE: u32 = 0;
pub const DEFAULT_WEIGHT_NOCORR: f64 = 1.0;
pub const DEFAULT_VAREXPLAINED_THRESHOLD: f64 = 0.0;

// External scripts, resolved against the configured script directory
pub const UNIVARIATE_SCRIPT: &str = "trade_univariate.R";
pub const BIVARIATE_SCRIPT: &str = "trade_bivariate.R";

pub const DEFAULT_RSCRIPT: &str = "Rscript";
pub const DEFAULT_SCRIPT_DIR: &str = "r_scripts/tradetools_intro";
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

pub const OUTPUT_PREFIX: &str = "trade_";
pub const OUTPUT_EXTENSION: &str = "csv";
pub const ARTIFACT_EXTENSION: &str = "rds";

pub const UNIVARIATE_FIELDS: [&str; 3] = ["transcriptome_wide_impact", "Me", "mean"];
pub const BIVARIATE_FIELDS: [&str; 3] = ["TI_correlation", "cor_raw", "loglik"];

pub const UNIVARIATE_MESSAGE: &str = "TRADE univariate analysis completed";
pub const BIVARIATE_MESSAGE: &str = "TRADE bivariate analysis completed";
pub const TRADE_REFERENCE: &str =
    "https://github.com/SONGDONGYUAN1994/TRADEtools/blob/main/vignettes/TRADEtools-intro.Rmd";

// Bytes of stderr kept when reporting a failed run
pub const STDERR_TAIL_BYTES: usize = 2048;
