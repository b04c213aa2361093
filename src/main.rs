use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info};
use tradetools::{
    init_logging, serve, BivariateRequest, BivariateResponse, ColumnNames, CovarianceMatrixSet,
    RunnerConfig, TradeService, UnivariateRequest, UnivariateResponse,
    BIVARIATE_MESSAGE, DEFAULT_LFCSE_COL, DEFAULT_LOG2FC_COL, DEFAULT_PVALUE_COL,
    TRADE_REFERENCE, UNIVARIATE_MESSAGE,
};

#[derive(Debug, Parser)]
#[command(name = "tradetools")]
#[command(about = "TRADEtools analysis server and runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct ColumnArgs {
    /// Column holding log2 fold changes
    #[arg(long, default_value = DEFAULT_LOG2FC_COL)]
    log2_fold_change_col: String,

    /// Column holding log2 fold change standard errors
    #[arg(long, default_value = DEFAULT_LFCSE_COL)]
    lfc_se_col: String,

    /// Column holding unadjusted p-values
    #[arg(long, default_value = DEFAULT_PVALUE_COL)]
    pvalue_col: String,
}

impl From<ColumnArgs> for ColumnNames {
    fn from(args: ColumnArgs) -> Self {
        Self {
            log2_fold_change: args.log2_fold_change_col,
            lfc_se: args.lfc_se_col,
            pvalue: args.pvalue_col,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        #[arg(short, long, default_value = "50001")]
        port: u16,

        #[arg(short = 'b', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Run one univariate analysis and print the result as JSON
    Univariate {
        #[arg(long)]
        results_csv: PathBuf,

        #[arg(long)]
        annot_table_csv: Option<PathBuf>,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Model significant genes separately
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        model_significant: bool,

        /// Comma-separated gene identifiers to exclude
        #[arg(long)]
        genes_exclude: Option<String>,

        #[arg(long, default_value_t = 0)]
        n_sample: u32,

        #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
        seed: i64,
    },
    /// Run one bivariate analysis and print the result as JSON
    Bivariate {
        #[arg(long)]
        results1_csv: PathBuf,

        #[arg(long)]
        results2_csv: PathBuf,

        #[command(flatten)]
        columns: ColumnArgs,

        #[arg(long)]
        genes_exclude: Option<String>,

        #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
        estimate_sampling_covariance: bool,

        /// mash_default, adaptive_grid or combined
        #[arg(long, default_value = "combined")]
        covariance_matrix_set: CovarianceMatrixSet,

        #[arg(long, default_value_t = 0.0)]
        component_varexplained_threshold: f64,

        #[arg(long, default_value_t = 1.0)]
        weight_nocorr: f64,

        #[arg(long, default_value_t = 0)]
        n_sample: u32,

        #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
        seed: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables, RUST_LOG included
    dotenv::dotenv().ok();

    // Initialize logging
    init_logging();

    // Parse command line arguments
    let cli = Cli::parse();

    // The runner and its process pool are built once, before any request is served
    let config = RunnerConfig::from_env()?;
    info!(
        "Using {} with scripts in {:?}, outputs in {:?}",
        config.rscript, config.script_dir, config.work_dir
    );
    let service = Arc::new(TradeService::new(config));

    match cli.command {
        Commands::Serve { host, port } => {
            info!("Starting TRADEtools API server");
            serve(host, port, service).await?;
        }
        Commands::Univariate {
            results_csv,
            annot_table_csv,
            columns,
            model_significant,
            genes_exclude,
            n_sample,
            seed,
        } => {
            let request = UnivariateRequest {
                results_csv,
                annot_table_csv,
                columns: columns.into(),
                model_significant,
                genes_exclude,
                n_sample,
                seed,
            };

            let result = service.univariate(request).await.map_err(|e| {
                error!("Univariate analysis failed: {}", e);
                e
            })?;

            let response = UnivariateResponse {
                message: UNIVARIATE_MESSAGE,
                reference: TRADE_REFERENCE,
                result,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Bivariate {
            results1_csv,
            results2_csv,
            columns,
            genes_exclude,
            estimate_sampling_covariance,
            covariance_matrix_set,
            component_varexplained_threshold,
            weight_nocorr,
            n_sample,
            seed,
        } => {
            let request = BivariateRequest {
                results1_csv,
                results2_csv,
                columns: columns.into(),
                genes_exclude,
                estimate_sampling_covariance,
                covariance_matrix_set,
                component_varexplained_threshold,
                weight_nocorr,
                n_sample,
                seed,
            };

            let result = service.bivariate(request).await.map_err(|e| {
                error!("Bivariate analysis failed: {}", e);
                e
            })?;

            let response = BivariateResponse {
                message: BIVARIATE_MESSAGE,
                reference: TRADE_REFERENCE,
                result,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
