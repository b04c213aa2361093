use axum::response::Json;
use lazy_static::lazy_static;
use serde_json::json;
use crate::{
    ToolDescriptor, ToolParameter, ToolsResponse,
    DEFAULT_LFCSE_COL, DEFAULT_LOG2FC_COL, DEFAULT_N_SAMPLE, DEFAULT_PVALUE_COL, DEFAULT_SEED,
    DEFAULT_VAREXPLAINED_THRESHOLD, DEFAULT_WEIGHT_NOCORR,
};

fn required(name: &'static str, kind: &'static str, description: &'static str) -> ToolParameter {
    ToolParameter { name, kind, required: true, default: None, description }
}

fn optional(
    name: &'static str,
    kind: &'static str,
    default: serde_json::Value,
    description: &'static str,
) -> ToolParameter {
    let default = if default.is_null() { None } else { Some(default) };
    ToolParameter { name, kind, required: false, default, description }
}

fn column_parameters() -> Vec<ToolParameter> {
    vec![
        optional("log2FoldChange_col", "string", json!(DEFAULT_LOG2FC_COL),
            "Column name for log2FoldChange in the results CSV."),
        optional("lfcSE_col", "string", json!(DEFAULT_LFCSE_COL),
            "Column name for log2FoldChange standard errors in the results CSV."),
        optional("pvalue_col", "string", json!(DEFAULT_PVALUE_COL),
            "Column name for unadjusted p-values in the results CSV."),
    ]
}

fn sampling_parameters() -> Vec<ToolParameter> {
    vec![
        optional("n_sample", "integer", json!(DEFAULT_N_SAMPLE),
            "Number of samples to draw from the inferred effect size distribution (0 = no sampling)."),
        optional("seed", "integer", json!(DEFAULT_SEED),
            "Random seed for reproducibility."),
    ]
}

lazy_static! {
    pub static ref TOOL_CATALOG: Vec<ToolDescriptor> = {
        let mut univariate = vec![
            required("results_csv", "path",
                "CSV of DESeq2 differential expression results with log2FoldChange, lfcSE and \
                 pvalue columns; row names hold gene identifiers."),
            optional("annot_table_csv", "path", serde_json::Value::Null,
                "CSV of binary (0/1) gene annotations for enrichment analysis; genes as rows, \
                 gene sets as columns."),
        ];
        univariate.extend(column_parameters());
        univariate.push(optional("model_significant", "boolean", json!(true),
            "Model significant genes separately and report the fraction of signal they carry."));
        univariate.push(optional("genes_exclude", "string", serde_json::Value::Null,
            "Comma-separated gene identifiers to exclude, e.g. the perturbed genes themselves."));
        univariate.extend(sampling_parameters());

        let mut bivariate = vec![
            required("results1_csv", "path",
                "CSV of the first DESeq2 results table, same format as the univariate input."),
            required("results2_csv", "path",
                "CSV of the second DESeq2 results table; gene naming must match results1_csv."),
        ];
        bivariate.extend(column_parameters());
        bivariate.push(optional("genes_exclude", "string", serde_json::Value::Null,
            "Comma-separated gene identifiers to exclude from analysis."));
        bivariate.push(optional("estimate_sampling_covariance", "boolean", json!(false),
            "Estimate sampling covariance for shared samples or controls using mashr."));
        bivariate.push(optional("covariance_matrix_set", "string", json!("combined"),
            "Basis set of covariance matrices: mash_default, adaptive_grid or combined."));
        bivariate.push(optional("component_varexplained_threshold", "number",
            json!(DEFAULT_VAREXPLAINED_THRESHOLD),
            "Variance explained threshold for retaining adaptive grid components (0-1)."));
        bivariate.push(optional("weight_nocorr", "number", json!(DEFAULT_WEIGHT_NOCORR),
            "Prior weight on the zero-correlation component (1 = no penalty, >1 penalizes correlation)."));
        bivariate.extend(sampling_parameters());

        vec![
            ToolDescriptor {
                name: "trade_univariate",
                method: "POST",
                path: "/trade/univariate",
                description: "Estimate the transcriptome-wide impact of a perturbation, the \
                    effective number of differentially expressed genes (Me) and gene-set \
                    enrichments by fitting an adaptive shrinkage model to DESeq2 results.",
                parameters: univariate,
            },
            ToolDescriptor {
                name: "trade_bivariate",
                method: "POST",
                path: "/trade/bivariate",
                description: "Estimate the correlation of differential expression effects \
                    between two perturbations with multivariate adaptive shrinkage, \
                    accounting for measurement error and optional sampling covariance.",
                parameters: bivariate,
            },
        ]
    };
}

pub async fn list_tools() -> Json<ToolsResponse> {
    Json(ToolsResponse {
        server: "TRADEtools",
        tools: TOOL_CATALOG.clone(),
    })
}
