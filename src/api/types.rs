use serde::Serialize;
use crate::{BivariateResult, UnivariateResult};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub engine: EngineStatus,
}

/// Whether the external scripts can be found where the runner will look.
#[derive(Serialize)]
pub struct EngineStatus {
    pub rscript: String,
    pub univariate_script: bool,
    pub bivariate_script: bool,
}

#[derive(Debug, Serialize)]
pub struct UnivariateResponse {
    pub message: &'static str,
    pub reference: &'static str,
    #[serde(flatten)]
    pub result: UnivariateResult,
}

#[derive(Debug, Serialize)]
pub struct BivariateResponse {
    pub message: &'static str,
    pub reference: &'static str,
    #[serde(flatten)]
    pub result: BivariateResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolParameter {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ToolParameter>,
}

#[derive(Debug, Serialize)]
pub struct ToolsResponse {
    pub server: &'static str,
    pub tools: Vec<ToolDescriptor>,
}
