// Submodules
pub mod common;  // Error-to-response mapping shared by handlers
pub mod health;  // Health check endpoint
pub mod tools;  // Operation catalog

// Analysis endpoints
pub mod univariate;
pub mod bivariate;

// Re-exports
pub use common::status_for;
pub use health::health_check;
pub use tools::{list_tools, TOOL_CATALOG};

pub use univariate::run_univariate;
pub use bivariate::run_bivariate;
