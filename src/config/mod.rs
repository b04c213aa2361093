mod runner;
pub use runner::*;
